//! Toast notification contracts and adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`ToastService`].
pub type ToastFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Visual category of a toast.
pub enum ToastKind {
    /// Failed operation.
    Error,
    /// Completed operation.
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Transient, dismissable user-facing message.
pub struct Toast {
    /// Rendered message text.
    pub content: String,
    /// Toast category.
    #[serde(rename = "type")]
    pub kind: ToastKind,
    /// Seconds after which the toast hides itself; `None` keeps it until dismissed.
    #[serde(rename = "hide", default, skip_serializing_if = "Option::is_none")]
    pub hide_after_secs: Option<u32>,
}

impl Toast {
    /// Error toast that stays until dismissed.
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: ToastKind::Error,
            hide_after_secs: None,
        }
    }

    /// Success toast hiding after `hide_after_secs`.
    pub fn success(content: impl Into<String>, hide_after_secs: u32) -> Self {
        Self {
            content: content.into(),
            kind: ToastKind::Success,
            hide_after_secs: Some(hide_after_secs),
        }
    }
}

/// Host service rendering transient notifications.
pub trait ToastService {
    /// Shows a toast.
    fn show<'a>(&'a self, toast: Toast) -> ToastFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op toast service for unsupported targets.
pub struct NoopToastService;

impl ToastService for NoopToastService {
    fn show<'a>(&'a self, _toast: Toast) -> ToastFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Toast service that records every toast in memory.
pub struct MemoryToastService {
    shown: Rc<RefCell<Vec<Toast>>>,
}

impl MemoryToastService {
    /// Toasts shown so far, oldest first.
    pub fn shown(&self) -> Vec<Toast> {
        self.shown.borrow().clone()
    }
}

impl ToastService for MemoryToastService {
    fn show<'a>(&'a self, toast: Toast) -> ToastFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.shown.borrow_mut().push(toast);
            Ok(())
        })
    }
}
