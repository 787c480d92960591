//! User confirmation contracts.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`ConfirmService`].
pub type ConfirmFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service asking the user a yes/no question.
pub trait ConfirmService {
    /// Resolves to `true` when the user accepts `message`.
    fn confirm<'a>(&'a self, message: &'a str) -> ConfirmFuture<'a, bool>;
}

#[derive(Debug, Clone)]
/// Confirmation service answering every question the same way, recording the questions asked.
pub struct FixedConfirmService {
    answer: bool,
    asked: Rc<RefCell<Vec<String>>>,
}

impl FixedConfirmService {
    /// Service that always answers `answer`.
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Rc::default(),
        }
    }

    /// Questions asked so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl ConfirmService for FixedConfirmService {
    fn confirm<'a>(&'a self, message: &'a str) -> ConfirmFuture<'a, bool> {
        Box::pin(async move {
            self.asked.borrow_mut().push(message.to_string());
            self.answer
        })
    }
}
