//! Listing, upload and response models shared across host contracts and implementations.

use std::{
    any::Any,
    collections::HashSet,
    fmt,
    rc::{Rc, Weak},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Owned description of one remote object, used to build a [`Collection`].
pub struct EntrySpec {
    /// Path segment naming the object inside its collection.
    pub name: String,
    /// Whether the object is a collection (directory) itself.
    pub is_directory: bool,
}

impl EntrySpec {
    /// Describes a plain file.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
        }
    }

    /// Describes a directory.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
        }
    }
}

#[derive(Debug, Clone)]
/// One remote object inside a fetched [`Collection`].
///
/// Entries are immutable once fetched. The back-reference to the owning collection is weak and
/// only used for lookup; a modified entry is replaced by building a new collection.
pub struct Entry {
    name: String,
    is_directory: bool,
    collection: Weak<Collection>,
}

impl Entry {
    /// Path segment naming the entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the entry is a directory.
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Upgrades the weak back-reference to the owning collection, if it is still alive.
    pub fn collection(&self) -> Option<Rc<Collection>> {
        self.collection.upgrade()
    }

    /// Returns `true` when this entry was fetched as part of `collection`.
    pub fn belongs_to(&self, collection: &Rc<Collection>) -> bool {
        Weak::ptr_eq(&self.collection, &Rc::downgrade(collection))
    }

    /// Owned description of this entry, detached from its collection.
    pub fn spec(&self) -> EntrySpec {
        EntrySpec {
            name: self.name.clone(),
            is_directory: self.is_directory,
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.is_directory == other.is_directory
    }
}

impl Eq for Entry {}

#[derive(Debug)]
/// Ordered listing of the entries stored under one remote path.
///
/// The path is the cache key. Collections are replaced wholesale on refresh and never patched in
/// place.
pub struct Collection {
    path: String,
    entries: Vec<Entry>,
}

impl Collection {
    /// Builds a shared collection whose entries point back at it.
    ///
    /// Entry names are unique within a collection; when `specs` repeats a name the first
    /// occurrence wins.
    pub fn new(path: impl Into<String>, specs: impl IntoIterator<Item = EntrySpec>) -> Rc<Self> {
        let path = path.into();
        let mut seen = HashSet::new();
        let specs: Vec<EntrySpec> = specs
            .into_iter()
            .filter(|spec| seen.insert(spec.name.clone()))
            .collect();

        Rc::new_cyclic(|weak| Self {
            path,
            entries: specs
                .into_iter()
                .map(|spec| Entry {
                    name: spec.name,
                    is_directory: spec.is_directory,
                    collection: weak.clone(),
                })
                .collect(),
        })
    }

    /// Remote path this collection lists.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Entries in listing order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds an entry by name.
    pub fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Owned descriptions of every entry, in order.
    pub fn specs(&self) -> Vec<EntrySpec> {
        self.entries.iter().map(Entry::spec).collect()
    }

    /// Builds a replacement collection with `spec` swapped in for the entry named `name`, or
    /// appended when no such entry exists.
    pub fn replacing_entry(&self, name: &str, spec: EntrySpec) -> Rc<Self> {
        let mut specs = self.specs();
        match specs.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => *existing = spec,
            None => specs.push(spec),
        }
        Self::new(self.path.clone(), specs)
    }
}

#[derive(Clone)]
/// File selected for upload: a name plus an opaque payload only the remote client interprets.
pub struct UploadFile {
    name: String,
    mime_type: String,
    size: u64,
    payload: Rc<dyn Any>,
}

impl UploadFile {
    /// Wraps an opaque payload (a browser `File`, a byte buffer, ...).
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        payload: Rc<dyn Any>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            payload,
        }
    }

    /// Wraps an in-memory byte buffer.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self::new(name, "application/octet-stream", size, Rc::new(bytes))
    }

    /// File name, used as the target resource name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Downcasts the payload to a concrete type.
    pub fn payload<T: 'static>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Response returned by `get`/`check` remote operations.
pub struct DavResponse {
    /// HTTP status code.
    pub status: u16,
    /// HTTP status text.
    pub status_text: String,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl DavResponse {
    /// Builds a `200 OK` response carrying `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    /// Whether the status is in the `2xx` range.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as UTF-8 text, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A request that reached the server and failed.
pub struct RequestFailure {
    /// HTTP method, e.g. `PUT` or `MOVE`.
    pub method: String,
    /// Request URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// HTTP status text.
    pub status_text: String,
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} failed: {} ({})",
            self.method, self.url, self.status_text, self.status
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors reported by a [`crate::DavClient`].
pub enum DavError {
    /// Transport/protocol failure with server response details.
    #[error("{0}")]
    Request(RequestFailure),
    /// The client cannot serve requests in this environment.
    #[error("webdav client unavailable: {0}")]
    Unavailable(String),
}
