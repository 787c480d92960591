//! Remote resource client contract and in-memory adapters.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    future::Future,
    pin::Pin,
    rc::Rc,
};

use crate::{
    path::{join_path, last_segment, normalize_path, parent_path},
    Collection, DavError, DavResponse, EntrySpec, RequestFailure, UploadFile,
};

/// Object-safe boxed future used by [`DavClient`] async methods.
pub type DavFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Remote WebDAV resource client.
///
/// The transport (request encoding, `PROPFIND` parsing, auth) belongs to implementations. Calls
/// for different paths may overlap and must not interfere with each other.
pub trait DavClient {
    /// Lists the collection at `path`. `Ok(None)` signals that no listing could be produced.
    ///
    /// When `bypass_cache` is set, transport-level caches must not serve the response.
    fn list<'a>(
        &'a self,
        path: &'a str,
        bypass_cache: bool,
    ) -> DavFuture<'a, Result<Option<Rc<Collection>>, DavError>>;

    /// Stores `file` inside the collection at `path`.
    fn upload<'a>(
        &'a self,
        path: &'a str,
        file: &'a UploadFile,
    ) -> DavFuture<'a, Result<(), DavError>>;

    /// Moves or renames `source` to `destination`.
    fn move_resource<'a>(
        &'a self,
        source: &'a str,
        destination: &'a str,
    ) -> DavFuture<'a, Result<(), DavError>>;

    /// Deletes the resource at `path`.
    fn delete<'a>(&'a self, path: &'a str) -> DavFuture<'a, Result<(), DavError>>;

    /// Fetches the resource at `path`.
    fn get<'a>(&'a self, path: &'a str) -> DavFuture<'a, Result<Option<DavResponse>, DavError>>;

    /// Probes `uri`; the response's ok flag tells whether it is reachable.
    fn check<'a>(&'a self, uri: &'a str)
        -> DavFuture<'a, Result<Option<DavResponse>, DavError>>;

    /// Creates a collection at `path`.
    fn mkcol<'a>(&'a self, path: &'a str) -> DavFuture<'a, Result<(), DavError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op client for unsupported targets; every call fails as unavailable.
pub struct NoopDavClient;

impl NoopDavClient {
    fn unavailable(op: &str) -> DavError {
        DavError::Unavailable(op.to_string())
    }
}

impl DavClient for NoopDavClient {
    fn list<'a>(
        &'a self,
        _path: &'a str,
        _bypass_cache: bool,
    ) -> DavFuture<'a, Result<Option<Rc<Collection>>, DavError>> {
        Box::pin(async { Err(Self::unavailable("list")) })
    }

    fn upload<'a>(
        &'a self,
        _path: &'a str,
        _file: &'a UploadFile,
    ) -> DavFuture<'a, Result<(), DavError>> {
        Box::pin(async { Err(Self::unavailable("upload")) })
    }

    fn move_resource<'a>(
        &'a self,
        _source: &'a str,
        _destination: &'a str,
    ) -> DavFuture<'a, Result<(), DavError>> {
        Box::pin(async { Err(Self::unavailable("move")) })
    }

    fn delete<'a>(&'a self, _path: &'a str) -> DavFuture<'a, Result<(), DavError>> {
        Box::pin(async { Err(Self::unavailable("delete")) })
    }

    fn get<'a>(&'a self, _path: &'a str) -> DavFuture<'a, Result<Option<DavResponse>, DavError>> {
        Box::pin(async { Err(Self::unavailable("get")) })
    }

    fn check<'a>(
        &'a self,
        _uri: &'a str,
    ) -> DavFuture<'a, Result<Option<DavResponse>, DavError>> {
        Box::pin(async { Err(Self::unavailable("check")) })
    }

    fn mkcol<'a>(&'a self, _path: &'a str) -> DavFuture<'a, Result<(), DavError>> {
        Box::pin(async { Err(Self::unavailable("mkcol")) })
    }
}

#[derive(Debug)]
struct MemoryTree {
    dirs: BTreeMap<String, Vec<EntrySpec>>,
    files: HashMap<String, Vec<u8>>,
    calls: Vec<String>,
}

impl Default for MemoryTree {
    fn default() -> Self {
        let mut dirs = BTreeMap::new();
        dirs.insert("/".to_string(), Vec::new());
        Self {
            dirs,
            files: HashMap::new(),
            calls: Vec::new(),
        }
    }
}

impl MemoryTree {
    fn exists(&self, path: &str) -> bool {
        self.dirs.contains_key(path) || self.files.contains_key(path)
    }

    fn link(&mut self, path: &str, spec: EntrySpec) {
        let parent = parent_path(path);
        let siblings = self.dirs.entry(parent).or_default();
        match siblings.iter_mut().find(|entry| entry.name == spec.name) {
            Some(existing) => *existing = spec,
            None => siblings.push(spec),
        }
    }

    fn ensure_dir(&mut self, path: &str) {
        if self.dirs.contains_key(path) {
            return;
        }
        let parent = parent_path(path);
        self.ensure_dir(&parent);
        self.link(path, EntrySpec::directory(last_segment(path)));
        self.dirs.insert(path.to_string(), Vec::new());
    }

    fn insert_file(&mut self, path: &str, bytes: Vec<u8>) {
        self.link(path, EntrySpec::file(last_segment(path)));
        self.files.insert(path.to_string(), bytes);
    }

    fn remove(&mut self, path: &str) {
        let name = last_segment(path).to_string();
        if let Some(siblings) = self.dirs.get_mut(&parent_path(path)) {
            siblings.retain(|entry| entry.name != name);
        }
        let prefix = format!("{path}/");
        self.dirs
            .retain(|key, _| key != path && !key.starts_with(&prefix));
        self.files
            .retain(|key, _| key != path && !key.starts_with(&prefix));
    }

    fn relocate(&mut self, source: &str, destination: &str) {
        let prefix = format!("{source}/");
        let rebase = |key: &str| format!("{destination}{}", &key[source.len()..]);
        let is_dir = self.dirs.contains_key(source);

        let dirs: Vec<(String, Vec<EntrySpec>)> = self
            .dirs
            .iter()
            .filter(|(key, _)| key.as_str() == source || key.starts_with(&prefix))
            .map(|(key, entries)| (rebase(key), entries.clone()))
            .collect();
        let files: Vec<(String, Vec<u8>)> = self
            .files
            .iter()
            .filter(|(key, _)| key.as_str() == source || key.starts_with(&prefix))
            .map(|(key, bytes)| (rebase(key), bytes.clone()))
            .collect();

        self.remove(source);
        self.remove(destination);
        self.dirs.extend(dirs);
        self.files.extend(files);

        let name = last_segment(destination);
        let spec = if is_dir {
            EntrySpec::directory(name)
        } else {
            EntrySpec::file(name)
        };
        self.link(destination, spec);
    }
}

fn failure(method: &str, url: &str, status: u16, status_text: &str) -> DavError {
    DavError::Request(RequestFailure {
        method: method.to_string(),
        url: url.to_string(),
        status,
        status_text: status_text.to_string(),
    })
}

#[derive(Debug, Clone, Default)]
/// In-memory WebDAV store used by tests and offline demos.
///
/// Paths are normalized before lookup, so `/docs/` and `/docs` address the same collection.
/// Every call is recorded as `"<op> <path>"` for assertions.
pub struct MemoryDavClient {
    tree: Rc<RefCell<MemoryTree>>,
}

impl MemoryDavClient {
    /// Adds a directory (and any missing ancestors).
    pub fn with_directory(self, path: &str) -> Self {
        self.tree.borrow_mut().ensure_dir(&normalize_path(path));
        self
    }

    /// Adds a file (and any missing ancestor directories).
    pub fn with_file(self, path: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let path = normalize_path(path);
        {
            let mut tree = self.tree.borrow_mut();
            tree.ensure_dir(&parent_path(&path));
            tree.insert_file(&path, bytes.into());
        }
        self
    }

    /// Calls received so far, formatted as `"<op> <path>"`.
    pub fn calls(&self) -> Vec<String> {
        self.tree.borrow().calls.clone()
    }

    /// Returns `true` when a file or directory exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.tree.borrow().exists(&normalize_path(path))
    }

    fn record(&self, op: &str, path: &str) {
        self.tree.borrow_mut().calls.push(format!("{op} {path}"));
    }
}

impl DavClient for MemoryDavClient {
    fn list<'a>(
        &'a self,
        path: &'a str,
        _bypass_cache: bool,
    ) -> DavFuture<'a, Result<Option<Rc<Collection>>, DavError>> {
        Box::pin(async move {
            self.record("list", path);
            let tree = self.tree.borrow();
            Ok(tree
                .dirs
                .get(&normalize_path(path))
                .map(|entries| Collection::new(path, entries.iter().cloned())))
        })
    }

    fn upload<'a>(
        &'a self,
        path: &'a str,
        file: &'a UploadFile,
    ) -> DavFuture<'a, Result<(), DavError>> {
        Box::pin(async move {
            self.record("upload", &join_path(path, file.name()));
            let dir = normalize_path(path);
            let mut tree = self.tree.borrow_mut();
            if !tree.dirs.contains_key(&dir) {
                return Err(failure("PUT", &join_path(path, file.name()), 409, "Conflict"));
            }
            let bytes = file.payload::<Vec<u8>>().cloned().unwrap_or_default();
            tree.insert_file(&join_path(&dir, file.name()), bytes);
            Ok(())
        })
    }

    fn move_resource<'a>(
        &'a self,
        source: &'a str,
        destination: &'a str,
    ) -> DavFuture<'a, Result<(), DavError>> {
        Box::pin(async move {
            self.record("move", source);
            let from = normalize_path(source);
            let to = normalize_path(destination);
            let mut tree = self.tree.borrow_mut();
            if !tree.exists(&from) {
                return Err(failure("MOVE", source, 404, "Not Found"));
            }
            if !tree.dirs.contains_key(&parent_path(&to)) {
                return Err(failure("MOVE", source, 409, "Conflict"));
            }
            tree.relocate(&from, &to);
            Ok(())
        })
    }

    fn delete<'a>(&'a self, path: &'a str) -> DavFuture<'a, Result<(), DavError>> {
        Box::pin(async move {
            self.record("delete", path);
            let target = normalize_path(path);
            let mut tree = self.tree.borrow_mut();
            if target == "/" || !tree.exists(&target) {
                return Err(failure("DELETE", path, 404, "Not Found"));
            }
            tree.remove(&target);
            Ok(())
        })
    }

    fn get<'a>(&'a self, path: &'a str) -> DavFuture<'a, Result<Option<DavResponse>, DavError>> {
        Box::pin(async move {
            self.record("get", path);
            let tree = self.tree.borrow();
            Ok(tree
                .files
                .get(&normalize_path(path))
                .map(|bytes| DavResponse::ok(bytes.clone())))
        })
    }

    fn check<'a>(
        &'a self,
        uri: &'a str,
    ) -> DavFuture<'a, Result<Option<DavResponse>, DavError>> {
        Box::pin(async move {
            self.record("check", uri);
            let found = self.tree.borrow().exists(&normalize_path(uri));
            Ok(Some(if found {
                DavResponse::ok(Vec::new())
            } else {
                DavResponse {
                    status: 404,
                    status_text: "Not Found".to_string(),
                    body: Vec::new(),
                }
            }))
        })
    }

    fn mkcol<'a>(&'a self, path: &'a str) -> DavFuture<'a, Result<(), DavError>> {
        Box::pin(async move {
            self.record("mkcol", path);
            let target = normalize_path(path);
            let mut tree = self.tree.borrow_mut();
            if tree.exists(&target) {
                return Err(failure("MKCOL", path, 405, "Method Not Allowed"));
            }
            if !tree.dirs.contains_key(&parent_path(&target)) {
                return Err(failure("MKCOL", path, 409, "Conflict"));
            }
            tree.ensure_dir(&target);
            Ok(())
        })
    }
}
