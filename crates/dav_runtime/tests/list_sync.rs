mod common;

use common::{docs_tree, list_calls, Harness};
use dav_host::{Collection, EntrySpec, MemoryDavClient, UploadFile};
use dav_runtime::{DavEvent, GoRequest};
use pretty_assertions::assert_eq;

fn at_docs(client: &MemoryDavClient) -> Harness {
    let mut h = Harness::new(client, "/");
    h.trigger(DavEvent::Go(GoRequest::to("/docs")));
    h.settle();
    h
}

#[test]
fn revisiting_a_path_is_served_from_cache() {
    let client = docs_tree();
    let mut h = at_docs(&client);

    h.trigger(DavEvent::Go(GoRequest::to("/")));
    h.settle();
    h.trigger(DavEvent::Go(GoRequest::to("/docs/")));
    h.settle();

    assert_eq!(list_calls(&client, "/docs"), 1);
    assert_eq!(list_calls(&client, "/docs/"), 0);
    assert_eq!(h.surface.rows(), vec!["a.txt".to_string()]);
}

#[test]
fn bypassing_the_cache_fetches_again() {
    let client = docs_tree();
    let mut h = at_docs(&client);

    h.trigger(DavEvent::Go(GoRequest::to("/docs").bypassing_cache()));
    h.settle();

    assert_eq!(list_calls(&client, "/docs"), 2);
}

#[test]
fn upload_into_the_current_path_refreshes_it() {
    let client = docs_tree();
    let mut h = at_docs(&client);

    h.trigger(DavEvent::Upload {
        path: "/docs".to_string(),
        file: UploadFile::from_bytes("new.txt", b"fresh".to_vec()),
    });
    h.settle();

    assert_eq!(
        client.calls(),
        vec![
            "list /docs".to_string(),
            "list /docs".to_string(),
            "upload /docs/new.txt".to_string(),
            "list /docs".to_string(),
        ]
    );
    assert_eq!(
        h.surface.rows(),
        vec!["a.txt".to_string(), "new.txt".to_string()]
    );
    assert_eq!(
        h.toast_texts(),
        vec!["'new.txt' has been successfully uploaded.".to_string()]
    );
}

#[test]
fn refresh_after_upload_keeps_history_on_the_shown_path() {
    let client = docs_tree();
    let mut h = at_docs(&client);
    h.trigger(DavEvent::Go(GoRequest::to("/")));
    h.settle();
    h.trigger(DavEvent::Go(GoRequest::to("/docs/")));
    h.settle();

    h.trigger(DavEvent::Upload {
        path: "/docs/".to_string(),
        file: UploadFile::from_bytes("new.txt", b"fresh".to_vec()),
    });
    h.settle();

    assert_eq!(
        h.history.entries(),
        vec![
            "/".to_string(),
            "/docs".to_string(),
            "/".to_string(),
            "/docs/".to_string(),
        ]
    );
    assert_eq!(
        h.surface.rows(),
        vec!["a.txt".to_string(), "new.txt".to_string()]
    );
}

#[test]
fn mutations_elsewhere_evict_without_refreshing() {
    let client = docs_tree();
    let mut h = at_docs(&client);
    h.trigger(DavEvent::Go(GoRequest::to("/archive")));
    h.settle();
    h.trigger(DavEvent::Go(GoRequest::to("/docs")));
    h.settle();
    assert_eq!(list_calls(&client, "/archive"), 1);

    h.trigger(DavEvent::MkcolSuccess {
        path: "/archive/2024/".to_string(),
    });
    h.settle();

    assert_eq!(list_calls(&client, "/docs"), 1);
    assert!(h.session.list().cached("/archive").is_none());
    assert!(h.session.list().cached("/docs").is_some());
}

#[test]
fn entry_update_rerenders_only_its_own_collection() {
    let client = docs_tree();
    let h = at_docs(&client);
    let current = h.session.list().current().expect("rendered");
    let entry = current.entries()[0].clone();

    let foreign = Collection::new("/docs", [EntrySpec::file("a.txt")]);
    h.trigger(DavEvent::EntryUpdate {
        entry: foreign.entries()[0].clone(),
        replacement: Some(EntrySpec::file("ignored.txt")),
    });
    assert_eq!(h.surface.rows(), vec!["a.txt".to_string()]);

    h.trigger(DavEvent::EntryUpdate {
        entry,
        replacement: Some(EntrySpec::file("renamed.txt")),
    });
    assert_eq!(h.surface.rows(), vec!["renamed.txt".to_string()]);
    assert_eq!(
        h.session
            .list()
            .cached("/docs")
            .map(|collection| collection.specs()),
        Some(vec![EntrySpec::file("renamed.txt")])
    );
}

#[test]
fn collection_update_replaces_the_listing_at_the_same_path() {
    let client = docs_tree();
    let h = at_docs(&client);

    h.trigger(DavEvent::CollectionUpdate {
        collection: Collection::new("/elsewhere", [EntrySpec::file("x")]),
    });
    assert_eq!(h.surface.rows(), vec!["a.txt".to_string()]);

    h.trigger(DavEvent::CollectionUpdate {
        collection: Collection::new("/docs/", [EntrySpec::file("z.txt")]),
    });
    assert_eq!(h.surface.rows(), vec!["z.txt".to_string()]);
}

#[test]
fn create_directory_makes_a_collection_in_the_current_path() {
    let client = docs_tree();
    let mut h = at_docs(&client);

    h.trigger(DavEvent::CreateDirectory {
        name: "   ".to_string(),
    });
    h.settle();
    assert!(!client.calls().iter().any(|call| call.starts_with("mkcol")));

    h.trigger(DavEvent::CreateDirectory {
        name: " photos ".to_string(),
    });
    h.settle();

    assert!(client.calls().contains(&"mkcol /docs/photos/".to_string()));
    assert!(client.contains("/docs/photos"));
    assert_eq!(list_calls(&client, "/docs"), 2);
    assert_eq!(
        h.toast_texts(),
        vec!["'photos' has been created.".to_string()]
    );
}

#[test]
fn arrow_keys_move_focus_over_rendered_rows() {
    let client = docs_tree().with_file("/docs/b.txt", "");
    let h = at_docs(&client);

    assert!(h.session.keyboard().handle_key("ArrowDown"));
    assert!(h.session.keyboard().handle_key("ArrowDown"));
    assert!(h.session.keyboard().handle_key("ArrowDown"));
    assert_eq!(h.surface.focused.get(), Some(1));

    assert!(h.session.keyboard().handle_key("ArrowUp"));
    assert_eq!(h.surface.focused.get(), Some(0));
    assert!(!h.session.keyboard().handle_key("Tab"));
}
