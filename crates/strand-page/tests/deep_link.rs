//! Integration tests - Dispatch, deep linking, and collections together
//!
//! Exercises the full workflow: page -> address -> history -> collections.

use std::sync::{Arc, Mutex};

use serde_json::json;
use strand_page::{App, EventTarget, Page, handler};

#[test]
fn test_dispatch_order_and_payload_stamping() {
    let page = Page::new("/", "home");
    let address = page.address();

    let seen = Arc::new(Mutex::new(Vec::new()));
    for tag in ["first", "second", "third"] {
        let seen = seen.clone();
        address.subscribe(
            "change",
            handler(move |event| {
                seen.lock().unwrap().push((
                    tag,
                    event.event_type.clone(),
                    event.current_target,
                ));
            }),
        );
    }

    address.set_hash("/somewhere", "", None);

    let seen = seen.lock().unwrap();
    let tags: Vec<&str> = seen.iter().map(|(tag, _, _)| *tag).collect();
    assert_eq!(tags, vec!["first", "second", "third"]);
    for (_, event_type, target) in seen.iter() {
        assert_eq!(event_type, "change");
        assert_eq!(*target, address.events().target());
    }
}

#[test]
fn test_unsubscribed_handler_never_fires() {
    let page = Page::new("/", "home");
    let address = page.address();

    let count = Arc::new(Mutex::new(0));
    let c = count.clone();
    let h = handler(move |_| *c.lock().unwrap() += 1);

    address.subscribe("change", h.clone());
    address.unsubscribe("change", &h);

    address.set_hash("/somewhere", "", None);
    assert_eq!(*count.lock().unwrap(), 0);
}

#[test]
fn test_repeated_set_hash_pushes_once() {
    let page = Page::new("/", "home");
    let address = page.address();

    let changes = Arc::new(Mutex::new(0));
    let c = changes.clone();
    address.subscribe("change", handler(move |_| *c.lock().unwrap() += 1));

    assert!(address.set_hash("/reports", "Reports", None));
    assert!(!address.set_hash("/reports", "Reports", None));

    assert_eq!(page.history().lock().unwrap().length(), 2);
    assert_eq!(*changes.lock().unwrap(), 1);
}

#[test]
fn test_change_event_reports_previous_hash() {
    let page = Page::new("/", "home");
    let address = page.address();

    address.set_hash("/a", "", None);

    let previous = Arc::new(Mutex::new(None));
    let p = previous.clone();
    address.subscribe(
        "change",
        handler(move |event| *p.lock().unwrap() = event.previous_hash.clone()),
    );

    address.set_hash("/b", "", None);
    assert_eq!(previous.lock().unwrap().as_deref(), Some("/a"));
}

#[test]
fn test_hash_reflects_mounted_root() {
    let page = Page::new("/app/reports", "reports");
    let address = page.address_with_root("/app/").unwrap();

    assert_eq!(address.hash(), "/reports");
}

#[test]
fn test_back_and_forward_resync_address_state() {
    let page = Page::new("/", "home");
    let address = page.address();

    address.set_hash("/a", "", Some(json!({ "step": 1 })));
    address.set_hash("/b", "", Some(json!({ "step": 2 })));

    page.history().lock().unwrap().back();
    assert_eq!(address.hash(), "/a");
    assert_eq!(address.state(), Some(json!({ "step": 1 })));

    page.history().lock().unwrap().forward();
    assert_eq!(address.hash(), "/b");
    assert_eq!(address.state(), Some(json!({ "step": 2 })));
}

#[test]
fn test_app_lifecycle_with_collections() {
    let page = Page::new("/", "kitchen sink");
    let app = App::new(&page);

    let fired = Arc::new(Mutex::new(Vec::new()));
    let f = fired.clone();
    app.subscribe("init load", handler(move |event| {
        f.lock().unwrap().push(event.event_type.clone());
    }));

    {
        let mut document = page.document().lock().unwrap();
        let body = document.body();
        let list = document.create_element("ul", body);
        for _ in 0..4 {
            document.create_element("li", list);
        }
    }

    page.load();
    assert_eq!(*fired.lock().unwrap(), vec!["init", "load"]);

    let items = page.select("li").unwrap();
    items.add_class("row");
    assert_eq!(items.filter(".row").unwrap().len(), 4);

    items.filter(".row").unwrap().remove();
    assert!(page.select("li").unwrap().is_empty());
}
