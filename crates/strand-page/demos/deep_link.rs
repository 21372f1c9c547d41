//! Example: Deep-linked navigation over a page

use serde_json::json;
use strand_page::{App, EventTarget, Page, handler};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let page = Page::new("/", "strand demo");
    let app = App::new(&page);
    app.subscribe("init", handler(|_| println!("app ready")));
    page.load();

    // Build a small menu and mark the second entry.
    {
        let mut document = page.document().lock().unwrap();
        let body = document.body();
        let menu = document.create_element("ul", body);
        for _ in 0..3 {
            document.create_element("li", menu);
        }
    }
    let items = page.select("li").unwrap();
    items.add_class("menu-item");
    items.css(&[("height", "24px")]);
    println!("menu has {} item(s)", items.len());

    // Deep-link into an article and report the transition.
    let address = page.address();
    address.subscribe(
        "change",
        handler(|event| {
            println!(
                "navigated away from {}",
                event.previous_hash.as_deref().unwrap_or("/")
            );
        }),
    );

    address.set_hash("/articles/42", "Article 42", Some(json!({ "article": 42 })));
    println!("current hash: {}", address.hash());

    // Back out again; the address resynchronizes from the history.
    page.history().lock().unwrap().back();
    println!("after back: {}", address.hash());
}
