//! The facade exposes enough to assemble and drive a page on its own.

use std::rc::Rc;
use std::time::Duration;

use festoon::headless::{RecordingChrome, RecordingMount, RecordingSurface, RecordingText};
use festoon::prelude::*;
use festoon::FixedViewport;
use pretty_assertions::assert_eq;

#[test]
fn prelude_assembles_a_page() {
    let host = Rc::new(VirtualHost::new());
    let page = Celebration::<RecordingChrome>::new(
        Collaborators {
            chrome: RecordingChrome::new(),
            surface: RecordingSurface::new(Size::new(0, 0)),
            mount: RecordingMount::new(),
            services: HostServices::from_host(host.clone(), Rc::new(SeededRandom::new(7))),
            viewport: Rc::new(FixedViewport(Size::new(800, 600))),
        },
        PageConfig::from_json(r#"{"locale": "en"}"#).unwrap(),
    )
    .unwrap();
    page.start();

    let text = RecordingText::new();
    page.stat_visible("guests", text.clone(), "2500");
    host.run_for(Duration::from_millis(2100), Duration::from_millis(16));
    assert_eq!(text.text(), "2,500");
    assert_eq!(page.field().borrow().len(), 50);
}
