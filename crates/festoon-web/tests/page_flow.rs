//! End-to-end page behavior on a virtual host with recording collaborators.

use std::rc::Rc;
use std::time::Duration;

use festoon_core::geometry::{Point, Size};
use festoon_core::host::{FixedViewport, HostServices};
use festoon_core::key_sequence::KONAMI_CODE;
use festoon_core::random::SeededRandom;
use festoon_core::sim::{FRAME_INTERVAL, VirtualHost};
use festoon_fx::headless::{RecordingMount, RecordingSurface, RecordingText};
use festoon_fx::{ConfigError, CounterPhase, Surface};
use festoon_web::embellish::{PRESS_TRANSFORM, RELEASE_TRANSFORM};
use festoon_web::headless::{RecordingChrome, RecordingStyle};
use festoon_web::{Celebration, Collaborators, PageConfig, Theme};
use pretty_assertions::assert_eq;

fn page_with(config: PageConfig) -> (Rc<VirtualHost>, Celebration<RecordingChrome>) {
    let host = Rc::new(VirtualHost::new());
    let parts = Collaborators {
        chrome: RecordingChrome::new(),
        surface: RecordingSurface::new(Size::new(0, 0)),
        mount: RecordingMount::new(),
        services: HostServices::from_host(host.clone(), Rc::new(SeededRandom::new(18))),
        viewport: Rc::new(FixedViewport(Size::new(1280, 720))),
    };
    let page = Celebration::new(parts, config).unwrap();
    (host, page)
}

fn page() -> (Rc<VirtualHost>, Celebration<RecordingChrome>) {
    page_with(PageConfig {
        locale: Some("en-US".to_owned()),
        ..PageConfig::default()
    })
}

#[test]
fn surface_is_sized_to_viewport_before_particles_spawn() {
    let (_, page) = page();
    let field = page.field().borrow();
    assert_eq!(field.surface().size(), Size::new(1280, 720));
    assert!(field
        .particles()
        .iter()
        .all(|p| Size::new(1280, 720).contains(p.position)));
}

#[test]
fn start_runs_particles_every_frame_and_only_once() {
    let (host, page) = page();
    page.start();
    page.start();
    assert_eq!(host.pending_frames(), 1);
    host.run_for(Duration::from_millis(160), FRAME_INTERVAL);
    assert_eq!(page.field().borrow().frames(), 11);
}

#[test]
fn welcome_greeting_is_queued_for_one_second() {
    let (host, page) = page();
    page.start();
    assert_eq!(host.pending_timers(), 1);
    host.advance(Duration::from_millis(999));
    assert_eq!(host.timers_fired(), 0);
    host.advance(Duration::from_millis(1));
    assert_eq!(host.timers_fired(), 1);
}

#[test]
fn celebrate_showers_and_vibrates() {
    let (host, page) = page();
    assert_eq!(page.celebrate(), &[50, 30, 50]);
    host.advance(Duration::from_secs(3));
    assert_eq!(page.confetti().mount_point().total_mounted(), 150);
    host.drain_timers();
    assert_eq!(page.confetti().mount_point().live(), 0);
}

#[test]
fn button_press_springs_back() {
    let (host, page) = page();
    let button = RecordingStyle::new();
    page.press(button.clone());
    assert_eq!(button.get("transform").as_deref(), Some(PRESS_TRANSFORM));
    host.advance(Duration::from_millis(99));
    assert_eq!(button.get("transform").as_deref(), Some(PRESS_TRANSFORM));
    host.advance(Duration::from_millis(1));
    assert_eq!(button.get("transform").as_deref(), Some(RELEASE_TRANSFORM));
}

#[test]
fn theme_toggles_back_and_forth() {
    let (_, page) = page();
    assert_eq!(page.theme(), Theme::Dark);
    assert_eq!(page.toggle_theme(), Theme::Light);
    assert_eq!(page.theme().toggle_label(), "🌙 Dark Mode");
    assert_eq!(page.toggle_theme(), Theme::Dark);
}

#[test]
fn stat_counts_once_per_id() {
    let (host, page) = page();
    let text = RecordingText::new();
    assert!(page.stat_visible("years", text.clone(), "18"));
    assert!(!page.stat_visible("years", RecordingText::new(), "999"));
    host.run_for(Duration::from_millis(2100), FRAME_INTERVAL);
    assert_eq!(text.text(), "18");
    let counter = page.stat("years").unwrap();
    assert_eq!(counter.phase(), CounterPhase::Finished);

    assert!(!page.stat_visible("years", text.clone(), "18"));
    host.run_for(Duration::from_millis(100), FRAME_INTERVAL);
    assert_eq!(text.text(), "18");
}

#[test]
fn big_stats_use_locale_grouping() {
    let (host, page) = page_with(PageConfig {
        locale: Some("de-DE".to_owned()),
        ..PageConfig::default()
    });
    let text = RecordingText::new();
    page.stat_visible("minutes", text.clone(), "9460800");
    host.run_for(Duration::from_millis(2100), FRAME_INTERVAL);
    assert_eq!(text.text(), "9.460.800");
}

#[test]
fn literal_stat_is_shown_verbatim() {
    let (host, page) = page();
    let text = RecordingText::new();
    page.stat_visible("love", text.clone(), "∞");
    assert_eq!(text.text(), "∞");
    assert_eq!(host.pending_frames(), 0);
}

#[test]
fn sections_fade_in_once() {
    let (_, page) = page();
    assert_eq!(page.section_opacity("hero"), 0.8);
    assert!(page.section_visible("hero"));
    assert!(!page.section_visible("hero"));
    assert_eq!(page.section_opacity("hero"), 1.0);
}

#[test]
fn parallax_uses_configured_factor() {
    let (_, page) = page();
    assert_eq!(page.parallax(120.0), "60px 60px");
}

#[test]
fn konami_code_triggers_birthday_mode() {
    let (host, page) = page();
    let (last, prefix) = KONAMI_CODE.split_last().unwrap();
    for key in prefix {
        assert!(!page.key_down(key));
    }
    assert!(page.key_down(last));
    assert_eq!(page.birthdays(), 1);
    assert_eq!(page.chrome().pulses(), 1);
    assert_eq!(page.chrome().flashes_live(), 1);

    host.advance(Duration::from_millis(500));
    assert_eq!(page.chrome().flashes_live(), 0);
    host.advance(Duration::from_secs(6));
    assert_eq!(page.confetti().mount_point().total_mounted(), 300);
}

#[test]
fn stray_key_restarts_the_sequence() {
    let (_, page) = page();
    for key in ["ArrowUp", "ArrowUp", "ArrowDown", "x"] {
        page.key_down(key);
    }
    for key in KONAMI_CODE {
        page.key_down(key);
    }
    assert_eq!(page.birthdays(), 1);
}

#[test]
fn extra_leading_up_does_not_trigger_birthday_mode() {
    let (_, page) = page();
    let keys = std::iter::once("ArrowUp").chain(KONAMI_CODE);
    let fired = keys.map(|key| page.key_down(key)).any(|done| done);
    assert!(!fired);
    assert_eq!(page.birthdays(), 0);
}

#[test]
fn resize_follows_viewport() {
    let (_, page) = page();
    page.field()
        .borrow_mut()
        .surface_mut()
        .set_size(Size::new(10, 10));
    page.resize();
    assert_eq!(page.field().borrow().surface().size(), Size::new(1280, 720));
}

#[test]
fn burst_clicks_spawn_around_pointer() {
    let (host, page) = page();
    assert_eq!(page.burst(Point::new(640.0, 360.0), 0), 0);
    assert_eq!(page.burst(Point::new(640.0, 360.0), 25), 25);
    host.advance(Duration::from_millis(250));
    assert_eq!(page.confetti().mount_point().total_mounted(), 25);
}

#[test]
fn invalid_config_is_rejected() {
    let host = Rc::new(VirtualHost::new());
    let parts = Collaborators {
        chrome: RecordingChrome::new(),
        surface: RecordingSurface::new(Size::new(0, 0)),
        mount: RecordingMount::new(),
        services: HostServices::from_host(host, Rc::new(SeededRandom::new(1))),
        viewport: Rc::new(FixedViewport(Size::new(10, 10))),
    };
    let mut config = PageConfig::default();
    config.effects.counter.duration_ms = 0;
    assert_eq!(
        Celebration::new(parts, config).err(),
        Some(ConfigError::ZeroDuration("counter.duration_ms"))
    );
}
