//! Confetti scheduling and teardown on a virtual host.

use std::rc::Rc;
use std::time::Duration;

use festoon_core::geometry::{Point, Size};
use festoon_core::host::{FixedViewport, HostServices};
use festoon_core::random::SeededRandom;
use festoon_core::sim::VirtualHost;
use festoon_fx::config::BurstConfig;
use festoon_fx::headless::RecordingMount;
use festoon_fx::BurstEmitter;

fn setup(seed: u64) -> (Rc<VirtualHost>, BurstEmitter<RecordingMount>) {
    let host = Rc::new(VirtualHost::new());
    let emitter = BurstEmitter::new(
        RecordingMount::new(),
        HostServices::from_host(host.clone(), Rc::new(SeededRandom::new(seed))),
        Rc::new(FixedViewport(Size::new(1920, 1080))),
        BurstConfig::default(),
    );
    (host, emitter)
}

#[test]
fn zero_count_burst_is_a_no_op() {
    let (host, emitter) = setup(1);
    assert_eq!(emitter.burst(Point::new(100.0, 100.0), 0), 0);
    assert_eq!(host.pending_timers(), 0);
    host.drain_timers();
    assert_eq!(emitter.mount_point().total_mounted(), 0);
}

#[test]
fn fullscreen_ten_mounts_ten_then_none() {
    let (host, emitter) = setup(2);
    emitter.fullscreen(10);
    host.advance(Duration::from_millis(200));
    assert_eq!(emitter.mount_point().total_mounted(), 10);
    assert_eq!(emitter.mount_point().live(), 10);

    // The longest possible lifetime is 0.2 s delay + 3.5 s duration after the last spawn.
    host.advance(Duration::from_millis(180 + 3700));
    assert_eq!(emitter.mount_point().live(), 0);
    assert_eq!(host.pending_timers(), 0);
}

#[test]
fn each_piece_lives_exactly_its_lifetime() {
    let (host, emitter) = setup(3);
    emitter.burst(Point::new(400.0, 300.0), 1);
    host.advance(Duration::ZERO);
    let piece = emitter.mount_point().mounted()[0];
    let lifetime = piece.lifetime();

    host.advance(lifetime - Duration::from_nanos(1));
    assert_eq!(emitter.mount_point().live(), 1);
    host.advance(Duration::from_nanos(1));
    assert_eq!(emitter.mount_point().live(), 0);
}

#[test]
fn overlapping_bursts_are_independent() {
    let (host, emitter) = setup(4);
    emitter.burst(Point::new(10.0, 10.0), 20);
    host.advance(Duration::from_millis(55));
    emitter.fullscreen(15);
    host.drain_timers();
    assert_eq!(emitter.mount_point().total_mounted(), 35);
    assert_eq!(emitter.mount_point().live(), 0);
    assert_eq!(emitter.stats().live(), 0);
}
