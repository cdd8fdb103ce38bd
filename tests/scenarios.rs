use std::time::{Duration, Instant};

use cgmath::Point2;
use fireworks::audio::AudioUnlock;
use fireworks::{BurstParams, DisplayList, Fireworks, HostEvent, ParticleParams, Show, ShowParams};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn fireworks(seed: u64) -> Fireworks {
    Fireworks::with_rng(
        1024.0,
        768.0,
        BurstParams::default(),
        ParticleParams::default(),
        StdRng::seed_from_u64(seed),
    )
}

#[test]
fn burst_is_gone_after_one_hundred_ticks() {
    let mut fw = fireworks(2025);
    let mut surface = DisplayList::new();
    fw.spawn(100.0, 100.0);
    assert_eq!(fw.len(), 50);

    for tick in 1..=100 {
        let before: Vec<_> = fw.particles().to_vec();
        surface.reset();
        fw.tick(&mut surface);
        for p in &before {
            let expected = p.opacity - p.decay;
            let survived = fw
                .particles()
                .iter()
                .any(|q| q.decay == p.decay && q.radius == p.radius && q.velocity == p.velocity);
            assert_eq!(survived, expected > 0.0, "tick {}", tick);
        }
        assert!(fw.particles().iter().all(|p| p.opacity > 0.0));
    }
    assert!(fw.is_empty());
}

#[test]
fn opacity_follows_decay_until_culled() {
    let mut fw = fireworks(9);
    let mut surface = DisplayList::new();
    fw.spawn(0.0, 0.0);

    for n in 1..=20 {
        fw.tick(&mut surface);
        for p in fw.particles() {
            let expected = 1.0 - n as f64 * p.decay;
            assert!((p.opacity - expected).abs() < 1e-12);
        }
    }
    // Anything decaying at close to 0.03 per tick is gone by tick 34.
    for _ in 21..=34 {
        fw.tick(&mut surface);
    }
    assert!(fw.particles().iter().all(|p| p.decay < 1.0 / 34.0 + 1e-9));
}

#[test]
fn two_quick_bursts_stack_up() {
    let mut fw = fireworks(3);
    fw.spawn(10.0, 10.0);
    fw.spawn(500.0, 200.0);
    assert_eq!(fw.len(), 100);
}

#[test]
fn spawn_is_visible_from_the_next_tick() {
    let start = Instant::now();
    let params = ShowParams::default();
    let mut show = Show::mount(&params, fireworks(5), AudioUnlock::silent(), start);
    let mut surface = DisplayList::new();

    show.frame(start, &mut surface);
    assert_eq!(surface.circles().count(), 0);

    show.handle(HostEvent::Click {
        position: Point2::new(300.0, 200.0),
        surface_origin: Point2::new(0.0, 0.0),
    });
    surface.reset();
    show.frame(start + Duration::from_millis(16), &mut surface);
    assert_eq!(surface.circles().count(), 50);
}

#[test]
fn resize_mid_show_keeps_sparks_in_flight() {
    let start = Instant::now();
    let params = ShowParams::default();
    let mut show = Show::mount(&params, fireworks(6), AudioUnlock::silent(), start);
    let mut surface = DisplayList::new();

    show.handle(HostEvent::Click {
        position: Point2::new(40.0, 40.0),
        surface_origin: Point2::new(0.0, 0.0),
    });
    show.frame(start, &mut surface);
    let before = show.fireworks().particles().to_vec();

    show.handle(HostEvent::Resize {
        width: 320.0,
        height: 240.0,
    });
    assert_eq!(show.fireworks().particles(), &before[..]);
    assert_eq!(show.fireworks().width, 320.0);
    assert_eq!(show.fireworks().height, 240.0);
}

#[test]
fn teardown_is_final() {
    let start = Instant::now();
    let params = ShowParams::default();
    let mut show = Show::mount(&params, fireworks(7), AudioUnlock::silent(), start);
    let mut surface = DisplayList::new();

    show.teardown();
    show.teardown();
    assert_eq!(show.active_resources(), 0);

    for i in 1..10 {
        assert!(!show.frame(start + Duration::from_millis(1200) * i, &mut surface));
    }
    assert!(show.fireworks().is_empty());
    assert!(surface.commands().is_empty());
}
