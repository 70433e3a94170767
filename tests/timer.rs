//! Integration tests for the countdown timer.

use quiz_night::{Countdown, DEFAULT_TIMER_SECONDS};

#[test]
fn counts_down_to_zero_and_stops() {
    let mut c = Countdown::default();
    assert_eq!(c.seconds, DEFAULT_TIMER_SECONDS);
    c.start();
    for elapsed in 1..DEFAULT_TIMER_SECONDS {
        assert!(c.tick(), "stopped early after {elapsed}s");
    }
    assert!(!c.tick());
    assert_eq!(c.seconds, 0);
    assert!(!c.running);

    // Extra ticks after stopping change nothing.
    assert!(!c.tick());
    assert_eq!(c.seconds, 0);
}

#[test]
fn stop_keeps_remaining_time() {
    let mut c = Countdown::default();
    c.start();
    for _ in 0..10 {
        c.tick();
    }
    c.stop();
    assert!(!c.tick());
    assert_eq!(c.seconds, 90);

    c.start();
    c.tick();
    assert_eq!(c.seconds, 89);
}

#[test]
fn reset_restores_default_and_stops() {
    let mut c = Countdown::default();
    c.start();
    c.tick();
    c.reset();
    assert_eq!(c.seconds, 100);
    assert!(!c.running);

    for _ in 0..100 {
        c.start();
        c.tick();
    }
    assert_eq!(c.seconds, 0);
    c.reset();
    assert_eq!(c.seconds, 100);
    assert!(!c.running);
}

#[test]
fn start_at_zero_does_nothing() {
    let mut c = Countdown::new(0);
    c.start();
    assert!(!c.running);
    assert!(!c.tick());
}
