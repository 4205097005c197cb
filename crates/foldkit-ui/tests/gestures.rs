mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use common::{approx, list, settle};
use foldkit_ui::animation::Motion;
use foldkit_ui::prelude::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

// ── snap ──────────────────────────────────────────────────────────────────

#[test]
fn release_inside_slop_snaps_to_nearest_item() {
    let mut l = list(3, 100, 300);
    l.set_angle(100.0, false);

    l.on_pointer_event(&PointerEvent::down(50.0, 150.0, 0));
    l.on_pointer_event(&PointerEvent::moved(50.0, 155.0, 16));
    l.on_pointer_event(&PointerEvent::up(50.0, 155.0, 32));
    assert_eq!(l.angle(), 100.0);

    match l.motion() {
        Motion::Tween(tween) => {
            assert_eq!(tween.target(), 180.0);
            assert_eq!(tween.duration(), ms(267));
        }
        other => panic!("expected a snap tween, got {other:?}"),
    }

    settle(&mut l);
    assert_eq!(l.angle(), 180.0);
    assert_eq!(l.position(), 1);
}

#[test]
fn slow_drag_release_settles_on_a_multiple_of_180() {
    let mut l = list(3, 100, 400);
    l.on_pointer_event(&PointerEvent::down(50.0, 300.0, 0));
    l.on_pointer_event(&PointerEvent::moved(50.0, 250.0, 16));
    l.on_pointer_event(&PointerEvent::moved(50.0, 200.0, 500));
    assert!(approx(l.angle(), 180.0 * 1.33 * 50.0 / 400.0));

    // the pointer rested long enough for the release velocity to vanish
    l.on_pointer_event(&PointerEvent::up(50.0, 200.0, 1000));
    assert!(!l.motion().is_flinging());

    let frames = settle(&mut l);
    assert_eq!(l.angle(), 0.0);
    // 600 ms · 29.9° / 180° ≈ 100 ms of 16 ms frames
    assert!(frames <= 8, "{frames} frames");
}

#[test]
fn cancel_snaps_like_release() {
    let mut l = list(3, 100, 400);
    l.on_pointer_event(&PointerEvent::down(50.0, 300.0, 0));
    l.on_pointer_event(&PointerEvent::moved(50.0, 250.0, 16));
    l.on_pointer_event(&PointerEvent::moved(50.0, 50.0, 500));
    assert!(l.angle() > 90.0);

    l.on_pointer_event(&PointerEvent::cancel(50.0, 50.0, 1000));
    settle(&mut l);
    assert_eq!(l.angle(), 180.0);
}

// ── fling ─────────────────────────────────────────────────────────────────

#[test]
fn fling_runs_to_the_item_boundary() {
    let mut l = list(3, 100, 200);
    l.set_angle(50.0, false);

    assert!(l.fling(-200.0 * 10.0));
    assert!(l.motion().is_flinging());
    assert!(l.tick(ms(100)));
    assert_eq!(l.angle(), 180.0);
    assert!(!l.is_animating());
}

#[test]
fn fling_on_an_item_is_rejected() {
    let mut l = list(3, 100, 200);
    l.set_angle(180.0, false);
    assert!(!l.fling(-5000.0));
    assert!(!l.is_animating());
}

#[test]
fn flick_release_flings_instead_of_snapping() {
    let mut l = list(3, 100, 400);
    l.on_pointer_event(&PointerEvent::down(50.0, 300.0, 0));
    l.on_pointer_event(&PointerEvent::moved(50.0, 280.0, 16));
    l.on_pointer_event(&PointerEvent::moved(50.0, 260.0, 32));
    let dragged = l.angle();
    assert!(dragged > 0.0 && dragged < 90.0);

    l.on_pointer_event(&PointerEvent::up(50.0, 260.0, 48).with_velocity(0.0, -3000.0));
    assert!(l.motion().is_flinging());

    settle(&mut l);
    // a snap from below 90° would have gone back to 0
    assert_eq!(l.angle(), 180.0);
}

#[test]
fn fling_backwards_stops_at_lower_bound() {
    let mut l = list(4, 100, 200);
    l.set_angle(200.0, false);
    assert!(l.fling(100.0));
    settle(&mut l);
    assert_eq!(l.angle(), 180.0);
}

// ── cancellation ──────────────────────────────────────────────────────────

#[test]
fn touch_down_stops_running_animation() {
    let mut l = list(5, 100, 400);
    l.scroll_to_position(4);
    l.tick(ms(16));
    l.tick(ms(16));
    let angle = l.angle();
    assert!(angle > 0.0);

    l.on_pointer_event(&PointerEvent::down(50.0, 100.0, 100));
    assert!(!l.is_animating());
    assert!(!l.tick(ms(16)));
    assert_eq!(l.angle(), angle);
}

#[test]
fn new_tween_replaces_fling() {
    let mut l = list(5, 100, 400);
    l.set_angle(90.0, false);
    assert!(l.fling(-4000.0));
    l.scroll_to_position(3);
    assert!(l.motion().is_tweening());
    settle(&mut l);
    assert_eq!(l.angle(), 540.0);
}

#[test]
fn duplicated_event_is_applied_once() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut l = list(3, 100, 400);
    let sink = calls.clone();
    l.set_on_fold_rotation(move |angle, from_user| sink.borrow_mut().push((angle, from_user)));

    let down = PointerEvent::down(50.0, 300.0, 0);
    let cross = PointerEvent::moved(50.0, 280.0, 16);
    let drag = PointerEvent::moved(50.0, 200.0, 32);
    for ev in [down, down, cross, cross, drag, drag] {
        l.on_pointer_event(&ev);
    }

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|&(_, from_user)| from_user));
}
