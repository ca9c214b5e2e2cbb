use space_invaders::entities::{Direction, Event};
use space_invaders::input::HeldKeys;

const WINDOW: u64 = 13;

fn keys() -> HeldKeys {
    HeldKeys::new(WINDOW, 3.0)
}

#[test]
fn first_press_moves_repeats_do_not() {
    let mut held = keys();
    assert_eq!(held.press(Direction::Left, 0), Some(Event::Move(-3.0)));
    assert_eq!(held.press(Direction::Left, 2), None);
    assert_eq!(held.press(Direction::Right, 3), Some(Event::Move(3.0)));
}

#[test]
fn quiet_key_counts_as_released() {
    // Classic terminals never send a release: the window alone stops the ship.
    let mut held = keys();
    held.press(Direction::Right, 0);
    assert!(held.expire(WINDOW).is_empty());
    assert_eq!(held.expire(WINDOW + 1), vec![Event::StopMoving(Direction::Right)]);
    // already released, nothing more to report
    assert!(held.expire(WINDOW + 50).is_empty());
}

#[test]
fn repeats_keep_key_held() {
    let mut held = keys();
    held.press(Direction::Left, 0);
    held.press(Direction::Left, 10);
    held.press(Direction::Left, 20);
    assert!(held.expire(30).is_empty());
    assert_eq!(held.expire(34), vec![Event::StopMoving(Direction::Left)]);
}

#[test]
fn release_stops_once() {
    let mut held = keys();
    held.press(Direction::Left, 0);
    assert_eq!(held.release(Direction::Left), Some(Event::StopMoving(Direction::Left)));
    assert_eq!(held.release(Direction::Left), None);
    assert!(held.expire(100).is_empty());

    // a fresh press after release moves again
    assert_eq!(held.press(Direction::Left, 101), Some(Event::Move(-3.0)));
}

#[test]
fn release_after_expiry_is_silent() {
    let mut held = keys();
    held.press(Direction::Right, 0);
    held.expire(WINDOW + 1);
    assert_eq!(held.release(Direction::Right), None);
}

#[test]
fn both_keys_expire_in_stable_order() {
    let mut held = keys();
    held.press(Direction::Right, 0);
    held.press(Direction::Left, 0);
    assert_eq!(
        held.expire(WINDOW + 1),
        vec![Event::StopMoving(Direction::Left), Event::StopMoving(Direction::Right)]
    );
}
