use bubble_shooter::input::{Intents, Key, KeyState};

#[test]
fn nothing_held_means_no_intents() {
    let keys = KeyState::new();
    assert_eq!(keys.intents(), Intents::default());
}

#[test]
fn held_keys_map_to_intents() {
    let mut keys = KeyState::new();
    keys.key_down(Key::ArrowLeft);
    keys.key_down(Key::Space);
    let intents = keys.intents();
    assert!(intents.move_left);
    assert!(!intents.move_right);
    assert!(intents.fire);
}

#[test]
fn key_up_clears_the_intent() {
    let mut keys = KeyState::new();
    keys.key_down(Key::ArrowRight);
    keys.key_up(Key::ArrowRight);
    assert!(!keys.intents().move_right);
    assert!(!keys.is_held(Key::ArrowRight));
}

#[test]
fn both_directions_apply_together() {
    let mut keys = KeyState::new();
    keys.key_down(Key::ArrowLeft);
    keys.key_down(Key::ArrowRight);
    let intents = keys.intents();
    assert!(intents.move_left && intents.move_right);
}

#[test]
fn unrelated_keys_are_tracked_but_ignored() {
    let mut keys = KeyState::new();
    keys.key_down(Key::Char('x'));
    assert!(keys.is_held(Key::Char('x')));
    assert_eq!(keys.intents(), Intents::default());
}

#[test]
fn repeated_key_down_is_idempotent() {
    let mut keys = KeyState::new();
    keys.key_down(Key::Space);
    keys.key_down(Key::Space);
    keys.key_up(Key::Space);
    assert!(!keys.intents().fire);
}

#[test]
fn release_all_forgets_everything() {
    let mut keys = KeyState::new();
    keys.key_down(Key::ArrowLeft);
    keys.key_down(Key::Space);
    keys.release_all();
    assert_eq!(keys.intents(), Intents::default());
}
