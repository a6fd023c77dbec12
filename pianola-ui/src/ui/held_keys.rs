use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::KeyCode;

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    last_event: Instant,
    /// Past the initial delay: auto-repeat has started
    repeating: bool,
}

/// Repeat detection for terminals that only send presses.
///
/// Holding a key makes the OS send one press, a pause of roughly half a
/// second, then a fast stream of repeats. The first event after a fresh
/// press counts as a repeat if it arrives within `initial_delay`; later
/// ones must arrive within `window` of the previous event. The cost is
/// that two taps of the same key closer than `initial_delay` read as one.
/// Terminals with the kitty keyboard protocol report repeats themselves
/// and skip this.
pub struct HeldKeys {
    active_keys: HashMap<KeyCode, HeldKey>,
    window: Duration,
    initial_delay: Duration,
}

impl HeldKeys {
    pub fn new(window: Duration, initial_delay: Duration) -> Self {
        Self {
            active_keys: HashMap::new(),
            window,
            initial_delay: initial_delay.max(window),
        }
    }

    fn limit(&self, held: &HeldKey) -> Duration {
        if held.repeating {
            self.window
        } else {
            self.initial_delay
        }
    }

    /// Record an event for `key`. Returns true if it continues a hold.
    pub fn key_pressed(&mut self, key: KeyCode, now: Instant) -> bool {
        let Some(held) = self.active_keys.get(&key).copied() else {
            self.active_keys.insert(key, HeldKey { last_event: now, repeating: false });
            return false;
        };
        let is_repeat = now.duration_since(held.last_event) <= self.limit(&held);
        self.active_keys.insert(key, HeldKey { last_event: now, repeating: is_repeat });
        is_repeat
    }

    /// Forget keys that have gone quiet for longer than their phase allows.
    /// Returns the released keys.
    pub fn check_releases(&mut self, now: Instant) -> Vec<KeyCode> {
        let mut released = Vec::new();
        let (window, initial_delay) = (self.window, self.initial_delay);
        self.active_keys.retain(|&key, held| {
            let limit = if held.repeating { window } else { initial_delay };
            if now.duration_since(held.last_event) > limit {
                released.push(key);
                false
            } else {
                true
            }
        });
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(150);
    const INITIAL: Duration = Duration::from_millis(600);
    const SPACE: KeyCode = KeyCode::Char(' ');

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn first_press_is_fresh() {
        let mut keys = HeldKeys::new(WINDOW, INITIAL);
        assert!(!keys.key_pressed(SPACE, Instant::now()));
    }

    #[test]
    fn os_autorepeat_is_one_hold() {
        let mut keys = HeldKeys::new(WINDOW, INITIAL);
        let t0 = Instant::now();
        assert!(!keys.key_pressed(SPACE, t0));
        // Typical OS pattern: 500 ms pause, then a repeat every 33 ms
        let mut t = t0 + ms(500);
        while t < t0 + ms(1500) {
            assert!(keys.key_pressed(SPACE, t));
            t += ms(33);
        }
    }

    #[test]
    fn repeat_stream_uses_short_window() {
        let mut keys = HeldKeys::new(WINDOW, INITIAL);
        let t0 = Instant::now();
        keys.key_pressed(SPACE, t0);
        assert!(keys.key_pressed(SPACE, t0 + ms(500)));
        // Once repeating, a pause longer than the window is a new press
        assert!(!keys.key_pressed(SPACE, t0 + ms(900)));
    }

    #[test]
    fn keys_are_independent() {
        let mut keys = HeldKeys::new(WINDOW, INITIAL);
        let t0 = Instant::now();
        keys.key_pressed(SPACE, t0);
        assert!(!keys.key_pressed(KeyCode::Enter, t0 + ms(30)));
        assert!(keys.key_pressed(SPACE, t0 + ms(60)));
    }

    #[test]
    fn press_after_initial_delay_is_fresh() {
        let mut keys = HeldKeys::new(WINDOW, INITIAL);
        let t0 = Instant::now();
        keys.key_pressed(SPACE, t0);
        assert!(!keys.key_pressed(SPACE, t0 + ms(700)));
    }

    #[test]
    fn initial_delay_never_shorter_than_window() {
        let mut keys = HeldKeys::new(WINDOW, ms(20));
        let t0 = Instant::now();
        keys.key_pressed(SPACE, t0);
        assert!(keys.key_pressed(SPACE, t0 + ms(100)));
    }

    #[test]
    fn releases_follow_phase() {
        let mut keys = HeldKeys::new(WINDOW, INITIAL);
        let t0 = Instant::now();
        keys.key_pressed(KeyCode::Up, t0);
        assert!(keys.check_releases(t0 + ms(400)).is_empty());
        assert_eq!(keys.check_releases(t0 + ms(700)), vec![KeyCode::Up]);

        keys.key_pressed(SPACE, t0);
        keys.key_pressed(SPACE, t0 + ms(500));
        assert_eq!(keys.check_releases(t0 + ms(700)), vec![SPACE]);
    }
}
