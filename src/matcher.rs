//! Shortcut matching
//!
//! A shortcut matches a tick iff every key in its key set is reported
//! pressed by the sampler on that tick. Matching is a pure conjunction:
//! no ordering or timing relationship between the individual key-downs is
//! required beyond being observed within the same tick.

use crate::registry::{Shortcut, ShortcutRegistry};
use crate::sampler::KeyStateSource;

/// Check whether every key of one shortcut is currently held.
///
/// Keys are sampled one at a time; registry construction guarantees the key
/// set is non-empty.
pub fn matches<S: KeyStateSource>(sampler: &S, shortcut: &Shortcut) -> bool {
    shortcut.keys.iter().all(|&key| sampler.is_pressed(key))
}

/// Evaluate every registered shortcut against the current sample.
///
/// Returns the indices of matched shortcuts in registration order. All
/// shortcuts are evaluated; there is no early exit on first match.
pub fn evaluate<S: KeyStateSource>(sampler: &S, registry: &ShortcutRegistry) -> Vec<usize> {
    registry
        .shortcuts()
        .iter()
        .enumerate()
        .filter(|(_, shortcut)| matches(sampler, shortcut))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{HttpMethod, KeyCode};
    use std::collections::HashSet;

    /// Sampler with a fixed set of held keys
    struct FakeSampler {
        held: HashSet<u16>,
    }

    impl FakeSampler {
        fn holding(keys: &[u16]) -> Self {
            Self {
                held: keys.iter().copied().collect(),
            }
        }
    }

    impl KeyStateSource for FakeSampler {
        fn is_pressed(&self, key: KeyCode) -> bool {
            self.held.contains(&key.0)
        }
    }

    fn shortcut(keys: &[u16]) -> Shortcut {
        Shortcut {
            keys: keys.iter().map(|&k| KeyCode(k)).collect(),
            url: "http://x/y".to_string(),
            method: HttpMethod::Post,
            headers: Vec::new(),
            alert_on_error: true,
        }
    }

    fn registry(shortcuts: Vec<Shortcut>) -> ShortcutRegistry {
        ShortcutRegistry::new(shortcuts).unwrap()
    }

    #[test]
    fn test_all_keys_held_matches() {
        let sampler = FakeSampler::holding(&[0x1A, 0x4B]);
        assert!(matches(&sampler, &shortcut(&[0x1A, 0x4B])));
    }

    #[test]
    fn test_key_order_is_irrelevant() {
        let sampler = FakeSampler::holding(&[0x4B, 0x1A]);
        assert!(matches(&sampler, &shortcut(&[0x1A, 0x4B])));
    }

    #[test]
    fn test_removing_any_key_breaks_the_match() {
        let combo = [0x1A, 0x4B, 0x57];
        for missing in combo {
            let held: Vec<u16> = combo.iter().copied().filter(|&k| k != missing).collect();
            let sampler = FakeSampler::holding(&held);
            assert!(
                !matches(&sampler, &shortcut(&combo)),
                "matched with {missing:#04X} released"
            );
        }
    }

    #[test]
    fn test_extra_held_keys_do_not_break_the_match() {
        let sampler = FakeSampler::holding(&[0x1A, 0x4B, 0x10]);
        assert!(matches(&sampler, &shortcut(&[0x1A, 0x4B])));
    }

    #[test]
    fn test_evaluate_returns_indices_in_registration_order() {
        let reg = registry(vec![
            shortcut(&[0x1A]),
            shortcut(&[0x63]),
            shortcut(&[0x1A, 0x4B]),
        ]);
        let sampler = FakeSampler::holding(&[0x1A, 0x4B]);
        assert_eq!(evaluate(&sampler, &reg), vec![0, 2]);
    }

    #[test]
    fn test_evaluate_empty_registry() {
        let reg = registry(Vec::new());
        let sampler = FakeSampler::holding(&[0x1A]);
        assert!(evaluate(&sampler, &reg).is_empty());
    }

    #[test]
    fn test_evaluate_nothing_held() {
        let reg = registry(vec![shortcut(&[0x1A])]);
        let sampler = FakeSampler::holding(&[]);
        assert!(evaluate(&sampler, &reg).is_empty());
    }
}
