//! Key-state sampling
//!
//! The worker asks a [`KeyStateSource`] once per key per tick whether that
//! key is currently held, as reported by the host input subsystem. There is
//! no atomic snapshot across keys: a key released between two queries within
//! the same tick can produce a false negative, which is acceptable at a
//! 10 ms tick interval.

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use self::windows::AsyncKeyStateSampler;

use crate::registry::KeyCode;

/// Capability interface over the host's "is this key currently down" query
pub trait KeyStateSource {
    fn is_pressed(&self, key: KeyCode) -> bool;
}

/// Fallback sampler for hosts without a key-state backend.
///
/// Reports every key as released, so the daemon runs but never fires.
pub struct NullSampler;

impl NullSampler {
    pub fn new() -> Self {
        tracing::warn!("no key-state backend for this host, shortcuts will never fire");
        Self
    }
}

impl Default for NullSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStateSource for NullSampler {
    fn is_pressed(&self, _key: KeyCode) -> bool {
        false
    }
}

/// Build the sampler for the current host.
#[cfg(windows)]
pub fn host_sampler() -> AsyncKeyStateSampler {
    AsyncKeyStateSampler::new()
}

/// Build the sampler for the current host.
#[cfg(not(windows))]
pub fn host_sampler() -> NullSampler {
    NullSampler::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sampler_reports_released() {
        let sampler = NullSampler;
        assert!(!sampler.is_pressed(KeyCode(0x1B)));
    }
}
