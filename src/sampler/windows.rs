//! Windows key-state backend
//!
//! Polls `GetAsyncKeyState`: the high bit of the returned state word is set
//! while the key is physically held, regardless of which process has focus.

use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;

use super::KeyStateSource;
use crate::registry::KeyCode;

/// Sampler backed by `GetAsyncKeyState`
pub struct AsyncKeyStateSampler;

impl AsyncKeyStateSampler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AsyncKeyStateSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStateSource for AsyncKeyStateSampler {
    fn is_pressed(&self, key: KeyCode) -> bool {
        let state = unsafe { GetAsyncKeyState(key.0 as i32) };
        (state as u16 & 0x8000) != 0
    }
}
