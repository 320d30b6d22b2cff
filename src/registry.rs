//! Shortcut domain types
//!
//! The registry is built once by the config loader and shared read-only
//! with the worker thread for the lifetime of the process.

use std::str::FromStr;

/// Highest valid virtual-key code on the host.
pub const MAX_KEY_CODE: u16 = 0xFE;

/// A virtual-key code as reported by the host input subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u16);

impl KeyCode {
    /// Create a key code, rejecting values outside the virtual-key space.
    pub fn new(code: u16) -> Result<Self, RegistryError> {
        if code == 0 || code > MAX_KEY_CODE {
            return Err(RegistryError::KeyOutOfRange(code));
        }
        Ok(Self(code))
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

/// HTTP verb used for a webhook request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Delete,
    Head,
    Patch,
}

impl FromStr for HttpMethod {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "PATCH" => Ok(Self::Patch),
            other => Err(RegistryError::BadMethod(other.to_string())),
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
        };
        write!(f, "{s}")
    }
}

/// One registered key-combination-to-webhook binding
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Keys that must all be held for the shortcut to fire.
    /// Declaration order is kept but has no matching significance.
    pub keys: Vec<KeyCode>,
    /// Target endpoint.
    pub url: String,
    /// Verb for the request.
    pub method: HttpMethod,
    /// Extra request headers, rendered as `name: value`.
    pub headers: Vec<(String, String)>,
    /// Whether a failed dispatch is surfaced to the user.
    pub alert_on_error: bool,
}

impl Shortcut {
    /// Human-readable key combination, e.g. `A2+57`.
    pub fn combo(&self) -> String {
        let parts: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        parts.join("+")
    }
}

/// Errors raised while constructing the registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("key code {0:#04X} is outside the virtual-key range")]
    KeyOutOfRange(u16),

    #[error("unsupported HTTP method '{0}'")]
    BadMethod(String),

    #[error("shortcut #{0} has an empty key list")]
    EmptyKeys(usize),

    #[error("shortcut #{0} has an empty url")]
    EmptyUrl(usize),
}

/// Immutable, ordered collection of shortcuts.
///
/// Evaluation order is registration order; every shortcut is evaluated on
/// every tick, so order carries no priority.
#[derive(Debug)]
pub struct ShortcutRegistry {
    shortcuts: Vec<Shortcut>,
}

impl ShortcutRegistry {
    /// Build a registry, rejecting invalid shortcuts up front.
    pub fn new(shortcuts: Vec<Shortcut>) -> Result<Self, RegistryError> {
        for (index, shortcut) in shortcuts.iter().enumerate() {
            if shortcut.keys.is_empty() {
                return Err(RegistryError::EmptyKeys(index));
            }
            if shortcut.url.is_empty() {
                return Err(RegistryError::EmptyUrl(index));
            }
        }
        Ok(Self { shortcuts })
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}
