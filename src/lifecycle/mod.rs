//! Process lifecycle
//!
//! Signal handling, the cooperative shutdown flag shared with the worker,
//! and the single-instance guard.

mod instance;
mod shutdown;

pub use instance::{InstanceError, InstanceLock};
pub use shutdown::{ShutdownFlag, ShutdownSignal};
