//! Host-page boundary: the DOM-facing trait, the presence/rebind state
//! machine, and helpers for classifying intercepted traffic.
//!
//! Selectors, mutation observation and request interception are owned by the
//! host page and the injection runtime; this crate only defines the seam the
//! orchestration core talks through.

pub mod host;
pub mod presence;
pub mod tap;

pub use host::HostPage;
pub use presence::{PresenceMachine, PresenceState};
