//! Orchestration core of the continue-watching removal pipeline.
//!
//! Everything here is page-lifetime state: it is reset by a full reload and
//! safely re-derivable after client-side navigation. Failures are swallowed
//! at the boundary by design — a page-embedded augmentation must never crash
//! or visibly error inside a host application it does not own.

pub mod config;
pub mod error;
pub mod locator;
pub mod remover;
pub mod session;

pub use config::RemoverConfig;
pub use error::RemoverError;
pub use remover::{RemovalOutcome, Remover};
