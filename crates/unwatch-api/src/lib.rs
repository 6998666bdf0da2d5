//! Backend clients for the host's private streaming services.
//!
//! The host exposes two services: a GraphQL-style session/telemetry endpoint
//! and a REST-style content/collection endpoint. Both are an unstable private
//! contract owned by the host; this crate types only the slices of it the
//! removal pipeline needs.

pub mod bam;
pub mod traits;
pub mod types;
