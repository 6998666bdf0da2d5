pub mod client;
pub mod error;
pub mod telemetry;
pub mod types;

pub use client::BamClient;
pub use error::BamError;
pub use types::parse_set_items;
