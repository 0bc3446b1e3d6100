//! Storage backend configuration and state-file version records.
//!
//! Both models are plain data that validate themselves; nothing in this crate
//! talks to a bucket.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod driver;
pub mod error;
pub mod timestamp;
pub mod version;


pub use config::StorageConfig;
pub use driver::Driver;
pub use error::ValidationError;
pub use timestamp::TimestampError;
pub use version::VersionRecord;

/// Result of validating a storage model.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Renders `"<prefix>.<name>"` for every `(name, value)` pair whose value is
/// empty, keeping the order of `fields`.
pub(crate) fn missing_fields<'a>(
    prefix: &str,
    fields: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Vec<String> {
    fields
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| format!("{prefix}.{name}"))
        .collect()
}
