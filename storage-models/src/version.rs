use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::{missing_fields, timestamp};

const FIELD_PREFIX: &str = "version";

/// Last known version of the remote state file.
///
/// The default (both fields empty) means no version has been recorded yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionRecord {
    pub last_modified: String,
    pub state_file_key: String,
}

impl VersionRecord {
    pub fn new(last_modified: DateTime<Utc>, state_file_key: impl Into<String>) -> Self {
        Self {
            last_modified: timestamp::format(last_modified),
            state_file_key: state_file_key.into(),
        }
    }

    /// Reports all missing fields first; the timestamp is only parsed when
    /// both fields are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = missing_fields(
            FIELD_PREFIX,
            [
                ("last_modified", self.last_modified.as_str()),
                ("state_file_key", self.state_file_key.as_str()),
            ],
        );
        if !missing.is_empty() {
            debug!(?missing, "version record is incomplete");
            return Err(ValidationError::MissingFields(missing));
        }

        timestamp::parse(&self.last_modified)?;
        Ok(())
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    pub fn last_modified_time(&self) -> Result<DateTime<Utc>, ValidationError> {
        Ok(timestamp::parse(&self.last_modified)?)
    }
}
