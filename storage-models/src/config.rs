use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::driver::Driver;
use crate::error::ValidationError;
use crate::missing_fields;

const FIELD_PREFIX: &str = "storage";

type FieldAccessor = fn(&StorageConfig) -> &str;

/// Fields the S3 driver cannot work without, in reporting order.
const S3_REQUIRED_FIELDS: [(&str, FieldAccessor); 4] = [
    ("bucket", |c| c.bucket.as_str()),
    ("bucket_path", |c| c.bucket_path.as_str()),
    ("access_key_id", |c| c.access_key_id.as_str()),
    ("secret_access_key", |c| c.secret_access_key.as_str()),
];

/// Where and how the remote state file is stored.
///
/// `driver` is kept as the raw string so that an unknown value survives
/// deserialization and is reported by [`StorageConfig::validate`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub driver: String,

    // S3 driver
    pub bucket: String,
    pub bucket_path: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state_file: String,
}

impl StorageConfig {
    pub fn s3(
        bucket: impl Into<String>,
        bucket_path: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            driver: Driver::S3.as_str().to_string(),
            bucket: bucket.into(),
            bucket_path: bucket_path.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_region_name(mut self, region_name: impl Into<String>) -> Self {
        self.region_name = region_name.into();
        self
    }

    #[must_use]
    pub fn with_state_file(mut self, state_file: impl Into<String>) -> Self {
        self.state_file = state_file.into();
        self
    }

    pub fn driver_kind(&self) -> Result<Driver, ValidationError> {
        self.driver.parse()
    }

    /// Checks the driver, then reports every missing S3 field at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validated_driver().map(|_| ())
    }

    /// Same checks as [`StorageConfig::validate`], returning the parsed driver.
    pub fn validated_driver(&self) -> Result<Driver, ValidationError> {
        let driver = self.driver_kind()?;
        debug!(driver = %driver, "validating storage config");

        let missing = if driver.requires_s3_params() {
            missing_fields(
                FIELD_PREFIX,
                S3_REQUIRED_FIELDS
                    .iter()
                    .map(|(name, get)| (*name, get(self))),
            )
        } else {
            Vec::new()
        };

        if !missing.is_empty() {
            debug!(?missing, "storage config is incomplete");
            return Err(ValidationError::MissingFields(missing));
        }
        Ok(driver)
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.secret_access_key.is_empty() {
            ""
        } else {
            "***"
        };
        f.debug_struct("StorageConfig")
            .field("driver", &self.driver)
            .field("bucket", &self.bucket)
            .field("bucket_path", &self.bucket_path)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &secret)
            .field("region_name", &self.region_name)
            .field("state_file", &self.state_file)
            .finish()
    }
}
