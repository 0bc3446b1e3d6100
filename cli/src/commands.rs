use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::de::DeserializeOwned;
use storage_models::{timestamp, StorageConfig, VersionRecord};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, Args)]
pub struct StorageArgs {
    /// JSON document holding the config, bare or under a "storage" key
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Storage driver ("" or "s3")
    #[arg(long, env = "STORAGE_DRIVER", default_value = "")]
    pub driver: String,

    #[arg(long, env = "STORAGE_BUCKET", default_value = "")]
    pub bucket: String,

    #[arg(long, env = "STORAGE_BUCKET_PATH", default_value = "")]
    pub bucket_path: String,

    #[arg(long, env = "STORAGE_ACCESS_KEY_ID", default_value = "")]
    pub access_key_id: String,

    #[arg(
        long,
        env = "STORAGE_SECRET_ACCESS_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub secret_access_key: String,

    #[arg(long, env = "STORAGE_REGION_NAME", default_value = "")]
    pub region_name: String,

    #[arg(long, env = "STORAGE_STATE_FILE", default_value = "")]
    pub state_file: String,
}

#[derive(Debug, Clone, Default, Args)]
pub struct VersionArgs {
    /// JSON document holding the record, bare or under a "version" key
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Last modified time of the state file
    #[arg(
        long,
        default_value = "",
        help_heading = "Record",
        conflicts_with = "file"
    )]
    pub last_modified: String,

    #[arg(
        long,
        default_value = "",
        help_heading = "Record",
        conflicts_with = "file"
    )]
    pub state_file_key: String,
}

impl StorageArgs {
    /// Fields given through flags or `STORAGE_*` variables.
    fn set_fields(&self) -> Vec<&'static str> {
        [
            ("driver", &self.driver),
            ("bucket", &self.bucket),
            ("bucket_path", &self.bucket_path),
            ("access_key_id", &self.access_key_id),
            ("secret_access_key", &self.secret_access_key),
            ("region_name", &self.region_name),
            ("state_file", &self.state_file),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    fn load(&self) -> Result<StorageConfig> {
        if let Some(path) = &self.file {
            let ignored = self.set_fields();
            if !ignored.is_empty() {
                warn!(
                    ?ignored,
                    "--file is set; ignoring storage flags and STORAGE_* environment values"
                );
            }
            return read_document(path, "storage");
        }
        Ok(StorageConfig {
            driver: self.driver.clone(),
            bucket: self.bucket.clone(),
            bucket_path: self.bucket_path.clone(),
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
            region_name: self.region_name.clone(),
            state_file: self.state_file.clone(),
        })
    }
}

impl VersionArgs {
    fn load(&self) -> Result<VersionRecord> {
        if let Some(path) = &self.file {
            return read_document(path, "version");
        }
        Ok(VersionRecord {
            last_modified: self.last_modified.clone(),
            state_file_key: self.state_file_key.clone(),
        })
    }
}

pub fn check_storage(args: &StorageArgs) -> Result<String> {
    let config = args.load()?;
    debug!(?config, "loaded storage config");

    let driver = config
        .validated_driver()
        .context("storage config is invalid")?;
    info!(driver = %driver, bucket = %config.bucket, "storage config is valid");
    if config.region_name.is_empty() {
        warn!("storage.region_name is not set; the driver default region applies");
    }

    let driver = if config.driver.is_empty() {
        "s3 (default)"
    } else {
        driver.as_str()
    };
    Ok(format!(
        "storage config OK: driver {driver}, bucket {}, path {}",
        config.bucket, config.bucket_path
    ))
}

pub fn check_version(args: &VersionArgs) -> Result<String> {
    let version = args.load()?;
    debug!(?version, "loaded version record");

    if version.is_zero() {
        info!("version record is empty");
        return Ok("no version recorded yet".to_string());
    }

    version.validate().with_context(|| {
        format!(
            "version record is invalid (last_modified must be {})",
            timestamp::TIME_FORMAT
        )
    })?;
    let last_modified = version.last_modified_time()?;
    info!(key = %version.state_file_key, %last_modified, "version record is valid");

    Ok(format!(
        "version OK: {} last modified {}",
        version.state_file_key,
        timestamp::format(last_modified)
    ))
}

/// Reads `section` from a JSON file, accepting either the bare object or one
/// wrapped as `{"<section>": {...}}`.
fn read_document<T: DeserializeOwned>(path: &Path, section: &str) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    if let Some(inner) = value.get_mut(section).filter(|inner| inner.is_object()) {
        debug!(section, "using wrapped document section");
        value = inner.take();
    }

    serde_json::from_value(value)
        .with_context(|| format!("{} does not hold a {section} object", path.display()))
}
