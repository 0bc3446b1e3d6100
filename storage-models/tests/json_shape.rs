#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use serde_json::json;
use storage_models::{StorageConfig, ValidationError, VersionRecord};

#[test]
fn test_storage_config_omits_empty_optional_fields() {
    let config = StorageConfig::s3("bucket", "path/", "id", "secret");
    let value = serde_json::to_value(&config).unwrap();

    assert_eq!(
        value,
        json!({
            "driver": "s3",
            "bucket": "bucket",
            "bucket_path": "path/",
            "access_key_id": "id",
            "secret_access_key": "secret",
        })
    );
}

#[test]
fn test_storage_config_serializes_optional_fields_when_set() {
    let config = StorageConfig::s3("bucket", "path/", "id", "secret")
        .with_region_name("eu-central-1")
        .with_state_file("terraform.tfstate");
    let value = serde_json::to_value(&config).unwrap();

    assert_eq!(value["region_name"], "eu-central-1");
    assert_eq!(value["state_file"], "terraform.tfstate");
}

#[test]
fn test_storage_config_missing_keys_default_to_empty() {
    let config: StorageConfig = serde_json::from_value(json!({ "bucket": "b" })).unwrap();

    assert_eq!(config.driver, "");
    assert_eq!(config.bucket, "b");
    assert_eq!(
        config.validate().unwrap_err().missing_fields(),
        [
            "storage.bucket_path",
            "storage.access_key_id",
            "storage.secret_access_key",
        ]
    );
}

#[test]
fn test_unknown_driver_survives_deserialization() {
    let config: StorageConfig = serde_json::from_value(json!({
        "driver": "swift",
        "bucket": "b",
        "bucket_path": "p",
        "access_key_id": "i",
        "secret_access_key": "s",
    }))
    .unwrap();

    assert!(matches!(
        config.validate(),
        Err(ValidationError::UnknownDriver { value }) if value == "swift"
    ));
}

#[test]
fn test_version_record_shape() {
    let version: VersionRecord = serde_json::from_value(json!({
        "last_modified": "2018-09-10T11:12:13Z",
        "state_file_key": "env/staging.tfstate",
    }))
    .unwrap();

    version.validate().unwrap();
    assert_eq!(
        serde_json::to_value(&version).unwrap(),
        json!({
            "last_modified": "2018-09-10T11:12:13Z",
            "state_file_key": "env/staging.tfstate",
        })
    );
}

#[test]
fn test_empty_object_is_zero_version() {
    let version: VersionRecord = serde_json::from_value(json!({})).unwrap();

    assert!(version.is_zero());
    assert_eq!(
        version.validate().unwrap_err().missing_fields(),
        ["version.last_modified", "version.state_file_key"]
    );
}
