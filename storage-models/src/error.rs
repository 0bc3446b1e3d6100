use thiserror::Error;

use crate::driver::Driver;
use crate::timestamp::TimestampError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Unknown value for `storage.driver`: '{value}', Supported driver values: {}",
        quote_join(Driver::KNOWN.iter().map(|d| d.as_str()))
    )]
    UnknownDriver { value: String },

    #[error("Missing fields: {}", quote_join(.0))]
    MissingFields(Vec<String>),

    #[error("LastModified field is in invalid format: {0}")]
    InvalidTimestampFormat(#[from] TimestampError),
}

impl ValidationError {
    /// Names of the empty required fields, in the order they were checked.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            ValidationError::MissingFields(fields) => fields,
            _ => &[],
        }
    }
}

/// Wraps every item in single quotes and joins them with `", "`.
pub fn quote_join<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("'{}'", item.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_join_keeps_order() {
        assert_eq!(quote_join(["b", "a", ""]), "'b', 'a', ''");
    }

    #[test]
    fn test_quote_join_empty() {
        assert_eq!(quote_join(Vec::<String>::new()), "");
    }

    #[test]
    fn test_unknown_driver_message() {
        let err = ValidationError::UnknownDriver {
            value: "gcs".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown value for `storage.driver`: 'gcs', Supported driver values: '', 's3'"
        );
    }

    #[test]
    fn test_missing_fields_message() {
        let err = ValidationError::MissingFields(vec![
            "storage.bucket".to_string(),
            "storage.bucket_path".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing fields: 'storage.bucket', 'storage.bucket_path'"
        );
        assert_eq!(err.missing_fields().len(), 2);
    }

    #[test]
    fn test_invalid_timestamp_message_wraps_parser_error() {
        let parse_err = crate::timestamp::parse("nope").unwrap_err();
        let err = ValidationError::from(parse_err.clone());
        assert_eq!(
            err.to_string(),
            format!("LastModified field is in invalid format: {parse_err}")
        );
        assert!(err.missing_fields().is_empty());
    }
}
