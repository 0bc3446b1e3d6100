use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Storage driver selected by `storage.driver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Driver {
    /// No driver given; treated as S3.
    #[default]
    Default,
    S3,
}

impl Driver {
    /// Accepted drivers, in the order they are reported to users.
    pub const KNOWN: [Driver; 2] = [Driver::Default, Driver::S3];

    pub fn as_str(self) -> &'static str {
        match self {
            Driver::Default => "",
            Driver::S3 => "s3",
        }
    }

    /// Whether the bucket and credential fields must be set for this driver.
    pub fn requires_s3_params(self) -> bool {
        matches!(self, Driver::Default | Driver::S3)
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Driver {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Driver::KNOWN
            .into_iter()
            .find(|driver| driver.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownDriver {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_drivers() {
        assert_eq!("".parse::<Driver>().unwrap(), Driver::Default);
        assert_eq!("s3".parse::<Driver>().unwrap(), Driver::S3);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "S3".parse::<Driver>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownDriver {
                value: "S3".to_string()
            }
        );
    }

    #[test]
    fn test_every_known_driver_needs_s3_params() {
        assert!(Driver::KNOWN.iter().all(|d| d.requires_s3_params()));
    }

    #[test]
    fn test_display_matches_wire_value() {
        for driver in Driver::KNOWN {
            assert_eq!(driver.to_string().parse::<Driver>().unwrap(), driver);
        }
    }
}
