use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::AppError;

/// Storage provider kinds.
///
/// Exactly one is selected per process from `STORAGE_PROVIDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Aws,
    Gcp,
    Azure,
    Local,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aws" | "s3" => Ok(StorageBackend::Aws),
            "gcp" | "gcs" => Ok(StorageBackend::Gcp),
            "azure" => Ok(StorageBackend::Azure),
            "local" => Ok(StorageBackend::Local),
            _ => Err(AppError::Configuration(format!(
                "unsupported storage provider: {}",
                s
            ))),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Aws => write!(f, "aws"),
            StorageBackend::Gcp => write!(f, "gcp"),
            StorageBackend::Azure => write!(f, "azure"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_names_case_insensitively() {
        assert_eq!("AWS".parse::<StorageBackend>().unwrap(), StorageBackend::Aws);
        assert_eq!("gcp".parse::<StorageBackend>().unwrap(), StorageBackend::Gcp);
        assert_eq!(" Azure ".parse::<StorageBackend>().unwrap(), StorageBackend::Azure);
        assert_eq!("local".parse::<StorageBackend>().unwrap(), StorageBackend::Local);
    }

    #[test]
    fn unknown_provider_is_configuration_error() {
        let err = "dropbox".parse::<StorageBackend>().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("unsupported storage provider: dropbox"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for backend in [
            StorageBackend::Aws,
            StorageBackend::Gcp,
            StorageBackend::Azure,
            StorageBackend::Local,
        ] {
            assert_eq!(backend.to_string().parse::<StorageBackend>().unwrap(), backend);
        }
    }
}
