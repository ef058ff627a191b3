use std::fmt;

use snapprune_library::RetentionMode;

use crate::library::constant::{DEFAULT_ENDPOINT, DEFAULT_KEEP_PERCENTAGE, DEFAULT_MAX_SNAPSHOTS};

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Credentials {
    /// Both parts must be present and non-blank.
    pub fn from_parts(access_key_id: Option<&str>, secret_access_key: Option<&str>) -> Option<Self> {
        let access_key_id = access_key_id.map(str::trim).filter(|s| !s.is_empty())?;
        let secret_access_key = secret_access_key.map(str::trim).filter(|s| !s.is_empty())?;

        Some(Credentials {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Run settings, built once at startup and passed down by reference.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Option<Credentials>,
    pub endpoint: String,
    /// Total snapshot count at which pruning starts.
    pub max_snapshots: usize,
    /// Share of each volume's completed snapshots to keep, in `[0, 1]`.
    pub keep_percentage: f64,
    pub retention_mode: RetentionMode,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            credentials: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_snapshots: DEFAULT_MAX_SNAPSHOTS,
            keep_percentage: DEFAULT_KEEP_PERCENTAGE,
            retention_mode: RetentionMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_parts() {
        assert!(Credentials::from_parts(Some("AKIA"), Some("secret")).is_some());
        assert!(Credentials::from_parts(Some("AKIA"), None).is_none());
        assert!(Credentials::from_parts(None, Some("secret")).is_none());
        assert!(Credentials::from_parts(Some("  "), Some("secret")).is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let credentials = Credentials::from_parts(Some("AKIA"), Some("hunter2")).unwrap();

        let debug = format!("{:?}", credentials);

        assert!(debug.contains("AKIA"));
        assert!(!debug.contains("hunter2"));
    }
}
