//! Credential configuration
//!
//! A [`Config`] holds the script-app credentials supplied by the user and the
//! most recently acquired [`AuthToken`]. It is persisted as JSON:
//!
//! ```json
//! {
//!   "credentials": {
//!     "username": "...",
//!     "password": "...",
//!     "clientID": "...",
//!     "client_secret": "...",
//!     "user_agent": "..."
//!   },
//!   "token": { "expires": 1700000000, "token": "...", "type": "bearer" }
//! }
//! ```

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

// ============================================================================
// Credentials
// ============================================================================

/// Script credentials for a reddit developer account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Reddit username of the developer account
    #[serde(default)]
    pub username: String,
    /// Password for the above user
    #[serde(default)]
    pub password: String,
    /// Client ID for the script app
    #[serde(rename = "clientID", default)]
    pub client_id: String,
    /// Client secret for the script app
    #[serde(default)]
    pub client_secret: String,
    /// User agent to use when making requests
    #[serde(default)]
    pub user_agent: String,
}

impl Credentials {
    /// Names of the fields that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("username", &self.username),
            ("password", &self.password),
            ("client id", &self.client_id),
            ("client secret", &self.client_secret),
            ("user agent", &self.user_agent),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Check that every field is present
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::missing_field(missing.join(", ")))
        }
    }
}

// ============================================================================
// Auth Token
// ============================================================================

/// OAuth token obtained for the script app
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Expiration time as seconds since the unix epoch
    #[serde(default)]
    pub expires: i64,
    /// OAuth token
    #[serde(default)]
    pub token: String,
    /// Type of token (usually just bearer)
    #[serde(rename = "type", default)]
    pub token_type: String,
}

impl AuthToken {
    /// Create a token that expires at the given unix time
    pub fn new(token: impl Into<String>, token_type: impl Into<String>, expires: i64) -> Self {
        Self {
            expires,
            token: token.into(),
            token_type: token_type.into(),
        }
    }

    /// A token is usable when it is non-empty and expires after `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.token.is_empty() && self.expires > now.timestamp()
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires, 0)
    }
}

// ============================================================================
// Config
// ============================================================================

/// Credentials plus the current token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// User supplied credentials
    pub credentials: Credentials,
    /// Token obtained by [`crate::auth::ScriptAuthenticator`]
    #[serde(rename = "token", default)]
    pub auth_token: AuthToken,
}

impl Config {
    /// Create a config with no token
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            auth_token: AuthToken::default(),
        }
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.credentials.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    ///
    /// A leading `~` is expanded to the user's home directory. All credential
    /// fields must be non-empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_home(path.as_ref())?;
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            Error::config(format!("Failed to read contents of {}: {e}", path.display()))
        })?;
        let config = Self::from_json(&contents).map_err(|e| match e {
            Error::JsonParse(inner) => Error::config(format!(
                "Failed to parse contents of {}: {inner}",
                path.display()
            )),
            other => other,
        })?;

        debug!("Loaded credentials from {}", path.display());
        Ok(config)
    }

    /// Save the config as JSON.
    ///
    /// A leading `~` is expanded to the user's home directory. No validation
    /// is performed. The file is only readable by its owner.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = expand_home(path.as_ref())?;
        let contents = serde_json::to_string(self)?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        write_private(&temp_path, contents.as_bytes()).map_err(|e| {
            Error::config(format!("Failed to save config to {}: {e}", path.display()))
        })?;
        std::fs::rename(&temp_path, &path).map_err(|e| {
            Error::config(format!("Failed to save config to {}: {e}", path.display()))
        })?;

        debug!("Saved credentials to {}", path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

/// Expand a leading `~` to `$HOME`
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home = std::env::var_os("HOME")
        .ok_or_else(|| Error::config("Cannot expand '~': HOME is not set"))?;
    Ok(PathBuf::from(home).join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const TEST_CONFIG: &str = r#"{
	"credentials": {
		"username": "blah",
		"password": "pass",
		"clientID": "client",
		"client_secret": "secret",
		"user_agent": "useragent"
	}
}"#;

    fn test_credentials() -> Credentials {
        Credentials {
            username: "blah".to_string(),
            password: "pass".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            user_agent: "useragent".to_string(),
        }
    }

    #[test]
    fn test_load_and_save() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("creds_file");
        std::fs::write(&file, TEST_CONFIG).unwrap();

        let mut config = Config::load(&file).unwrap();
        assert_eq!(config, Config::new(test_credentials()));

        config.auth_token = AuthToken::new("token", "bearer", 42);
        config.save(&file).unwrap();

        let reloaded = Config::load(&file).unwrap();
        assert_eq!(reloaded, config);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let file = dir.path().join("creds_file");
        Config::new(test_credentials()).save(&file).unwrap();

        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_reports_every_missing_field() {
        let err = Config::from_json(r#"{"credentials": {"username": "blah", "user_agent": "x"}}"#)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required config field: password, client id, client secret"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Config::load(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("creds_file");
        std::fs::write(&file, "not json").unwrap();

        let err = Config::load(&file).unwrap_err();
        assert!(err.to_string().contains("Failed to parse contents of"));
    }

    #[test]
    fn test_token_serde_keys() {
        let token = AuthToken::new("abc", "bearer", 100);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"expires": 100, "token": "abc", "type": "bearer"})
        );
    }

    #[test]
    fn test_token_validity() {
        let now = DateTime::from_timestamp(1_000, 0).unwrap();
        assert!(AuthToken::new("abc", "bearer", 1_001).is_valid_at(now));
        assert!(!AuthToken::new("abc", "bearer", 1_000).is_valid_at(now));
        assert!(!AuthToken::new("", "bearer", 5_000).is_valid_at(now));
    }

    #[test]
    fn test_token_authorization() {
        let token = AuthToken::new("test-token", "bearer", 0);
        assert_eq!(token.authorization(), "bearer test-token");
    }

    #[test]
    fn test_expand_home() {
        let plain = expand_home(Path::new("/tmp/creds")).unwrap();
        assert_eq!(plain, PathBuf::from("/tmp/creds"));

        if let Some(home) = std::env::var_os("HOME") {
            let expanded = expand_home(Path::new("~/.reddit_creds")).unwrap();
            assert_eq!(expanded, PathBuf::from(home).join(".reddit_creds"));
        }
    }
}
