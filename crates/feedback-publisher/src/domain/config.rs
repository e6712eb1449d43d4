//! Content store configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use feedback_publisher::domain::StoreConfigBuilder;
//!
//! let config = StoreConfigBuilder::new()
//!     .owner("matsuda-tkm")
//!     .repo("DebugMaster")
//!     .branch("test/exhibition")
//!     .directory("feedbacks")
//!     .auth_token(std::env::var("GITHUB_ACCESS_TOKEN").ok())
//!     .build()?;
//! ```

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

use super::value_objects::AccessToken;

/// Default repository owner.
pub const DEFAULT_OWNER: &str = "matsuda-tkm";
/// Default repository name.
pub const DEFAULT_REPO: &str = "DebugMaster";
/// Default target branch.
pub const DEFAULT_BRANCH: &str = "test/exhibition";
/// Default directory for feedback objects.
pub const DEFAULT_DIRECTORY: &str = "feedbacks";
/// Default REST endpoint of the store.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Environment variable holding the store access token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_ACCESS_TOKEN";

/// Where and how feedback objects are written.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch the object is committed to
    pub branch: String,
    /// Directory prefix inside the repository (no leading/trailing '/')
    pub directory: String,
    /// Access token; requests go out unauthenticated without one
    pub auth_token: Option<AccessToken>,
    /// Base URL of the store's REST API
    pub api_base_url: String,
    /// User-Agent header (the GitHub API rejects requests without one)
    pub user_agent: String,
    /// Overall request timeout; `None` waits for the transport
    pub request_timeout: Option<Duration>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            directory: DEFAULT_DIRECTORY.to_string(),
            auth_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: concat!("feedback-qr/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: None,
        }
    }
}

impl StoreConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FEEDBACK_STORE_OWNER`: Repository owner (default: matsuda-tkm)
    /// - `FEEDBACK_STORE_REPO`: Repository name (default: DebugMaster)
    /// - `FEEDBACK_STORE_BRANCH`: Target branch (default: test/exhibition)
    /// - `FEEDBACK_STORE_DIR`: Directory prefix (default: feedbacks)
    /// - `FEEDBACK_STORE_API_URL`: API base URL (default: https://api.github.com)
    /// - `GITHUB_ACCESS_TOKEN`: Access token (default: none)
    ///
    /// Values are not validated here; call [`StoreConfig::validate`].
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            owner: env::var("FEEDBACK_STORE_OWNER").unwrap_or(defaults.owner),
            repo: env::var("FEEDBACK_STORE_REPO").unwrap_or(defaults.repo),
            branch: env::var("FEEDBACK_STORE_BRANCH").unwrap_or(defaults.branch),
            directory: env::var("FEEDBACK_STORE_DIR").unwrap_or(defaults.directory),
            auth_token: env::var(TOKEN_ENV_VAR).ok().and_then(AccessToken::new),
            api_base_url: env::var("FEEDBACK_STORE_API_URL").unwrap_or(defaults.api_base_url),
            user_agent: defaults.user_agent,
            request_timeout: None,
        }
    }

    /// Validate addressing fields.
    ///
    /// A missing token is not an error; the store will reject the request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.trim().is_empty() {
            return Err(ConfigError::EmptyField("owner"));
        }
        if self.repo.trim().is_empty() {
            return Err(ConfigError::EmptyField("repo"));
        }
        if self.branch.trim().is_empty() {
            return Err(ConfigError::EmptyField("branch"));
        }
        if self.directory.trim().is_empty() {
            return Err(ConfigError::EmptyField("directory"));
        }
        if self.directory.starts_with('/') || self.directory.ends_with('/') {
            return Err(ConfigError::InvalidDirectory(self.directory.clone()));
        }
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.api_base_url.clone()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyField("user_agent"));
        }
        Ok(())
    }

    /// Builder-style method to set the access token
    pub fn with_auth_token(mut self, token: Option<AccessToken>) -> Self {
        self.auth_token = token;
        self
    }

    /// Builder-style method to point at another API endpoint
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// `{owner}/{repo}@{branch}`, for logs.
    pub fn target(&self) -> String {
        format!("{}/{}@{}", self.owner, self.repo, self.branch)
    }
}

/// Builder for StoreConfig with validation
///
/// Unset fields fall back to [`StoreConfig::default`].
#[derive(Default)]
pub struct StoreConfigBuilder {
    owner: Option<String>,
    repo: Option<String>,
    branch: Option<String>,
    directory: Option<String>,
    auth_token: Option<AccessToken>,
    api_base_url: Option<String>,
    user_agent: Option<String>,
    request_timeout: Option<Duration>,
}

impl StoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Set the access token; `None` or an empty string leaves it unset.
    pub fn auth_token(mut self, token: Option<impl Into<String>>) -> Self {
        self.auth_token = token.and_then(AccessToken::new);
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the StoreConfig, validating all fields
    pub fn build(self) -> Result<StoreConfig, ConfigError> {
        let defaults = StoreConfig::default();

        let config = StoreConfig {
            owner: self.owner.unwrap_or(defaults.owner),
            repo: self.repo.unwrap_or(defaults.repo),
            branch: self.branch.unwrap_or(defaults.branch),
            directory: self.directory.unwrap_or(defaults.directory),
            auth_token: self.auth_token,
            api_base_url: self.api_base_url.unwrap_or(defaults.api_base_url),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            request_timeout: self.request_timeout,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_fixed_identifiers() {
        let config = StoreConfig::default();
        assert_eq!(config.owner, "matsuda-tkm");
        assert_eq!(config.repo, "DebugMaster");
        assert_eq!(config.branch, "test/exhibition");
        assert_eq!(config.directory, "feedbacks");
        assert!(config.auth_token.is_none());
        assert!(config.request_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_uses_defaults() {
        let config = StoreConfigBuilder::new()
            .branch("main")
            .build()
            .expect("Should use defaults for other fields");

        assert_eq!(config.branch, "main");
        assert_eq!(config.owner, DEFAULT_OWNER);
        assert_eq!(config.directory, DEFAULT_DIRECTORY);
    }

    #[test]
    fn test_builder_rejects_empty_owner() {
        let result = StoreConfigBuilder::new().owner("").build();
        assert_eq!(result.unwrap_err(), ConfigError::EmptyField("owner"));
    }

    #[test]
    fn test_builder_rejects_slashed_directory() {
        let result = StoreConfigBuilder::new().directory("/feedbacks").build();
        assert!(matches!(result, Err(ConfigError::InvalidDirectory(_))));

        let result = StoreConfigBuilder::new().directory("feedbacks/").build();
        assert!(matches!(result, Err(ConfigError::InvalidDirectory(_))));
    }

    #[test]
    fn test_builder_rejects_non_http_url() {
        let result = StoreConfigBuilder::new().api_base_url("ftp://example.com").build();
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_builder_ignores_empty_token() {
        let config = StoreConfigBuilder::new().auth_token(Some("")).build().unwrap();
        assert!(config.auth_token.is_none());

        let config = StoreConfigBuilder::new().auth_token(Some("ghp_x")).build().unwrap();
        assert_eq!(config.auth_token.unwrap().expose(), "ghp_x");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = StoreConfigBuilder::new()
            .auth_token(Some("ghp_verysecret"))
            .build()
            .unwrap();
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("ghp_verysecret"));
    }

    #[test]
    fn test_target() {
        assert_eq!(StoreConfig::default().target(), "matsuda-tkm/DebugMaster@test/exhibition");
    }
}
