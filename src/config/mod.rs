//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with `ortho_config`'s layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.litshop.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `LITSHOP_API_URL`, `LITSHOP_TOKEN`, and
//!    friends, plus the fallback `BOOKSTORE_API_URL`
//! 4. **Command-line arguments** – `--route`/`-r`, `--set`/`-S`, and so on
//!
//! # Configuration File
//!
//! ```toml
//! api_url = "https://shop.example.com/api"
//! session_file = "/home/reader/.litshop-session.json"
//! timeout_seconds = 10
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::api::{ApiBase, BearerToken, ClientError, DEFAULT_API_URL};
use crate::session::{DEFAULT_SESSION_FILE, SessionStore};
use crate::view::{Location, ParamUpdate};

/// Environment variable read when `api_url` is not configured.
pub const FALLBACK_API_URL_ENV: &str = "BOOKSTORE_API_URL";

const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use litshop::LitshopConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = LitshopConfig::load().expect("failed to load configuration");
/// let location = config.location().expect("route should be a valid location");
/// println!("{location}");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "LITSHOP",
    discovery(
        dotfile_name = ".litshop.toml",
        config_file_name = "litshop.toml",
        app_name = "litshop"
    )
)]
pub struct LitshopConfig {
    /// Base URL of the bookstore API.
    ///
    /// Can be provided via:
    /// - CLI: `--api-url <URL>` or `-a <URL>`
    /// - Environment: `LITSHOP_API_URL` or `BOOKSTORE_API_URL`
    /// - Config file: `api_url = "..."`
    #[ortho_config(cli_short = 'a')]
    pub api_url: Option<String>,

    /// Bearer token overriding the stored session.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Path of the session file.
    #[ortho_config()]
    pub session_file: String,

    /// Location to open, such as `/books?q=dune&page=2`.
    #[ortho_config(cli_short = 'r')]
    pub route: String,

    /// Parameter changes applied to the route, written as a query string
    /// (`q=dune&page=2`). An empty value removes the parameter.
    #[ortho_config(cli_short = 'S')]
    pub set: Option<String>,

    /// Confirms deletion when the route is a book detail page.
    #[ortho_config()]
    pub delete: bool,

    /// Email for the login and register forms.
    #[ortho_config(cli_short = 'e')]
    pub email: Option<String>,

    /// Password for the login and register forms.
    #[ortho_config(cli_short = 'p')]
    pub password: Option<String>,

    /// Optional username for the register form.
    #[ortho_config(cli_short = 'u')]
    pub username: Option<String>,

    /// Emits telemetry events as JSON lines on stderr.
    ///
    /// Note: `LITSHOP_TELEMETRY` is not read because `ortho_config` does not
    /// load boolean values from the environment.
    #[ortho_config()]
    pub telemetry: bool,

    /// HTTP request timeout, in seconds.
    #[ortho_config()]
    pub timeout_seconds: u64,
}

impl Default for LitshopConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            token: None,
            session_file: DEFAULT_SESSION_FILE.to_owned(),
            route: "/".to_owned(),
            set: None,
            delete: false,
            email: None,
            password: None,
            username: None,
            telemetry: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl LitshopConfig {
    /// Resolves the API base from `api_url`, then `BOOKSTORE_API_URL`, then
    /// the built-in default.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the chosen URL is invalid.
    pub fn api_base(&self) -> Result<ApiBase, ClientError> {
        let raw = self
            .api_url
            .clone()
            .or_else(|| env::var(FALLBACK_API_URL_ENV).ok())
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        ApiBase::parse(&raw)
    }

    /// Returns the configured token, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingToken`] when a token is configured but
    /// blank.
    pub fn token(&self) -> Result<Option<BearerToken>, ClientError> {
        self.token.as_deref().map(BearerToken::new).transpose()
    }

    /// Returns the request timeout; zero falls back to the default.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        let seconds = if self.timeout_seconds == 0 {
            DEFAULT_TIMEOUT_SECONDS
        } else {
            self.timeout_seconds
        };
        Duration::from_secs(seconds)
    }

    /// Returns the session store for `session_file`.
    #[must_use]
    pub fn session_store(&self) -> SessionStore {
        let path = if self.session_file.trim().is_empty() {
            DEFAULT_SESSION_FILE
        } else {
            self.session_file.as_str()
        };
        SessionStore::new(Utf8PathBuf::from(path))
    }

    /// Parses the route into a location.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRoute`] for relative or empty routes.
    pub fn location(&self) -> Result<Location, ClientError> {
        Location::parse(&self.route)
    }

    /// Parses `set` into parameter updates, in the order written.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRoute`] for entries that are not
    /// `key=value`.
    pub fn param_updates(&self) -> Result<Vec<ParamUpdate>, ClientError> {
        self.set
            .as_deref()
            .map_or_else(|| Ok(Vec::new()), ParamUpdate::parse_list)
    }
}
