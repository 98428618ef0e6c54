//! Runtime configuration

use std::env;
use std::time::Duration;

use crate::error::ConfigError;
use crate::notify::DEFAULT_AUTO_HIDE;
use crate::notify::DEFAULT_FADE;
use crate::table::DEFAULT_DEBOUNCE;
use crate::table::DEFAULT_TRUNCATE_BUDGET;
use crate::table::PageSize;

/// Base URL of the role service.
pub const ENV_API_URL: &str = "SYSPROMPT_API_URL";
/// Operator name sent with create/update requests.
pub const ENV_USER: &str = "SYSPROMPT_USER";
/// Per-request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "SYSPROMPT_TIMEOUT_MS";
/// Initial page size (10, 25 or 50).
pub const ENV_PAGE_SIZE: &str = "SYSPROMPT_PAGE_SIZE";
/// Enables the presence check on drafts (`true`/`false`).
pub const ENV_REQUIRE_FIELDS: &str = "SYSPROMPT_REQUIRE_FIELDS";

/// Configuration for a role management page.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sysprompt_lib::Config;
///
/// let config = Config::new("http://localhost:7001/api")
///     .with_user("admin")
///     .with_request_timeout(Duration::from_secs(10));
/// assert_eq!(config.filter_debounce, Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL; the collection lives at `{api_url}/role`.
    pub api_url: String,

    /// Sent as `user` in create/update bodies.
    ///
    /// Default: `polly`
    pub user: String,

    /// Per-request timeout. `None` leaves it to the HTTP client.
    pub request_timeout: Option<Duration>,

    /// Quiet period before filter input is committed.
    ///
    /// Default: 500ms
    pub filter_debounce: Duration,

    /// How long a success notice stays visible.
    ///
    /// Default: 2000ms
    pub notice_auto_hide: Duration,

    /// Fade-out window before a dismissed notice is cleared.
    ///
    /// Default: 300ms
    pub notice_fade: Duration,

    /// Display-width budget for truncated cells.
    ///
    /// Default: 20
    pub truncate_budget: usize,

    /// Initial page size.
    pub page_size: PageSize,

    /// Reject drafts with an empty name or content before sending.
    ///
    /// Default: `false` (the service decides)
    pub require_fields: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            user: "polly".to_string(),
            request_timeout: None,
            filter_debounce: DEFAULT_DEBOUNCE,
            notice_auto_hide: DEFAULT_AUTO_HIDE,
            notice_fade: DEFAULT_FADE,
            truncate_budget: DEFAULT_TRUNCATE_BUDGET,
            page_size: PageSize::default(),
            require_fields: false,
        }
    }
}

impl Config {
    /// Creates a config with default values for the given base URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Loads the config from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should apply.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the config through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(ENV_API_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(ENV_API_URL))?;
        let mut config = Self::new(api_url);

        if let Some(user) = lookup(ENV_USER) {
            config.user = user;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let millis: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_TIMEOUT_MS,
                value: raw.clone(),
            })?;
            config.request_timeout = Some(Duration::from_millis(millis));
        }

        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            config.page_size = raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| PageSize::try_from(n).ok())
                .ok_or(ConfigError::Invalid {
                    key: ENV_PAGE_SIZE,
                    value: raw.clone(),
                })?;
        }

        if let Some(raw) = lookup(ENV_REQUIRE_FIELDS) {
            config.require_fields = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_REQUIRE_FIELDS,
                        value: raw,
                    });
                }
            };
        }

        Ok(config)
    }

    /// Sets the operator name.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the filter debounce period.
    pub fn with_filter_debounce(mut self, quiet: Duration) -> Self {
        self.filter_debounce = quiet;
        self
    }

    /// Sets the notice auto-hide delay and fade window.
    pub fn with_notice_timing(mut self, auto_hide: Duration, fade: Duration) -> Self {
        self.notice_auto_hide = auto_hide;
        self.notice_fade = fade;
        self
    }

    /// Sets the truncation budget.
    pub fn with_truncate_budget(mut self, budget: usize) -> Self {
        self.truncate_budget = budget;
        self
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Enables or disables the draft presence check.
    pub fn with_require_fields(mut self, require: bool) -> Self {
        self.require_fields = require;
        self
    }
}
