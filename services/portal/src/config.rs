use std::path::PathBuf;
use std::time::Duration;

use sesmine_domain::user::IdentifierMatching;
use sesmine_domain::validation::PasswordRules;
use sesmine_session_types::cookie::CookieSettings;

use crate::infra::notify::EmailJsConfig;

/// Portal service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// TCP port for the HTTP server (default 3114). Env var: `PORTAL_PORT`.
    pub portal_port: u16,
    /// Directory of the durable store. In-memory when unset. Env var: `DATA_DIR`.
    pub data_dir: Option<PathBuf>,
    pub cookie: CookieSettings,
    /// Present only when both `EMAILJS_PUBLIC_KEY` and `EMAILJS_SERVICE_ID` are set.
    pub emailjs: Option<EmailJsConfig>,
    /// Env var: `ENABLE_REGISTRATION` (default true).
    pub enable_registration: bool,
    /// Env var: `LOGIN_CASE_INSENSITIVE_EMAIL` (default false).
    pub identifier_matching: IdentifierMatching,
    /// Idle timeout in seconds. Reported at startup, not enforced.
    pub session_timeout_secs: u64,
    pub password_rules: PasswordRules,
    /// Env var: `SEED_DEFAULT_USERS` (default true).
    pub seed_default_users: bool,
}

impl PortalConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|v| parse_flag(&v))
                .unwrap_or(default)
        };

        let emailjs = match (lookup("EMAILJS_PUBLIC_KEY"), lookup("EMAILJS_SERVICE_ID")) {
            (Some(public_key), Some(service_id))
                if !public_key.is_empty() && !service_id.is_empty() =>
            {
                let mut emailjs = EmailJsConfig::new(public_key, service_id);
                if let Some(ms) = parsed("EMAILJS_TIMEOUT_MS") {
                    emailjs.timeout = Duration::from_millis(ms);
                }
                if let Some(admin_email) = lookup("ADMIN_EMAIL") {
                    emailjs.admin_email = admin_email;
                }
                if let Some(site_url) = lookup("SITE_URL") {
                    emailjs.site_url = site_url;
                }
                Some(emailjs)
            }
            _ => None,
        };

        let defaults = PasswordRules::default();
        let password_rules = PasswordRules {
            min_length: parsed("PASSWORD_MIN_LENGTH")
                .map(|v| v as usize)
                .unwrap_or(defaults.min_length),
            require_uppercase: flag("PASSWORD_REQUIRE_UPPERCASE", defaults.require_uppercase),
            require_lowercase: flag("PASSWORD_REQUIRE_LOWERCASE", defaults.require_lowercase),
            require_numbers: flag("PASSWORD_REQUIRE_NUMBERS", defaults.require_numbers),
            require_special: flag("PASSWORD_REQUIRE_SPECIAL", defaults.require_special),
        };

        let identifier_matching = if flag("LOGIN_CASE_INSENSITIVE_EMAIL", false) {
            IdentifierMatching::CaseInsensitiveEmail
        } else {
            IdentifierMatching::Exact
        };

        Self {
            portal_port: lookup("PORTAL_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            data_dir: lookup("DATA_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            cookie: CookieSettings {
                domain: lookup("COOKIE_DOMAIN").filter(|v| !v.is_empty()),
                secure: flag("COOKIE_SECURE", false),
            },
            emailjs,
            enable_registration: flag("ENABLE_REGISTRATION", true),
            identifier_matching,
            session_timeout_secs: parsed("SESSION_TIMEOUT_SECS").unwrap_or(3600),
            password_rules,
            seed_default_users: flag("SEED_DEFAULT_USERS", true),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
