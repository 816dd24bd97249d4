//! Input validation rules for signup, contact and password forms.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Characters accepted by `REQUIRE_SPECIAL`.
pub const SPECIAL_CHARS: &str = "!@#$%^&*";

pub const COMPANY_MIN_LEN: usize = 2;
pub const COMPANY_MAX_LEN: usize = 100;

/// Checks the `local@domain.tld` shape. No normalization is applied.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

/// Trim and lowercase an email address for storage and uniqueness checks.
pub fn normalize_email(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Password strength rules. Field names match the site configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct PasswordRules {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_numbers: bool,
    pub require_special: bool,
}

impl Default for PasswordRules {
    fn default() -> Self {
        Self {
            min_length: 6,
            require_uppercase: false,
            require_lowercase: false,
            require_numbers: false,
            require_special: false,
        }
    }
}

/// Returns `false` on the first unmet rule.
pub fn is_valid_password(s: &str, rules: &PasswordRules) -> bool {
    if s.chars().count() < rules.min_length {
        return false;
    }
    if rules.require_uppercase && !s.chars().any(|c| c.is_ascii_uppercase()) {
        return false;
    }
    if rules.require_lowercase && !s.chars().any(|c| c.is_ascii_lowercase()) {
        return false;
    }
    if rules.require_numbers && !s.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    if rules.require_special && !s.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return false;
    }
    true
}

/// Company name length, measured after trimming.
pub fn is_valid_company(s: &str) -> bool {
    let len = s.trim().chars().count();
    (COMPANY_MIN_LEN..=COMPANY_MAX_LEN).contains(&len)
}
