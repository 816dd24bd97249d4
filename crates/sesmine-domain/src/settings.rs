//! Site-wide user preferences.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub email_notifications: bool,
    pub browser_notifications: bool,
    pub auto_save: bool,
    pub theme: String,
    pub language: String,
    pub timezone: String,
    pub date_format: String,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            browser_notifications: false,
            auto_save: true,
            theme: "light".to_owned(),
            language: "en".to_owned(),
            timezone: "UTC".to_owned(),
            date_format: "MM/DD/YYYY".to_owned(),
            currency: "USD".to_owned(),
        }
    }
}
