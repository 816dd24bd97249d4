//! Page-visit activity log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the activity log.
pub const MAX_ACTIVITIES: usize = 50;

/// One page visit by an authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    pub page: String,
    pub timestamp: DateTime<Utc>,
    pub user: String,
}

/// Prepend `entry` to a newest-first log and drop the oldest entries beyond [`MAX_ACTIVITIES`].
pub fn push_capped(log: &mut Vec<UserActivity>, entry: UserActivity) {
    log.insert(0, entry);
    log.truncate(MAX_ACTIVITIES);
}
