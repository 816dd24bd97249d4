//! Pending registration requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::RequestId;
use crate::plan::Plan;

/// Lifecycle of a registration request: `pending → approved`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
}

/// A signup submission awaiting administrative approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequest {
    pub id: RequestId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub job_title: String,
    pub phone: String,
    pub plan: Plan,
    pub newsletter: bool,
    pub timestamp: DateTime<Utc>,
    pub status: RequestStatus,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
}

impl PendingRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Moves the request to its terminal state. Returns `false` if it was already approved.
    pub fn approve(&mut self, at: DateTime<Utc>) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = RequestStatus::Approved;
        self.approved_at = Some(at);
        true
    }
}
