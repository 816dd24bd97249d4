use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Handler for `GET /healthz`: the process is up and serving.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Ok,
    Failing,
}

/// Named readiness checks. Renders `200` when every check passed, `503` otherwise.
#[derive(Debug, Serialize)]
pub struct Readiness {
    ready: bool,
    checks: BTreeMap<&'static str, CheckStatus>,
}

impl Readiness {
    pub fn new() -> Self {
        Self {
            ready: true,
            checks: BTreeMap::new(),
        }
    }

    pub fn check(mut self, name: &'static str, ok: bool) -> Self {
        let status = if ok {
            CheckStatus::Ok
        } else {
            CheckStatus::Failing
        };
        self.ready &= ok;
        self.checks.insert(name, status);
        self
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoResponse for Readiness {
    fn into_response(self) -> Response {
        let status = if self.ready {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (status, Json(self)).into_response()
    }
}
