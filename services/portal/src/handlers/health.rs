use axum::extract::State;

use sesmine_core::health::Readiness;

use crate::state::AppState;

// ── GET /readyz ──────────────────────────────────────────────────────────────

/// Ready when the durable store accepts writes. Email delivery is optional and not checked.
pub async fn readyz(State(state): State<AppState>) -> Readiness {
    let storage = match state.store.check_writable().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "storage readiness check failed");
            false
        }
    };
    Readiness::new().check("storage", storage)
}
