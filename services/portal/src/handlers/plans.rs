use axum::Json;

use sesmine_domain::plan::{PlanDetails, catalogue};

// ── GET /plans ───────────────────────────────────────────────────────────────

pub async fn list_plans() -> Json<Vec<PlanDetails>> {
    Json(catalogue())
}
