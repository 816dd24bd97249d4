use axum::{
    Router,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use sesmine_core::health::healthz;
use sesmine_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    account::change_password,
    admin::{
        approve_request, create_user, list_activities, list_contacts, list_requests, list_users,
        update_user,
    },
    contact::submit_contact,
    health::readyz,
    page::visit_page,
    plans::list_plans,
    session::{get_session, login, logout},
    settings::{get_settings, put_settings},
    signup::submit_signup,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Public
        .route("/plans", get(list_plans))
        .route("/signup", post(submit_signup))
        .route("/contact", post(submit_contact))
        // Session
        .route("/login", post(login))
        .route("/session", get(get_session).delete(logout))
        .route("/account/password", patch(change_password))
        // Pages
        .route("/pages/{page}", get(visit_page))
        // Settings
        .route("/settings", get(get_settings).put(put_settings))
        // Admin
        .route("/admin/requests", get(list_requests))
        .route("/admin/requests/{id}/approve", post(approve_request))
        .route("/admin/users", get(list_users).post(create_user))
        .route("/admin/users/{id}", patch(update_user))
        .route("/admin/contacts", get(list_contacts))
        .route("/admin/activities", get(list_activities))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(propagate_request_id_layer())
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}
