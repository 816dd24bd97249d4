use tracing::info;

use sesmine_core::tracing::init_tracing;
use sesmine_portal::config::PortalConfig;
use sesmine_portal::router::build_router;
use sesmine_portal::state::AppState;
use sesmine_portal::usecase::seed::SeedDefaultsUseCase;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = PortalConfig::from_env();
    info!(
        session_timeout_secs = config.session_timeout_secs,
        "session idle timeout is advisory and not enforced"
    );

    let state = AppState::from_config(&config).expect("failed to build application state");

    let seed = SeedDefaultsUseCase {
        users: state.user_repo(),
        settings: state.settings_repo(),
        seed_users: config.seed_default_users,
    };
    seed.execute().await.expect("failed to seed default data");

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.portal_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("portal service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
