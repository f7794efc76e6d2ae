use axum::{routing::get, Router};
use learnlog_backend::{
    config::{get_config, init_config},
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let app_state = AppState::new()?;
    app_state.seed_demo_data().await?;

    {
        let state = app_state.clone();
        let ttl = Duration::from_secs(config.session_ttl_minutes * 60);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(60)).await;
                let reclaimed = state.quiz_sessions.evict_idle(ttl).await
                    + state.flashcard_sessions.evict_idle(ttl).await;
                if reclaimed > 0 {
                    info!(reclaimed, "Reclaimed abandoned sessions");
                }
            }
        });
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = routes::public_router().layer(axum::middleware::from_fn_with_state(
        middleware::rate_limit::new_rps_state(config.public_rps),
        middleware::rate_limit::rps_middleware,
    ));

    let admin_api = routes::admin_router()
        .layer(axum::middleware::from_fn(middleware::auth::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.admin_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(public_api)
        .merge(admin_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
