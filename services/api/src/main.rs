use cradle_api::config::ApiConfig;
use cradle_api::router::build_router;
use cradle_api::state::AppState;
use cradle_core::tracing::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env();
    let state = AppState::from_config(&config)
        .await
        .expect("failed to initialize storage backend");
    let router = build_router(state);

    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");
    info!("api listening on {addr}");

    axum::serve(listener, router).await.expect("server error");
}
