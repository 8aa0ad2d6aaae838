use dotenvy::dotenv;
use orgdeck::logging::init_tracing;
use orgdeck::router::init_router;
use orgdeck::state::init_app_state;
use orgdeck_config::ServerConfig;
use tracing::info;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();
    let state = init_app_state(&server_config).expect("Failed to load dataset");
    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .expect("Failed to bind listener");

    info!(address = %address, "Server running");
    println!("🚀 Server running on http://{}", address);
    println!("📖 Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app).await.expect("Server error");
}
