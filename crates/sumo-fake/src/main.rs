use std::sync::Arc;

use sumo_fake::{FieldsApi, serve};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let addr = std::env::var("SUMO_FAKE_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("failed to bind {addr}: {e}");
            std::process::exit(1);
        });

    if let Err(e) = serve(listener, Arc::new(FieldsApi::new())).await {
        eprintln!("server failed: {e}");
        std::process::exit(1);
    }
}
