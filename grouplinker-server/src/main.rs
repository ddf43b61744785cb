use std::net::SocketAddr;
use std::sync::Arc;

use grouplinker_libs::registry::GroupRegistry;
use grouplinker_libs::store::JsonFileStore;
use log::info;
use parking_lot::RwLock;

mod error;
mod routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let data_file =
        std::env::var("GROUPLINKER_DATA").unwrap_or_else(|_| "groups_data.json".to_string());
    let addr: SocketAddr = std::env::var("GROUPLINKER_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
        .parse()?;

    let registry = GroupRegistry::open(JsonFileStore::new(&data_file));
    let app = routes::router(Arc::new(RwLock::new(registry)));

    info!("GroupLinker listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
