use std::error::Error;
use std::sync::Arc;

use backend::store::{MemoryTaskStore, RedisTaskStore, TaskStore};
use backend::{build_router, AppState, Config, StoreBackend};
use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    env_logger::init();

    let store: Arc<dyn TaskStore> = match config.store_backend {
        StoreBackend::Redis => {
            let client = redis::Client::open(config.redis_url.as_str())?;
            Arc::new(RedisTaskStore::new(client))
        }
        StoreBackend::Memory => Arc::new(MemoryTaskStore::default()),
    };
    info!("using {} store", config.store_backend);

    let app = build_router(AppState {
        store,
        reject_blank_titles: config.reject_blank_titles,
    });

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
