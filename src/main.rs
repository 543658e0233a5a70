use mini_shop::cli;
use mini_shop::lifecycle::{setup_tracing, ShopSystem};
use tracing::info;

/// Data directory used unless `MINI_SHOP_DATA_DIR` overrides it.
const DEFAULT_DATA_DIR: &str = "data";

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let data_dir =
        std::env::var("MINI_SHOP_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    info!(data_dir = %data_dir, "Starting mini-shop");

    let system = ShopSystem::new(data_dir);

    cli::run(&system).await;

    system.shutdown().await?;
    info!("Bye");
    Ok(())
}
