//! Starts the shop, optionally loads the demo data set, logs a summary and shuts down.

use resource_store::tracing::setup_tracing;
use tracing::{info, Instrument};
use webshop::lifecycle::{seed_demo_data, ShopConfig, ShopSystem};
use webshop::services::CrudService;

#[tokio::main]
async fn main() -> Result<(), String> {
    // A missing .env file is fine; variables may come from the environment.
    let _ = dotenvy::dotenv();
    setup_tracing();

    let config = ShopConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting shop");

    let system = ShopSystem::new(&config);

    if config.seed_demo {
        let span = tracing::info_span!("seed");
        seed_demo_data(&system)
            .instrument(span)
            .await
            .map_err(|e| e.to_string())?;
    }

    let span = tracing::info_span!("summary");
    async {
        let users = system.users.find_all().await.map_err(|e| e.to_string())?;
        let products = system.products.find_all().await.map_err(|e| e.to_string())?;
        let orders = system.orders.find_all().await.map_err(|e| e.to_string())?;
        info!(
            users = users.len(),
            products = products.len(),
            orders = orders.len(),
            "Shop contents"
        );
        for order in &orders {
            if let Some(id) = order.id {
                let total = system.orders.total(id).await.map_err(|e| e.to_string())?;
                info!(order_id = %id, status = ?order.status, %total, "Order");
            }
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;

    info!("Shop stopped");
    Ok(())
}
