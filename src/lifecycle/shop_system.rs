use crate::lifecycle::ShopConfig;
use crate::services::{CategoryService, OrderService, ProductService, UserService};
use crate::{category_actor, order_actor, product_actor, user_actor};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The runtime orchestrator of the shop.
///
/// `ShopSystem` starts one store per entity type, injects the clients each store needs for its
/// integrity checks, and hands out the four services built on top of them.
///
/// # Store wiring
///
/// ```text
/// User ──▶ Order ──▶ OrderItem ◀── Product ◀── Category
///                    Payment
/// ```
///
/// An arrow reads "consults on delete". The graph is acyclic, so every store stops once the
/// services are dropped.
///
/// # Example
///
/// ```rust
/// use webshop::lifecycle::{ShopConfig, ShopSystem};
/// use webshop::model::User;
/// use webshop::services::CrudService;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = ShopSystem::new(&ShopConfig::default());
///
///     let user = User::new("Alex Green", "alex@gmail.com", "977777777", "123456");
///     let saved = system.users.insert(Some(user)).await.map_err(|e| e.to_string())?;
///     assert!(saved.id.is_some());
///
///     system.shutdown().await
/// }
/// ```
pub struct ShopSystem {
    pub users: UserService,
    pub orders: OrderService,
    pub products: ProductService,
    pub categories: CategoryService,

    /// Store tasks by entity name, used for graceful shutdown.
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl ShopSystem {
    /// Creates every store, starts it with its context and builds the services.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: &ShopConfig) -> Self {
        let buffer = config.store_buffer;

        // 1. Create stores (no dependencies yet)
        let (item_store, item_client) = order_actor::items(buffer);
        let (payment_store, payment_client) = order_actor::payments(buffer);
        let (order_store, order_client) = order_actor::new(buffer);
        let (product_store, product_client) = product_actor::new(buffer);
        let (category_store, category_client) = category_actor::new(buffer);
        let (user_store, user_client) = user_actor::new(buffer);

        // 2. Start stores with injected context
        let handles = vec![
            ("OrderItem", tokio::spawn(item_store.run(()))),
            ("Payment", tokio::spawn(payment_store.run(()))),
            ("Order", tokio::spawn(order_store.run(item_client.clone()))),
            ("Product", tokio::spawn(product_store.run(item_client.clone()))),
            (
                "Category",
                tokio::spawn(category_store.run(product_client.clone())),
            ),
            ("User", tokio::spawn(user_store.run(order_client.clone()))),
        ];

        // 3. Build services on shared repository handles
        let users = UserService::new(user_client.shared());
        let categories = CategoryService::new(category_client.shared());
        let products = ProductService::new(product_client.shared(), category_client.shared());
        let orders = OrderService::new(
            order_client.shared(),
            item_client.shared(),
            payment_client.shared(),
            user_client.shared(),
            product_client.shared(),
        );

        info!(buffer, stores = handles.len(), "Shop system started");

        Self {
            users,
            orders,
            products,
            categories,
            handles,
        }
    }

    /// Gracefully shuts down every store.
    ///
    /// Dropping the services closes the store channels; each store drains and exits, releasing
    /// the clients it held as context. Returns an error naming any store task that panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down shop system...");

        let Self {
            users,
            orders,
            products,
            categories,
            handles,
        } = self;
        drop(users);
        drop(orders);
        drop(products);
        drop(categories);

        let mut failed = Vec::new();
        for (store, handle) in handles {
            if let Err(e) = handle.await {
                error!(store, error = %e, "Store task failed");
                failed.push(format!("{store}: {e}"));
            }
        }

        if failed.is_empty() {
            info!("Shop system shut down cleanly");
            Ok(())
        } else {
            Err(format!("Store tasks failed: {}", failed.join(", ")))
        }
    }
}
