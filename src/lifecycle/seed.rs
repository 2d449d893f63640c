//! Demo data set, loaded through the services so every write passes the usual checks.

use crate::lifecycle::ShopSystem;
use crate::model::{Category, Order, OrderId, OrderStatus, Product, User, UserId};
use crate::services::{CrudService, ServiceError};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument};

fn moment(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Result<DateTime<Utc>, ServiceError> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .ok_or_else(|| ServiceError::precondition("invalid demo timestamp"))
}

fn persisted<I>(id: Option<I>, entity: &str) -> Result<I, ServiceError> {
    id.ok_or_else(|| ServiceError::precondition(format!("{entity} was not assigned an id")))
}

/// Inserts two users, three categories, five products and three orders, and pays the first order.
#[instrument(skip(system))]
pub async fn seed_demo_data(system: &ShopSystem) -> Result<(), ServiceError> {
    let maria = system
        .users
        .insert(Some(User::new("Maria Brown", "maria@gmail.com", "988888888", "123456")))
        .await?;
    let alex = system
        .users
        .insert(Some(User::new("Alex Green", "alex@gmail.com", "977777777", "123456")))
        .await?;
    let maria = persisted(maria.id, "User")?;
    let alex = persisted(alex.id, "User")?;

    let mut categories = Vec::new();
    for name in ["Electronics", "Books", "Computers"] {
        let category = system.categories.insert(Some(Category::new(name))).await?;
        categories.push(persisted(category.id, "Category")?);
    }
    let [electronics, books, computers] = categories[..] else {
        return Err(ServiceError::precondition("expected three demo categories"));
    };

    let catalogue = [
        Product::new(
            "The Lord of the Rings",
            "Lorem ipsum dolor sit amet, consectetur.",
            Decimal::new(905, 1),
            "",
        )
        .with_category(books),
        Product::new(
            "Smart TV",
            "Nulla eu imperdiet purus. Maecenas ante.",
            Decimal::new(2190, 0),
            "",
        )
        .with_category(electronics)
        .with_category(computers),
        Product::new(
            "Macbook Pro",
            "Nam eleifend maximus tortor, at mollis.",
            Decimal::new(1250, 0),
            "",
        )
        .with_category(computers),
        Product::new(
            "PC Gamer",
            "Donec aliquet odio ac rhoncus cursus.",
            Decimal::new(1200, 0),
            "",
        )
        .with_category(computers),
        Product::new(
            "Rails for Dummies",
            "Cras fringilla convallis sem vel faucibus.",
            Decimal::new(10099, 2),
            "",
        )
        .with_category(books),
    ];
    let mut products = Vec::new();
    for product in catalogue {
        let saved = system.products.insert(Some(product)).await?;
        products.push(persisted(saved.id, "Product")?);
    }

    let first = place(system, moment(2019, 6, 20, 19, 53, 7)?, maria).await?;
    let second = place(system, moment(2019, 7, 21, 3, 42, 10)?, alex).await?;
    let third = place(system, moment(2019, 7, 22, 15, 21, 22)?, maria).await?;

    system.orders.set_item(first, products[0], 2).await?;
    system.orders.set_item(first, products[2], 1).await?;
    system.orders.set_item(second, products[2], 2).await?;
    system.orders.set_item(third, products[4], 2).await?;

    system
        .orders
        .pay(first, moment(2019, 6, 20, 21, 53, 7)?)
        .await?;

    info!(
        users = 2,
        categories = categories.len(),
        products = products.len(),
        orders = 3,
        "Demo data loaded"
    );
    Ok(())
}

async fn place(
    system: &ShopSystem,
    at: DateTime<Utc>,
    client: UserId,
) -> Result<OrderId, ServiceError> {
    let order = system
        .orders
        .insert(Some(Order::new(at, OrderStatus::WaitingPayment, client)))
        .await?;
    persisted(order.id, "Order")
}
