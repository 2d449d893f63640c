//! # Order Service
//!
//! CRUD for orders plus the orchestration that spans the order, item and payment stores:
//!
//! * [`place_order`](OrderService::place_order) writes an order and its items in one call, pricing
//!   each line at the product's current price.
//! * [`set_item`](OrderService::set_item) / [`remove_item`](OrderService::remove_item) edit lines
//!   under their composite key.
//! * [`pay`](OrderService::pay) records the payment and moves the order to `PAID`.
//!
//! Every check runs before the first write, so a call rejected by a check leaves the stores
//! untouched. A store failure in the middle of `place_order` can leave the order without all of
//! its items. `pay` withdraws its payment when the order itself cannot be saved.

use crate::model::{
    Order, OrderId, OrderItem, OrderItemKey, OrderStatus, Payment, Product, ProductId, User, UserId,
};
use crate::services::{CrudService, ServiceError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_store::SharedRepository;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct OrderService {
    orders: SharedRepository<Order>,
    items: SharedRepository<OrderItem>,
    payments: SharedRepository<Payment>,
    users: SharedRepository<User>,
    products: SharedRepository<Product>,
}

fn persisted_id(order: &Order) -> Result<OrderId, ServiceError> {
    order
        .id
        .ok_or_else(|| ServiceError::precondition("Order has not been persisted"))
}

impl OrderService {
    pub fn new(
        orders: SharedRepository<Order>,
        items: SharedRepository<OrderItem>,
        payments: SharedRepository<Payment>,
        users: SharedRepository<User>,
        products: SharedRepository<Product>,
    ) -> Self {
        Self {
            orders,
            items,
            payments,
            users,
            products,
        }
    }

    async fn product(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id))
    }

    /// Creates a `WAITING_PAYMENT` order for `client_id` with one item per distinct product.
    ///
    /// Lines naming the same product are merged by adding their quantities.
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        client_id: UserId,
        lines: &[(ProductId, u32)],
    ) -> Result<Order, ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::precondition("An order needs at least one item"));
        }

        let mut merged: BTreeMap<ProductId, u32> = BTreeMap::new();
        for &(product_id, quantity) in lines {
            check_quantity(product_id, quantity)?;
            let total = merged.entry(product_id).or_default();
            *total = total.checked_add(quantity).ok_or_else(|| {
                ServiceError::precondition(format!("Quantity of product {product_id} overflows"))
            })?;
        }

        let mut priced = Vec::with_capacity(merged.len());
        for (product_id, quantity) in merged {
            let product = self.product(product_id).await?;
            priced.push((product_id, quantity, product.price));
        }

        let order = self
            .insert(Some(Order::new(
                Utc::now(),
                OrderStatus::WaitingPayment,
                client_id,
            )))
            .await?;
        let order_id = persisted_id(&order)?;

        for (product_id, quantity, price) in priced.iter().copied() {
            self.items
                .save(OrderItem::new(order_id, product_id, quantity, price))
                .await?;
        }

        info!(%order_id, %client_id, items = priced.len(), "Order placed");
        Ok(order)
    }

    /// Writes the line for `product_id` at the product's current price, replacing any existing one.
    #[instrument(skip(self))]
    pub async fn set_item(
        &self,
        order_id: OrderId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<OrderItem, ServiceError> {
        check_quantity(product_id, quantity)?;
        self.find_by_id(order_id).await?;
        let product = self.product(product_id).await?;
        let item = self
            .items
            .save(OrderItem::new(order_id, product_id, quantity, product.price))
            .await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, order_id: OrderId, product_id: ProductId) -> Result<(), ServiceError> {
        let key = OrderItemKey::new(order_id, product_id);
        if !self.items.exists_by_id(key).await? {
            return Err(ServiceError::not_found("OrderItem", key));
        }
        self.items.delete_by_id(key).await?;
        Ok(())
    }

    /// Lines of the order, by ascending product id.
    pub async fn items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, ServiceError> {
        self.find_by_id(order_id).await?;
        let all = self.items.find_all().await?;
        Ok(all
            .into_iter()
            .filter(|item| item.order_id() == order_id)
            .collect())
    }

    /// Sum of the sub-totals of the order's items.
    pub async fn total(&self, order_id: OrderId) -> Result<Decimal, ServiceError> {
        let items = self.items(order_id).await?;
        Ok(items.iter().map(OrderItem::sub_total).sum())
    }

    pub async fn find_by_client(&self, client_id: UserId) -> Result<Vec<Order>, ServiceError> {
        if !self.users.exists_by_id(client_id).await? {
            return Err(ServiceError::not_found("User", client_id));
        }
        let all = self.orders.find_all().await?;
        Ok(all
            .into_iter()
            .filter(|order| order.client_id == client_id)
            .collect())
    }

    /// Pays the order at `moment`.
    ///
    /// Only a `WAITING_PAYMENT` order without a payment can be paid, and not before it was placed.
    #[instrument(skip(self))]
    pub async fn pay(&self, order_id: OrderId, moment: DateTime<Utc>) -> Result<Payment, ServiceError> {
        let mut order = self.find_by_id(order_id).await?;
        match order.status {
            OrderStatus::WaitingPayment => {}
            OrderStatus::Canceled => {
                return Err(ServiceError::precondition(format!(
                    "Order {order_id} is canceled"
                )));
            }
            OrderStatus::Paid | OrderStatus::Shipped | OrderStatus::Delivered => {
                return Err(ServiceError::precondition(format!(
                    "Order {order_id} is already paid"
                )));
            }
        }
        if self.payments.exists_by_id(order_id).await? {
            return Err(ServiceError::precondition(format!(
                "Order {order_id} is already paid"
            )));
        }
        if moment < order.moment {
            return Err(ServiceError::precondition(format!(
                "Payment moment {moment} precedes order moment {}",
                order.moment
            )));
        }

        let payment = self.payments.save(Payment::new(order_id, moment)).await?;
        order.status = OrderStatus::Paid;
        if let Err(e) = self.orders.save(order).await {
            if let Err(rollback) = self.payments.delete_by_id(order_id).await {
                warn!(%order_id, error = %rollback, "Failed to withdraw payment");
            }
            return Err(e.into());
        }
        info!(%order_id, "Order paid");
        Ok(payment)
    }

    pub async fn payment(&self, order_id: OrderId) -> Result<Option<Payment>, ServiceError> {
        self.find_by_id(order_id).await?;
        Ok(self.payments.find_by_id(order_id).await?)
    }
}

fn check_quantity(product_id: ProductId, quantity: u32) -> Result<(), ServiceError> {
    if quantity == 0 {
        return Err(ServiceError::precondition(format!(
            "Quantity of product {product_id} must be positive"
        )));
    }
    Ok(())
}

#[async_trait]
impl CrudService<Order> for OrderService {
    fn repository(&self) -> &SharedRepository<Order> {
        &self.orders
    }

    /// New orders start unpaid. A stored order keeps its moment at or before its payment's.
    async fn validate(&self, order: &Order) -> Result<(), ServiceError> {
        if !self.users.exists_by_id(order.client_id).await? {
            return Err(ServiceError::not_found("User", order.client_id));
        }
        let Some(id) = order.id else {
            return match order.status {
                OrderStatus::WaitingPayment | OrderStatus::Canceled => Ok(()),
                status => Err(ServiceError::precondition(format!(
                    "A new order cannot start as {status:?}"
                ))),
            };
        };
        if let Some(payment) = self.payments.find_by_id(id).await? {
            if order.moment > payment.moment {
                return Err(ServiceError::precondition(format!(
                    "Order moment {} is later than its payment moment {}",
                    order.moment, payment.moment
                )));
            }
        }
        Ok(())
    }

    /// Deletes an order without items, together with its payment.
    async fn delete(&self, id: OrderId) -> Result<(), ServiceError> {
        if !self.orders.exists_by_id(id).await? {
            return Err(ServiceError::not_found("Order", id));
        }
        self.orders.delete_by_id(id).await?;
        if self.payments.exists_by_id(id).await? {
            self.payments.delete_by_id(id).await?;
        }
        info!(order_id = %id, "Order deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use resource_store::mock::MockStore;
    use resource_store::StoreError;

    struct Mocks {
        orders: MockStore<Order>,
        items: MockStore<OrderItem>,
        payments: MockStore<Payment>,
        users: MockStore<User>,
        products: MockStore<Product>,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                orders: MockStore::new(),
                items: MockStore::new(),
                payments: MockStore::new(),
                users: MockStore::new(),
                products: MockStore::new(),
            }
        }

        fn service(&self) -> OrderService {
            OrderService::new(
                self.orders.shared(),
                self.items.shared(),
                self.payments.shared(),
                self.users.shared(),
                self.products.shared(),
            )
        }

        fn verify(&self) {
            self.orders.verify();
            self.items.verify();
            self.payments.verify();
            self.users.verify();
            self.products.verify();
        }
    }

    fn product(id: u64, name: &str, price: Decimal) -> Product {
        let mut product = Product::new(name, "", price, "");
        product.id = Some(ProductId(id));
        product
    }

    fn placed_at(id: u64, status: OrderStatus) -> Order {
        let moment = Utc.with_ymd_and_hms(2019, 6, 20, 19, 53, 7).unwrap();
        let mut order = Order::new(moment, status, UserId(1));
        order.id = Some(OrderId(id));
        order
    }

    #[tokio::test]
    async fn place_order_merges_lines_and_captures_prices() {
        let mocks = Mocks::new();
        mocks
            .products
            .expect_find_by_id(ProductId(1))
            .return_ok(Some(product(1, "The Lord of the Rings", Decimal::new(905, 1))));
        mocks
            .products
            .expect_find_by_id(ProductId(3))
            .return_ok(Some(product(3, "Macbook Pro", Decimal::new(1250, 0))));
        mocks.users.expect_exists_by_id(UserId(1)).return_ok(true);
        mocks.orders.expect_save().assign_id(OrderId(1));
        mocks.items.expect_save().echo();
        mocks.items.expect_save().echo();

        let order = mocks
            .service()
            .place_order(
                UserId(1),
                &[(ProductId(3), 1), (ProductId(1), 2), (ProductId(3), 1)],
            )
            .await
            .unwrap();

        assert_eq!(order.id, Some(OrderId(1)));
        assert_eq!(order.status, OrderStatus::WaitingPayment);
        let items = mocks.items.saved();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].key, OrderItemKey::new(OrderId(1), ProductId(1)));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price, Decimal::new(905, 1));
        assert_eq!(items[1].quantity, 2);
        assert_eq!(items[1].sub_total(), Decimal::new(2500, 0));
        mocks.verify();
    }

    #[tokio::test]
    async fn place_order_for_unknown_client_writes_nothing() {
        let mocks = Mocks::new();
        mocks
            .products
            .expect_find_by_id(ProductId(2))
            .return_ok(Some(product(2, "Smart TV", Decimal::new(2190, 0))));
        mocks.users.expect_exists_by_id(UserId(8)).return_ok(false);

        let err = mocks
            .service()
            .place_order(UserId(8), &[(ProductId(2), 1)])
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::not_found("User", 8));
        assert!(mocks.orders.saved().is_empty());
        mocks.verify();
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected_up_front() {
        let mocks = Mocks::new();

        let err = mocks
            .service()
            .place_order(UserId(1), &[(ProductId(1), 0)])
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::PreconditionFailure(_)));
        mocks.verify();
    }

    #[tokio::test]
    async fn pay_records_payment_and_marks_order_paid() {
        let mocks = Mocks::new();
        let order = placed_at(1, OrderStatus::WaitingPayment);
        let moment = order.moment + Duration::hours(2);
        mocks
            .orders
            .expect_find_by_id(OrderId(1))
            .return_ok(Some(order));
        mocks.payments.expect_exists_by_id(OrderId(1)).return_ok(false);
        mocks.payments.expect_save().echo();
        mocks.orders.expect_save().echo();

        let payment = mocks.service().pay(OrderId(1), moment).await.unwrap();

        assert_eq!(payment, Payment::new(OrderId(1), moment));
        assert_eq!(mocks.orders.saved()[0].status, OrderStatus::Paid);
        mocks.verify();
    }

    #[tokio::test]
    async fn pay_rejects_canceled_orders() {
        let mocks = Mocks::new();
        let order = placed_at(4, OrderStatus::Canceled);
        let moment = order.moment;
        mocks
            .orders
            .expect_find_by_id(OrderId(4))
            .return_ok(Some(order));

        let err = mocks.service().pay(OrderId(4), moment).await.unwrap_err();

        assert_eq!(err, ServiceError::precondition("Order 4 is canceled"));
        mocks.verify();
    }

    #[tokio::test]
    async fn pay_rejects_a_moment_before_the_order() {
        let mocks = Mocks::new();
        let order = placed_at(2, OrderStatus::WaitingPayment);
        let moment = order.moment - Duration::minutes(1);
        mocks
            .orders
            .expect_find_by_id(OrderId(2))
            .return_ok(Some(order));
        mocks.payments.expect_exists_by_id(OrderId(2)).return_ok(false);

        let err = mocks.service().pay(OrderId(2), moment).await.unwrap_err();

        assert!(matches!(err, ServiceError::PreconditionFailure(_)));
        assert!(mocks.payments.saved().is_empty());
        mocks.verify();
    }

    #[tokio::test]
    async fn delete_removes_the_payment_too() {
        let mocks = Mocks::new();
        mocks.orders.expect_exists_by_id(OrderId(1)).return_ok(true);
        mocks.orders.expect_delete_by_id(OrderId(1)).return_ok(());
        mocks.payments.expect_exists_by_id(OrderId(1)).return_ok(true);
        mocks.payments.expect_delete_by_id(OrderId(1)).return_ok(());

        mocks.service().delete(OrderId(1)).await.unwrap();
        mocks.verify();
    }

    #[tokio::test]
    async fn delete_of_order_with_items_keeps_the_payment() {
        let mocks = Mocks::new();
        mocks.orders.expect_exists_by_id(OrderId(1)).return_ok(true);
        mocks
            .orders
            .expect_delete_by_id(OrderId(1))
            .return_err(StoreError::integrity("Order 1 is referenced by 2 order item(s)"));

        let err = mocks.service().delete(OrderId(1)).await.unwrap_err();

        assert!(matches!(err, ServiceError::DatabaseIntegrityViolation(_)));
        mocks.verify();
    }

    #[tokio::test]
    async fn remove_item_of_unknown_line_is_not_found() {
        let mocks = Mocks::new();
        let key = OrderItemKey::new(OrderId(1), ProductId(5));
        mocks.items.expect_exists_by_id(key).return_ok(false);

        let err = mocks
            .service()
            .remove_item(OrderId(1), ProductId(5))
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::not_found("OrderItem", "1/5"));
        mocks.verify();
    }

    #[tokio::test]
    async fn pay_withdraws_the_payment_when_the_order_cannot_be_saved() {
        let mocks = Mocks::new();
        let order = placed_at(1, OrderStatus::WaitingPayment);
        let moment = order.moment + Duration::hours(2);
        mocks
            .orders
            .expect_find_by_id(OrderId(1))
            .return_ok(Some(order));
        mocks.payments.expect_exists_by_id(OrderId(1)).return_ok(false);
        mocks.payments.expect_save().echo();
        mocks
            .orders
            .expect_save()
            .return_err(StoreError::not_found("Order", 1));
        mocks.payments.expect_delete_by_id(OrderId(1)).return_ok(());

        let err = mocks.service().pay(OrderId(1), moment).await.unwrap_err();

        assert_eq!(err, ServiceError::not_found("Order", 1));
        mocks.verify();
    }

    #[tokio::test]
    async fn update_leaves_the_status_alone() {
        let mocks = Mocks::new();
        let stored = placed_at(2, OrderStatus::WaitingPayment);
        let source = Order::new(stored.moment, OrderStatus::Paid, UserId(1));
        mocks
            .orders
            .expect_find_by_id(OrderId(2))
            .return_ok(Some(stored));
        mocks.users.expect_exists_by_id(UserId(1)).return_ok(true);
        mocks.payments.expect_find_by_id(OrderId(2)).return_ok(None);
        mocks.orders.expect_save().echo();

        let updated = mocks
            .service()
            .update(OrderId(2), Some(source))
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::WaitingPayment);
        assert_eq!(mocks.orders.saved()[0].status, OrderStatus::WaitingPayment);
        mocks.verify();
    }

    #[tokio::test]
    async fn update_cannot_move_the_moment_past_the_payment() {
        let mocks = Mocks::new();
        let stored = placed_at(1, OrderStatus::Paid);
        let paid_at = stored.moment + Duration::hours(2);
        let source = Order::new(stored.moment + Duration::days(30), OrderStatus::Paid, UserId(1));
        mocks
            .orders
            .expect_find_by_id(OrderId(1))
            .return_ok(Some(stored));
        mocks.users.expect_exists_by_id(UserId(1)).return_ok(true);
        mocks
            .payments
            .expect_find_by_id(OrderId(1))
            .return_ok(Some(Payment::new(OrderId(1), paid_at)));

        let err = mocks
            .service()
            .update(OrderId(1), Some(source))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::PreconditionFailure(_)));
        assert!(mocks.orders.saved().is_empty());
        mocks.verify();
    }

    #[tokio::test]
    async fn update_with_unknown_client_is_not_found() {
        let mocks = Mocks::new();
        let stored = placed_at(1, OrderStatus::WaitingPayment);
        let source = Order::new(stored.moment, OrderStatus::WaitingPayment, UserId(9));
        mocks
            .orders
            .expect_find_by_id(OrderId(1))
            .return_ok(Some(stored));
        mocks.users.expect_exists_by_id(UserId(9)).return_ok(false);

        let err = mocks
            .service()
            .update(OrderId(1), Some(source))
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::not_found("User", 9));
        assert!(mocks.orders.saved().is_empty());
        mocks.verify();
    }

    #[tokio::test]
    async fn insert_of_an_already_paid_order_is_rejected() {
        let mocks = Mocks::new();
        mocks.users.expect_exists_by_id(UserId(1)).return_ok(true);
        let moment = Utc.with_ymd_and_hms(2019, 7, 22, 15, 21, 22).unwrap();

        let err = mocks
            .service()
            .insert(Some(Order::new(moment, OrderStatus::Paid, UserId(1))))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::PreconditionFailure(_)));
        assert!(mocks.orders.saved().is_empty());
        mocks.verify();
    }

    #[tokio::test]
    async fn find_by_unknown_client_is_not_found() {
        let mocks = Mocks::new();
        mocks.users.expect_exists_by_id(UserId(9)).return_ok(false);

        let err = mocks.service().find_by_client(UserId(9)).await.unwrap_err();

        assert_eq!(err, ServiceError::not_found("User", 9));
        mocks.verify();
    }
}
