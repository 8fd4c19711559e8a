//! Order Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Order, OrderCreate, OrderShippingPatch};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let order: Option<Order> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(order)
    }

    /// Find the order carrying a tracking code
    pub async fn find_by_tracking(&self, tracking: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) WHERE tracking_code = $tracking LIMIT 1")
            .bind(("tb", TABLE))
            .bind(("tracking", tracking.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Create a new order
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let order = Order {
            id: None,
            order_status: data.order_status.unwrap_or_else(|| "Not Process".to_string()),
            cart_total: data.cart_total.unwrap_or_default(),
            tracking_carrier: None,
            tracking_code: None,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };

        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Write carrier/tracking onto an order (both fields overwritten)
    pub async fn update_shipping(
        &self,
        id: &str,
        patch: OrderShippingPatch,
    ) -> RepoResult<Order> {
        let pure_id = strip_table_prefix(TABLE, id);
        let updated: Option<Order> = self
            .base
            .db()
            .update((TABLE, pure_id))
            .merge(patch)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
