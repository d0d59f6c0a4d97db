//! Cart and Checkout Use Cases
//!
//! Cart lines belong to one buyer; checkout turns selected lines into
//! orders inside a single store transaction.

use std::sync::Arc;

use auth::models::account_id::AccountId;
use kernel::id::{CartItemId, ProductId};

use crate::domain::entities::{CartLine, CheckoutSummary, OrderStatus, OrderSummary, ProductStatus};
use crate::domain::repository::CartRepository;
use crate::error::{MarketError, MarketResult};

/// Cart contents plus the totals the client renders
pub struct CartContents {
    pub items: Vec<CartLine>,
    pub total_items: i64,
    pub total_price_kobo: i64,
}

/// Cart use case
pub struct CartUseCase<R>
where
    R: CartRepository,
{
    repo: Arc<R>,
}

impl<R> CartUseCase<R>
where
    R: CartRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn add(
        &self,
        user_id: AccountId,
        product_id: ProductId,
        quantity: Option<i32>,
    ) -> MarketResult<()> {
        let product = self
            .repo
            .product_for_cart(product_id)
            .await?
            .ok_or(MarketError::NotFound("Product"))?;

        if product.status != ProductStatus::Active {
            return Err(MarketError::NotFound("Product"));
        }
        if product.seller_id == user_id {
            return Err(MarketError::InvalidInput(
                "Cannot add your own product to cart".into(),
            ));
        }

        let quantity = quantity.unwrap_or(1).max(1);
        self.repo.upsert_item(&user_id, product_id, quantity).await?;

        tracing::debug!(user_id = %user_id, product_id = %product_id, "Cart line added");
        Ok(())
    }

    pub async fn contents(&self, user_id: AccountId) -> MarketResult<CartContents> {
        let items = self.repo.items(&user_id).await?;

        let total_items = items.iter().map(|i| i.quantity as i64).sum();
        let total_price_kobo = items.iter().map(CartLine::subtotal_kobo).sum();

        Ok(CartContents {
            items,
            total_items,
            total_price_kobo,
        })
    }

    pub async fn update_quantity(
        &self,
        user_id: AccountId,
        cart_item_id: CartItemId,
        quantity: i32,
    ) -> MarketResult<()> {
        let quantity = quantity.max(1);
        let updated = self
            .repo
            .update_quantity(&user_id, cart_item_id, quantity)
            .await?;
        if !updated {
            return Err(MarketError::NotFound("Cart item"));
        }
        Ok(())
    }

    pub async fn remove(&self, user_id: AccountId, cart_item_id: CartItemId) -> MarketResult<()> {
        let removed = self.repo.remove(&user_id, cart_item_id).await?;
        if !removed {
            return Err(MarketError::NotFound("Cart item"));
        }
        Ok(())
    }

    pub async fn clear(&self, user_id: AccountId) -> MarketResult<()> {
        self.repo.clear(&user_id).await?;
        Ok(())
    }

    pub async fn checkout(
        &self,
        user_id: AccountId,
        cart_item_ids: Vec<i64>,
        shipping_address: String,
        payment_method: String,
    ) -> MarketResult<CheckoutSummary> {
        let shipping_address = shipping_address.trim().to_string();
        if cart_item_ids.is_empty() || shipping_address.is_empty() {
            return Err(MarketError::InvalidInput(
                "Missing required information".into(),
            ));
        }

        let ids: Vec<CartItemId> = cart_item_ids
            .into_iter()
            .map(CartItemId::from_i64)
            .collect();

        let summary = self
            .repo
            .checkout(&user_id, &ids, &shipping_address, payment_method.trim())
            .await?;

        tracing::info!(
            user_id = %user_id,
            orders = summary.orders.len(),
            total_kobo = summary.total_price_kobo,
            "Checkout completed"
        );

        Ok(summary)
    }

    pub async fn orders(
        &self,
        user_id: AccountId,
        status: Option<String>,
    ) -> MarketResult<Vec<OrderSummary>> {
        let status = status.as_deref().and_then(OrderStatus::from_code);
        self.repo.orders(&user_id, status).await
    }
}
