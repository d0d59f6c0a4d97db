//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure
//! layer. Checkout is explicitly transactional: one order per cart line
//! and the line deletions commit or roll back together.

use auth::models::account_id::AccountId;
use kernel::id::{CartItemId, CategoryId, MessageId, ProductId};

use crate::domain::entities::{
    CartLine, CartProduct, CategoryWithCount, CheckoutSummary, ConversationSummary, MessageView,
    NewMessage, NewProduct, OrderStatus, OrderSummary, ProductDetail, ProductFilter, ProductStatus,
    ProductSummary, ProductUpdate,
};
use crate::error::MarketResult;

/// Catalog repository trait
#[trait_variant::make(CatalogRepository: Send)]
pub trait LocalCatalogRepository {
    /// Persist a new listing; the store assigns the id
    async fn create_product(&self, product: &NewProduct) -> MarketResult<ProductId>;

    /// Check a category exists before listing into it
    async fn category_exists(&self, category_id: CategoryId) -> MarketResult<bool>;

    /// Filtered, sorted, paginated listing; returns (rows, total matches)
    async fn list_products(
        &self,
        filter: &ProductFilter,
        per_page: u32,
    ) -> MarketResult<(Vec<ProductSummary>, u64)>;

    /// Full detail for one listing
    async fn get_product(&self, product_id: ProductId) -> MarketResult<Option<ProductDetail>>;

    /// Bump the view counter
    async fn increment_views(&self, product_id: ProductId) -> MarketResult<()>;

    /// A seller's own listings in one status
    async fn seller_products(
        &self,
        seller_id: &AccountId,
        status: ProductStatus,
    ) -> MarketResult<Vec<ProductSummary>>;

    /// Update a listing; Ok(false) when it is not the seller's
    async fn update_product(
        &self,
        product_id: ProductId,
        seller_id: &AccountId,
        update: &ProductUpdate,
    ) -> MarketResult<bool>;

    /// Soft delete (status -> inactive); Ok(false) when not the seller's
    async fn soft_delete(
        &self,
        product_id: ProductId,
        seller_id: &AccountId,
    ) -> MarketResult<bool>;

    /// All categories with live listing counts
    async fn categories(&self) -> MarketResult<Vec<CategoryWithCount>>;

    /// Featured or heavily-viewed active listings
    async fn featured(&self, limit: i64) -> MarketResult<Vec<ProductSummary>>;
}

/// Cart and order repository trait
#[trait_variant::make(CartRepository: Send)]
pub trait LocalCartRepository {
    /// The slice of an active product the cart logic validates against
    async fn product_for_cart(&self, product_id: ProductId) -> MarketResult<Option<CartProduct>>;

    /// Add to cart, merging quantity when the line already exists
    async fn upsert_item(
        &self,
        user_id: &AccountId,
        product_id: ProductId,
        quantity: i32,
    ) -> MarketResult<()>;

    /// The user's cart lines (active products only)
    async fn items(&self, user_id: &AccountId) -> MarketResult<Vec<CartLine>>;

    /// Change a line's quantity; Ok(false) when the line is not the user's
    async fn update_quantity(
        &self,
        user_id: &AccountId,
        cart_item_id: CartItemId,
        quantity: i32,
    ) -> MarketResult<bool>;

    /// Remove a line; Ok(false) when the line is not the user's
    async fn remove(&self, user_id: &AccountId, cart_item_id: CartItemId) -> MarketResult<bool>;

    /// Empty the cart; returns lines removed
    async fn clear(&self, user_id: &AccountId) -> MarketResult<u64>;

    /// Create one order per cart line and delete the lines, atomically
    async fn checkout(
        &self,
        user_id: &AccountId,
        cart_item_ids: &[CartItemId],
        shipping_address: &str,
        payment_method: &str,
    ) -> MarketResult<CheckoutSummary>;

    /// The user's order history, optionally filtered by status
    async fn orders(
        &self,
        user_id: &AccountId,
        status: Option<OrderStatus>,
    ) -> MarketResult<Vec<OrderSummary>>;
}

/// Messaging repository trait
#[trait_variant::make(MessageRepository: Send)]
pub trait LocalMessageRepository {
    /// Check the receiver account exists
    async fn receiver_exists(&self, account_id: &AccountId) -> MarketResult<bool>;

    /// Check a referenced product exists
    async fn product_exists(&self, product_id: ProductId) -> MarketResult<bool>;

    /// Append a message
    async fn send(&self, message: &NewMessage) -> MarketResult<MessageId>;

    /// One page of a two-party conversation, oldest first
    async fn conversation(
        &self,
        user_id: &AccountId,
        other_user_id: &AccountId,
        product_id: Option<ProductId>,
        page: u32,
        per_page: u32,
    ) -> MarketResult<Vec<MessageView>>;

    /// Mark the other party's messages to us as read; returns rows changed
    async fn mark_read(
        &self,
        user_id: &AccountId,
        other_user_id: &AccountId,
        product_id: Option<ProductId>,
    ) -> MarketResult<u64>;

    /// Conversation partners with unread counts, most recent first
    async fn conversations(&self, user_id: &AccountId) -> MarketResult<Vec<ConversationSummary>>;

    /// Total unread messages for the user
    async fn unread_count(&self, user_id: &AccountId) -> MarketResult<i64>;

    /// Delete a message the user participates in; Ok(false) otherwise
    async fn delete(&self, message_id: MessageId, user_id: &AccountId) -> MarketResult<bool>;
}
