//! API DTOs (Data Transfer Objects)
//!
//! All prices are integers in minor units (kobo).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::catalog::ProductPage;
use crate::application::cart::CartContents;
use crate::domain::entities::{
    CartLine, CategoryWithCount, CheckoutSummary, ConversationSummary, MessageView, OrderSummary,
    ProductDetail, ProductSummary,
};

// ============================================================================
// Catalog
// ============================================================================

/// Listing query parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    #[serde(default)]
    pub page: Option<u32>,
    pub category_id: Option<i64>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub sort: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

/// Seller's own listings query
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyProductsQuery {
    pub status: Option<String>,
}

/// Featured listings query
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedQuery {
    pub limit: Option<i64>,
}

/// New listing request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    pub category_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    #[serde(default = "default_negotiable")]
    pub negotiable: bool,
    pub condition: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
}

fn default_negotiable() -> bool {
    true
}

/// Listing update request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    #[serde(default = "default_negotiable")]
    pub negotiable: bool,
    pub condition: Option<String>,
    #[serde(default)]
    pub location: String,
    pub status: Option<String>,
}

/// One listing as serialized to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub seller_id: i64,
    pub seller_name: String,
    pub seller_rating: f64,
    pub category_id: i64,
    pub category_name: String,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub negotiable: bool,
    pub condition: String,
    pub location: String,
    pub images: Vec<String>,
    pub status: String,
    pub views: i64,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&ProductSummary> for ProductDto {
    fn from(p: &ProductSummary) -> Self {
        Self {
            id: p.product_id.as_i64(),
            seller_id: p.seller_id.as_i64(),
            seller_name: p.seller_name.clone(),
            seller_rating: p.seller_rating,
            category_id: p.category_id.as_i64(),
            category_name: p.category_name.clone(),
            title: p.title.clone(),
            description: p.description.clone(),
            price: p.price_kobo,
            negotiable: p.negotiable,
            condition: p.condition.code().to_string(),
            location: p.location.clone(),
            images: p.images.clone(),
            status: p.status.code().to_string(),
            views: p.views,
            featured: p.featured,
            created_at: p.created_at,
        }
    }
}

/// Full listing detail with seller contact
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailDto {
    #[serde(flatten)]
    pub product: ProductDto,
    pub seller_phone: String,
    pub seller_location: String,
    pub seller_total_reviews: i32,
}

impl From<&ProductDetail> for ProductDetailDto {
    fn from(d: &ProductDetail) -> Self {
        Self {
            product: ProductDto::from(&d.summary),
            seller_phone: d.seller_phone.clone(),
            seller_location: d.seller_location.clone(),
            seller_total_reviews: d.seller_total_reviews,
        }
    }
}

/// Paginated listing response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductDto>,
    pub total: u64,
    pub pages: u64,
    pub current_page: u32,
}

impl From<&ProductPage> for ProductListResponse {
    fn from(page: &ProductPage) -> Self {
        Self {
            products: page.products.iter().map(ProductDto::from).collect(),
            total: page.total,
            pages: page.pages,
            current_page: page.current_page,
        }
    }
}

/// Detail response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub product: ProductDetailDto,
}

/// Plain listing collection response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub products: Vec<ProductDto>,
}

/// New listing response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductResponse {
    pub product_id: i64,
}

/// Category with live count
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub product_count: i64,
}

impl From<&CategoryWithCount> for CategoryDto {
    fn from(c: &CategoryWithCount) -> Self {
        Self {
            id: c.category_id.as_i64(),
            name: c.name.clone(),
            product_count: c.product_count,
        }
    }
}

/// Categories response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryDto>,
}

// ============================================================================
// Cart and orders
// ============================================================================

/// Add-to-cart request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i64,
    pub quantity: Option<i32>,
}

/// Cart quantity update request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub cart_item_id: i64,
    pub quantity: i32,
}

/// Cart line removal request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCartRequest {
    pub cart_item_id: i64,
}

/// Checkout request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub cart_item_ids: Vec<i64>,
    pub shipping_address: String,
    #[serde(default)]
    pub payment_method: String,
}

/// One cart line as serialized to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub cart_item_id: i64,
    pub product_id: i64,
    pub title: String,
    pub price: i64,
    pub quantity: i32,
    pub subtotal: i64,
    pub condition: String,
    pub images: Vec<String>,
    pub seller_name: String,
    pub seller_location: String,
    pub category_name: String,
}

impl From<&CartLine> for CartItemDto {
    fn from(line: &CartLine) -> Self {
        Self {
            cart_item_id: line.cart_item_id.as_i64(),
            product_id: line.product_id.as_i64(),
            title: line.title.clone(),
            price: line.price_kobo,
            quantity: line.quantity,
            subtotal: line.subtotal_kobo(),
            condition: line.condition.code().to_string(),
            images: line.images.clone(),
            seller_name: line.seller_name.clone(),
            seller_location: line.seller_location.clone(),
            category_name: line.category_name.clone(),
        }
    }
}

/// Cart response with totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItemDto>,
    pub total_items: i64,
    pub total_price: i64,
    pub item_count: usize,
}

impl From<&CartContents> for CartResponse {
    fn from(cart: &CartContents) -> Self {
        Self {
            items: cart.items.iter().map(CartItemDto::from).collect(),
            total_items: cart.total_items,
            total_price: cart.total_price_kobo,
            item_count: cart.items.len(),
        }
    }
}

/// One created order in a checkout response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDto {
    pub order_id: i64,
    pub product_title: String,
    pub quantity: i32,
    pub price: i64,
}

/// Checkout response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub orders: Vec<OrderLineDto>,
    pub total_price: i64,
}

impl From<&CheckoutSummary> for CheckoutResponse {
    fn from(summary: &CheckoutSummary) -> Self {
        Self {
            orders: summary
                .orders
                .iter()
                .map(|o| OrderLineDto {
                    order_id: o.order_id.as_i64(),
                    product_title: o.product_title.clone(),
                    quantity: o.quantity,
                    price: o.total_price_kobo,
                })
                .collect(),
            total_price: summary.total_price_kobo,
        }
    }
}

/// Order history query
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    pub status: Option<String>,
}

/// One order in the history response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: i64,
    pub product_id: i64,
    pub product_title: String,
    pub images: Vec<String>,
    pub condition: String,
    pub quantity: i32,
    pub total_price: i64,
    pub shipping_address: String,
    pub payment_method: String,
    pub status: String,
    pub seller_name: String,
    pub seller_location: String,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&OrderSummary> for OrderDto {
    fn from(o: &OrderSummary) -> Self {
        Self {
            order_id: o.order_id.as_i64(),
            product_id: o.product_id.as_i64(),
            product_title: o.product_title.clone(),
            images: o.images.clone(),
            condition: o.condition.code().to_string(),
            quantity: o.quantity,
            total_price: o.total_price_kobo,
            shipping_address: o.shipping_address.clone(),
            payment_method: o.payment_method.clone(),
            status: o.status.code().to_string(),
            seller_name: o.seller_name.clone(),
            seller_location: o.seller_location.clone(),
            category_name: o.category_name.clone(),
            created_at: o.created_at,
        }
    }
}

/// Order history response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersResponse {
    pub orders: Vec<OrderDto>,
}

// ============================================================================
// Messaging
// ============================================================================

/// Send message request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub receiver_id: i64,
    pub product_id: Option<i64>,
    pub message: String,
}

/// Conversation page query
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationQuery {
    pub user_id: i64,
    pub product_id: Option<i64>,
    #[serde(default)]
    pub page: Option<u32>,
}

/// Mark-read request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    pub other_user_id: i64,
}

/// Delete message request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessageRequest {
    pub message_id: i64,
}

/// One message as serialized to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub receiver_id: i64,
    pub product_id: Option<i64>,
    pub product_title: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&MessageView> for MessageDto {
    fn from(m: &MessageView) -> Self {
        Self {
            id: m.message_id.as_i64(),
            sender_id: m.sender_id.as_i64(),
            sender_name: m.sender_name.clone(),
            receiver_id: m.receiver_id.as_i64(),
            product_id: m.product_id.map(|id| id.as_i64()),
            product_title: m.product_title.clone(),
            message: m.body.clone(),
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}

/// Conversation page response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesResponse {
    pub messages: Vec<MessageDto>,
}

/// One conversation partner in the inbox list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    pub other_user_id: i64,
    pub username: String,
    pub display_name: String,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub last_product_id: Option<i64>,
    pub last_product_title: Option<String>,
    pub unread_count: i64,
}

impl From<&ConversationSummary> for ConversationDto {
    fn from(c: &ConversationSummary) -> Self {
        Self {
            other_user_id: c.other_user_id.as_i64(),
            username: c.other_username.clone(),
            display_name: c.other_display_name.clone(),
            last_message: c.last_message.clone(),
            last_message_time: c.last_message_time,
            last_product_id: c.last_product_id.map(|id| id.as_i64()),
            last_product_title: c.last_product_title.clone(),
            unread_count: c.unread_count,
        }
    }
}

/// Inbox response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationsResponse {
    pub conversations: Vec<ConversationDto>,
}

/// Unread total response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub count: i64,
}
