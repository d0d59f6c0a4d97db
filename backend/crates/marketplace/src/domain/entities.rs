//! Marketplace Entities and Read Models
//!
//! Prices are stored in minor units (kobo) as `i64`; the client is
//! responsible for display formatting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use auth::models::account_id::AccountId;
use kernel::id::{CartItemId, CategoryId, MessageId, OrderId, ProductId};

// ============================================================================
// Product vocabulary
// ============================================================================

/// Physical condition of a listed product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum ProductCondition {
    New = 0,
    #[default]
    Used = 1,
    Refurbished = 2,
}

impl ProductCondition {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Used => "used",
            Self::Refurbished => "refurbished",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::New),
            1 => Some(Self::Used),
            2 => Some(Self::Refurbished),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "new" => Some(Self::New),
            "used" => Some(Self::Used),
            "refurbished" => Some(Self::Refurbished),
            _ => None,
        }
    }
}

/// Listing status; delete is a soft transition to Inactive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum ProductStatus {
    #[default]
    Active = 0,
    Sold = 1,
    Inactive = 2,
}

impl ProductStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Inactive => "inactive",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Active),
            1 => Some(Self::Sold),
            2 => Some(Self::Inactive),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(Self::Active),
            "sold" => Some(Self::Sold),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// Sort orders for catalog listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    Popular,
    Rating,
}

impl ProductSort {
    pub fn from_code(code: &str) -> Self {
        match code {
            "price_low" => Self::PriceLow,
            "price_high" => Self::PriceHigh,
            "popular" => Self::Popular,
            "rating" => Self::Rating,
            _ => Self::Newest,
        }
    }
}

// ============================================================================
// Products
// ============================================================================

/// Fields for a new listing, before the store assigns an id
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub seller_id: AccountId,
    pub category_id: CategoryId,
    pub title: String,
    pub description: String,
    pub price_kobo: i64,
    pub negotiable: bool,
    pub condition: ProductCondition,
    pub location: String,
    pub images: Vec<String>,
}

/// Full-row update for a listing the seller owns
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub title: String,
    pub description: String,
    pub price_kobo: i64,
    pub negotiable: bool,
    pub condition: ProductCondition,
    pub location: String,
    pub status: ProductStatus,
}

/// Catalog listing filter
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub page: u32,
    pub category_id: Option<CategoryId>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub sort: ProductSort,
    pub min_price_kobo: Option<i64>,
    pub max_price_kobo: Option<i64>,
}

/// One row of a catalog listing (joined with seller and category)
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub product_id: ProductId,
    pub seller_id: AccountId,
    pub seller_name: String,
    pub seller_rating: f64,
    pub category_id: CategoryId,
    pub category_name: String,
    pub title: String,
    pub description: String,
    pub price_kobo: i64,
    pub negotiable: bool,
    pub condition: ProductCondition,
    pub location: String,
    pub images: Vec<String>,
    pub status: ProductStatus,
    pub views: i64,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Full product detail (adds seller contact fields)
#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub summary: ProductSummary,
    pub seller_phone: String,
    pub seller_location: String,
    pub seller_total_reviews: i32,
}

/// Category with its live listing count
#[derive(Debug, Clone)]
pub struct CategoryWithCount {
    pub category_id: CategoryId,
    pub name: String,
    pub product_count: i64,
}

// ============================================================================
// Cart and orders
// ============================================================================

/// The slice of a product the cart logic validates against
#[derive(Debug, Clone)]
pub struct CartProduct {
    pub product_id: ProductId,
    pub seller_id: AccountId,
    pub status: ProductStatus,
    pub price_kobo: i64,
    pub title: String,
}

/// One cart line joined with its product
#[derive(Debug, Clone)]
pub struct CartLine {
    pub cart_item_id: CartItemId,
    pub quantity: i32,
    pub product_id: ProductId,
    pub title: String,
    pub price_kobo: i64,
    pub condition: ProductCondition,
    pub images: Vec<String>,
    pub seller_name: String,
    pub seller_location: String,
    pub category_name: String,
}

impl CartLine {
    pub fn subtotal_kobo(&self) -> i64 {
        self.price_kobo * self.quantity as i64
    }
}

/// Order status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum OrderStatus {
    #[default]
    Confirmed = 0,
    Shipped = 1,
    Delivered = 2,
    Cancelled = 3,
}

impl OrderStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Confirmed),
            1 => Some(Self::Shipped),
            2 => Some(Self::Delivered),
            3 => Some(Self::Cancelled),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "confirmed" => Some(Self::Confirmed),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// One order created at checkout
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub order_id: OrderId,
    pub product_title: String,
    pub quantity: i32,
    pub total_price_kobo: i64,
}

/// Checkout result: one order per cart line, inside one transaction
#[derive(Debug, Clone)]
pub struct CheckoutSummary {
    pub orders: Vec<OrderLine>,
    pub total_price_kobo: i64,
}

/// Order history row (buyer view, joined with product and seller)
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_title: String,
    pub images: Vec<String>,
    pub condition: ProductCondition,
    pub quantity: i32,
    pub total_price_kobo: i64,
    pub shipping_address: String,
    pub payment_method: String,
    pub status: OrderStatus,
    pub seller_name: String,
    pub seller_location: String,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Messaging
// ============================================================================

/// A message about to be sent
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender_id: AccountId,
    pub receiver_id: AccountId,
    pub product_id: Option<ProductId>,
    pub body: String,
}

/// One message in a conversation (joined with sender)
#[derive(Debug, Clone)]
pub struct MessageView {
    pub message_id: MessageId,
    pub sender_id: AccountId,
    pub sender_name: String,
    pub receiver_id: AccountId,
    pub product_id: Option<ProductId>,
    pub product_title: Option<String>,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Conversation partner summary for the inbox list
#[derive(Debug, Clone)]
pub struct ConversationSummary {
    pub other_user_id: AccountId,
    pub other_username: String,
    pub other_display_name: String,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub last_product_id: Option<ProductId>,
    pub last_product_title: Option<String>,
    pub unread_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_codes_roundtrip() {
        for c in [
            ProductCondition::New,
            ProductCondition::Used,
            ProductCondition::Refurbished,
        ] {
            assert_eq!(ProductCondition::from_id(c.id()), Some(c));
            assert_eq!(ProductCondition::from_code(c.code()), Some(c));
        }
        assert_eq!(ProductCondition::from_code("mint"), None);
    }

    #[test]
    fn test_status_codes_roundtrip() {
        for s in [
            ProductStatus::Active,
            ProductStatus::Sold,
            ProductStatus::Inactive,
        ] {
            assert_eq!(ProductStatus::from_id(s.id()), Some(s));
            assert_eq!(ProductStatus::from_code(s.code()), Some(s));
        }
    }

    #[test]
    fn test_sort_falls_back_to_newest() {
        assert_eq!(ProductSort::from_code("price_low"), ProductSort::PriceLow);
        assert_eq!(ProductSort::from_code("garbage"), ProductSort::Newest);
    }

    #[test]
    fn test_cart_line_subtotal() {
        let line = CartLine {
            cart_item_id: CartItemId::from_i64(1),
            quantity: 3,
            product_id: ProductId::from_i64(2),
            title: "Phone".into(),
            price_kobo: 1_500_00,
            condition: ProductCondition::Used,
            images: vec![],
            seller_name: "adaeze".into(),
            seller_location: "Lagos".into(),
            category_name: "Electronics".into(),
        };
        assert_eq!(line.subtotal_kobo(), 4_500_00);
    }
}
