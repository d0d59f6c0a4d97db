//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder, Row};

use auth::models::account_id::AccountId;
use kernel::id::{CartItemId, CategoryId, MessageId, OrderId, ProductId};

use crate::domain::entities::{
    CartLine, CartProduct, CategoryWithCount, CheckoutSummary, ConversationSummary, MessageView,
    NewMessage, NewProduct, OrderLine, OrderStatus, OrderSummary, ProductCondition, ProductDetail,
    ProductFilter, ProductSort, ProductStatus, ProductSummary, ProductUpdate,
};
use crate::domain::repository::{CartRepository, CatalogRepository, MessageRepository};
use crate::error::{MarketError, MarketResult};

const PRODUCT_SUMMARY_COLUMNS: &str = r#"
    p.id,
    p.seller_id,
    u.username AS seller_name,
    u.rating AS seller_rating,
    p.category_id,
    c.name AS category_name,
    p.title,
    p.description,
    p.price,
    p.negotiable,
    p.condition,
    p.location,
    p.images,
    p.status,
    p.views,
    p.featured,
    p.created_at
"#;

/// PostgreSQL-backed marketplace repository
#[derive(Clone)]
pub struct PgMarketRepository {
    pool: PgPool,
}

impl PgMarketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the listing filter's WHERE fragments to a builder
fn push_product_filters(qb: &mut QueryBuilder<'_, sqlx::Postgres>, filter: &ProductFilter) {
    qb.push(" WHERE p.status = ").push_bind(ProductStatus::Active.id());

    if let Some(category_id) = filter.category_id {
        qb.push(" AND p.category_id = ").push_bind(category_id.as_i64());
    }
    if let Some(search) = &filter.search {
        let term = format!("%{}%", search);
        qb.push(" AND (p.title ILIKE ")
            .push_bind(term.clone())
            .push(" OR p.description ILIKE ")
            .push_bind(term)
            .push(")");
    }
    if let Some(location) = &filter.location {
        qb.push(" AND p.location ILIKE ")
            .push_bind(format!("%{}%", location));
    }
    if let Some(min) = filter.min_price_kobo {
        qb.push(" AND p.price >= ").push_bind(min);
    }
    if let Some(max) = filter.max_price_kobo {
        qb.push(" AND p.price <= ").push_bind(max);
    }
}

// ============================================================================
// Catalog Repository Implementation
// ============================================================================

impl CatalogRepository for PgMarketRepository {
    async fn create_product(&self, product: &NewProduct) -> MarketResult<ProductId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO products (
                seller_id,
                category_id,
                title,
                description,
                price,
                negotiable,
                condition,
                location,
                images
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(product.seller_id.as_i64())
        .bind(product.category_id.as_i64())
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price_kobo)
        .bind(product.negotiable)
        .bind(product.condition.id())
        .bind(&product.location)
        .bind(&product.images)
        .fetch_one(&self.pool)
        .await?;

        Ok(ProductId::from_i64(id))
    }

    async fn category_exists(&self, category_id: CategoryId) -> MarketResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id.as_i64())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
        per_page: u32,
    ) -> MarketResult<(Vec<ProductSummary>, u64)> {
        let page = filter.page.max(1);
        let offset = (page - 1) as i64 * per_page as i64;

        let order_by = match filter.sort {
            ProductSort::Newest => "p.created_at DESC",
            ProductSort::PriceLow => "p.price ASC",
            ProductSort::PriceHigh => "p.price DESC",
            ProductSort::Popular => "p.views DESC",
            ProductSort::Rating => "u.rating DESC",
        };

        let mut qb = QueryBuilder::new(format!(
            "SELECT {} FROM products p \
             JOIN users u ON u.id = p.seller_id \
             JOIN categories c ON c.id = p.category_id",
            PRODUCT_SUMMARY_COLUMNS
        ));
        push_product_filters(&mut qb, filter);
        qb.push(format!(" ORDER BY {} LIMIT ", order_by))
            .push_bind(per_page as i64)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<ProductSummaryRow> =
            qb.build_query_as().fetch_all(&self.pool).await?;

        let mut count_qb = QueryBuilder::new(
            "SELECT COUNT(*) FROM products p \
             JOIN users u ON u.id = p.seller_id \
             JOIN categories c ON c.id = p.category_id",
        );
        push_product_filters(&mut count_qb, filter);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let products = rows
            .into_iter()
            .map(ProductSummaryRow::into_summary)
            .collect::<MarketResult<Vec<_>>>()?;

        Ok((products, total as u64))
    }

    async fn get_product(&self, product_id: ProductId) -> MarketResult<Option<ProductDetail>> {
        let row = sqlx::query_as::<_, ProductDetailRow>(&format!(
            "SELECT {},
                u.phone AS seller_phone,
                u.location AS seller_location,
                u.total_reviews AS seller_total_reviews
             FROM products p
             JOIN users u ON u.id = p.seller_id
             JOIN categories c ON c.id = p.category_id
             WHERE p.id = $1",
            PRODUCT_SUMMARY_COLUMNS
        ))
        .bind(product_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_detail()).transpose()
    }

    async fn increment_views(&self, product_id: ProductId) -> MarketResult<()> {
        sqlx::query("UPDATE products SET views = views + 1 WHERE id = $1")
            .bind(product_id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn seller_products(
        &self,
        seller_id: &AccountId,
        status: ProductStatus,
    ) -> MarketResult<Vec<ProductSummary>> {
        let rows = sqlx::query_as::<_, ProductSummaryRow>(&format!(
            "SELECT {} FROM products p \
             JOIN users u ON u.id = p.seller_id \
             JOIN categories c ON c.id = p.category_id \
             WHERE p.seller_id = $1 AND p.status = $2 \
             ORDER BY p.created_at DESC",
            PRODUCT_SUMMARY_COLUMNS
        ))
        .bind(seller_id.as_i64())
        .bind(status.id())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(ProductSummaryRow::into_summary)
            .collect()
    }

    async fn update_product(
        &self,
        product_id: ProductId,
        seller_id: &AccountId,
        update: &ProductUpdate,
    ) -> MarketResult<bool> {
        // Ownership is part of the predicate, not a separate check
        let updated = sqlx::query(
            r#"
            UPDATE products SET
                title = $3,
                description = $4,
                price = $5,
                negotiable = $6,
                condition = $7,
                location = $8,
                status = $9,
                updated_at = NOW()
            WHERE id = $1 AND seller_id = $2
            "#,
        )
        .bind(product_id.as_i64())
        .bind(seller_id.as_i64())
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.price_kobo)
        .bind(update.negotiable)
        .bind(update.condition.id())
        .bind(&update.location)
        .bind(update.status.id())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn soft_delete(
        &self,
        product_id: ProductId,
        seller_id: &AccountId,
    ) -> MarketResult<bool> {
        let updated = sqlx::query(
            "UPDATE products SET status = $3, updated_at = NOW() WHERE id = $1 AND seller_id = $2",
        )
        .bind(product_id.as_i64())
        .bind(seller_id.as_i64())
        .bind(ProductStatus::Inactive.id())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn categories(&self) -> MarketResult<Vec<CategoryWithCount>> {
        let rows = sqlx::query(
            r#"
            SELECT
                c.id,
                c.name,
                (SELECT COUNT(*) FROM products p
                 WHERE p.category_id = c.id AND p.status = $1) AS product_count
            FROM categories c
            ORDER BY c.name
            "#,
        )
        .bind(ProductStatus::Active.id())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryWithCount {
                category_id: CategoryId::from_i64(row.get("id")),
                name: row.get("name"),
                product_count: row.get("product_count"),
            })
            .collect())
    }

    async fn featured(&self, limit: i64) -> MarketResult<Vec<ProductSummary>> {
        let rows = sqlx::query_as::<_, ProductSummaryRow>(&format!(
            "SELECT {} FROM products p \
             JOIN users u ON u.id = p.seller_id \
             JOIN categories c ON c.id = p.category_id \
             WHERE p.status = $1 AND (p.featured OR p.views > 100) \
             ORDER BY p.views DESC \
             LIMIT $2",
            PRODUCT_SUMMARY_COLUMNS
        ))
        .bind(ProductStatus::Active.id())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(ProductSummaryRow::into_summary)
            .collect()
    }
}

// ============================================================================
// Cart Repository Implementation
// ============================================================================

impl CartRepository for PgMarketRepository {
    async fn product_for_cart(&self, product_id: ProductId) -> MarketResult<Option<CartProduct>> {
        let row = sqlx::query_as::<_, CartProductRow>(
            "SELECT id, seller_id, status, price, title FROM products WHERE id = $1",
        )
        .bind(product_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_cart_product()).transpose()
    }

    async fn upsert_item(
        &self,
        user_id: &AccountId,
        product_id: ProductId,
        quantity: i32,
    ) -> MarketResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            "#,
        )
        .bind(user_id.as_i64())
        .bind(product_id.as_i64())
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn items(&self, user_id: &AccountId) -> MarketResult<Vec<CartLine>> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r#"
            SELECT
                ci.id AS cart_item_id,
                ci.quantity,
                p.id AS product_id,
                p.title,
                p.price,
                p.condition,
                p.images,
                u.username AS seller_name,
                u.location AS seller_location,
                c.name AS category_name
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            JOIN users u ON u.id = p.seller_id
            JOIN categories c ON c.id = p.category_id
            WHERE ci.user_id = $1 AND p.status = $2
            ORDER BY ci.created_at DESC
            "#,
        )
        .bind(user_id.as_i64())
        .bind(ProductStatus::Active.id())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CartLineRow::into_line).collect()
    }

    async fn update_quantity(
        &self,
        user_id: &AccountId,
        cart_item_id: CartItemId,
        quantity: i32,
    ) -> MarketResult<bool> {
        let updated =
            sqlx::query("UPDATE cart_items SET quantity = $3 WHERE id = $1 AND user_id = $2")
                .bind(cart_item_id.as_i64())
                .bind(user_id.as_i64())
                .bind(quantity)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(updated > 0)
    }

    async fn remove(&self, user_id: &AccountId, cart_item_id: CartItemId) -> MarketResult<bool> {
        let deleted = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(cart_item_id.as_i64())
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn clear(&self, user_id: &AccountId) -> MarketResult<u64> {
        let deleted = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn checkout(
        &self,
        user_id: &AccountId,
        cart_item_ids: &[CartItemId],
        shipping_address: &str,
        payment_method: &str,
    ) -> MarketResult<CheckoutSummary> {
        // One transaction: every order lands and every line disappears,
        // or nothing does
        let mut tx = self.pool.begin().await?;

        let mut orders = Vec::with_capacity(cart_item_ids.len());
        let mut total_price_kobo = 0i64;

        for cart_item_id in cart_item_ids {
            let line = sqlx::query_as::<_, CheckoutLineRow>(
                r#"
                SELECT ci.quantity, ci.product_id, p.price, p.seller_id, p.title
                FROM cart_items ci
                JOIN products p ON p.id = ci.product_id
                WHERE ci.id = $1 AND ci.user_id = $2
                FOR UPDATE OF ci
                "#,
            )
            .bind(cart_item_id.as_i64())
            .bind(user_id.as_i64())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(MarketError::NotFound("Cart item"))?;

            let item_total = line.price * line.quantity as i64;
            total_price_kobo += item_total;

            let order_id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO orders (
                    buyer_id,
                    seller_id,
                    product_id,
                    quantity,
                    total_price,
                    shipping_address,
                    payment_method,
                    status
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id
                "#,
            )
            .bind(user_id.as_i64())
            .bind(line.seller_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(item_total)
            .bind(shipping_address)
            .bind(payment_method)
            .bind(OrderStatus::Confirmed.id())
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query("DELETE FROM cart_items WHERE id = $1")
                .bind(cart_item_id.as_i64())
                .execute(&mut *tx)
                .await?;

            orders.push(OrderLine {
                order_id: OrderId::from_i64(order_id),
                product_title: line.title,
                quantity: line.quantity,
                total_price_kobo: item_total,
            });
        }

        tx.commit().await?;

        Ok(CheckoutSummary {
            orders,
            total_price_kobo,
        })
    }

    async fn orders(
        &self,
        user_id: &AccountId,
        status: Option<OrderStatus>,
    ) -> MarketResult<Vec<OrderSummary>> {
        let mut qb = QueryBuilder::new(
            r#"
            SELECT
                o.id AS order_id,
                o.product_id,
                p.title AS product_title,
                p.images,
                p.condition,
                o.quantity,
                o.total_price,
                o.shipping_address,
                o.payment_method,
                o.status,
                u.username AS seller_name,
                u.location AS seller_location,
                c.name AS category_name,
                o.created_at
            FROM orders o
            JOIN products p ON p.id = o.product_id
            JOIN users u ON u.id = o.seller_id
            JOIN categories c ON c.id = p.category_id
            WHERE o.buyer_id = "#,
        );
        qb.push_bind(user_id.as_i64());
        if let Some(status) = status {
            qb.push(" AND o.status = ").push_bind(status.id());
        }
        qb.push(" ORDER BY o.created_at DESC");

        let rows: Vec<OrderSummaryRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        rows.into_iter().map(OrderSummaryRow::into_summary).collect()
    }
}

// ============================================================================
// Message Repository Implementation
// ============================================================================

impl MessageRepository for PgMarketRepository {
    async fn receiver_exists(&self, account_id: &AccountId) -> MarketResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(account_id.as_i64())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn product_exists(&self, product_id: ProductId) -> MarketResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id.as_i64())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn send(&self, message: &NewMessage) -> MarketResult<MessageId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO messages (sender_id, receiver_id, product_id, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(message.sender_id.as_i64())
        .bind(message.receiver_id.as_i64())
        .bind(message.product_id.map(|id| id.as_i64()))
        .bind(&message.body)
        .fetch_one(&self.pool)
        .await?;

        Ok(MessageId::from_i64(id))
    }

    async fn conversation(
        &self,
        user_id: &AccountId,
        other_user_id: &AccountId,
        product_id: Option<ProductId>,
        page: u32,
        per_page: u32,
    ) -> MarketResult<Vec<MessageView>> {
        let offset = (page.max(1) - 1) as i64 * per_page as i64;

        let mut qb = QueryBuilder::new(
            r#"
            SELECT
                m.id,
                m.sender_id,
                us.username AS sender_name,
                m.receiver_id,
                m.product_id,
                p.title AS product_title,
                m.body,
                m.is_read,
                m.created_at
            FROM messages m
            JOIN users us ON us.id = m.sender_id
            LEFT JOIN products p ON p.id = m.product_id
            WHERE ((m.sender_id = "#,
        );
        qb.push_bind(user_id.as_i64())
            .push(" AND m.receiver_id = ")
            .push_bind(other_user_id.as_i64())
            .push(") OR (m.sender_id = ")
            .push_bind(other_user_id.as_i64())
            .push(" AND m.receiver_id = ")
            .push_bind(user_id.as_i64())
            .push("))");
        if let Some(product_id) = product_id {
            qb.push(" AND m.product_id = ").push_bind(product_id.as_i64());
        }
        qb.push(" ORDER BY m.created_at DESC LIMIT ")
            .push_bind(per_page as i64)
            .push(" OFFSET ")
            .push_bind(offset);

        let mut rows: Vec<MessageViewRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        // Newest page first, chronological within the page
        rows.reverse();

        Ok(rows.into_iter().map(MessageViewRow::into_view).collect())
    }

    async fn mark_read(
        &self,
        user_id: &AccountId,
        other_user_id: &AccountId,
        product_id: Option<ProductId>,
    ) -> MarketResult<u64> {
        let mut qb = QueryBuilder::new(
            "UPDATE messages SET is_read = TRUE WHERE receiver_id = ",
        );
        qb.push_bind(user_id.as_i64())
            .push(" AND sender_id = ")
            .push_bind(other_user_id.as_i64())
            .push(" AND is_read = FALSE");
        if let Some(product_id) = product_id {
            qb.push(" AND product_id = ").push_bind(product_id.as_i64());
        }

        let updated = qb.build().execute(&self.pool).await?.rows_affected();
        Ok(updated)
    }

    async fn conversations(&self, user_id: &AccountId) -> MarketResult<Vec<ConversationSummary>> {
        // Latest message per partner, then unread counts merged in
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT ON (other_id)
                CASE WHEN m.sender_id = $1 THEN m.receiver_id ELSE m.sender_id END AS other_id,
                u.username,
                u.display_name,
                m.body AS last_message,
                m.created_at AS last_message_time,
                m.product_id AS last_product_id,
                p.title AS last_product_title
            FROM messages m
            JOIN users u
              ON u.id = CASE WHEN m.sender_id = $1 THEN m.receiver_id ELSE m.sender_id END
            LEFT JOIN products p ON p.id = m.product_id
            WHERE m.sender_id = $1 OR m.receiver_id = $1
            ORDER BY other_id, m.created_at DESC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        let unread = sqlx::query(
            r#"
            SELECT sender_id, COUNT(*) AS unread
            FROM messages
            WHERE receiver_id = $1 AND is_read = FALSE
            GROUP BY sender_id
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        let unread: std::collections::HashMap<i64, i64> = unread
            .into_iter()
            .map(|row| (row.get("sender_id"), row.get("unread")))
            .collect();

        let mut conversations: Vec<ConversationSummary> = rows
            .into_iter()
            .map(|row| {
                let other_id: i64 = row.get("other_id");
                ConversationSummary {
                    other_user_id: AccountId::from_i64(other_id),
                    other_username: row.get("username"),
                    other_display_name: row.get("display_name"),
                    last_message: row.get("last_message"),
                    last_message_time: row.get("last_message_time"),
                    last_product_id: row
                        .get::<Option<i64>, _>("last_product_id")
                        .map(ProductId::from_i64),
                    last_product_title: row.get("last_product_title"),
                    unread_count: unread.get(&other_id).copied().unwrap_or(0),
                }
            })
            .collect();

        conversations.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));

        Ok(conversations)
    }

    async fn unread_count(&self, user_id: &AccountId) -> MarketResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND is_read = FALSE",
        )
        .bind(user_id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn delete(&self, message_id: MessageId, user_id: &AccountId) -> MarketResult<bool> {
        let deleted = sqlx::query(
            "DELETE FROM messages WHERE id = $1 AND (sender_id = $2 OR receiver_id = $2)",
        )
        .bind(message_id.as_i64())
        .bind(user_id.as_i64())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductSummaryRow {
    id: i64,
    seller_id: i64,
    seller_name: String,
    seller_rating: f64,
    category_id: i64,
    category_name: String,
    title: String,
    description: String,
    price: i64,
    negotiable: bool,
    condition: i16,
    location: String,
    images: Vec<String>,
    status: i16,
    views: i64,
    featured: bool,
    created_at: DateTime<Utc>,
}

impl ProductSummaryRow {
    fn into_summary(self) -> MarketResult<ProductSummary> {
        let condition = ProductCondition::from_id(self.condition).ok_or_else(|| {
            MarketError::Internal(format!("Invalid condition id: {}", self.condition))
        })?;
        let status = ProductStatus::from_id(self.status)
            .ok_or_else(|| MarketError::Internal(format!("Invalid status id: {}", self.status)))?;

        Ok(ProductSummary {
            product_id: ProductId::from_i64(self.id),
            seller_id: AccountId::from_i64(self.seller_id),
            seller_name: self.seller_name,
            seller_rating: self.seller_rating,
            category_id: CategoryId::from_i64(self.category_id),
            category_name: self.category_name,
            title: self.title,
            description: self.description,
            price_kobo: self.price,
            negotiable: self.negotiable,
            condition,
            location: self.location,
            images: self.images,
            status,
            views: self.views,
            featured: self.featured,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProductDetailRow {
    #[sqlx(flatten)]
    summary: ProductSummaryRow,
    seller_phone: String,
    seller_location: String,
    seller_total_reviews: i32,
}

impl ProductDetailRow {
    fn into_detail(self) -> MarketResult<ProductDetail> {
        Ok(ProductDetail {
            summary: self.summary.into_summary()?,
            seller_phone: self.seller_phone,
            seller_location: self.seller_location,
            seller_total_reviews: self.seller_total_reviews,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CartProductRow {
    id: i64,
    seller_id: i64,
    status: i16,
    price: i64,
    title: String,
}

impl CartProductRow {
    fn into_cart_product(self) -> MarketResult<CartProduct> {
        let status = ProductStatus::from_id(self.status)
            .ok_or_else(|| MarketError::Internal(format!("Invalid status id: {}", self.status)))?;

        Ok(CartProduct {
            product_id: ProductId::from_i64(self.id),
            seller_id: AccountId::from_i64(self.seller_id),
            status,
            price_kobo: self.price,
            title: self.title,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CartLineRow {
    cart_item_id: i64,
    quantity: i32,
    product_id: i64,
    title: String,
    price: i64,
    condition: i16,
    images: Vec<String>,
    seller_name: String,
    seller_location: String,
    category_name: String,
}

impl CartLineRow {
    fn into_line(self) -> MarketResult<CartLine> {
        let condition = ProductCondition::from_id(self.condition).ok_or_else(|| {
            MarketError::Internal(format!("Invalid condition id: {}", self.condition))
        })?;

        Ok(CartLine {
            cart_item_id: CartItemId::from_i64(self.cart_item_id),
            quantity: self.quantity,
            product_id: ProductId::from_i64(self.product_id),
            title: self.title,
            price_kobo: self.price,
            condition,
            images: self.images,
            seller_name: self.seller_name,
            seller_location: self.seller_location,
            category_name: self.category_name,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CheckoutLineRow {
    quantity: i32,
    product_id: i64,
    price: i64,
    seller_id: i64,
    title: String,
}

#[derive(sqlx::FromRow)]
struct OrderSummaryRow {
    order_id: i64,
    product_id: i64,
    product_title: String,
    images: Vec<String>,
    condition: i16,
    quantity: i32,
    total_price: i64,
    shipping_address: String,
    payment_method: String,
    status: i16,
    seller_name: String,
    seller_location: String,
    category_name: String,
    created_at: DateTime<Utc>,
}

impl OrderSummaryRow {
    fn into_summary(self) -> MarketResult<OrderSummary> {
        let condition = ProductCondition::from_id(self.condition).ok_or_else(|| {
            MarketError::Internal(format!("Invalid condition id: {}", self.condition))
        })?;
        let status = OrderStatus::from_id(self.status)
            .ok_or_else(|| MarketError::Internal(format!("Invalid status id: {}", self.status)))?;

        Ok(OrderSummary {
            order_id: OrderId::from_i64(self.order_id),
            product_id: ProductId::from_i64(self.product_id),
            product_title: self.product_title,
            images: self.images,
            condition,
            quantity: self.quantity,
            total_price_kobo: self.total_price,
            shipping_address: self.shipping_address,
            payment_method: self.payment_method,
            status,
            seller_name: self.seller_name,
            seller_location: self.seller_location,
            category_name: self.category_name,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MessageViewRow {
    id: i64,
    sender_id: i64,
    sender_name: String,
    receiver_id: i64,
    product_id: Option<i64>,
    product_title: Option<String>,
    body: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl MessageViewRow {
    fn into_view(self) -> MessageView {
        MessageView {
            message_id: MessageId::from_i64(self.id),
            sender_id: AccountId::from_i64(self.sender_id),
            sender_name: self.sender_name,
            receiver_id: AccountId::from_i64(self.receiver_id),
            product_id: self.product_id.map(ProductId::from_i64),
            product_title: self.product_title,
            body: self.body,
            is_read: self.is_read,
            created_at: self.created_at,
        }
    }
}
