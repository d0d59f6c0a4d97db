//! Catalog Use Cases
//!
//! Listing management and browsing. Sellers own their listings; the
//! store enforces ownership in the WHERE clause, so a miss and a
//! foreign listing are indistinguishable.

use std::sync::Arc;

use auth::models::account_id::AccountId;
use auth::models::user_role::UserRole;
use kernel::id::{CategoryId, ProductId};

use crate::application::config::MarketConfig;
use crate::domain::entities::{
    CategoryWithCount, NewProduct, ProductCondition, ProductDetail, ProductFilter, ProductStatus,
    ProductSummary, ProductUpdate,
};
use crate::domain::repository::CatalogRepository;
use crate::error::{MarketError, MarketResult};

/// Input for a new listing
pub struct AddProductInput {
    pub category_id: i64,
    pub title: String,
    pub description: String,
    pub price_kobo: i64,
    pub negotiable: bool,
    pub condition: Option<String>,
    pub location: String,
    pub images: Vec<String>,
}

/// Input for a listing update
pub struct UpdateProductInput {
    pub title: String,
    pub description: String,
    pub price_kobo: i64,
    pub negotiable: bool,
    pub condition: Option<String>,
    pub location: String,
    pub status: Option<String>,
}

/// Paginated listing output
pub struct ProductPage {
    pub products: Vec<ProductSummary>,
    pub total: u64,
    pub pages: u64,
    pub current_page: u32,
}

/// Catalog use case
pub struct CatalogUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
    config: Arc<MarketConfig>,
}

impl<R> CatalogUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<MarketConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn list(&self, filter: ProductFilter) -> MarketResult<ProductPage> {
        let per_page = self.config.products_per_page;
        let (products, total) = self.repo.list_products(&filter, per_page).await?;

        Ok(ProductPage {
            products,
            total,
            pages: total.div_ceil(per_page as u64),
            current_page: filter.page.max(1),
        })
    }

    pub async fn detail(&self, product_id: ProductId) -> MarketResult<ProductDetail> {
        let product = self
            .repo
            .get_product(product_id)
            .await?
            .ok_or(MarketError::NotFound("Product"))?;

        // View counting is best-effort display data
        if let Err(e) = self.repo.increment_views(product_id).await {
            tracing::warn!(error = %e, product_id = %product_id, "Failed to bump view count");
        }

        Ok(product)
    }

    pub async fn add(
        &self,
        seller_id: AccountId,
        role: UserRole,
        input: AddProductInput,
    ) -> MarketResult<ProductId> {
        if !role.can_sell() {
            return Err(MarketError::Forbidden("Not authorized to add products"));
        }

        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(MarketError::InvalidInput("Title cannot be empty".into()));
        }
        if input.price_kobo <= 0 {
            return Err(MarketError::InvalidInput(
                "Price must be greater than 0".into(),
            ));
        }

        let category_id = CategoryId::from_i64(input.category_id);
        if !self.repo.category_exists(category_id).await? {
            return Err(MarketError::InvalidInput("Invalid category".into()));
        }

        let product = NewProduct {
            seller_id,
            category_id,
            title,
            description: input.description.trim().to_string(),
            price_kobo: input.price_kobo,
            negotiable: input.negotiable,
            condition: input
                .condition
                .as_deref()
                .and_then(ProductCondition::from_code)
                .unwrap_or_default(),
            location: input.location.trim().to_string(),
            images: input.images,
        };

        let product_id = self.repo.create_product(&product).await?;

        tracing::info!(
            product_id = %product_id,
            seller_id = %seller_id,
            "Product listed"
        );

        Ok(product_id)
    }

    pub async fn update(
        &self,
        product_id: ProductId,
        seller_id: AccountId,
        input: UpdateProductInput,
    ) -> MarketResult<()> {
        if input.price_kobo <= 0 {
            return Err(MarketError::InvalidInput(
                "Price must be greater than 0".into(),
            ));
        }

        let update = ProductUpdate {
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            price_kobo: input.price_kobo,
            negotiable: input.negotiable,
            condition: input
                .condition
                .as_deref()
                .and_then(ProductCondition::from_code)
                .unwrap_or_default(),
            location: input.location.trim().to_string(),
            status: input
                .status
                .as_deref()
                .and_then(ProductStatus::from_code)
                .unwrap_or_default(),
        };

        let updated = self
            .repo
            .update_product(product_id, &seller_id, &update)
            .await?;
        if !updated {
            return Err(MarketError::NotFound("Product"));
        }

        Ok(())
    }

    pub async fn delete(&self, product_id: ProductId, seller_id: AccountId) -> MarketResult<()> {
        let deleted = self.repo.soft_delete(product_id, &seller_id).await?;
        if !deleted {
            return Err(MarketError::NotFound("Product"));
        }

        tracing::info!(product_id = %product_id, seller_id = %seller_id, "Product delisted");
        Ok(())
    }

    pub async fn mine(
        &self,
        seller_id: AccountId,
        status: Option<String>,
    ) -> MarketResult<Vec<ProductSummary>> {
        let status = status
            .as_deref()
            .and_then(ProductStatus::from_code)
            .unwrap_or_default();
        self.repo.seller_products(&seller_id, status).await
    }

    pub async fn categories(&self) -> MarketResult<Vec<CategoryWithCount>> {
        self.repo.categories().await
    }

    pub async fn featured(&self, limit: Option<i64>) -> MarketResult<Vec<ProductSummary>> {
        let limit = limit
            .unwrap_or(self.config.featured_limit)
            .clamp(1, 50);
        self.repo.featured(limit).await
    }
}
