//! HTTP Handlers
//!
//! Protected handlers read the authenticated session from the request
//! extensions the auth middleware populated; the CSRF guard has already
//! run for every POST by the time a handler executes.

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use std::sync::Arc;

use auth::middleware::AuthenticatedSession;
use auth::models::account_id::AccountId;
use kernel::id::{CartItemId, ProductId};
use kernel::response::ApiResponse;

use crate::application::catalog::{AddProductInput, UpdateProductInput};
use crate::application::{CartUseCase, CatalogUseCase, MarketConfig, MessagingUseCase,
    SendMessageInput,
};
use crate::domain::entities::{ProductFilter, ProductSort};
use crate::domain::repository::{CartRepository, CatalogRepository, MessageRepository};
use crate::error::{MarketError, MarketResult};
use crate::presentation::dto::{
    AddProductRequest, AddProductResponse, AddToCartRequest, CartResponse, CategoriesResponse,
    CategoryDto, CheckoutRequest, CheckoutResponse, ConversationDto, ConversationQuery,
    ConversationsResponse, DeleteMessageRequest, FeaturedQuery, MarkReadRequest, MessageDto,
    MessagesResponse, MyProductsQuery, OrderDto, OrdersQuery, OrdersResponse, ProductDetailDto,
    ProductDetailResponse, ProductDto, ProductListQuery, ProductListResponse, ProductsResponse,
    RemoveCartRequest, SendMessageRequest, UpdateCartRequest, UpdateProductRequest,
};

/// Shared state for marketplace handlers
#[derive(Clone)]
pub struct MarketAppState<R>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<MarketConfig>,
}

/// The account behind an admitted session
///
/// `require_auth` guarantees the binding exists; a miss here is a bug.
fn account_of(session: &auth::models::session::Session) -> MarketResult<AccountId> {
    session
        .account_id
        .ok_or_else(|| MarketError::Internal("Admitted session has no account".to_string()))
}

// ============================================================================
// Catalog
// ============================================================================

/// GET /api/products
pub async fn list_products<R>(
    State(state): State<MarketAppState<R>>,
    Query(query): Query<ProductListQuery>,
) -> MarketResult<Json<ApiResponse<ProductListResponse>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let use_case = CatalogUseCase::new(state.repo.clone(), state.config.clone());

    let filter = ProductFilter {
        page: query.page.unwrap_or(1),
        category_id: query.category_id.map(kernel::id::CategoryId::from_i64),
        search: query.search.filter(|s| !s.trim().is_empty()),
        location: query.location.filter(|s| !s.trim().is_empty()),
        sort: query
            .sort
            .as_deref()
            .map(ProductSort::from_code)
            .unwrap_or_default(),
        min_price_kobo: query.min_price,
        max_price_kobo: query.max_price,
    };

    let page = use_case.list(filter).await?;

    Ok(Json(ApiResponse::ok(ProductListResponse::from(&page))))
}

/// GET /api/products/featured
pub async fn featured_products<R>(
    State(state): State<MarketAppState<R>>,
    Query(query): Query<FeaturedQuery>,
) -> MarketResult<Json<ApiResponse<ProductsResponse>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let use_case = CatalogUseCase::new(state.repo.clone(), state.config.clone());
    let products = use_case.featured(query.limit).await?;

    Ok(Json(ApiResponse::ok(ProductsResponse {
        products: products.iter().map(ProductDto::from).collect(),
    })))
}

/// GET /api/products/categories
pub async fn categories<R>(
    State(state): State<MarketAppState<R>>,
) -> MarketResult<Json<ApiResponse<CategoriesResponse>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let use_case = CatalogUseCase::new(state.repo.clone(), state.config.clone());
    let categories = use_case.categories().await?;

    Ok(Json(ApiResponse::ok(CategoriesResponse {
        categories: categories.iter().map(CategoryDto::from).collect(),
    })))
}

/// GET /api/products/mine
pub async fn my_products<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Query(query): Query<MyProductsQuery>,
) -> MarketResult<Json<ApiResponse<ProductsResponse>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = CatalogUseCase::new(state.repo.clone(), state.config.clone());
    let products = use_case.mine(account_id, query.status).await?;

    Ok(Json(ApiResponse::ok(ProductsResponse {
        products: products.iter().map(ProductDto::from).collect(),
    })))
}

/// GET /api/products/{id}
pub async fn product_detail<R>(
    State(state): State<MarketAppState<R>>,
    Path(id): Path<i64>,
) -> MarketResult<Json<ApiResponse<ProductDetailResponse>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let use_case = CatalogUseCase::new(state.repo.clone(), state.config.clone());
    let detail = use_case.detail(ProductId::from_i64(id)).await?;

    Ok(Json(ApiResponse::ok(ProductDetailResponse {
        product: ProductDetailDto::from(&detail),
    })))
}

/// POST /api/products/add
pub async fn add_product<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Json(req): Json<AddProductRequest>,
) -> MarketResult<Json<ApiResponse<AddProductResponse>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;
    let role = session.role.unwrap_or_default();

    let use_case = CatalogUseCase::new(state.repo.clone(), state.config.clone());
    let product_id = use_case
        .add(
            account_id,
            role,
            AddProductInput {
                category_id: req.category_id,
                title: req.title,
                description: req.description,
                price_kobo: req.price,
                negotiable: req.negotiable,
                condition: req.condition,
                location: req.location,
                images: req.images,
            },
        )
        .await?;

    Ok(Json(
        ApiResponse::ok(AddProductResponse {
            product_id: product_id.as_i64(),
        })
        .with_message("Product added successfully"),
    ))
}

/// POST /api/products/{id}/update
pub async fn update_product<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProductRequest>,
) -> MarketResult<Json<ApiResponse<()>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = CatalogUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .update(
            ProductId::from_i64(id),
            account_id,
            UpdateProductInput {
                title: req.title,
                description: req.description,
                price_kobo: req.price,
                negotiable: req.negotiable,
                condition: req.condition,
                location: req.location,
                status: req.status,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok_message("Product updated successfully")))
}

/// POST /api/products/{id}/delete
pub async fn delete_product<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Path(id): Path<i64>,
) -> MarketResult<Json<ApiResponse<()>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = CatalogUseCase::new(state.repo.clone(), state.config.clone());
    use_case.delete(ProductId::from_i64(id), account_id).await?;

    Ok(Json(ApiResponse::ok_message("Product deleted successfully")))
}

// ============================================================================
// Cart
// ============================================================================

/// GET /api/cart
pub async fn cart_contents<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
) -> MarketResult<Json<ApiResponse<CartResponse>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = CartUseCase::new(state.repo.clone());
    let cart = use_case.contents(account_id).await?;

    Ok(Json(ApiResponse::ok(CartResponse::from(&cart))))
}

/// POST /api/cart/add
pub async fn add_to_cart<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Json(req): Json<AddToCartRequest>,
) -> MarketResult<Json<ApiResponse<()>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = CartUseCase::new(state.repo.clone());
    use_case
        .add(account_id, ProductId::from_i64(req.product_id), req.quantity)
        .await?;

    Ok(Json(ApiResponse::ok_message("Item added to cart")))
}

/// POST /api/cart/update
pub async fn update_cart<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Json(req): Json<UpdateCartRequest>,
) -> MarketResult<Json<ApiResponse<()>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = CartUseCase::new(state.repo.clone());
    use_case
        .update_quantity(
            account_id,
            CartItemId::from_i64(req.cart_item_id),
            req.quantity,
        )
        .await?;

    Ok(Json(ApiResponse::ok_message("Cart updated")))
}

/// POST /api/cart/remove
pub async fn remove_from_cart<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Json(req): Json<RemoveCartRequest>,
) -> MarketResult<Json<ApiResponse<()>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = CartUseCase::new(state.repo.clone());
    use_case
        .remove(account_id, CartItemId::from_i64(req.cart_item_id))
        .await?;

    Ok(Json(ApiResponse::ok_message("Item removed from cart")))
}

/// POST /api/cart/clear
pub async fn clear_cart<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
) -> MarketResult<Json<ApiResponse<()>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = CartUseCase::new(state.repo.clone());
    use_case.clear(account_id).await?;

    Ok(Json(ApiResponse::ok_message("Cart cleared")))
}

/// POST /api/cart/checkout
pub async fn checkout<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Json(req): Json<CheckoutRequest>,
) -> MarketResult<Json<ApiResponse<CheckoutResponse>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = CartUseCase::new(state.repo.clone());
    let summary = use_case
        .checkout(
            account_id,
            req.cart_item_ids,
            req.shipping_address,
            req.payment_method,
        )
        .await?;

    Ok(Json(
        ApiResponse::ok(CheckoutResponse::from(&summary))
            .with_message("Order created successfully"),
    ))
}

/// GET /api/cart/orders
pub async fn orders<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Query(query): Query<OrdersQuery>,
) -> MarketResult<Json<ApiResponse<OrdersResponse>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = CartUseCase::new(state.repo.clone());
    let orders = use_case.orders(account_id, query.status).await?;

    Ok(Json(ApiResponse::ok(OrdersResponse {
        orders: orders.iter().map(OrderDto::from).collect(),
    })))
}

// ============================================================================
// Messaging
// ============================================================================

/// POST /api/messages/send
pub async fn send_message<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Json(req): Json<SendMessageRequest>,
) -> MarketResult<Json<ApiResponse<()>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = MessagingUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .send(
            account_id,
            SendMessageInput {
                receiver_id: req.receiver_id,
                product_id: req.product_id,
                body: req.message,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok_message("Message sent successfully")))
}

/// GET /api/messages/conversation
pub async fn conversation<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Query(query): Query<ConversationQuery>,
) -> MarketResult<Json<ApiResponse<MessagesResponse>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = MessagingUseCase::new(state.repo.clone(), state.config.clone());
    let messages = use_case
        .conversation(
            account_id,
            query.user_id,
            query.product_id,
            query.page.unwrap_or(1),
        )
        .await?;

    Ok(Json(ApiResponse::ok(MessagesResponse {
        messages: messages.iter().map(MessageDto::from).collect(),
    })))
}

/// GET /api/messages/conversations
pub async fn conversations<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
) -> MarketResult<Json<ApiResponse<ConversationsResponse>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = MessagingUseCase::new(state.repo.clone(), state.config.clone());
    let conversations = use_case.conversations(account_id).await?;

    Ok(Json(ApiResponse::ok(ConversationsResponse {
        conversations: conversations.iter().map(ConversationDto::from).collect(),
    })))
}

/// GET /api/messages/unread_count
pub async fn unread_count<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
) -> MarketResult<Json<ApiResponse<crate::presentation::dto::UnreadCountResponse>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = MessagingUseCase::new(state.repo.clone(), state.config.clone());
    let count = use_case.unread_count(account_id).await?;

    Ok(Json(ApiResponse::ok(
        crate::presentation::dto::UnreadCountResponse { count },
    )))
}

/// POST /api/messages/mark_read
pub async fn mark_read<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Json(req): Json<MarkReadRequest>,
) -> MarketResult<Json<ApiResponse<()>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = MessagingUseCase::new(state.repo.clone(), state.config.clone());
    use_case.mark_read(account_id, req.other_user_id).await?;

    Ok(Json(ApiResponse::ok_empty()))
}

/// POST /api/messages/delete
pub async fn delete_message<R>(
    State(state): State<MarketAppState<R>>,
    Extension(AuthenticatedSession(session)): Extension<AuthenticatedSession>,
    Json(req): Json<DeleteMessageRequest>,
) -> MarketResult<Json<ApiResponse<()>>>
where
    R: CatalogRepository + CartRepository + MessageRepository + Clone + Send + Sync + 'static,
{
    let account_id = account_of(&session)?;

    let use_case = MessagingUseCase::new(state.repo.clone(), state.config.clone());
    use_case.delete(account_id, req.message_id).await?;

    Ok(Json(ApiResponse::ok_message("Message deleted")))
}
