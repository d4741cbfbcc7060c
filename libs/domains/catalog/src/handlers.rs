//! HTTP handlers for the catalog API

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    IdPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
        ValidationErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{
    InventoryParams, ListParams, PageParams, ProductPage, ProductRequest, ProductResponse,
    SearchParams,
};
use crate::repository::ProductStore;
use crate::service::CatalogService;

pub const TAG: &str = "Products";

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        list_by_category,
        search_products,
        list_available,
        update_inventory,
    ),
    components(
        schemas(ProductRequest, ProductResponse, ProductPage),
        responses(
            NotFoundResponse,
            ValidationErrorResponse,
            BadRequestResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Routes relative to the products collection, e.g. mounted at
/// `/api/v1/products`.
pub fn router<S: ProductStore + 'static>(service: CatalogService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/available", get(list_available))
        .route("/category/{category}", get(list_by_category))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/inventory", patch(update_inventory))
        .with_state(shared_service)
}

/// List products, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Page of products", body = ProductPage),
        (status = 400, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<S: ProductStore>(
    State(service): State<Arc<CatalogService<S>>>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> CatalogResult<Json<ProductPage>> {
    let page = service.list_all(params.page_request()).await?;
    Ok(Json(page))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<S: ProductStore>(
    State(service): State<Arc<CatalogService<S>>>,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> CatalogResult<impl IntoResponse> {
    let product = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<S: ProductStore>(
    State(service): State<Arc<CatalogService<S>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<ProductResponse>> {
    let product = service.get_by_id(id).await?;
    Ok(Json(product))
}

/// Replace every mutable field of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<S: ProductStore>(
    State(service): State<Arc<CatalogService<S>>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> CatalogResult<Json<ProductResponse>> {
    let product = service.update(id, request).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<S: ProductStore>(
    State(service): State<Arc<CatalogService<S>>>,
    IdPath(id): IdPath,
) -> CatalogResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Products in one category (exact match)
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = TAG,
    params(
        ("category" = String, Path, description = "Category label"),
        PageParams
    ),
    responses(
        (status = 200, description = "Page of products", body = ProductPage),
        (status = 400, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_category<S: ProductStore>(
    State(service): State<Arc<CatalogService<S>>>,
    Path(category): Path<String>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> CatalogResult<Json<ProductPage>> {
    let page = service
        .list_by_category(&category, params.page_request())
        .await?;
    Ok(Json(page))
}

/// Case-insensitive name search
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Page of products", body = ProductPage),
        (status = 400, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<S: ProductStore>(
    State(service): State<Arc<CatalogService<S>>>,
    ValidatedQuery(params): ValidatedQuery<SearchParams>,
) -> CatalogResult<Json<ProductPage>> {
    let page = service
        .search_by_name(&params.name, params.page_request())
        .await?;
    Ok(Json(page))
}

/// Products currently in stock
#[utoipa::path(
    get,
    path = "/available",
    tag = TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Page of products", body = ProductPage),
        (status = 400, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_available<S: ProductStore>(
    State(service): State<Arc<CatalogService<S>>>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> CatalogResult<Json<ProductPage>> {
    let page = service.list_available(params.page_request()).await?;
    Ok(Json(page))
}

/// Set the stock level of a product
#[utoipa::path(
    patch,
    path = "/{id}/inventory",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id"),
        InventoryParams
    ),
    responses(
        (status = 200, description = "Inventory updated", body = ProductResponse),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_inventory<S: ProductStore>(
    State(service): State<Arc<CatalogService<S>>>,
    IdPath(id): IdPath,
    ValidatedQuery(params): ValidatedQuery<InventoryParams>,
) -> CatalogResult<Json<ProductResponse>> {
    let product = service.update_inventory(id, params.quantity).await?;
    Ok(Json(product))
}
