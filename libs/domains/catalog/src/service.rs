//! Catalog Service - business rules over a [`ProductStore`].

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::mapper::ProductMapper;
use crate::models::{
    MAX_PAGE_SIZE, PageRequest, ProductFilter, ProductPage, ProductRequest, ProductResponse,
};
use crate::repository::ProductStore;

/// Stateless catalog operations. Validation always runs before the store is
/// touched; consistency of single-row writes is left to the store.
pub struct CatalogService<S: ProductStore> {
    store: Arc<S>,
    mapper: ProductMapper,
}

impl<S: ProductStore> CatalogService<S> {
    pub fn new(store: S, mapper: ProductMapper) -> Self {
        Self {
            store: Arc::new(store),
            mapper,
        }
    }

    fn check_page(request: &PageRequest) -> CatalogResult<()> {
        if request.size == 0 || request.size > MAX_PAGE_SIZE {
            return Err(CatalogError::invalid_field(
                "size",
                "range",
                "Page size must be between 1 and 1000",
            ));
        }
        Ok(())
    }

    async fn page(&self, filter: ProductFilter, request: PageRequest) -> CatalogResult<ProductPage> {
        Self::check_page(&request)?;
        let page = self.store.find_page(filter, request).await?;
        Ok(self.mapper.to_page(page))
    }

    /// Every product, ordered as requested.
    #[instrument(skip(self))]
    pub async fn list_all(&self, request: PageRequest) -> CatalogResult<ProductPage> {
        self.page(ProductFilter::All, request).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> CatalogResult<ProductResponse> {
        self.store
            .find_by_id(id)
            .await?
            .map(|product| self.mapper.to_response(product))
            .ok_or(CatalogError::NotFound(id))
    }

    /// Exact, case-sensitive category match.
    #[instrument(skip(self))]
    pub async fn list_by_category(
        &self,
        category: &str,
        request: PageRequest,
    ) -> CatalogResult<ProductPage> {
        self.page(ProductFilter::Category(category.to_string()), request)
            .await
    }

    /// Case-insensitive substring match on the name.
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, term: &str, request: PageRequest) -> CatalogResult<ProductPage> {
        self.page(ProductFilter::NameContains(term.to_string()), request)
            .await
    }

    /// Products with `inventoryCount > 0`.
    #[instrument(skip(self))]
    pub async fn list_available(&self, request: PageRequest) -> CatalogResult<ProductPage> {
        self.page(ProductFilter::Available, request).await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: ProductRequest) -> CatalogResult<ProductResponse> {
        request.validate()?;

        let product = self.store.insert(self.mapper.to_fields(request)).await?;
        Ok(self.mapper.to_response(product))
    }

    /// Full replacement of every mutable field.
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: ProductRequest) -> CatalogResult<ProductResponse> {
        request.validate()?;

        self.store
            .update(id, self.mapper.to_fields(request))
            .await?
            .map(|product| self.mapper.to_response(product))
            .ok_or(CatalogError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> CatalogResult<()> {
        if !self.store.exists(id).await? {
            return Err(CatalogError::NotFound(id));
        }

        // Lost a race with a concurrent delete
        if !self.store.delete(id).await? {
            return Err(CatalogError::NotFound(id));
        }

        Ok(())
    }

    /// Sets the stock level; nothing else changes.
    #[instrument(skip(self))]
    pub async fn update_inventory(&self, id: i64, quantity: i32) -> CatalogResult<ProductResponse> {
        if quantity < 0 {
            return Err(CatalogError::invalid_field(
                "quantity",
                "range",
                "Inventory quantity must be at least 0",
            ));
        }

        self.store
            .update_inventory(id, quantity)
            .await?
            .map(|product| self.mapper.to_response(product))
            .ok_or(CatalogError::NotFound(id))
    }
}
