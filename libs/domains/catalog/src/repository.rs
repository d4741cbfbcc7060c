use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::CatalogResult;
use crate::mapper::ProductMapper;
use crate::models::{Page, PageRequest, Product, ProductFields, ProductFilter};

/// Durable keyed storage for products.
///
/// Implementations own identity assignment and timestamps. `update` and
/// `update_inventory` must check existence and write in one atomic step;
/// `None` means no row had that id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Assigns a fresh id and sets `created_at == updated_at`.
    async fn insert(&self, fields: ProductFields) -> CatalogResult<Product>;

    async fn find_by_id(&self, id: i64) -> CatalogResult<Option<Product>>;

    async fn exists(&self, id: i64) -> CatalogResult<bool>;

    async fn find_page(
        &self,
        filter: ProductFilter,
        request: PageRequest,
    ) -> CatalogResult<Page<Product>>;

    /// Replaces every mutable field and refreshes `updated_at`.
    async fn update(&self, id: i64, fields: ProductFields) -> CatalogResult<Option<Product>>;

    /// Sets `inventory_count` and refreshes `updated_at`; nothing else changes.
    async fn update_inventory(&self, id: i64, quantity: i32) -> CatalogResult<Option<Product>>;

    /// `true` when a row was removed.
    async fn delete(&self, id: i64) -> CatalogResult<bool>;
}

#[derive(Debug, Default)]
struct Catalog {
    products: BTreeMap<i64, Product>,
    last_id: i64,
}

/// Volatile store for local runs and tests.
///
/// Ids come from a counter that never goes backwards, so deleted ids are
/// not handed out again.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductStore {
    catalog: Arc<RwLock<Catalog>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    #[instrument(skip_all, fields(name = %fields.name))]
    async fn insert(&self, fields: ProductFields) -> CatalogResult<Product> {
        let mut catalog = self.catalog.write().await;
        catalog.last_id += 1;

        let now = Utc::now();
        let product = Product {
            id: catalog.last_id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            inventory_count: fields.inventory_count,
            image_url: fields.image_url,
            created_at: now,
            updated_at: now,
        };
        catalog.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> CatalogResult<Option<Product>> {
        Ok(self.catalog.read().await.products.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> CatalogResult<bool> {
        Ok(self.catalog.read().await.products.contains_key(&id))
    }

    #[instrument(skip(self))]
    async fn find_page(
        &self,
        filter: ProductFilter,
        request: PageRequest,
    ) -> CatalogResult<Page<Product>> {
        let catalog = self.catalog.read().await;

        let mut matching: Vec<&Product> = catalog
            .products
            .values()
            .filter(|p| filter.matches(p))
            .collect();
        matching.sort_by(|a, b| request.compare(a, b));

        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.size).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(Page::new(content, total, &request))
    }

    #[instrument(skip_all, fields(product_id = id))]
    async fn update(&self, id: i64, fields: ProductFields) -> CatalogResult<Option<Product>> {
        let mut catalog = self.catalog.write().await;
        let Some(product) = catalog.products.get_mut(&id) else {
            return Ok(None);
        };

        ProductMapper.apply(product, fields);
        product.updated_at = Utc::now().max(product.created_at);

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(product.clone()))
    }

    #[instrument(skip(self))]
    async fn update_inventory(&self, id: i64, quantity: i32) -> CatalogResult<Option<Product>> {
        let mut catalog = self.catalog.write().await;
        let Some(product) = catalog.products.get_mut(&id) else {
            return Ok(None);
        };

        product.inventory_count = quantity;
        product.updated_at = Utc::now().max(product.created_at);

        tracing::info!(product_id = id, quantity, "Updated inventory");
        Ok(Some(product.clone()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> CatalogResult<bool> {
        let removed = self.catalog.write().await.products.remove(&id).is_some();
        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }
}
