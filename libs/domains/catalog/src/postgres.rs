use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ExprTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use tracing::instrument;

use crate::{
    entity,
    error::CatalogResult,
    models::{Page, PageRequest, Product, ProductFields, ProductFilter, SortDirection, SortField},
    repository::ProductStore,
};

/// [`ProductStore`] over the `products` table.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    db: DatabaseConnection,
}

impl PgProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: ProductFilter) -> Select<entity::Entity> {
        let query = entity::Entity::find();
        match filter {
            ProductFilter::All => query,
            ProductFilter::Category(category) => {
                query.filter(entity::Column::Category.eq(category))
            }
            ProductFilter::NameContains(term) if term.is_empty() => query,
            ProductFilter::NameContains(term) => {
                let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
                query.filter(
                    Expr::expr(Func::lower(Expr::col(entity::Column::Name)))
                        .like(LikeExpr::new(pattern).escape('\\')),
                )
            }
            ProductFilter::Available => query.filter(entity::Column::InventoryCount.gt(0)),
        }
    }
}

fn sort_column(field: SortField) -> entity::Column {
    match field {
        SortField::Id => entity::Column::Id,
        SortField::Name => entity::Column::Name,
        SortField::Description => entity::Column::Description,
        SortField::Price => entity::Column::Price,
        SortField::Category => entity::Column::Category,
        SortField::InventoryCount => entity::Column::InventoryCount,
        SortField::ImageUrl => entity::Column::ImageUrl,
        SortField::CreatedAt => entity::Column::CreatedAt,
        SortField::UpdatedAt => entity::Column::UpdatedAt,
    }
}

/// Escapes `LIKE` wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip_all, fields(name = %fields.name))]
    async fn insert(&self, fields: ProductFields) -> CatalogResult<Product> {
        let now = Utc::now();
        let mut row = entity::fields_active_model(fields, now);
        row.created_at = Set(now);

        let model = row.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> CatalogResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: i64) -> CatalogResult<bool> {
        let count = entity::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn find_page(
        &self,
        filter: ProductFilter,
        request: PageRequest,
    ) -> CatalogResult<Page<Product>> {
        let query = Self::filtered(filter);

        let total = query.clone().count(&self.db).await?;
        // Postgres OFFSET is a signed bigint, so far pages never reach the query
        if request.offset() >= total {
            return Ok(Page::new(Vec::new(), total, &request));
        }

        let order = match request.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        let mut ordered = query.order_by(sort_column(request.sort), order);
        if request.sort != SortField::Id {
            ordered = ordered.order_by_asc(entity::Column::Id);
        }

        let models = ordered
            .limit(request.size)
            .offset(request.offset())
            .all(&self.db)
            .await?;

        Ok(Page::new(
            models.into_iter().map(Product::from).collect(),
            total,
            &request,
        ))
    }

    /// Single `UPDATE ... WHERE id = $1 RETURNING *`.
    #[instrument(skip_all, fields(product_id = id))]
    async fn update(&self, id: i64, fields: ProductFields) -> CatalogResult<Option<Product>> {
        let updated = entity::Entity::update_many()
            .set(entity::fields_active_model(fields, Utc::now()))
            .filter(entity::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await?;

        let product = updated.into_iter().next().map(Product::from);
        if product.is_some() {
            tracing::info!(product_id = id, "Updated product");
        }
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn update_inventory(&self, id: i64, quantity: i32) -> CatalogResult<Option<Product>> {
        let row = entity::ActiveModel {
            inventory_count: Set(quantity),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        let updated = entity::Entity::update_many()
            .set(row)
            .filter(entity::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await?;

        let product = updated.into_iter().next().map(Product::from);
        if product.is_some() {
            tracing::info!(product_id = id, quantity, "Updated inventory");
        }
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> CatalogResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
