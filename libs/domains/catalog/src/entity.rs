use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{Product, ProductFields};

/// `products` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub price: Decimal,
    pub category: String,
    pub inventory_count: i32,
    pub image_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            inventory_count: model.inventory_count,
            image_url: model.image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Row for an insert or a full replacement. `id` and `created_at` are left
/// unset; inserts fill `created_at` themselves.
pub(crate) fn fields_active_model(fields: ProductFields, now: DateTimeUtc) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        name: Set(fields.name),
        description: Set(fields.description),
        price: Set(fields.price),
        category: Set(fields.category),
        inventory_count: Set(fields.inventory_count),
        image_url: Set(fields.image_url),
        created_at: NotSet,
        updated_at: Set(now),
    }
}
