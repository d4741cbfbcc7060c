use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(Products::Name))
                    .col(text_null(Products::Description))
                    .col(decimal_len(Products::Price, 19, 2))
                    .col(string(Products::Category))
                    .col(integer(Products::InventoryCount).default(0))
                    .col(string_null(Products::ImageUrl))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
            ALTER TABLE products
                ADD CONSTRAINT products_price_non_negative CHECK (price >= 0),
                ADD CONSTRAINT products_inventory_non_negative CHECK (inventory_count >= 0)
            "#,
        )
        .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category")
                    .table(Products::Table)
                    .col(Products::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_inventory_count")
                    .table(Products::Table)
                    .col(Products::InventoryCount)
                    .to_owned(),
            )
            .await?;

        // Trigram index so `LOWER(name) LIKE '%term%'` can avoid a sequential scan
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS pg_trgm")
            .await?;
        db.execute_unprepared(
            "CREATE INDEX idx_products_name_trgm ON products USING GIN (LOWER(name) gin_trgm_ops)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    Price,
    Category,
    InventoryCount,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}
