//! Catalog Domain
//!
//! Product catalog CRUD with paging, sorting, search and stock updates,
//! backed by PostgreSQL (SeaORM) or an in-process store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, OpenAPI
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, not-found rules, mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ ProductStore│  ← trait + PostgreSQL and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, DTOs, paging
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{CatalogService, PgProductStore, ProductMapper, handlers};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://localhost/catalog").await?;
//!
//! let service = CatalogService::new(PgProductStore::new(db), ProductMapper);
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use mapper::ProductMapper;
pub use models::{
    ListParams, Page, PageRequest, Product, ProductFields, ProductFilter, ProductPage,
    ProductRequest, ProductResponse, SortDirection, SortField,
};
pub use postgres::PgProductStore;
pub use repository::{InMemoryProductStore, ProductStore};
pub use service::CatalogService;
