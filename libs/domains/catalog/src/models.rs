use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 1000;

/// Exclusive upper bound of a stored price, `NUMERIC(19, 2)`.
const PRICE_LIMIT: u64 = 100_000_000_000_000_000;
const PRICE_SCALE: u32 = 2;

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name_blank")
            .with_message(Cow::Borrowed("Product name is required")));
    }
    Ok(())
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("price_negative")
            .with_message(Cow::Borrowed("Price must be greater than or equal to 0")));
    }
    if *price >= Decimal::from(PRICE_LIMIT) {
        return Err(ValidationError::new("price_too_large")
            .with_message(Cow::Borrowed("Price must be less than 100000000000000000")));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(ValidationError::new("price_scale")
            .with_message(Cow::Borrowed("Price must have at most 2 decimal places")));
    }
    Ok(())
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// A persisted catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Store-assigned, never reused
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub inventory_count: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// A product is available while it has stock.
    pub fn is_available(&self) -> bool {
        self.inventory_count > 0
    }
}

/// The client-controlled part of a product: everything except identity and
/// timestamps. Stores receive this for inserts and full replacements.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub inventory_count: i32,
    pub image_url: Option<String>,
}

/// Body of `POST /` and `PUT /{id}`.
///
/// `price` and `inventoryCount` are optional at the serde level so that a
/// missing value is reported as a field error rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    /// Display name, must contain a non-whitespace character
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Widget")]
    pub name: String,

    pub description: Option<String>,

    /// Unit price, `>= 0`
    #[validate(
        required(message = "Price is required"),
        custom(function = "validate_price")
    )]
    #[schema(value_type = Option<f64>, example = 9.99)]
    pub price: Option<Decimal>,

    /// Free-form label, matched exactly by the category listing
    #[serde(default)]
    #[schema(example = "Tools")]
    pub category: String,

    /// Units in stock, `>= 0`
    #[validate(
        required(message = "Inventory count is required"),
        range(min = 0, message = "Inventory count must be at least 0")
    )]
    #[schema(example = 3)]
    pub inventory_count: Option<i32>,

    pub image_url: Option<String>,
}

/// Product as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    pub category: String,
    pub inventory_count: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which rows a listing selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    All,
    /// Exact, case-sensitive match on `category`
    Category(String),
    /// Case-insensitive substring match on `name`; empty matches everything
    NameContains(String),
    /// `inventory_count > 0`
    Available,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::Category(category) => product.category == *category,
            ProductFilter::NameContains(term) => product
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            ProductFilter::Available => product.is_available(),
        }
    }
}

/// Sortable product attributes. Unknown names fall back to [`SortField::Id`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
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

impl SortField {
    /// Accepts the camelCase wire name or the snake_case column name.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "id" => SortField::Id,
            "name" => SortField::Name,
            "description" => SortField::Description,
            "price" => SortField::Price,
            "category" => SortField::Category,
            "inventoryCount" | "inventory_count" => SortField::InventoryCount,
            "imageUrl" | "image_url" => SortField::ImageUrl,
            "createdAt" | "created_at" => SortField::CreatedAt,
            "updatedAt" | "updated_at" => SortField::UpdatedAt,
            other => {
                tracing::debug!(sort_by = other, "Unknown sort field, ordering by id");
                SortField::Id
            }
        }
    }

    /// Ascending comparison; missing optional values order last, like
    /// PostgreSQL's default `NULLS LAST`.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Description => nulls_last(&a.description, &b.description),
            SortField::Price => a.price.cmp(&b.price),
            SortField::Category => a.category.cmp(&b.category),
            SortField::InventoryCount => a.inventory_count.cmp(&b.inventory_count),
            SortField::ImageUrl => nulls_last(&a.image_url, &b.image_url),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case is descending; everything else is ascending.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// A zero-based page window plus ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl PageRequest {
    /// Ordered by ascending id.
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            sort: SortField::Id,
            direction: SortDirection::Asc,
        }
    }

    pub fn sorted_by(mut self, sort: SortField, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// Full ordering used by stores: the requested field, then ascending id.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self.direction {
            SortDirection::Asc => self.sort.compare(a, b),
            SortDirection::Desc => self.sort.compare(a, b).reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One slice of a listing plus the size of the whole result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub number: u64,
    pub size: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, request: &PageRequest) -> Self {
        Self {
            content,
            total_elements,
            number: request.page,
            size: request.size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total_elements.div_ceil(self.size)
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            number: self.number,
            size: self.size,
        }
    }
}

/// Wire form of a product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub content: Vec<ProductResponse>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// Zero-based page index
    pub number: u64,
    pub size: u64,
    pub number_of_elements: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl From<Page<ProductResponse>> for ProductPage {
    fn from(page: Page<ProductResponse>) -> Self {
        let total_pages = page.total_pages();
        Self {
            number_of_elements: page.content.len() as u64,
            first: page.number == 0,
            last: page.number.saturating_add(1) >= total_pages,
            empty: page.content.is_empty(),
            total_elements: page.total_elements,
            total_pages,
            number: page.number,
            size: page.size,
            content: page.content,
        }
    }
}

/// Query string of `GET /`.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Zero-based page index (default 0)
    #[serde(default)]
    pub page: u64,
    /// Page size, 1 to 1000 (default 10)
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 1000, message = "Page size must be between 1 and 1000"))]
    pub size: u64,
    /// Field to order by (default `id`)
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`
    pub direction: Option<String>,
}

impl ListParams {
    pub fn page_request(&self) -> PageRequest {
        let sort = self
            .sort_by
            .as_deref()
            .map(SortField::parse)
            .unwrap_or_default();
        let direction = self
            .direction
            .as_deref()
            .map(SortDirection::parse)
            .unwrap_or_default();
        PageRequest::new(self.page, self.size).sorted_by(sort, direction)
    }
}

/// Query string of the category and availability listings.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index (default 0)
    #[serde(default)]
    pub page: u64,
    /// Page size, 1 to 1000 (default 10)
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 1000, message = "Page size must be between 1 and 1000"))]
    pub size: u64,
}

impl PageParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

/// Query string of `GET /search`.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive name fragment; missing or empty matches everything
    #[serde(default)]
    pub name: String,
    /// Zero-based page index (default 0)
    #[serde(default)]
    pub page: u64,
    /// Page size, 1 to 1000 (default 10)
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 1000, message = "Page size must be between 1 and 1000"))]
    pub size: u64,
}

impl SearchParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

/// Query string of `PATCH /{id}/inventory`. The sign check lives in the
/// service so direct callers get it too.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryParams {
    /// New stock level, `>= 0`
    pub quantity: i32,
}
