//! Translation between stored products and the wire shapes.

use crate::models::{Page, Product, ProductFields, ProductPage, ProductRequest, ProductResponse};

/// Stateless field copier between [`Product`] and the request/response shapes.
///
/// Requests are expected to have passed validation already; the mapper never
/// rejects input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductMapper;

impl ProductMapper {
    pub fn to_response(&self, product: Product) -> ProductResponse {
        ProductResponse {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            inventory_count: product.inventory_count,
            image_url: product.image_url,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }

    pub fn to_page(&self, page: Page<Product>) -> ProductPage {
        page.map(|product| self.to_response(product)).into()
    }

    /// Create path: copies every mutable field. Identity and timestamps are
    /// left to the store.
    pub fn to_fields(&self, request: ProductRequest) -> ProductFields {
        ProductFields {
            name: request.name,
            description: request.description,
            price: request.price.unwrap_or_default(),
            category: request.category,
            inventory_count: request.inventory_count.unwrap_or_default(),
            image_url: request.image_url,
        }
    }

    /// Update path: overwrites the mutable fields of `product` in place.
    /// `id` and both timestamps are untouched.
    pub fn apply(&self, product: &mut Product, fields: ProductFields) {
        product.name = fields.name;
        product.description = fields.description;
        product.price = fields.price;
        product.category = fields.category;
        product.inventory_count = fields.inventory_count;
        product.image_url = fields.image_url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageRequest;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn stored() -> Product {
        let created = Utc::now() - Duration::hours(1);
        Product {
            id: 7,
            name: "Old".to_string(),
            description: Some("old description".to_string()),
            price: Decimal::from_str("1.50").unwrap(),
            category: "Old".to_string(),
            inventory_count: 1,
            image_url: Some("http://img/old.png".to_string()),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_to_response_copies_everything() {
        let product = stored();
        let response = ProductMapper.to_response(product.clone());

        assert_eq!(response.id, product.id);
        assert_eq!(response.name, product.name);
        assert_eq!(response.description, product.description);
        assert_eq!(response.price, product.price);
        assert_eq!(response.category, product.category);
        assert_eq!(response.inventory_count, product.inventory_count);
        assert_eq!(response.image_url, product.image_url);
        assert_eq!(response.created_at, product.created_at);
        assert_eq!(response.updated_at, product.updated_at);
    }

    #[test]
    fn test_to_fields_copies_request() {
        let request = ProductRequest {
            name: "Widget".to_string(),
            description: None,
            price: Some(Decimal::from_str("9.99").unwrap()),
            category: "Tools".to_string(),
            inventory_count: Some(3),
            image_url: None,
        };

        let fields = ProductMapper.to_fields(request);

        assert_eq!(fields.name, "Widget");
        assert_eq!(fields.price, Decimal::from_str("9.99").unwrap());
        assert_eq!(fields.category, "Tools");
        assert_eq!(fields.inventory_count, 3);
        assert!(fields.description.is_none());
    }

    #[test]
    fn test_apply_keeps_identity_and_timestamps() {
        let mut product = stored();
        let before = product.clone();

        ProductMapper.apply(
            &mut product,
            ProductFields {
                name: "New".to_string(),
                description: None,
                price: Decimal::ZERO,
                category: "New".to_string(),
                inventory_count: 0,
                image_url: None,
            },
        );

        assert_eq!(product.id, before.id);
        assert_eq!(product.created_at, before.created_at);
        assert_eq!(product.updated_at, before.updated_at);
        assert_eq!(product.name, "New");
        assert!(product.description.is_none());
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_to_page() {
        let page = Page::new(vec![stored()], 11, &PageRequest::new(1, 10));
        let body = ProductMapper.to_page(page);

        assert_eq!(body.content.len(), 1);
        assert_eq!(body.total_elements, 11);
        assert_eq!(body.total_pages, 2);
        assert!(!body.first);
        assert!(body.last);
    }
}
