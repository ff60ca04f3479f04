use crate::model::{Brand, BrandRef, Category, CategoryRef, Product};
use anyhow::Result;

/// Write access to the three catalog tables.
///
/// Every mutating call is its own transaction: it either fully applies or
/// leaves the tables as they were. Inserts skip rows whose id already
/// exists and report how many rows were actually written.
#[async_trait::async_trait]
pub trait CatalogStore: Send {
    /// Remove every row from `product`, `brand` and `category`
    async fn clear_tables(&mut self) -> Result<()>;
    async fn insert_brands(&mut self, brands: &[Brand]) -> Result<u64>;
    async fn insert_categories(&mut self, categories: &[Category]) -> Result<u64>;
    /// Existing categories ordered by id
    async fn fetch_category_refs(&mut self) -> Result<Vec<CategoryRef>>;
    /// Existing brands ordered by id
    async fn fetch_brand_refs(&mut self) -> Result<Vec<BrandRef>>;
    /// Write one batch of products
    async fn insert_products(&mut self, products: &[Product]) -> Result<u64>;
    /// Release the underlying connection. Calling it again is a no-op.
    async fn close(&mut self) -> Result<()>;
}
