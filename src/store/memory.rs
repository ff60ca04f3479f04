use std::collections::BTreeMap;

use anyhow::{bail, Result};

use crate::model::{Brand, BrandRef, Category, CategoryRef, Product};
use crate::store::traits::CatalogStore;

/// In-memory catalog tables with the same write semantics as PostgreSQL:
/// conflict-skipping inserts, foreign-key checks on products and
/// all-or-nothing calls. Faults can be injected to exercise rollback paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    brands: BTreeMap<i32, Brand>,
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    faults: Faults,
    product_rows_attempted: usize,
    closed: bool,
}

#[derive(Debug, Default, Clone)]
struct Faults {
    clear: bool,
    brands: bool,
    categories: bool,
    products_after: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `clear_tables` fail
    pub fn with_failing_clear(mut self) -> Self {
        self.faults.clear = true;
        self
    }

    pub fn with_failing_brands(mut self) -> Self {
        self.faults.brands = true;
        self
    }

    pub fn with_failing_categories(mut self) -> Self {
        self.faults.categories = true;
        self
    }

    /// Fail on the product row written after `rows` rows have been attempted
    pub fn with_product_failure_after(mut self, rows: usize) -> Self {
        self.faults.products_after = Some(rows);
        self
    }

    pub fn brands(&self) -> &BTreeMap<i32, Brand> {
        &self.brands
    }

    pub fn categories(&self) -> &BTreeMap<i32, Category> {
        &self.categories
    }

    pub fn products(&self) -> &BTreeMap<i32, Product> {
        &self.products
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            bail!("connection is closed");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryStore {
    async fn clear_tables(&mut self) -> Result<()> {
        self.ensure_open()?;
        if self.faults.clear {
            bail!("permission denied to set parameter \"session_replication_role\"");
        }
        self.products.clear();
        self.brands.clear();
        self.categories.clear();
        Ok(())
    }

    async fn insert_brands(&mut self, brands: &[Brand]) -> Result<u64> {
        self.ensure_open()?;
        if self.faults.brands {
            bail!("relation \"brand\" does not exist");
        }
        let mut inserted = 0;
        for brand in brands {
            if !self.brands.contains_key(&brand.id) {
                self.brands.insert(brand.id, brand.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn insert_categories(&mut self, categories: &[Category]) -> Result<u64> {
        self.ensure_open()?;
        if self.faults.categories {
            bail!("relation \"category\" does not exist");
        }
        let mut inserted = 0;
        for category in categories {
            if !self.categories.contains_key(&category.id) {
                self.categories.insert(category.id, category.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn fetch_category_refs(&mut self) -> Result<Vec<CategoryRef>> {
        self.ensure_open()?;
        Ok(self.categories.values().map(CategoryRef::from).collect())
    }

    async fn fetch_brand_refs(&mut self) -> Result<Vec<BrandRef>> {
        self.ensure_open()?;
        Ok(self.brands.values().map(BrandRef::from).collect())
    }

    async fn insert_products(&mut self, products: &[Product]) -> Result<u64> {
        self.ensure_open()?;

        // Stage the batch so a failure leaves committed rows untouched
        let mut staged = Vec::with_capacity(products.len());
        for product in products {
            if self.faults.products_after == Some(self.product_rows_attempted) {
                bail!("injected failure writing product {}", product.id);
            }
            self.product_rows_attempted += 1;

            if !self.categories.contains_key(&product.category_id) {
                bail!(
                    "product {} references missing category {}",
                    product.id,
                    product.category_id
                );
            }
            if !self.brands.contains_key(&product.brand_id) {
                bail!(
                    "product {} references missing brand {}",
                    product.id,
                    product.brand_id
                );
            }
            let duplicate_in_batch = staged.iter().any(|p: &&Product| p.id == product.id);
            if !self.products.contains_key(&product.id) && !duplicate_in_batch {
                staged.push(product);
            }
        }

        let inserted = staged.len() as u64;
        for product in staged {
            self.products.insert(product.id, product.clone());
        }
        Ok(inserted)
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
