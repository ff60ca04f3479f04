use fake::faker::lorem::en::Paragraph;
use fake::Fake;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::model::{BrandRef, CategoryRef, Product};
use crate::seed::data::product_types;
use crate::seed::populate::SeedError;

const SKU_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Reference rows a product may point at. Never empty.
#[derive(Debug, Clone)]
pub struct References {
    categories: Vec<CategoryRef>,
    brands: Vec<BrandRef>,
}

impl References {
    pub fn new(categories: Vec<CategoryRef>, brands: Vec<BrandRef>) -> Result<Self, SeedError> {
        if categories.is_empty() {
            return Err(SeedError::MissingReferences { table: "category" });
        }
        if brands.is_empty() {
            return Err(SeedError::MissingReferences { table: "brand" });
        }
        Ok(Self { categories, brands })
    }

    pub fn categories(&self) -> &[CategoryRef] {
        &self.categories
    }

    pub fn brands(&self) -> &[BrandRef] {
        &self.brands
    }

    fn pick_category<R: Rng>(&self, rng: &mut R) -> &CategoryRef {
        &self.categories[rng.random_range(0..self.categories.len())]
    }

    fn pick_brand<R: Rng>(&self, rng: &mut R) -> &BrandRef {
        &self.brands[rng.random_range(0..self.brands.len())]
    }
}

/// Builds synthetic products from an injected randomness source
pub struct ProductFactory<'a, R: Rng> {
    rng: &'a mut R,
}

impl<'a, R: Rng> ProductFactory<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    /// Category and brand are drawn independently and uniformly
    pub fn build(&mut self, id: i32, references: &References) -> Product {
        let rng = &mut *self.rng;
        let category = references.pick_category(rng);
        let brand = references.pick_brand(rng);

        Product {
            id,
            name: product_name(rng, &brand.name, &category.display_text),
            description: description(rng),
            sku: sku(rng),
            small_image: image_url(id),
            out_of_stock: rng.random_bool(0.5),
            category_id: category.id,
            brand_id: brand.id,
        }
    }
}

/// "{brand} {product type} {4 digits}"
pub fn product_name<R: Rng>(rng: &mut R, brand: &str, category: &str) -> String {
    let product_type = product_types(category)
        .choose(rng)
        .copied()
        .unwrap_or("Item");
    format!("{} {} {:04}", brand, product_type, rng.random_range(0..10_000))
}

/// Three-sentence lorem paragraph
pub fn description<R: Rng>(rng: &mut R) -> String {
    Paragraph(3..4).fake_with_rng(rng)
}

/// Three uppercase letters, a hyphen and eight digits, e.g. `QZT-04918273`
pub fn sku<R: Rng>(rng: &mut R) -> String {
    let mut sku = String::with_capacity(12);
    for _ in 0..3 {
        sku.push(char::from(SKU_LETTERS[rng.random_range(0..SKU_LETTERS.len())]));
    }
    sku.push('-');
    for _ in 0..8 {
        sku.push(char::from(b'0' + rng.random_range(0..10u8)));
    }
    sku
}

/// Placeholder image, stable for a given product id
pub fn image_url(id: i32) -> String {
    format!("https://picsum.photos/200/200?random={}", id)
}
