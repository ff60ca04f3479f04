#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub small_image: String, // placeholder image URL
    pub out_of_stock: bool,
    pub category_id: i32, // FK -> category.id
    pub brand_id: i32,    // FK -> brand.id
}
