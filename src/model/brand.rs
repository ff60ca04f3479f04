#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    pub id: i32,
    pub name: String,
}

impl Brand {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Brand row read back from the `brand` table before generating products
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BrandRef {
    pub id: i32,
    pub name: String,
}

impl From<&Brand> for BrandRef {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id,
            name: brand.name.clone(),
        }
    }
}
