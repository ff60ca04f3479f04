#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub display_text: String,
    pub description: String,
}

impl Category {
    pub fn new(id: i32, display_text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            display_text: display_text.into(),
            description: description.into(),
        }
    }
}

/// Category row read back from the `category` table before generating products.
/// `display_text` selects the product-type vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CategoryRef {
    pub id: i32,
    pub display_text: String,
}

impl From<&Category> for CategoryRef {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            display_text: category.display_text.clone(),
        }
    }
}
