use crate::model::{Brand, Category};

/// Brand names, seeded with their 1-based position as id
pub const BRANDS: [&str; 15] = [
    "Nike", "Adidas", "Apple", "Samsung", "Sony", "Dell", "HP", "Lenovo", "Canon", "Nikon",
    "Levi's", "Zara", "H&M", "Puma", "Reebok",
];

/// (display text, description) pairs, seeded with their 1-based position as id
pub const CATEGORIES: [(&str, &str); 8] = [
    ("Electronics", "Electronic devices and accessories"),
    ("Clothing", "Men's and women's clothing"),
    ("Shoes", "Footwear for all occasions"),
    ("Accessories", "Jewelry, watches, and other accessories"),
    ("Home & Garden", "Home decor and garden supplies"),
    ("Sports & Outdoors", "Sports equipment and outdoor gear"),
    ("Beauty & Personal Care", "Cosmetics and personal care products"),
    ("Toys & Games", "Toys, games, and entertainment"),
];

const ELECTRONICS: &[&str] = &[
    "Smartphone",
    "Laptop",
    "Headphones",
    "Smart Watch",
    "Tablet",
    "Camera",
    "Gaming Console",
    "Bluetooth Speaker",
];
const CLOTHING: &[&str] = &[
    "T-Shirt", "Jeans", "Dress", "Jacket", "Hoodie", "Sweater", "Shorts", "Skirt",
];
const SHOES: &[&str] = &[
    "Running Shoes",
    "Sneakers",
    "Boots",
    "Sandals",
    "Formal Shoes",
    "Basketball Shoes",
    "Hiking Boots",
];
const ACCESSORIES: &[&str] = &[
    "Watch",
    "Necklace",
    "Backpack",
    "Sunglasses",
    "Wallet",
    "Belt",
    "Hat",
];
const HOME_AND_GARDEN: &[&str] = &[
    "Lamp",
    "Rug",
    "Chair",
    "Table",
    "Bedding Set",
    "Curtains",
    "Wall Art",
];
const SPORTS_AND_OUTDOORS: &[&str] = &[
    "Yoga Mat",
    "Dumbbell Set",
    "Tent",
    "Bicycle",
    "Basketball",
    "Soccer Ball",
    "Tennis Racket",
];
const BEAUTY_AND_PERSONAL_CARE: &[&str] = &[
    "Perfume",
    "Moisturizer",
    "Lipstick",
    "Shampoo",
    "Hair Dryer",
    "Electric Razor",
];
const TOYS_AND_GAMES: &[&str] = &[
    "Board Game",
    "Lego Set",
    "Action Figure",
    "Doll",
    "Puzzle",
    "Remote Control Car",
];
// Categories that exist in the database but not in CATEGORIES
const GENERIC: &[&str] = &["Gift Set", "Bundle", "Starter Kit"];

/// Product-type nouns used when naming products of `category`
pub fn product_types(category: &str) -> &'static [&'static str] {
    match category {
        "Electronics" => ELECTRONICS,
        "Clothing" => CLOTHING,
        "Shoes" => SHOES,
        "Accessories" => ACCESSORIES,
        "Home & Garden" => HOME_AND_GARDEN,
        "Sports & Outdoors" => SPORTS_AND_OUTDOORS,
        "Beauty & Personal Care" => BEAUTY_AND_PERSONAL_CARE,
        "Toys & Games" => TOYS_AND_GAMES,
        _ => GENERIC,
    }
}

pub fn brands() -> Vec<Brand> {
    (1..).zip(BRANDS).map(|(id, name)| Brand::new(id, name)).collect()
}

pub fn categories() -> Vec<Category> {
    (1..)
        .zip(CATEGORIES)
        .map(|(id, (name, description))| Category::new(id, name, description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_ids_follow_list_position() {
        let brands = brands();
        assert_eq!(brands.len(), 15);
        assert_eq!(
            brands.iter().map(|b| b.id).collect::<Vec<_>>(),
            (1..=15).collect::<Vec<_>>()
        );
        assert_eq!(brands[0].name, "Nike");
        assert_eq!(brands[14].name, "Reebok");
    }

    #[test]
    fn test_category_ids_follow_list_position() {
        let categories = categories();
        assert_eq!(categories.len(), 8);
        assert_eq!(
            categories.iter().map(|c| c.id).collect::<Vec<_>>(),
            (1..=8).collect::<Vec<_>>()
        );
        assert_eq!(categories[4].display_text, "Home & Garden");
        assert_eq!(categories[4].description, "Home decor and garden supplies");
    }

    #[test]
    fn test_every_category_has_its_own_vocabulary() {
        for (name, _) in CATEGORIES {
            let types = product_types(name);
            assert!(!types.is_empty(), "{} has no product types", name);
            assert_ne!(types, GENERIC, "{} falls back to the generic list", name);
        }
        assert!(product_types("Electronics").contains(&"Laptop"));
    }

    #[test]
    fn test_unknown_category_uses_generic_vocabulary() {
        assert_eq!(product_types("Garden Gnomes"), GENERIC);
    }
}
