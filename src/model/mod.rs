pub mod brand;
pub mod category;
pub mod product;

pub use brand::*;
pub use category::*;
pub use product::*;
