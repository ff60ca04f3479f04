pub mod data;
pub mod generator;
pub mod populate;

pub use generator::{ProductFactory, References};
pub use populate::*;
