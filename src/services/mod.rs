pub mod product_catalog;
pub mod reminder_service;

pub use product_catalog::ProductTemplate;
pub use reminder_service::*;
