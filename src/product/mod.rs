//! Credit products: bounds, default pricing and the catalogue

mod policy;
mod catalog;
pub mod loader;

pub use policy::CreditProductPolicy;
pub use catalog::ProductCatalog;
pub use loader::{load_products, load_products_from_reader, DEFAULT_CATALOG_PATH};
