//! Product management: find-or-create resolution and name autocomplete.

mod add_endpoint;
mod core;
mod search_endpoint;

pub use add_endpoint::add_product_endpoint;
pub use self::core::{
    Product, create_product_table, find_or_create_product, get_all_products, get_product,
};
pub use search_endpoint::search_products_endpoint;

pub(crate) use self::core::search_products;
