//! Store management: find-or-create resolution, renaming and deletion.

mod core;
mod endpoints;
mod manage_page;

pub use self::core::{
    STORE_TYPE_SUGGESTIONS, Store, create_store_table, delete_store, find_or_create_store,
    get_all_stores, get_store, update_store,
};
pub use endpoints::{add_store_endpoint, delete_store_endpoint, update_store_endpoint};
pub use manage_page::get_stores_page;

pub(crate) use manage_page::stores_page_view;
