//! The application's route URIs.

/// The home page listing products and stores.
pub const ROOT: &str = "/";
/// The receipt recording page.
pub const RECORD_EXPENSE_VIEW: &str = "/record_expense";
/// The expense listing page, grouped by receipt.
pub const EXPENSES_VIEW: &str = "/cheltuieli";
/// The store management page.
pub const STORES_VIEW: &str = "/stores/new";
/// The report index page.
pub const REPORTS_VIEW: &str = "/reports";
/// The monthly totals report.
pub const MONTHLY_REPORT_VIEW: &str = "/reports/monthly";
/// The per-product totals report.
pub const PRODUCTS_REPORT_VIEW: &str = "/reports/products";
/// The per-store totals report.
pub const STORES_REPORT_VIEW: &str = "/reports/stores";

/// The route to create a product from the recording page.
pub const ADD_PRODUCT: &str = "/add_product";
/// The route to create a store.
pub const ADD_STORE: &str = "/add_store";
/// The route to rename a store or change its type.
pub const UPDATE_STORE: &str = "/stores/update";
/// The route to delete a store and its line-items.
pub const DELETE_STORE: &str = "/stores/delete";
/// The legacy route for inserting a single ungrouped expense.
pub const ADD_EXPENSE: &str = "/add_expense";

/// The product autocomplete endpoint.
pub const PRODUCT_SEARCH_API: &str = "/products/search";
/// The route to open a receipt.
pub const CREATE_RECEIPT_API: &str = "/create_receipt";
/// The route to attach a line-item to an open receipt.
pub const ADD_LINE_ITEM_API: &str = "/add_line_item";
/// The route that acknowledges a finished receipt.
pub const COMPLETE_RECEIPT_API: &str = "/complete_receipt";
/// The route to delete a receipt and its line-items.
pub const DELETE_RECEIPT_API: &str = "/delete_receipt";
/// The route to delete a single line-item.
pub const DELETE_EXPENSE_API: &str = "/delete_expense";
/// The route to update a line-item's price, quantity or discount.
pub const UPDATE_EXPENSE_API: &str = "/update_expense";

// These tests are here so that we know the route constants will parse as URIs.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::RECORD_EXPENSE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STORES_VIEW);
        assert_endpoint_is_valid_uri(endpoints::REPORTS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::MONTHLY_REPORT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::PRODUCTS_REPORT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STORES_REPORT_VIEW);

        assert_endpoint_is_valid_uri(endpoints::ADD_PRODUCT);
        assert_endpoint_is_valid_uri(endpoints::ADD_STORE);
        assert_endpoint_is_valid_uri(endpoints::UPDATE_STORE);
        assert_endpoint_is_valid_uri(endpoints::DELETE_STORE);
        assert_endpoint_is_valid_uri(endpoints::ADD_EXPENSE);

        assert_endpoint_is_valid_uri(endpoints::PRODUCT_SEARCH_API);
        assert_endpoint_is_valid_uri(endpoints::CREATE_RECEIPT_API);
        assert_endpoint_is_valid_uri(endpoints::ADD_LINE_ITEM_API);
        assert_endpoint_is_valid_uri(endpoints::COMPLETE_RECEIPT_API);
        assert_endpoint_is_valid_uri(endpoints::DELETE_RECEIPT_API);
        assert_endpoint_is_valid_uri(endpoints::DELETE_EXPENSE_API);
        assert_endpoint_is_valid_uri(endpoints::UPDATE_EXPENSE_API);
    }
}
