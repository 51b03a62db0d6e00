//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    expense::{
        add_expense_endpoint, add_line_item_endpoint, delete_expense_endpoint, get_expenses_page,
        update_expense_endpoint,
    },
    home::get_home_page,
    not_found::get_404_not_found,
    product::{add_product_endpoint, search_products_endpoint},
    receipt::{
        complete_receipt_endpoint, create_receipt_endpoint, delete_receipt_endpoint,
        get_record_expense_page,
    },
    report::{get_monthly_report, get_products_report, get_reports_page, get_stores_report},
    store::{add_store_endpoint, delete_store_endpoint, get_stores_page, update_store_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(endpoints::RECORD_EXPENSE_VIEW, get(get_record_expense_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::STORES_VIEW, get(get_stores_page))
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(endpoints::MONTHLY_REPORT_VIEW, get(get_monthly_report))
        .route(endpoints::PRODUCTS_REPORT_VIEW, get(get_products_report))
        .route(endpoints::STORES_REPORT_VIEW, get(get_stores_report));

    let form_routes = Router::new()
        .route(endpoints::ADD_PRODUCT, post(add_product_endpoint))
        .route(endpoints::ADD_STORE, post(add_store_endpoint))
        .route(endpoints::UPDATE_STORE, post(update_store_endpoint))
        .route(endpoints::DELETE_STORE, post(delete_store_endpoint))
        .route(endpoints::ADD_EXPENSE, post(add_expense_endpoint));

    let api_routes = Router::new()
        .route(endpoints::PRODUCT_SEARCH_API, get(search_products_endpoint))
        .route(endpoints::CREATE_RECEIPT_API, post(create_receipt_endpoint))
        .route(endpoints::ADD_LINE_ITEM_API, post(add_line_item_endpoint))
        .route(
            endpoints::COMPLETE_RECEIPT_API,
            post(complete_receipt_endpoint),
        )
        .route(endpoints::DELETE_RECEIPT_API, post(delete_receipt_endpoint))
        .route(endpoints::DELETE_EXPENSE_API, post(delete_expense_endpoint))
        .route(endpoints::UPDATE_EXPENSE_API, post(update_expense_endpoint));

    page_routes
        .merge(form_routes)
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}
