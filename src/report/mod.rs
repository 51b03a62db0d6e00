//! Aggregate reports: monthly, per-product and per-store totals, with an
//! optional CSV export per view.

mod core;
mod export;
mod pages;

pub use self::core::{
    DateRange, MonthlyTotal, ProductTotal, StoreTotal, monthly_totals, product_totals,
    store_totals,
};
pub use pages::{
    ReportParams, get_monthly_report, get_products_report, get_reports_page, get_stores_report,
};
