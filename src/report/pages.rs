//! The report pages and their CSV export variant.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{base, format_lei},
    navigation::NavBar,
    report::{
        core::{DateRange, monthly_totals, product_totals, store_totals},
        export::{monthly_csv, products_csv, stores_csv},
    },
};

/// The query parameters shared by the three report views.
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    /// The inclusive start of the date filter.
    pub start_date: Option<String>,
    /// The inclusive end of the date filter.
    pub end_date: Option<String>,
    /// `csv` to download the report instead of rendering a page.
    pub format: Option<String>,
}

impl ReportParams {
    fn range(&self) -> DateRange {
        DateRange::from_raw(self.start_date.as_deref(), self.end_date.as_deref())
    }

    fn wants_csv(&self) -> bool {
        self.format.as_deref().map(str::trim) == Some("csv")
    }
}

/// Render the report index page.
pub async fn get_reports_page() -> Response {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        h1 { "Rapoarte" }

        ul {
            li { a href=(endpoints::MONTHLY_REPORT_VIEW) { "Total pe luna" } }
            li { a href=(endpoints::PRODUCTS_REPORT_VIEW) { "Total pe produs" } }
            li { a href=(endpoints::STORES_REPORT_VIEW) { "Total pe magazin" } }
        }

        p class="muted" {
            "Fiecare raport accepta un interval de date si poate fi descarcat ca CSV."
        }
    };

    base("Rapoarte", &content).into_response()
}

/// Render the monthly totals report, or stream it as CSV when requested.
pub async fn get_monthly_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let totals = match monthly_totals(&params.range(), &connection) {
        Ok(totals) => totals,
        Err(error) => return error.into_response(),
    };

    if params.wants_csv() {
        return match monthly_csv(&totals) {
            Ok(body) => csv_attachment(body),
            Err(error) => error.into_response(),
        };
    }

    let table = html! {
        table {
            thead {
                tr {
                    th { "Luna" }
                    th class="num" { "Total" }
                }
            }
            tbody {
                @for row in &totals {
                    tr {
                        td { (row.month) }
                        td class="num" { (format_lei(row.total)) }
                    }
                }
            }
        }
    };

    report_page_view(
        "Total pe luna",
        endpoints::MONTHLY_REPORT_VIEW,
        &params,
        totals.is_empty(),
        &table,
    )
    .into_response()
}

/// Render the per-product totals report, or stream it as CSV when requested.
pub async fn get_products_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let totals = match product_totals(&params.range(), &connection) {
        Ok(totals) => totals,
        Err(error) => return error.into_response(),
    };

    if params.wants_csv() {
        return match products_csv(&totals) {
            Ok(body) => csv_attachment(body),
            Err(error) => error.into_response(),
        };
    }

    let table = html! {
        table {
            thead {
                tr {
                    th { "Produs" }
                    th class="num" { "Total" }
                }
            }
            tbody {
                @for row in &totals {
                    tr {
                        td { (row.product) }
                        td class="num" { (format_lei(row.total)) }
                    }
                }
            }
        }
    };

    report_page_view(
        "Total pe produs",
        endpoints::PRODUCTS_REPORT_VIEW,
        &params,
        totals.is_empty(),
        &table,
    )
    .into_response()
}

/// Render the per-store totals report, or stream it as CSV when requested.
pub async fn get_stores_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let totals = match store_totals(&params.range(), &connection) {
        Ok(totals) => totals,
        Err(error) => return error.into_response(),
    };

    if params.wants_csv() {
        return match stores_csv(&totals) {
            Ok(body) => csv_attachment(body),
            Err(error) => error.into_response(),
        };
    }

    let table = html! {
        table {
            thead {
                tr {
                    th { "Magazin" }
                    th class="num" { "Produse" }
                    th class="num" { "Total" }
                }
            }
            tbody {
                @for row in &totals {
                    tr {
                        td { (row.store) }
                        td class="num" { (row.items) }
                        td class="num" { (format_lei(row.total)) }
                    }
                }
            }
        }
    };

    report_page_view(
        "Total pe magazin",
        endpoints::STORES_REPORT_VIEW,
        &params,
        totals.is_empty(),
        &table,
    )
    .into_response()
}

/// The shared report page chrome: date filter form, CSV download link, and
/// the report table (or an empty-state message).
fn report_page_view(
    title: &str,
    endpoint: &str,
    params: &ReportParams,
    is_empty: bool,
    table: &Markup,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();
    let range = params.range();
    let csv_href = format!(
        "{endpoint}?format=csv&start_date={}&end_date={}",
        range.start.as_deref().unwrap_or(""),
        range.end.as_deref().unwrap_or("")
    );

    let content = html! {
        (nav_bar)

        h1 { (title) }

        form method="get" action=(endpoint) class="inline"
        {
            label for="start_date" { "De la" }
            input
                id="start_date"
                type="date"
                name="start_date"
                value=[range.start.as_deref()];

            label for="end_date" { "Pana la" }
            input id="end_date" type="date" name="end_date" value=[range.end.as_deref()];

            button type="submit" { "Filtreaza" }
        }

        p { a href=(csv_href) { "Descarca CSV" } }

        @if is_empty {
            p class="muted" { "Nicio cheltuiala in intervalul ales." }
        } @else {
            (table)
        }
    };

    base(title, &content)
}

fn csv_attachment(body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=export.csv",
            ),
        ],
        body,
    )
        .into_response()
}
