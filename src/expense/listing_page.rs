//! The expense listing page, grouped by receipt.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    AppState, Error, endpoints,
    expense::{
        ExpenseLine, ReceiptGroup, UngroupedExpense, get_receipt_groups, get_ungrouped_expenses,
    },
    html::{base, format_lei},
    navigation::NavBar,
};

/// The in-page script driving the delete buttons through the JSON API.
///
/// A deleted line-item's prior values come back in the response, which is
/// where a client-side undo would re-insert them from.
const LISTING_SCRIPT: &str = r#"
    async function postForm(url, fields) {
        const response = await fetch(url, {
            method: 'POST',
            headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
            body: new URLSearchParams(fields),
        });
        const body = await response.json();
        if (body.success) {
            window.location.reload();
        } else {
            alert('Eroare: ' + body.error);
        }
    }

    document.querySelectorAll('[data-delete-receipt]').forEach((button) => {
        button.addEventListener('click', () =>
            postForm('/delete_receipt', { receipt_id: button.dataset.deleteReceipt }));
    });

    document.querySelectorAll('[data-delete-expense]').forEach((button) => {
        button.addEventListener('click', () =>
            postForm('/delete_expense', { expense_id: button.dataset.deleteExpense }));
    });
"#;

/// Render the expense listing: receipts newest-first with their line-items,
/// then the ungrouped line-items.
pub async fn get_expenses_page(State(state): State<AppState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let groups = match get_receipt_groups(&connection) {
        Ok(groups) => groups,
        Err(error) => return error.into_response(),
    };

    match get_ungrouped_expenses(&connection) {
        Ok(ungrouped) => expenses_page_view(&groups, &ungrouped).into_response(),
        Err(error) => error.into_response(),
    }
}

fn expenses_page_view(groups: &[ReceiptGroup], ungrouped: &[UngroupedExpense]) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        h1 { "Cheltuieli" }

        @if groups.is_empty() && ungrouped.is_empty() {
            p class="muted" { "Nicio cheltuiala inregistrata." }
        }

        @for group in groups {
            table {
                thead {
                    tr class="receipt-header" {
                        th colspan="4" {
                            "Bon " (group.nr_bon) " - " (group.store_name) " - " (group.date)
                        }
                        th class="num" { (format_lei(receipt_total(&group.lines))) }
                        th {
                            button type="button" data-delete-receipt=(group.nr_bon) {
                                "Sterge bon"
                            }
                        }
                    }
                    (line_header_row())
                }
                tbody {
                    @for line in &group.lines {
                        (line_row(line))
                    }
                }
            }
        }

        @if !ungrouped.is_empty() {
            h2 { "Fara bon" }

            table {
                thead {
                    tr {
                        th { "Produs" }
                        th { "Magazin" }
                        th class="num" { "Pret" }
                        th class="num" { "Cantitate" }
                        th class="num" { "Reducere" }
                        th class="num" { "Total" }
                        th;
                    }
                }
                tbody {
                    @for expense in ungrouped {
                        tr {
                            td { (expense.line.product_name) }
                            td { (expense.store_name) }
                            td class="num" { (format_lei(expense.line.price)) }
                            td class="num" { (expense.line.quantity) " " (expense.line.quantity_type) }
                            td class="num" { (format_lei(expense.line.discount)) }
                            td class="num" { (format_lei(expense.line.total())) }
                            td {
                                button type="button" data-delete-expense=(expense.line.id) {
                                    "Sterge"
                                }
                            }
                        }
                    }
                }
            }
        }

        script { (PreEscaped(LISTING_SCRIPT)) }
    };

    base("Cheltuieli", &content)
}

fn line_header_row() -> Markup {
    html! {
        tr {
            th { "Produs" }
            th class="num" { "Pret" }
            th class="num" { "Cantitate" }
            th class="num" { "Reducere" }
            th class="num" { "Total" }
            th;
        }
    }
}

fn line_row(line: &ExpenseLine) -> Markup {
    html! {
        tr {
            td { (line.product_name) }
            td class="num" { (format_lei(line.price)) }
            td class="num" { (line.quantity) " " (line.quantity_type) }
            td class="num" { (format_lei(line.discount)) }
            td class="num" { (format_lei(line.total())) }
            td {
                button type="button" data-delete-expense=(line.id) { "Sterge" }
            }
        }
    }
}

fn receipt_total(lines: &[ExpenseLine]) -> f64 {
    lines.iter().map(ExpenseLine::total).sum()
}
