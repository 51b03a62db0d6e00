//! The receipt recording page.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    AppState, Error,
    category::{Category, get_all_categories},
    endpoints,
    html::base,
    navigation::NavBar,
    store::{Store, get_all_stores},
};

/// The in-page script driving the receipt workflow through the JSON API.
///
/// Opening a receipt returns its number, which every line-item submission
/// echoes back as `receipt_id`. Completion only acknowledges and redirects;
/// the receipt itself stays open-ended server-side.
const RECORD_SCRIPT: &str = r#"
    let receiptId = null;

    async function postForm(url, fields) {
        const response = await fetch(url, {
            method: 'POST',
            headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
            body: new URLSearchParams(fields),
        });
        return response.json();
    }

    document.getElementById('open-receipt').addEventListener('click', async () => {
        const body = await postForm('/create_receipt', {
            store_id: document.getElementById('store_id').value,
            nr_bon: document.getElementById('nr_bon').value,
            date: document.getElementById('receipt_date').value,
        });
        if (!body.success) {
            alert('Eroare: ' + body.error);
            return;
        }
        receiptId = body.receipt_id;
        document.getElementById('receipt-number').textContent = receiptId;
        document.getElementById('line-section').hidden = false;
    });

    document.getElementById('add-line').addEventListener('click', async () => {
        const body = await postForm('/add_line_item', {
            receipt_id: receiptId,
            product_name: document.getElementById('product_name').value,
            category_id: document.getElementById('category_id').value,
            price: document.getElementById('price').value,
            quantity: document.getElementById('quantity').value,
            quantity_type: document.getElementById('quantity_type').value,
            discount: document.getElementById('discount').value,
            date: document.getElementById('line_date').value,
        });
        if (!body.success) {
            alert('Eroare: ' + body.error);
            return;
        }
        const row = document.createElement('tr');
        row.innerHTML = '<td>' + body.product_name + '</td>'
            + '<td class="num">' + body.price.toFixed(2) + '</td>'
            + '<td class="num">' + body.quantity + ' ' + body.quantity_type + '</td>'
            + '<td class="num">' + body.discount.toFixed(2) + '</td>'
            + '<td class="num">' + body.total.toFixed(2) + '</td>';
        document.getElementById('lines').appendChild(row);
        document.getElementById('product_name').value = '';
        document.getElementById('price').value = '';
        document.getElementById('quantity').value = '';
        document.getElementById('discount').value = '';
    });

    document.getElementById('complete-receipt').addEventListener('click', async () => {
        const body = await postForm('/complete_receipt', {});
        if (body.success) {
            window.location = body.redirect;
        }
    });

    document.getElementById('product_name').addEventListener('input', async (event) => {
        const response = await fetch('/products/search?q=' + encodeURIComponent(event.target.value));
        const suggestions = await response.json();
        const datalist = document.getElementById('product-suggestions');
        datalist.replaceChildren(...suggestions.map((suggestion) => {
            const option = document.createElement('option');
            option.value = suggestion.name;
            return option;
        }));
    });
"#;

/// Render the receipt recording page.
pub async fn get_record_expense_page(State(state): State<AppState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let stores = match get_all_stores(&connection) {
        Ok(stores) => stores,
        Err(error) => return error.into_response(),
    };

    match get_all_categories(&connection) {
        Ok(categories) => record_page_view(&stores, &categories).into_response(),
        Err(error) => error.into_response(),
    }
}

fn record_page_view(stores: &[Store], categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::RECORD_EXPENSE_VIEW).into_html();

    let content = html! {
        (nav_bar)

        h1 { "Adauga bon" }

        @if stores.is_empty() {
            p class="muted" {
                "Niciun magazin adaugat. "
                a href=(endpoints::STORES_VIEW) { "Adauga un magazin" }
                " inainte de a inregistra un bon."
            }
        }

        section {
            h2 { "Deschide bon" }

            label for="store_id" { "Magazin" }
            select id="store_id" {
                @for store in stores {
                    option value=(store.id) { (store.name) }
                }
            }

            label for="nr_bon" { "Numar bon (optional)" }
            input id="nr_bon" type="text" placeholder="generat automat daca lipseste";

            label for="receipt_date" { "Data" }
            input id="receipt_date" type="date";

            button type="button" id="open-receipt" { "Deschide bon" }
        }

        section id="line-section" hidden {
            h2 { "Bon " span id="receipt-number" {} }

            label for="product_name" { "Produs" }
            input id="product_name" type="text" list="product-suggestions";
            datalist id="product-suggestions" {}

            label for="category_id" { "Categorie" }
            select id="category_id" {
                option value="" { "-" }
                @for category in categories {
                    option value=(category.id) { (category.name) }
                }
            }

            label for="price" { "Pret" }
            input id="price" type="number" step="0.01";

            label for="quantity" { "Cantitate" }
            input id="quantity" type="number" step="0.001";

            label for="quantity_type" { "Unitate" }
            select id="quantity_type" {
                option value="buc" { "buc" }
                option value="kg" { "kg" }
            }

            label for="discount" { "Reducere" }
            input id="discount" type="number" step="0.01";

            label for="line_date" { "Data (optional)" }
            input id="line_date" type="date";

            button type="button" id="add-line" { "Adauga produs" }

            table {
                thead {
                    tr {
                        th { "Produs" }
                        th class="num" { "Pret" }
                        th class="num" { "Cantitate" }
                        th class="num" { "Reducere" }
                        th class="num" { "Total" }
                    }
                }
                tbody id="lines" {}
            }

            button type="button" id="complete-receipt" { "Finalizeaza bon" }
        }

        section {
            h2 { "Adauga produs nou" }

            form method="post" action=(endpoints::ADD_PRODUCT)
            {
                label for="new_product_name" { "Nume produs" }
                input id="new_product_name" type="text" name="name" required;

                label for="new_product_category" { "Categorie" }
                select id="new_product_category" name="category_id" {
                    option value="" { "-" }
                    @for category in categories {
                        option value=(category.id) { (category.name) }
                    }
                }

                button type="submit" { "Adauga produs" }
            }
        }

        script { (PreEscaped(RECORD_SCRIPT)) }
    };

    base("Adauga bon", &content)
}
