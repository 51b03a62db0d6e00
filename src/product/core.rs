//! The product model and its database queries.

use rusqlite::{Connection, Row};
use serde::Serialize;

use crate::Error;

/// A purchasable product, created on first use from the recording form.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// The ID of the product.
    pub id: i64,
    /// The display name, stored as submitted.
    pub name: String,
    /// The ID of the category the product belongs to, if any.
    pub category_id: Option<i64>,
}

/// A product row shaped for the autocomplete endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSuggestion {
    /// The ID of the product.
    pub id: i64,
    /// The display name of the product.
    pub name: String,
    /// The name of the product's category, if it has one.
    pub category: Option<String>,
}

/// The maximum number of rows the autocomplete endpoint returns.
pub const SEARCH_LIMIT: usize = 10;

/// Initialize the product table.
pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            category_id INTEGER,
            FOREIGN KEY(category_id) REFERENCES category(id)
        )",
        (),
    )?;

    Ok(())
}

/// Return the product whose name matches `name` case-insensitively, creating
/// it first if no such product exists.
///
/// The name is stored as submitted; only the comparison ignores case, so
/// submitting "milk" after "Milk" returns the original row. `category_id` is
/// only applied when a new row is inserted.
///
/// # Errors
/// Returns [Error::EmptyProductName] if `name` is empty or whitespace.
pub fn find_or_create_product(
    name: &str,
    category_id: Option<i64>,
    connection: &Connection,
) -> Result<Product, Error> {
    let name = name.trim();

    if name.is_empty() {
        return Err(Error::EmptyProductName);
    }

    let existing = connection
        .prepare("SELECT id, name, category_id FROM product WHERE UPPER(name) = UPPER(?1)")?
        .query_row((name,), map_row);

    match existing {
        Ok(product) => Ok(product),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            connection.execute(
                "INSERT INTO product (name, category_id) VALUES (?1, ?2)",
                (name, category_id),
            )?;

            Ok(Product {
                id: connection.last_insert_rowid(),
                name: name.to_owned(),
                category_id,
            })
        }
        Err(error) => Err(error.into()),
    }
}

/// Retrieve a single product by ID.
pub fn get_product(id: i64, connection: &Connection) -> Result<Product, Error> {
    connection
        .prepare("SELECT id, name, category_id FROM product WHERE id = :id")?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all products ordered alphabetically by name.
pub fn get_all_products(connection: &Connection) -> Result<Vec<Product>, Error> {
    connection
        .prepare("SELECT id, name, category_id FROM product ORDER BY name ASC")?
        .query_map([], map_row)?
        .map(|maybe_product| maybe_product.map_err(|error| error.into()))
        .collect()
}

/// Case-insensitive substring search over product names for the autocomplete
/// endpoint, capped at [SEARCH_LIMIT] rows ordered by name.
///
/// An empty `query` matches everything, so it returns the first
/// [SEARCH_LIMIT] products by name.
pub(crate) fn search_products(
    query: &str,
    connection: &Connection,
) -> Result<Vec<ProductSuggestion>, Error> {
    connection
        .prepare(
            "SELECT product.id, product.name, category.name FROM product
             LEFT JOIN category ON product.category_id = category.id
             WHERE product.name LIKE '%' || ?1 || '%'
             ORDER BY product.name ASC
             LIMIT ?2",
        )?
        .query_map((query, SEARCH_LIMIT as i64), |row| {
            Ok(ProductSuggestion {
                id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
            })
        })?
        .map(|maybe_suggestion| maybe_suggestion.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Product, rusqlite::Error> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        category_id: row.get(2)?,
    })
}
