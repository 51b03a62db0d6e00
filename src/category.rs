//! The category lookup table referenced by products.

use rusqlite::{Connection, Row};

use crate::Error;

/// A free-standing product category, e.g. "Alimente" or "Medicamente".
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// The ID of the category.
    pub id: i64,
    /// The display name of the category.
    pub name: String,
}

/// The categories inserted when the table is first created.
const DEFAULT_CATEGORIES: [&str; 7] = [
    "Alimente",
    "Bauturi",
    "Casa si curatenie",
    "Cosmetice",
    "Medicamente",
    "Transport",
    "Altele",
];

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
        (),
    )?;

    Ok(())
}

/// Insert the default household categories if the table is empty.
pub fn seed_default_categories(connection: &Connection) -> Result<(), Error> {
    let count: i64 = connection.query_row("SELECT COUNT(id) FROM category", [], |row| row.get(0))?;

    if count > 0 {
        return Ok(());
    }

    for name in DEFAULT_CATEGORIES {
        connection.execute("INSERT INTO category (name) VALUES (?1)", (name,))?;
    }

    Ok(())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name FROM category ORDER BY name ASC")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}
