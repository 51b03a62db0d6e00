//! The store model and its database queries.

use rusqlite::{Connection, Row};

use crate::Error;

/// A store where purchases are made.
///
/// Names are upper-cased before storage, so two submissions differing only in
/// case resolve to the same row.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    /// The ID of the store.
    pub id: i64,
    /// The display name, always stored upper-cased.
    pub name: String,
    /// A free-text store type, e.g. "supermarket".
    pub store_type: Option<String>,
}

/// Store types offered as suggestions in the management form. Free text is
/// still accepted.
pub const STORE_TYPE_SUGGESTIONS: [&str; 4] =
    ["supermarket", "farmacie", "restaurant", "benzinarie"];

/// Initialize the store table.
pub fn create_store_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS store (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            store_type TEXT
        )",
        (),
    )?;

    Ok(())
}

/// Return the store whose name matches `name` case-insensitively, creating it
/// first if no such store exists.
///
/// The name is trimmed and upper-cased before both the lookup and the insert.
/// `store_type` is only applied when a new row is inserted.
///
/// # Errors
/// Returns [Error::EmptyStoreName] if `name` is empty or whitespace.
pub fn find_or_create_store(
    name: &str,
    store_type: Option<&str>,
    connection: &Connection,
) -> Result<Store, Error> {
    let name = name.trim().to_uppercase();

    if name.is_empty() {
        return Err(Error::EmptyStoreName);
    }

    let existing = connection
        .prepare("SELECT id, name, store_type FROM store WHERE name = ?1")?
        .query_row((&name,), map_row);

    match existing {
        Ok(store) => Ok(store),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            let store_type = normalize_store_type(store_type);

            connection.execute(
                "INSERT INTO store (name, store_type) VALUES (?1, ?2)",
                (&name, &store_type),
            )?;

            Ok(Store {
                id: connection.last_insert_rowid(),
                name,
                store_type,
            })
        }
        Err(error) => Err(error.into()),
    }
}

/// Retrieve a single store by ID.
pub fn get_store(id: i64, connection: &Connection) -> Result<Store, Error> {
    connection
        .prepare("SELECT id, name, store_type FROM store WHERE id = :id")?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all stores ordered alphabetically by name.
pub fn get_all_stores(connection: &Connection) -> Result<Vec<Store>, Error> {
    connection
        .prepare("SELECT id, name, store_type FROM store ORDER BY name ASC")?
        .query_map([], map_row)?
        .map(|maybe_store| maybe_store.map_err(|error| error.into()))
        .collect()
}

/// Rename a store and/or change its type.
///
/// The new name is upper-cased like at creation time. Renaming onto another
/// store's name (in any casing) is reported as [Error::DuplicateStoreName]
/// before anything is written.
///
/// # Errors
/// Returns [Error::UpdateMissingStore] if `id` does not refer to a store.
pub fn update_store(
    id: i64,
    name: &str,
    store_type: Option<&str>,
    connection: &Connection,
) -> Result<Store, Error> {
    let name = name.trim().to_uppercase();

    if name.is_empty() {
        return Err(Error::EmptyStoreName);
    }

    let taken: Option<i64> = connection
        .prepare("SELECT id FROM store WHERE name = ?1 AND id != ?2")?
        .query_row((&name, id), |row| row.get(0))
        .map(Some)
        .or_else(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            error => Err(Error::from(error)),
        })?;

    if taken.is_some() {
        return Err(Error::DuplicateStoreName(name));
    }

    let store_type = normalize_store_type(store_type);

    let rows_affected = connection.execute(
        "UPDATE store SET name = ?1, store_type = ?2 WHERE id = ?3",
        (&name, &store_type, id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingStore);
    }

    Ok(Store {
        id,
        name,
        store_type,
    })
}

/// Delete a store, its receipts, and every line-item referencing it.
///
/// The line-items are removed by an explicit pre-delete rather than a
/// declarative cascade; nothing is retained for undo.
///
/// # Errors
/// Returns [Error::DeleteMissingStore] if `id` does not refer to a store.
pub fn delete_store(id: i64, connection: &Connection) -> Result<(), Error> {
    connection.execute("DELETE FROM expense WHERE store_id = ?1", [id])?;
    connection.execute("DELETE FROM receipt WHERE store_id = ?1", [id])?;

    let rows_affected = connection.execute("DELETE FROM store WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingStore);
    }

    Ok(())
}

fn normalize_store_type(store_type: Option<&str>) -> Option<String> {
    store_type
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(str::to_owned)
}

fn map_row(row: &Row) -> Result<Store, rusqlite::Error> {
    Ok(Store {
        id: row.get(0)?,
        name: row.get(1)?,
        store_type: row.get(2)?,
    })
}
