//! Database schema creation and the startup migration ladder.
//!
//! The schema is brought fully up to date once, when the server starts, so
//! request handlers never need to probe for columns at call time. The ladder
//! below mirrors the additive evolutions the expense table went through
//! (discount, quantity unit, store type) and upgrades any historical database
//! shape in place.

use rusqlite::Connection;

use crate::{
    Error,
    category::{create_category_table, seed_default_categories},
    expense::create_expense_table,
    product::create_product_table,
    receipt::create_receipt_table,
    store::create_store_table,
};

/// The schema version recorded in `PRAGMA user_version` once all migration
/// steps have been applied.
const SCHEMA_VERSION: i32 = 3;

/// Create the application tables and apply any pending schema migrations.
///
/// Safe to run against a fresh file, an in-memory connection, or a database
/// created by any earlier revision of the schema.
///
/// # Errors
/// Returns an error if a table cannot be created or a migration step fails.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_category_table(connection)?;
    create_product_table(connection)?;
    create_store_table(connection)?;
    create_receipt_table(connection)?;
    create_expense_table(connection)?;

    migrate(connection)?;

    seed_default_categories(connection)?;

    Ok(())
}

/// Apply the numbered migration steps that are newer than the database's
/// recorded schema version.
///
/// Each step checks for the column before altering, so databases created at
/// the current schema (where `CREATE TABLE` already includes the column) pass
/// straight through.
fn migrate(connection: &Connection) -> Result<(), Error> {
    let version: i32 =
        connection.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        add_column_if_missing(connection, "expense", "discount", "REAL NOT NULL DEFAULT 0")?;
    }

    if version < 2 {
        add_column_if_missing(
            connection,
            "expense",
            "quantity_type",
            "TEXT NOT NULL DEFAULT 'buc'",
        )?;
    }

    if version < 3 {
        add_column_if_missing(connection, "store", "store_type", "TEXT")?;
    }

    if version < SCHEMA_VERSION {
        connection.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }

    Ok(())
}

fn add_column_if_missing(
    connection: &Connection,
    table: &str,
    column: &str,
    definition: &str,
) -> Result<(), Error> {
    if has_column(connection, table, column)? {
        return Ok(());
    }

    connection.execute(
        &format!("ALTER TABLE {table} ADD COLUMN {column} {definition}"),
        (),
    )?;

    Ok(())
}

fn has_column(connection: &Connection, table: &str, column: &str) -> Result<bool, Error> {
    let mut statement = connection.prepare(&format!("PRAGMA table_info({table})"))?;
    let mut rows = statement.query([])?;

    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;

        if name == column {
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::{SCHEMA_VERSION, has_column, initialize};

    #[test]
    fn initialize_creates_all_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");

        for table in ["category", "product", "store", "receipt", "expense"] {
            let count: i64 = connection
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    (table,),
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "missing table {table}");
        }
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");
        initialize(&connection).expect("Could not initialize database twice");
    }

    #[test]
    fn initialize_records_schema_version() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        let version: i32 = connection
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn initialize_upgrades_a_legacy_expense_table() {
        let connection = Connection::open_in_memory().unwrap();

        // The expense table as it looked before the discount and quantity
        // unit columns were introduced.
        connection
            .execute_batch(
                "CREATE TABLE expense (
                    id INTEGER PRIMARY KEY,
                    product_id INTEGER NOT NULL,
                    store_id INTEGER NOT NULL,
                    price REAL NOT NULL,
                    quantity REAL NOT NULL,
                    date TEXT NOT NULL,
                    receipt_nr TEXT
                );
                CREATE TABLE store (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE);",
            )
            .unwrap();

        initialize(&connection).expect("Could not upgrade legacy database");

        assert!(has_column(&connection, "expense", "discount").unwrap());
        assert!(has_column(&connection, "expense", "quantity_type").unwrap());
        assert!(has_column(&connection, "store", "store_type").unwrap());
    }
}
