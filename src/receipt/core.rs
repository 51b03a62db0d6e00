//! The receipt model and its database queries.

use rusqlite::{Connection, Row};
use time::Date;

use crate::Error;

/// A grouping header for line-items bought together at one store on one date.
///
/// Keyed by `nr_bon`, the human-entered receipt number.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// The receipt number and primary key.
    pub nr_bon: String,
    /// The ID of the store the receipt belongs to.
    pub store_id: i64,
    /// The purchase date printed on the receipt.
    pub date: Date,
}

/// The stored receipt number resulting from [create_receipt].
///
/// Distinguishes how the number was arrived at so callers (and tests) can
/// tell an accepted submission from a generated or collision-resolved one.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptNumber {
    /// The submitted number was stored as-is.
    Accepted(String),
    /// A blank submission was replaced with a generated `AUTO-<timestamp>`
    /// number.
    Generated(String),
    /// The candidate number was already taken, so a timestamp suffix was
    /// appended.
    Suffixed(String),
}

impl ReceiptNumber {
    /// The stored receipt number, whichever way it was produced.
    pub fn as_str(&self) -> &str {
        match self {
            ReceiptNumber::Accepted(number)
            | ReceiptNumber::Generated(number)
            | ReceiptNumber::Suffixed(number) => number,
        }
    }

    /// Consume the value and return the stored receipt number.
    pub fn into_string(self) -> String {
        match self {
            ReceiptNumber::Accepted(number)
            | ReceiptNumber::Generated(number)
            | ReceiptNumber::Suffixed(number) => number,
        }
    }
}

/// Initialize the receipt table.
pub fn create_receipt_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS receipt (
            nr_bon TEXT PRIMARY KEY,
            store_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            FOREIGN KEY(store_id) REFERENCES store(id)
        )",
        (),
    )?;

    Ok(())
}

/// Open a receipt and return its stored number.
///
/// A blank or whitespace-only `nr_bon` gets the generated fallback
/// `AUTO-<timestamp>`. If the candidate number is already taken,
/// `-<timestamp>` is appended once and the insert retried. `timestamp` is
/// passed in (unix seconds) rather than read from the clock so tests can
/// inject fixed values.
///
/// # Errors
/// Returns [Error::InvalidStore] if `store_id` does not refer to a store.
pub fn create_receipt(
    store_id: i64,
    nr_bon: &str,
    date: Date,
    timestamp: i64,
    connection: &Connection,
) -> Result<ReceiptNumber, Error> {
    let store_exists: bool = connection
        .prepare("SELECT EXISTS (SELECT 1 FROM store WHERE id = ?1)")?
        .query_row([store_id], |row| row.get(0))?;

    if !store_exists {
        return Err(Error::InvalidStore);
    }

    let nr_bon = nr_bon.trim();

    let (candidate, generated) = if nr_bon.is_empty() {
        (format!("AUTO-{timestamp}"), true)
    } else {
        (nr_bon.to_owned(), false)
    };

    let inserted = connection.execute(
        "INSERT INTO receipt (nr_bon, store_id, date) VALUES (?1, ?2, ?3)",
        (&candidate, store_id, date),
    );

    match inserted {
        Ok(_) if generated => Ok(ReceiptNumber::Generated(candidate)),
        Ok(_) => Ok(ReceiptNumber::Accepted(candidate)),
        Err(error) if is_collision(&error) => {
            let suffixed = format!("{candidate}-{timestamp}");

            connection.execute(
                "INSERT INTO receipt (nr_bon, store_id, date) VALUES (?1, ?2, ?3)",
                (&suffixed, store_id, date),
            )?;

            Ok(ReceiptNumber::Suffixed(suffixed))
        }
        Err(error) => Err(error.into()),
    }
}

/// Retrieve a receipt by its number.
///
/// # Errors
/// Returns [Error::ReceiptNotFound] if no receipt has the number.
pub fn get_receipt(nr_bon: &str, connection: &Connection) -> Result<Receipt, Error> {
    connection
        .prepare("SELECT nr_bon, store_id, date FROM receipt WHERE nr_bon = ?1")?
        .query_row((nr_bon,), map_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::ReceiptNotFound,
            error => error.into(),
        })
}

/// Delete a receipt and every line-item attached to it.
///
/// The line-items are removed by an explicit pre-delete rather than a
/// declarative cascade.
///
/// # Errors
/// Returns [Error::DeleteMissingReceipt] if no receipt has the number.
pub fn delete_receipt(nr_bon: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute("DELETE FROM expense WHERE receipt_nr = ?1", (nr_bon,))?;

    let rows_affected = connection.execute("DELETE FROM receipt WHERE nr_bon = ?1", (nr_bon,))?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingReceipt);
    }

    Ok(())
}

fn is_collision(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn map_row(row: &Row) -> Result<Receipt, rusqlite::Error> {
    Ok(Receipt {
        nr_bon: row.get(0)?,
        store_id: row.get(1)?,
        date: row.get(2)?,
    })
}

#[cfg(test)]
mod receipt_query_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{Error, db::initialize, store::find_or_create_store};

    use super::{ReceiptNumber, create_receipt, delete_receipt, get_receipt};

    fn get_test_connection() -> (Connection, i64) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        let store_id = find_or_create_store("Kaufland", None, &connection)
            .expect("Could not create store")
            .id;
        (connection, store_id)
    }

    #[test]
    fn accepts_submitted_number() {
        let (connection, store_id) = get_test_connection();

        let number = create_receipt(store_id, "B-123", date!(2025 - 01 - 05), 1000, &connection)
            .expect("Could not create receipt");

        assert_eq!(number, ReceiptNumber::Accepted("B-123".to_owned()));
        assert_eq!(
            get_receipt("B-123", &connection).unwrap().store_id,
            store_id
        );
    }

    #[test]
    fn blank_number_gets_generated_fallback() {
        let (connection, store_id) = get_test_connection();

        let number = create_receipt(store_id, "   ", date!(2025 - 01 - 05), 1736000000, &connection)
            .expect("Could not create receipt");

        assert_eq!(
            number,
            ReceiptNumber::Generated("AUTO-1736000000".to_owned())
        );
    }

    #[test]
    fn colliding_number_gets_timestamp_suffix() {
        let (connection, store_id) = get_test_connection();
        create_receipt(store_id, "B-123", date!(2025 - 01 - 05), 1000, &connection).unwrap();

        let number = create_receipt(store_id, "B-123", date!(2025 - 01 - 06), 2000, &connection)
            .expect("Could not create second receipt");

        assert_eq!(number, ReceiptNumber::Suffixed("B-123-2000".to_owned()));
        assert!(get_receipt("B-123-2000", &connection).is_ok());
    }

    #[test]
    fn unknown_store_is_rejected() {
        let (connection, _) = get_test_connection();

        let result = create_receipt(999, "B-123", date!(2025 - 01 - 05), 1000, &connection);

        assert_eq!(result, Err(Error::InvalidStore));
    }

    #[test]
    fn get_receipt_with_unknown_number_reports_receipt_not_found() {
        let (connection, _) = get_test_connection();

        let result = get_receipt("nope", &connection);

        assert_eq!(result, Err(Error::ReceiptNotFound));
    }

    #[test]
    fn delete_removes_receipt_and_line_items() {
        let (connection, store_id) = get_test_connection();
        create_receipt(store_id, "B-123", date!(2025 - 01 - 05), 1000, &connection).unwrap();
        connection
            .execute("INSERT INTO product (name) VALUES ('Lapte')", ())
            .unwrap();
        connection
            .execute(
                "INSERT INTO expense (product_id, store_id, price, quantity, date, receipt_nr)
                 VALUES (1, ?1, 5.0, 1.0, '2025-01-05', 'B-123')",
                [store_id],
            )
            .unwrap();

        delete_receipt("B-123", &connection).expect("Could not delete receipt");

        let expenses: i64 = connection
            .query_row("SELECT COUNT(*) FROM expense", [], |row| row.get(0))
            .unwrap();
        assert_eq!(expenses, 0);
        assert_eq!(get_receipt("B-123", &connection), Err(Error::ReceiptNotFound));
    }

    #[test]
    fn delete_missing_receipt_is_an_error() {
        let (connection, _) = get_test_connection();

        let result = delete_receipt("nope", &connection);

        assert_eq!(result, Err(Error::DeleteMissingReceipt));
    }
}
