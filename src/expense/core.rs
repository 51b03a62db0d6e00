//! The expense line-item model and its database queries.

use rusqlite::{Connection, Row};
use time::Date;

use crate::Error;

/// One purchased product entry, optionally attached to a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID of the line-item.
    pub id: i64,
    /// The ID of the purchased product.
    pub product_id: i64,
    /// The ID of the store the purchase was made at.
    ///
    /// For receipt-grouped lines this is a copy of the receipt's store taken
    /// at insert time, not re-derived afterwards.
    pub store_id: i64,
    /// The price per unit.
    pub price: f64,
    /// How many units (or kilograms) were bought.
    pub quantity: f64,
    /// The unit tag, "buc" for counted items or "kg" for weighed ones. Free
    /// text, not enforced against a fixed set.
    pub quantity_type: String,
    /// An absolute discount amount subtracted from the line total.
    pub discount: f64,
    /// The purchase date.
    pub date: Date,
    /// The receipt this line belongs to, if any.
    pub receipt_nr: Option<String>,
}

impl Expense {
    /// The line total, net of the discount.
    pub fn total(&self) -> f64 {
        line_total(self.price, self.quantity, self.discount)
    }
}

/// The values for a line-item that has not been inserted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The ID of the purchased product.
    pub product_id: i64,
    /// The ID of the store the purchase was made at.
    pub store_id: i64,
    /// The price per unit.
    pub price: f64,
    /// How many units (or kilograms) were bought.
    pub quantity: f64,
    /// The unit tag, "buc" or "kg".
    pub quantity_type: String,
    /// An absolute discount amount.
    pub discount: f64,
    /// The purchase date.
    pub date: Date,
    /// The receipt this line belongs to, if any.
    pub receipt_nr: Option<String>,
}

/// The per-line total: price times quantity, minus the absolute discount.
///
/// Note that the report aggregations intentionally use the gross value
/// (price times quantity) instead; see the report queries.
pub fn line_total(price: f64, quantity: f64, discount: f64) -> f64 {
    price * quantity - discount
}

/// Round a money amount to two decimal places for API responses.
pub(crate) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Initialize the expense table.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            product_id INTEGER NOT NULL,
            store_id INTEGER NOT NULL,
            price REAL NOT NULL,
            quantity REAL NOT NULL,
            quantity_type TEXT NOT NULL DEFAULT 'buc',
            discount REAL NOT NULL DEFAULT 0,
            date TEXT NOT NULL,
            receipt_nr TEXT,
            FOREIGN KEY(product_id) REFERENCES product(id),
            FOREIGN KEY(store_id) REFERENCES store(id)
        )",
        (),
    )?;

    Ok(())
}

/// Insert a line-item and return it with its generated ID.
pub fn insert_expense(new: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expense (product_id, store_id, price, quantity, quantity_type, discount, date, receipt_nr)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        (
            new.product_id,
            new.store_id,
            new.price,
            new.quantity,
            &new.quantity_type,
            new.discount,
            new.date,
            &new.receipt_nr,
        ),
    )?;

    Ok(Expense {
        id: connection.last_insert_rowid(),
        product_id: new.product_id,
        store_id: new.store_id,
        price: new.price,
        quantity: new.quantity,
        quantity_type: new.quantity_type,
        discount: new.discount,
        date: new.date,
        receipt_nr: new.receipt_nr,
    })
}

/// Retrieve a single line-item by ID.
pub fn get_expense(id: i64, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(
            "SELECT id, product_id, store_id, price, quantity, quantity_type, discount, date, receipt_nr
             FROM expense WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// A partial update for a line-item. `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpenseUpdate {
    /// The new price per unit, if supplied.
    pub price: Option<f64>,
    /// The new quantity, if supplied.
    pub quantity: Option<f64>,
    /// The new discount, if supplied.
    pub discount: Option<f64>,
}

/// Apply the supplied fields of `update` to a line-item and return the
/// updated row.
///
/// # Errors
/// Returns [Error::UpdateMissingExpense] if `id` does not refer to a
/// line-item.
pub fn update_expense(
    id: i64,
    update: ExpenseUpdate,
    connection: &Connection,
) -> Result<Expense, Error> {
    let existing = get_expense(id, connection).map_err(|error| match error {
        Error::NotFound => Error::UpdateMissingExpense,
        error => error,
    })?;

    let updated = Expense {
        price: update.price.unwrap_or(existing.price),
        quantity: update.quantity.unwrap_or(existing.quantity),
        discount: update.discount.unwrap_or(existing.discount),
        ..existing
    };

    connection.execute(
        "UPDATE expense SET price = ?1, quantity = ?2, discount = ?3 WHERE id = ?4",
        (updated.price, updated.quantity, updated.discount, id),
    )?;

    Ok(updated)
}

/// Delete a line-item and return its prior values so the caller can offer an
/// undo.
///
/// Nothing guarantees a re-insert will reuse the same ID.
///
/// # Errors
/// Returns [Error::DeleteMissingExpense] if `id` does not refer to a
/// line-item.
pub fn delete_expense(id: i64, connection: &Connection) -> Result<Expense, Error> {
    let existing = get_expense(id, connection).map_err(|error| match error {
        Error::NotFound => Error::DeleteMissingExpense,
        error => error,
    })?;

    connection.execute("DELETE FROM expense WHERE id = ?1", [id])?;

    Ok(existing)
}

/// A line-item joined with its product name, shaped for the listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseLine {
    /// The ID of the line-item.
    pub id: i64,
    /// The name of the purchased product.
    pub product_name: String,
    /// The price per unit.
    pub price: f64,
    /// How many units were bought.
    pub quantity: f64,
    /// The unit tag, "buc" or "kg".
    pub quantity_type: String,
    /// An absolute discount amount.
    pub discount: f64,
    /// The purchase date.
    pub date: Date,
}

impl ExpenseLine {
    /// The line total, net of the discount.
    pub fn total(&self) -> f64 {
        line_total(self.price, self.quantity, self.discount)
    }
}

/// A receipt with its ordered line-items, shaped for the listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptGroup {
    /// The receipt number.
    pub nr_bon: String,
    /// The name of the store the receipt belongs to.
    pub store_name: String,
    /// The receipt date.
    pub date: Date,
    /// The receipt's line-items in insertion order.
    pub lines: Vec<ExpenseLine>,
}

/// An ungrouped line-item (one without a receipt), with its store name.
#[derive(Debug, Clone, PartialEq)]
pub struct UngroupedExpense {
    /// The line-item and its product name.
    pub line: ExpenseLine,
    /// The name of the store the purchase was made at.
    pub store_name: String,
}

/// Retrieve all receipts with their line-items, newest receipt first.
///
/// Receipts without line-items are included with an empty line list.
pub fn get_receipt_groups(connection: &Connection) -> Result<Vec<ReceiptGroup>, Error> {
    let mut statement = connection.prepare(
        "SELECT receipt.nr_bon, store.name, receipt.date,
                expense.id, product.name, expense.price, expense.quantity,
                expense.quantity_type, expense.discount, expense.date
         FROM receipt
         JOIN store ON receipt.store_id = store.id
         LEFT JOIN expense ON expense.receipt_nr = receipt.nr_bon
         LEFT JOIN product ON expense.product_id = product.id
         ORDER BY receipt.date DESC, receipt.nr_bon ASC, expense.id ASC",
    )?;

    let mut rows = statement.query([])?;
    let mut groups: Vec<ReceiptGroup> = Vec::new();

    while let Some(row) = rows.next()? {
        let nr_bon: String = row.get(0)?;

        if groups.last().map(|group| group.nr_bon.as_str()) != Some(nr_bon.as_str()) {
            groups.push(ReceiptGroup {
                nr_bon: nr_bon.clone(),
                store_name: row.get(1)?,
                date: row.get(2)?,
                lines: Vec::new(),
            });
        }

        let line_id: Option<i64> = row.get(3)?;

        if let Some(id) = line_id {
            let group = groups.last_mut().expect("group was just pushed");
            group.lines.push(ExpenseLine {
                id,
                product_name: row.get(4)?,
                price: row.get(5)?,
                quantity: row.get(6)?,
                quantity_type: row.get(7)?,
                discount: row.get(8)?,
                date: row.get(9)?,
            });
        }
    }

    Ok(groups)
}

/// Retrieve all line-items that are not attached to a receipt, newest first.
pub fn get_ungrouped_expenses(connection: &Connection) -> Result<Vec<UngroupedExpense>, Error> {
    connection
        .prepare(
            "SELECT expense.id, product.name, store.name, expense.price, expense.quantity,
                    expense.quantity_type, expense.discount, expense.date
             FROM expense
             JOIN product ON expense.product_id = product.id
             JOIN store ON expense.store_id = store.id
             WHERE expense.receipt_nr IS NULL
             ORDER BY expense.date DESC, expense.id ASC",
        )?
        .query_map([], |row| {
            Ok(UngroupedExpense {
                line: ExpenseLine {
                    id: row.get(0)?,
                    product_name: row.get(1)?,
                    price: row.get(3)?,
                    quantity: row.get(4)?,
                    quantity_type: row.get(5)?,
                    discount: row.get(6)?,
                    date: row.get(7)?,
                },
                store_name: row.get(2)?,
            })
        })?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        product_id: row.get(1)?,
        store_id: row.get(2)?,
        price: row.get(3)?,
        quantity: row.get(4)?,
        quantity_type: row.get(5)?,
        discount: row.get(6)?,
        date: row.get(7)?,
        receipt_nr: row.get(8)?,
    })
}
