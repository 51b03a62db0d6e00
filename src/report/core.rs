//! The report aggregation queries.
//!
//! All three reports sum the gross line value (price times quantity). The
//! per-line discount is deliberately left out of the sums, even though the
//! listing page subtracts it, so the reports match the numbers the app has
//! always shown. See [crate::expense::line_total] for the discounted total.

use rusqlite::Connection;

use crate::Error;

/// An optional inclusive date range filter.
///
/// The bounds are compared as strings against the ISO `YYYY-MM-DD` date
/// column, so any lexicographically sortable prefix works (e.g. "2025-01").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRange {
    /// The inclusive lower bound, if any.
    pub start: Option<String>,
    /// The inclusive upper bound, if any.
    pub end: Option<String>,
}

impl DateRange {
    /// Build a range from raw query parameters, treating blank values as
    /// absent bounds.
    pub fn from_raw(start: Option<&str>, end: Option<&str>) -> Self {
        let clean = |raw: Option<&str>| {
            raw.map(str::trim)
                .filter(|raw| !raw.is_empty())
                .map(str::to_owned)
        };

        Self {
            start: clean(start),
            end: clean(end),
        }
    }
}

/// The gross spend for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    /// The month as `YYYY-MM`, the first 7 characters of the date column.
    pub month: String,
    /// The sum of price times quantity over the month's line-items.
    pub total: f64,
}

/// The gross spend on one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductTotal {
    /// The product name.
    pub product: String,
    /// The sum of price times quantity over the product's line-items.
    pub total: f64,
}

/// The line-item count and gross spend at one store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreTotal {
    /// The store name.
    pub store: String,
    /// How many line-items were recorded at the store.
    pub items: i64,
    /// The sum of price times quantity over the store's line-items.
    pub total: f64,
}

/// Gross spend per month, newest month first.
pub fn monthly_totals(
    range: &DateRange,
    connection: &Connection,
) -> Result<Vec<MonthlyTotal>, Error> {
    connection
        .prepare(
            "SELECT substr(date, 1, 7) AS month, SUM(price * quantity)
             FROM expense
             WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2)
             GROUP BY month
             ORDER BY month DESC",
        )?
        .query_map((&range.start, &range.end), |row| {
            Ok(MonthlyTotal {
                month: row.get(0)?,
                total: row.get(1)?,
            })
        })?
        .map(|maybe_total| maybe_total.map_err(|error| error.into()))
        .collect()
}

/// Gross spend per product, descending by total.
pub fn product_totals(
    range: &DateRange,
    connection: &Connection,
) -> Result<Vec<ProductTotal>, Error> {
    connection
        .prepare(
            "SELECT product.name, SUM(expense.price * expense.quantity) AS total
             FROM expense
             JOIN product ON expense.product_id = product.id
             WHERE (?1 IS NULL OR expense.date >= ?1) AND (?2 IS NULL OR expense.date <= ?2)
             GROUP BY product.name
             ORDER BY total DESC",
        )?
        .query_map((&range.start, &range.end), |row| {
            Ok(ProductTotal {
                product: row.get(0)?,
                total: row.get(1)?,
            })
        })?
        .map(|maybe_total| maybe_total.map_err(|error| error.into()))
        .collect()
}

/// Line-item count and gross spend per store, descending by total.
pub fn store_totals(range: &DateRange, connection: &Connection) -> Result<Vec<StoreTotal>, Error> {
    connection
        .prepare(
            "SELECT store.name, COUNT(*), SUM(expense.price * expense.quantity) AS total
             FROM expense
             JOIN store ON expense.store_id = store.id
             WHERE (?1 IS NULL OR expense.date >= ?1) AND (?2 IS NULL OR expense.date <= ?2)
             GROUP BY store.name
             ORDER BY total DESC",
        )?
        .query_map((&range.start, &range.end), |row| {
            Ok(StoreTotal {
                store: row.get(0)?,
                items: row.get(1)?,
                total: row.get(2)?,
            })
        })?
        .map(|maybe_total| maybe_total.map_err(|error| error.into()))
        .collect()
}

#[cfg(test)]
mod report_query_tests {
    use rusqlite::Connection;
    use time::{Date, macros::date};

    use crate::{
        db::initialize,
        expense::{NewExpense, insert_expense},
        product::find_or_create_product,
        store::find_or_create_store,
    };

    use super::{DateRange, monthly_totals, product_totals, store_totals};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    fn insert_line(
        product: &str,
        store: &str,
        price: f64,
        quantity: f64,
        discount: f64,
        date: Date,
        connection: &Connection,
    ) {
        let product_id = find_or_create_product(product, None, connection).unwrap().id;
        let store_id = find_or_create_store(store, None, connection).unwrap().id;
        insert_expense(
            NewExpense {
                product_id,
                store_id,
                price,
                quantity,
                quantity_type: "buc".to_owned(),
                discount,
                date,
                receipt_nr: None,
            },
            connection,
        )
        .unwrap();
    }

    #[test]
    fn monthly_totals_ignore_discount_and_sort_newest_first() {
        let connection = get_test_connection();
        insert_line("Lapte", "Kaufland", 10.0, 3.0, 2.0, date!(2025 - 01 - 05), &connection);
        insert_line("Paine", "Kaufland", 4.0, 1.0, 0.0, date!(2025 - 02 - 10), &connection);

        let totals = monthly_totals(&DateRange::default(), &connection)
            .expect("Could not get monthly totals");

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].month, "2025-02");
        assert_eq!(totals[0].total, 4.0);
        assert_eq!(totals[1].month, "2025-01");
        // 10 * 3, not 10 * 3 - 2.
        assert_eq!(totals[1].total, 30.0);
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let connection = get_test_connection();
        insert_line("Lapte", "Kaufland", 1.0, 1.0, 0.0, date!(2025 - 01 - 04), &connection);
        insert_line("Lapte", "Kaufland", 2.0, 1.0, 0.0, date!(2025 - 01 - 05), &connection);
        insert_line("Lapte", "Kaufland", 4.0, 1.0, 0.0, date!(2025 - 01 - 06), &connection);
        insert_line("Lapte", "Kaufland", 8.0, 1.0, 0.0, date!(2025 - 01 - 07), &connection);

        let range = DateRange::from_raw(Some("2025-01-05"), Some("2025-01-06"));
        let totals = monthly_totals(&range, &connection).unwrap();

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total, 6.0);
    }

    #[test]
    fn open_ended_ranges_filter_one_side_only() {
        let connection = get_test_connection();
        insert_line("Lapte", "Kaufland", 1.0, 1.0, 0.0, date!(2025 - 01 - 04), &connection);
        insert_line("Lapte", "Kaufland", 2.0, 1.0, 0.0, date!(2025 - 01 - 05), &connection);

        let from = DateRange::from_raw(Some("2025-01-05"), None);
        assert_eq!(monthly_totals(&from, &connection).unwrap()[0].total, 2.0);

        let until = DateRange::from_raw(None, Some("2025-01-04"));
        assert_eq!(monthly_totals(&until, &connection).unwrap()[0].total, 1.0);
    }

    #[test]
    fn product_totals_sort_descending() {
        let connection = get_test_connection();
        insert_line("Lapte", "Kaufland", 5.0, 2.0, 1.0, date!(2025 - 01 - 05), &connection);
        insert_line("Paine", "Kaufland", 4.0, 10.0, 0.0, date!(2025 - 01 - 05), &connection);

        let totals = product_totals(&DateRange::default(), &connection)
            .expect("Could not get product totals");

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].product, "Paine");
        assert_eq!(totals[0].total, 40.0);
        assert_eq!(totals[1].product, "Lapte");
        assert_eq!(totals[1].total, 10.0);
    }

    #[test]
    fn store_totals_count_items_and_sort_descending() {
        let connection = get_test_connection();
        insert_line("Lapte", "Kaufland", 5.0, 1.0, 0.0, date!(2025 - 01 - 05), &connection);
        insert_line("Paine", "Kaufland", 4.0, 1.0, 0.0, date!(2025 - 01 - 05), &connection);
        insert_line("Apa", "Lidl", 20.0, 1.0, 0.0, date!(2025 - 01 - 05), &connection);

        let totals =
            store_totals(&DateRange::default(), &connection).expect("Could not get store totals");

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].store, "LIDL");
        assert_eq!(totals[0].items, 1);
        assert_eq!(totals[0].total, 20.0);
        assert_eq!(totals[1].store, "KAUFLAND");
        assert_eq!(totals[1].items, 2);
        assert_eq!(totals[1].total, 9.0);
    }

    #[test]
    fn blank_range_parameters_are_treated_as_absent() {
        assert_eq!(
            DateRange::from_raw(Some("  "), Some("")),
            DateRange::default()
        );
    }
}
