//! CSV serialization for the report views.

use crate::{
    Error,
    report::core::{MonthlyTotal, ProductTotal, StoreTotal},
};

/// Render the monthly report as CSV with a `month,total` header.
pub(crate) fn monthly_csv(rows: &[MonthlyTotal]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer
        .write_record(["month", "total"])
        .map_err(csv_error)?;

    for row in rows {
        writer
            .write_record([row.month.as_str(), &format_total(row.total)])
            .map_err(csv_error)?;
    }

    into_string(writer)
}

/// Render the per-product report as CSV with a `product,total` header.
pub(crate) fn products_csv(rows: &[ProductTotal]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer
        .write_record(["product", "total"])
        .map_err(csv_error)?;

    for row in rows {
        writer
            .write_record([row.product.as_str(), &format_total(row.total)])
            .map_err(csv_error)?;
    }

    into_string(writer)
}

/// Render the per-store report as CSV with a `store,items,total` header.
pub(crate) fn stores_csv(rows: &[StoreTotal]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer
        .write_record(["store", "items", "total"])
        .map_err(csv_error)?;

    for row in rows {
        writer
            .write_record([
                row.store.as_str(),
                &row.items.to_string(),
                &format_total(row.total),
            ])
            .map_err(csv_error)?;
    }

    into_string(writer)
}

fn format_total(total: f64) -> String {
    format!("{total:.2}")
}

fn csv_error(error: csv::Error) -> Error {
    Error::CsvExport(error.to_string())
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String, Error> {
    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvExport(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvExport(error.to_string()))
}

#[cfg(test)]
mod csv_export_tests {
    use crate::report::core::{MonthlyTotal, ProductTotal, StoreTotal};

    use super::{monthly_csv, products_csv, stores_csv};

    #[test]
    fn monthly_csv_has_fixed_header_and_two_decimals() {
        let rows = vec![
            MonthlyTotal {
                month: "2025-02".to_owned(),
                total: 4.0,
            },
            MonthlyTotal {
                month: "2025-01".to_owned(),
                total: 30.5,
            },
        ];

        let csv = monthly_csv(&rows).expect("Could not write CSV");

        assert_eq!(csv, "month,total\n2025-02,4.00\n2025-01,30.50\n");
    }

    #[test]
    fn products_csv_quotes_names_with_commas() {
        let rows = vec![ProductTotal {
            product: "Lapte, de capra".to_owned(),
            total: 10.0,
        }];

        let csv = products_csv(&rows).expect("Could not write CSV");

        assert_eq!(csv, "product,total\n\"Lapte, de capra\",10.00\n");
    }

    #[test]
    fn stores_csv_includes_item_count() {
        let rows = vec![StoreTotal {
            store: "KAUFLAND".to_owned(),
            items: 3,
            total: 42.0,
        }];

        let csv = stores_csv(&rows).expect("Could not write CSV");

        assert_eq!(csv, "store,items,total\nKAUFLAND,3,42.00\n");
    }

    #[test]
    fn empty_report_is_just_the_header() {
        assert_eq!(monthly_csv(&[]).unwrap(), "month,total\n");
    }
}
