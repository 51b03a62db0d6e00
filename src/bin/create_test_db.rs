use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{OffsetDateTime, macros::date};

use cheltuieli::{
    expense::{NewExpense, insert_expense},
    initialize_db,
    product::find_or_create_product,
    receipt::create_receipt,
    store::find_or_create_store,
};

/// A utility for creating a seeded database for manual testing.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database with a few stores, products, a receipt and
/// its line-items.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'cheltuieli.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'cheltuieli.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;

    println!("Creating test data...");

    let kaufland = find_or_create_store("Kaufland", Some("supermarket"), &connection)?;
    let lidl = find_or_create_store("Lidl", Some("supermarket"), &connection)?;
    find_or_create_store("Catena", Some("farmacie"), &connection)?;

    let alimente = category_id("Alimente", &connection)?;
    let curatenie = category_id("Casa si curatenie", &connection)?;

    let lapte = find_or_create_product("Lapte", Some(alimente), &connection)?;
    let paine = find_or_create_product("Paine", Some(alimente), &connection)?;
    let detergent = find_or_create_product("Detergent", Some(curatenie), &connection)?;

    let timestamp = OffsetDateTime::now_utc().unix_timestamp();
    let receipt_date = date!(2025 - 01 - 05);
    let nr_bon = create_receipt(kaufland.id, "0001", receipt_date, timestamp, &connection)?;

    for (product_id, price, quantity, quantity_type, discount) in [
        (lapte.id, 7.5, 2.0, "buc", 0.0),
        (paine.id, 4.2, 1.0, "buc", 0.5),
        (detergent.id, 32.0, 1.0, "buc", 5.0),
    ] {
        insert_expense(
            NewExpense {
                product_id,
                store_id: kaufland.id,
                price,
                quantity,
                quantity_type: quantity_type.to_owned(),
                discount,
                date: receipt_date,
                receipt_nr: Some(nr_bon.as_str().to_owned()),
            },
            &connection,
        )?;
    }

    // One ungrouped line-item, sold by weight.
    insert_expense(
        NewExpense {
            product_id: paine.id,
            store_id: lidl.id,
            price: 12.9,
            quantity: 0.45,
            quantity_type: "kg".to_owned(),
            discount: 0.0,
            date: date!(2025 - 01 - 10),
            receipt_nr: None,
        },
        &connection,
    )?;

    println!("Success!");

    Ok(())
}

fn category_id(name: &str, connection: &Connection) -> Result<i64, rusqlite::Error> {
    connection.query_row("SELECT id FROM category WHERE name = ?1", (name,), |row| {
        row.get(0)
    })
}
