//! Receipt management: opening receipts, acknowledging completion, deletion.

mod complete_endpoint;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod record_page;

pub use complete_endpoint::complete_receipt_endpoint;
pub use self::core::{
    Receipt, ReceiptNumber, create_receipt, create_receipt_table, delete_receipt, get_receipt,
};
pub use create_endpoint::create_receipt_endpoint;
pub use delete_endpoint::delete_receipt_endpoint;
pub use record_page::get_record_expense_page;
