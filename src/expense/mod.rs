//! Expense line-items: recording, listing, editing and deletion.

mod add_expense_endpoint;
mod add_line_item_endpoint;
mod core;
mod delete_endpoint;
mod form;
mod listing_page;
mod update_endpoint;

pub use add_expense_endpoint::add_expense_endpoint;
pub use add_line_item_endpoint::add_line_item_endpoint;
pub use self::core::{
    Expense, ExpenseLine, ExpenseUpdate, NewExpense, ReceiptGroup, UngroupedExpense,
    create_expense_table, delete_expense, get_expense, get_receipt_groups,
    get_ungrouped_expenses, insert_expense, line_total, update_expense,
};
pub use delete_endpoint::delete_expense_endpoint;
pub use listing_page::get_expenses_page;
pub use update_endpoint::update_expense_endpoint;
