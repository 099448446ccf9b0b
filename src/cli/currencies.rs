//! Supported currency listing.

use crate::cli::ui;
use crate::core::currency::Currency;
use comfy_table::Cell;

pub fn display_currencies() {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);

    for currency in Currency::all() {
        table.add_row(vec![Cell::new(currency.code()), Cell::new(currency.name())]);
    }

    println!("{table}");
}
