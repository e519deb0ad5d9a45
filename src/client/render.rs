//! Plain text rendering of the dashboard for a terminal.

use std::{fmt::Write, sync::OnceLock};

use numfmt::{Formatter, Precision};

use crate::{CategoryTotal, client::ExpenseRecord};

/// Format `number` as dollars with two decimal places, e.g. `$1,234.50`.
pub fn format_currency(number: f64) -> String {
    static FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::currency("$")
            .ok()
            .map(|fmt| fmt.precision(Precision::Decimals(2)))
    });

    let sign = if number < 0.0 { "-" } else { "" };
    let magnitude = number.abs();

    let formatted_string = match fmt {
        Some(fmt) if magnitude > 0.0 => fmt.fmt_string(magnitude),
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        Some(_) => "$0".to_owned(),
        None => format!("${magnitude:.2}"),
    };

    format!("{sign}{}", pad_cents(formatted_string))
}

/// numfmt drops trailing zeros from the cents, e.g. "12.30" is rendered as
/// "12.3", so put them back.
fn pad_cents(mut formatted_string: String) -> String {
    let decimals = match formatted_string.rfind('.') {
        Some(index) => formatted_string.len() - index - 1,
        None => {
            formatted_string.push('.');
            0
        }
    };

    for _ in decimals..2 {
        formatted_string.push('0');
    }

    formatted_string
}

/// Render `expenses` as a table followed by `total`.
pub fn render_expense_table(expenses: &[ExpenseRecord], total: f64) -> String {
    let mut table = String::new();

    if expenses.is_empty() {
        table.push_str("No expenses found.\n");
    } else {
        let _ = writeln!(
            table,
            "{:<10}  {:<14}  {:>12}  Description",
            "Date", "Category", "Amount"
        );
        for expense in expenses {
            let _ = writeln!(
                table,
                "{:<10}  {:<14}  {:>12}  {}",
                expense.date,
                expense.category,
                format_currency(expense.amount),
                expense.description.as_deref().unwrap_or_default()
            );
        }
    }

    let _ = writeln!(table, "Total: {}", format_currency(total));

    table
}

/// Render the per category totals as a table.
pub fn render_category_table(totals: &[CategoryTotal]) -> String {
    if totals.is_empty() {
        return "No expenses found.\n".to_owned();
    }

    let mut table = String::new();
    let _ = writeln!(table, "{:<14}  {:>12}  {:>5}", "Category", "Total", "Count");

    for total in totals {
        let _ = writeln!(
            table,
            "{:<14}  {:>12}  {:>5}",
            total.category,
            format_currency(total.total),
            total.count
        );
    }

    table
}
