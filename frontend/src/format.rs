use chrono::NaiveDate;

use crate::api::models::Transaction;

pub const CURRENCY: &str = "USD";

fn format_with_commas(value: u64) -> String {
    let digits = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// Two decimals with thousands separators, e.g. `-1,234.50`.
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{}.{:02}", format_with_commas(cents / 100), cents % 100)
}

pub fn format_money(amount: f64) -> String {
    format!("{} {CURRENCY}", format_amount(amount))
}

/// Amount as listed in the transactions table, e.g. `- 25.50 USD`.
pub fn signed_money(transaction: &Transaction) -> String {
    format!("{} {}", transaction.kind.sign(), format_money(transaction.amount.abs()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Value for `<input type="date">`.
pub fn input_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{category, transaction};
    use crate::api::models::TransactionKind;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(25.5), "25.50");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-1000.0), "-1,000.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn signs_by_transaction_kind() {
        let mut tx = transaction(1, 25.5, category(1, "Food"));
        assert_eq!(signed_money(&tx), "- 25.50 USD");
        tx.kind = TransactionKind::Income;
        assert_eq!(signed_money(&tx), "+ 25.50 USD");
    }

    #[test]
    fn date_input_round_trip_rejects_garbage() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(input_date(date), "2024-03-05");
        assert_eq!(parse_input_date(" 2024-03-05 "), Some(date));
        assert_eq!(parse_input_date("05/03/2024"), None);
        assert_eq!(format_date(date), "05.03.2024");
    }
}
