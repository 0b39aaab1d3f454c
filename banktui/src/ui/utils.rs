use bank_api::endpoints::transactions::{Transaction, TransactionType};
use chrono::{DateTime, Local, Utc};

/// Which side of a transaction the viewed account is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Credit,
    Debit,
}

/// Resolve a transaction's direction relative to the account whose history
/// is being viewed. Deposits credit, withdrawals debit. A transfer debits
/// the sending account and credits the receiving one.
pub fn transaction_direction(transaction: &Transaction, viewed_account_id: &str) -> Direction {
    match transaction.transaction_type {
        TransactionType::Deposit => Direction::Credit,
        TransactionType::Withdrawal => Direction::Debit,
        TransactionType::Transfer => {
            if transaction.account_id == viewed_account_id {
                Direction::Debit
            } else {
                Direction::Credit
            }
        }
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Format an amount with its currency symbol and thousands separators,
/// e.g. 1234.5 USD renders as "$1,234.50". Unknown currencies fall back
/// to the code as a prefix: "CHF 1,234.50".
pub fn fmt_currency(amount: f64, currency: &str) -> String {
    let is_negative = amount < 0.0;
    let number = group_thousands(amount.abs());

    let unsigned = match currency_symbol(currency) {
        Some(symbol) => format!("{symbol}{number}"),
        None => format!("{currency} {number}"),
    };

    if is_negative {
        format!("-{unsigned}")
    } else {
        unsigned
    }
}

/// Format a signed amount for a history row: credits get a leading '+',
/// debits a leading '-'.
pub fn fmt_signed_amount(amount: f64, currency: &str, direction: Direction) -> String {
    match direction {
        Direction::Credit => format!("+{}", fmt_currency(amount.abs(), currency)),
        Direction::Debit => format!("-{}", fmt_currency(amount.abs(), currency)),
    }
}

fn group_thousands(amount: f64) -> String {
    let raw = format!("{:.2}", amount);
    let (integer_part, decimal_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, c);
    }

    format!("{grouped}.{decimal_part}")
}

/// Break an account identifier into dash-separated groups of four for
/// readability: "1234567890123456" renders as "1234-5678-9012-3456".
/// Identifiers that already contain separators are left alone.
pub fn group_account_id(account_id: &str) -> String {
    if !account_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return account_id.to_string();
    }

    let chars: Vec<char> = account_id.chars().collect();
    let mut grouped = String::with_capacity(chars.len() + chars.len() / 4);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 4 == 0 {
            grouped.push('-');
        }
        grouped.push(*c);
    }
    grouped
}

/// Format a timestamp in the viewer's local timezone.
pub fn fmt_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Strip control characters from server-supplied text before it reaches
/// the terminal. Escape sequences embedded in a description could
/// otherwise move the cursor or restyle the screen.
pub fn sanitize_text(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn transfer(from: &str, to: &str) -> Transaction {
        Transaction {
            transaction_id: "TX-1".to_string(),
            account_id: from.to_string(),
            transaction_type: TransactionType::Transfer,
            amount: 25.0,
            currency: "USD".to_string(),
            description: None,
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
            related_account_id: Some(to.to_string()),
        }
    }

    #[test]
    fn currency_formats_with_symbol_and_separators() {
        assert_eq!(fmt_currency(1234.5, "USD"), "$1,234.50");
        assert_eq!(fmt_currency(0.0, "USD"), "$0.00");
        assert_eq!(fmt_currency(1000000.0, "EUR"), "€1,000,000.00");
        assert_eq!(fmt_currency(-42.0, "GBP"), "-£42.00");
    }

    #[test]
    fn unknown_currency_falls_back_to_code_prefix() {
        assert_eq!(fmt_currency(1234.5, "CHF"), "CHF 1,234.50");
    }

    #[test]
    fn signed_amount_carries_direction() {
        assert_eq!(fmt_signed_amount(50.0, "USD", Direction::Credit), "+$50.00");
        assert_eq!(fmt_signed_amount(50.0, "USD", Direction::Debit), "-$50.00");
    }

    #[test]
    fn account_id_groups_in_fours() {
        assert_eq!(group_account_id("1234567890123456"), "1234-5678-9012-3456");
        assert_eq!(group_account_id("ACC01"), "ACC0-1");
        assert_eq!(group_account_id("abc"), "abc");
    }

    #[test]
    fn pre_separated_ids_are_left_alone() {
        assert_eq!(group_account_id("ACC-001"), "ACC-001");
    }

    #[test]
    fn transfer_direction_follows_viewed_account() {
        let tx = transfer("A1", "B2");
        assert_eq!(transaction_direction(&tx, "A1"), Direction::Debit);
        assert_eq!(transaction_direction(&tx, "B2"), Direction::Credit);
    }

    #[test]
    fn deposits_credit_and_withdrawals_debit() {
        let mut tx = transfer("A1", "B2");
        tx.transaction_type = TransactionType::Deposit;
        tx.related_account_id = None;
        assert_eq!(transaction_direction(&tx, "A1"), Direction::Credit);

        tx.transaction_type = TransactionType::Withdrawal;
        assert_eq!(transaction_direction(&tx, "A1"), Direction::Debit);
    }

    #[test]
    fn sanitize_strips_control_characters() {
        assert_eq!(sanitize_text("lunch\x1b[31m money\x07"), "lunch[31m money");
        assert_eq!(sanitize_text("plain text"), "plain text");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize_text("a\x1bb\nc");
        assert_eq!(sanitize_text(&once), once);
    }
}
