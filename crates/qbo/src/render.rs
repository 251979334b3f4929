//! Текстовое представление разобранной выписки для вывода пользователю.

use std::fmt::{self, Write};

use crate::{
    normalize::{format_display_amount, format_tabular_date},
    statement::{ParsedTransaction, StatementDocument, UNKNOWN},
};

/// Разделитель между транзакциями.
pub const RULE: &str = "--------------------------------------------------";

/// Сообщение для выписки без транзакций.
pub const NO_TRANSACTIONS: &str = "No transactions found in the statement.";

/// Рендерит документ: заголовок счёта и по блоку на транзакцию.
///
/// Теги из `extra` не выводятся.
#[must_use]
pub fn render_document(document: &StatementDocument) -> String {
    document.to_string()
}

impl fmt::Display for StatementDocument<ParsedTransaction> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bank Routing Number: {}", self.header.bank_id)?;
        writeln!(f, "Account Number: {}", self.header.account_id)?;
        writeln!(f, "Account Type: {}", self.header.account_type)?;
        writeln!(f)?;

        if self.transactions.is_empty() {
            return writeln!(f, "{NO_TRANSACTIONS}");
        }

        writeln!(f, "Transactions:")?;
        writeln!(f, "{RULE}")?;
        for tx in &self.transactions {
            write_transaction(f, tx)?;
            writeln!(f, "{RULE}")?;
        }
        Ok(())
    }
}

fn write_transaction<W: Write>(out: &mut W, tx: &ParsedTransaction) -> fmt::Result {
    let date = tx.posted.map_or_else(|| UNKNOWN.to_string(), format_tabular_date);
    writeln!(out, "Date: {date}")?;
    writeln!(out, "Type: {}", tx.kind.as_deref().unwrap_or(UNKNOWN))?;
    writeln!(out, "Amount: {}", format_display_amount(tx.amount))?;
    writeln!(out, "Description: {}", tx.name.as_deref().unwrap_or(UNKNOWN))?;
    writeln!(out, "Memo: {}", tx.memo.as_deref().unwrap_or_default())?;
    writeln!(out, "Transaction ID: {}", tx.fit_id.as_deref().unwrap_or(UNKNOWN))
}
