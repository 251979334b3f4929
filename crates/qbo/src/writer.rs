//! Сериализатор выписки.
//!
//! Собирает фиксированный каркас документа (преамбула, заголовок счёта,
//! закрывающий блок) и по одному блоку `<STMTTRN>` на транзакцию.
//!
//! Работает по принципу «всё или ничего»: первая некорректная строка таблицы
//! прерывает сериализацию, частичного документа не бывает.

use std::io::{BufWriter, Write};

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    error::{StatementError, StatementResult},
    normalize::{format_statement_amount, format_statement_date, normalize_row},
    statement::{AccountHeader, Polarity, StatementDocument, StatementTransaction},
    tabular::TabularRow,
    tagged::TagSerializer,
};

/// Преамбула `KEY:VALUE` перед телом документа.
pub const PREAMBLE: [&str; 9] = [
    "OFXHEADER:100",
    "DATA:OFXSGML",
    "VERSION:102",
    "SECURITY:NONE",
    "ENCODING:USASCII",
    "CHARSET:1252",
    "COMPRESSION:NONE",
    "OLDFILEUID:NONE",
    "NEWFILEUID:NONE",
];

/// Идентификатор ответа `<TRNUID>`, одинаковый для всех документов.
pub const TRANSACTION_UID: u32 = 1001;

/// Валюта `<CURDEF>`.
pub const CURRENCY: &str = "USD";

// Каркас документа. Порядок полей задаёт порядок тегов.

#[derive(Serialize)]
struct Ofx<'a> {
    #[serde(rename = "BANKMSGSRSV1")]
    bank_messages: BankMessages<'a>,
}

#[derive(Serialize)]
struct BankMessages<'a> {
    #[serde(rename = "STMTTRNRS")]
    response: StatementResponse<'a>,
}

#[derive(Serialize)]
struct StatementResponse<'a> {
    #[serde(rename = "TRNUID")]
    uid: u32,
    #[serde(rename = "STMTRS")]
    statement: StatementBody<'a>,
}

#[derive(Serialize)]
struct StatementBody<'a> {
    #[serde(rename = "CURDEF")]
    currency: &'static str,
    #[serde(rename = "BANKACCTFROM")]
    account: BankAccount<'a>,
    #[serde(rename = "STMTTRN")]
    transactions: Vec<TransactionBlock<'a>>,
}

#[derive(Serialize)]
struct BankAccount<'a> {
    #[serde(rename = "BANKID")]
    bank_id: &'a str,
    #[serde(rename = "ACCTID")]
    account_id: &'a str,
    #[serde(rename = "ACCTTYPE")]
    account_type: &'a str,
}

/// Блок `<STMTTRN>` с уже вычисленными производными полями.
#[derive(Serialize)]
struct TransactionBlock<'a> {
    #[serde(rename = "TRNTYPE")]
    polarity: Polarity,
    #[serde(rename = "DTPOSTED")]
    posted: String,
    #[serde(rename = "TRNAMT")]
    amount: String,
    #[serde(rename = "FITID")]
    fit_id: String,
    #[serde(rename = "NAME")]
    name: &'a str,
    #[serde(rename = "MEMO")]
    memo: &'a str,
}

impl<'a> From<&'a StatementTransaction> for TransactionBlock<'a> {
    fn from(tx: &'a StatementTransaction) -> Self {
        Self {
            polarity: tx.polarity(),
            posted: format_statement_date(tx.posted),
            amount: format_statement_amount(tx.amount),
            fit_id: tx.synthetic_id(),
            name: &tx.description,
            memo: tx.memo.as_deref().unwrap_or_default(),
        }
    }
}

/// Сериализует строки таблицы в текст выписки.
///
/// Строки сначала нормализуются все целиком; первая ошибка возвращается как
/// [`StatementError::InvalidRow`] с номером строки (1-based) и текст не строится.
///
/// # Пример
///
/// ```
/// use qbo::{prelude::*, StatementError};
///
/// let rows = vec![
///     TabularRow::from_pairs([("Date", "01/15/2024"), ("Description", "Coffee"), ("Amount", "-4.50")]),
///     TabularRow::from_pairs([("Date", "01/16/2024"), ("Description", "Refund")]),
/// ];
///
/// let err = serialize(&rows, "123456789", "987654321").unwrap_err();
/// assert!(matches!(
///     err,
///     StatementError::InvalidRow { row: 2, error: FieldError::MissingField(ref c) } if c == "Amount"
/// ));
/// ```
pub fn serialize(rows: &[TabularRow], bank_id: &str, account_id: &str) -> StatementResult<String> {
    let transactions = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            normalize_row(row).map_err(|error| StatementError::InvalidRow { row: idx + 1, error })
        })
        .collect::<StatementResult<Vec<_>>>()?;

    let header = AccountHeader::checking(bank_id, account_id);
    let document = StatementDocument::new(header, transactions);
    let text = to_statement_text(&document)?;
    info!(transactions = document.transactions.len(), "serialized statement");
    Ok(text)
}

/// Строит текст выписки из готового документа.
///
/// Строки разделены `\n`, после `</OFX>` перевода строки нет.
pub fn to_statement_text(
    document: &StatementDocument<StatementTransaction>,
) -> StatementResult<String> {
    let transactions = document.transactions.iter().map(TransactionBlock::from).collect();
    let ofx = Ofx {
        bank_messages: BankMessages {
            response: StatementResponse {
                uid: TRANSACTION_UID,
                statement: StatementBody {
                    currency: CURRENCY,
                    account: BankAccount {
                        bank_id: &document.header.bank_id,
                        account_id: &document.header.account_id,
                        account_type: &document.header.account_type,
                    },
                    transactions,
                },
            },
        },
    };

    let mut serializer = TagSerializer::new();
    for line in PREAMBLE {
        serializer.push_raw(line);
    }
    ofx.serialize(serializer.element("OFX"))?;

    let lines = serializer.into_lines();
    debug!(lines = lines.len(), "composed statement document");
    Ok(lines.join("\n"))
}

/// Записывает документ в поток.
///
/// Текст строится полностью до первой записи, поэтому при ошибке
/// сериализации в поток ничего не попадает.
pub fn write_statement<W: Write>(
    writer: W,
    document: &StatementDocument<StatementTransaction>,
) -> StatementResult<()> {
    let text = to_statement_text(document)?;
    let mut writer = BufWriter::new(writer);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}
