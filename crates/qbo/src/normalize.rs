//! Нормализация полей между табличным форматом и форматом выписки.
//!
//! Все функции чистые: дата `MM/DD/YYYY` ↔ `YYYYMMDD`, текст суммы ↔ [`Decimal`],
//! а также производные поля — направление операции и синтетический идентификатор.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::{
    statement::{Polarity, StatementTransaction},
    tabular::{AMOUNT_COLUMN, DATE_COLUMN, DESCRIPTION_COLUMN, MEMO_COLUMN, TabularRow},
};

/// Ошибки отдельной колонки строки таблицы.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Missing required column '{0}'")]
    MissingField(String),
    #[error("Invalid date '{0}': expected MM/DD/YYYY")]
    DateFormat(String),
    #[error("Invalid amount '{0}': expected a decimal number")]
    AmountFormat(String),
}

/// Разбирает дату табличного формата.
///
/// Принимается строго `MM/DD/YYYY`: ведущие нули обязательны,
/// дата должна существовать в календаре.
///
/// # Пример
///
/// ```
/// use qbo::normalize::{FieldError, parse_tabular_date};
///
/// let date = parse_tabular_date("01/15/2024").unwrap();
/// assert_eq!(date.to_string(), "2024-01-15");
/// assert!(matches!(parse_tabular_date("02/30/2024"), Err(FieldError::DateFormat(_))));
/// ```
pub fn parse_tabular_date(text: &str) -> Result<NaiveDate, FieldError> {
    let invalid = || FieldError::DateFormat(text.to_string());

    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes.iter().enumerate().all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    let month: u32 = text[0..2].parse().map_err(|_| invalid())?;
    let day: u32 = text[3..5].parse().map_err(|_| invalid())?;
    let year: i32 = text[6..10].parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Форматирует дату для `<DTPOSTED>`: `YYYYMMDD`.
#[must_use]
pub fn format_statement_date(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// Разбирает `<DTPOSTED>` (ровно 8 цифр). Любой другой текст — `None`.
#[must_use]
pub fn parse_statement_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = text[0..4].parse().ok()?;
    let month: u32 = text[4..6].parse().ok()?;
    let day: u32 = text[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Форматирует дату для отображения: `MM/DD/YYYY`.
#[must_use]
pub fn format_tabular_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.month(), date.day(), date.year())
}

/// Разбирает сумму, предварительно убрав разделители разрядов (запятые).
///
/// Допускаются пробелы по краям и научная запись (`1e3`).
pub fn parse_amount(text: &str) -> Result<Decimal, FieldError> {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(FieldError::AmountFormat(text.to_string()));
    }

    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .map_err(|_| FieldError::AmountFormat(text.to_string()))
}

/// Форматирует сумму для `<TRNAMT>`.
///
/// Кратчайшая десятичная запись, но минимум один знак после точки:
/// `-4.50` → `-4.5`, `100` → `100.0`.
#[must_use]
pub fn format_statement_amount(amount: Decimal) -> String {
    let normalized = amount.normalize();
    if normalized.scale() == 0 { format!("{normalized}.0") } else { normalized.to_string() }
}

/// Форматирует сумму для отображения: `-$1,234.50`.
///
/// Округление до центов банковское (половина — к чётному).
#[must_use]
pub fn format_display_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Направление операции: отрицательная сумма — списание, иначе зачисление.
#[must_use]
pub fn derive_polarity(amount: Decimal) -> Polarity {
    if amount < Decimal::ZERO { Polarity::Debit } else { Polarity::Credit }
}

/// Синтетический идентификатор `<FITID>`.
///
/// Дата выписки, за которой следует модуль 64-битного хеша описания
/// (первые 8 байт SHA-256). Уникальность не гарантируется.
#[must_use]
pub fn derive_synthetic_id(date: NaiveDate, description: &str) -> String {
    let digest = Sha256::digest(description.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let hash = i64::from_be_bytes(prefix).unsigned_abs();
    format!("{}{hash}", format_statement_date(date))
}

/// Превращает строку таблицы в типизированную транзакцию.
///
/// Проверки идут в порядке `Date`, `Description`, `Amount`; возвращается первая ошибка.
/// Отсутствующий `Memo` — это `None`.
pub fn normalize_row(row: &TabularRow) -> Result<StatementTransaction, FieldError> {
    let posted = parse_tabular_date(require(row, DATE_COLUMN)?)?;
    let description = require(row, DESCRIPTION_COLUMN)?.to_string();
    let amount = parse_amount(require(row, AMOUNT_COLUMN)?)?;
    let memo = row.get(MEMO_COLUMN).map(str::to_string);

    Ok(StatementTransaction { posted, description, amount, memo })
}

fn require<'a>(row: &'a TabularRow, column: &str) -> Result<&'a str, FieldError> {
    row.get(column).ok_or_else(|| FieldError::MissingField(column.to_string()))
}
