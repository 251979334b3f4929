//! Основные типы выписки.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::normalize::{derive_polarity, derive_synthetic_id};

/// Тип счёта, который всегда пишет сериализатор.
pub const DEFAULT_ACCOUNT_TYPE: &str = "CHECKING";

/// Заглушка для полей, которых не оказалось в разобранной выписке.
pub const UNKNOWN: &str = "Unknown";

/// Направление движения средств.
///
/// Всегда выводится из знака суммы: отрицательная сумма — [`Debit`][Polarity::Debit],
/// ноль и положительная — [`Credit`][Polarity::Credit].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Polarity {
    /// Списание.
    #[serde(rename = "DEBIT")]
    Debit,
    /// Зачисление.
    #[serde(rename = "CREDIT")]
    Credit,
}

impl Polarity {
    /// Возвращает строковое представление, как в теге `<TRNTYPE>`.
    ///
    /// # Пример
    /// ```
    /// use qbo::statement::Polarity;
    /// assert_eq!(Polarity::Debit.as_str(), "DEBIT");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Заголовок счёта (`<BANKACCTFROM>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountHeader {
    /// Банковский routing-номер (`<BANKID>`).
    pub bank_id: String,
    /// Номер счёта (`<ACCTID>`).
    pub account_id: String,
    /// Тип счёта (`<ACCTTYPE>`), свободный текст.
    pub account_type: String,
}

impl AccountHeader {
    /// Заголовок с фиксированным типом счёта `CHECKING`.
    pub fn checking(bank_id: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            bank_id: bank_id.into(),
            account_id: account_id.into(),
            account_type: DEFAULT_ACCOUNT_TYPE.to_string(),
        }
    }
}

impl Default for AccountHeader {
    /// Заголовок выписки, в которой не нашлось ни одного поля счёта.
    fn default() -> Self {
        Self {
            bank_id: UNKNOWN.to_string(),
            account_id: UNKNOWN.to_string(),
            account_type: UNKNOWN.to_string(),
        }
    }
}

/// Транзакция, готовая к сериализации.
///
/// Тип операции и идентификатор не хранятся: они вычисляются
/// из суммы, даты и описания при каждом обращении.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementTransaction {
    /// Дата проводки.
    pub posted: NaiveDate,
    /// Описание (`<NAME>`).
    pub description: String,
    /// Сумма со знаком.
    pub amount: Decimal,
    /// Комментарий (`<MEMO>`), может отсутствовать.
    pub memo: Option<String>,
}

impl StatementTransaction {
    /// Направление движения средств по знаку суммы.
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        derive_polarity(self.amount)
    }

    /// Синтетический идентификатор (`<FITID>`).
    ///
    /// Детерминирован по паре (дата, описание), но не уникален: две операции
    /// с одинаковой датой и описанием получат один и тот же идентификатор.
    #[must_use]
    pub fn synthetic_id(&self) -> String {
        derive_synthetic_id(self.posted, &self.description)
    }
}

/// Транзакция, восстановленная из текста выписки.
///
/// Все поля опциональны: выписку мог сформировать сторонний инструмент.
/// Теги, которые не отображаются в именованные поля, сохраняются в `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTransaction {
    /// Дата проводки; `None`, если `<DTPOSTED>` нет или он не в формате `YYYYMMDD`.
    pub posted: Option<NaiveDate>,
    /// Сырой текст `<TRNTYPE>`.
    pub kind: Option<String>,
    /// Сумма; ноль, если `<TRNAMT>` нет или он не число.
    pub amount: Decimal,
    /// `<FITID>`.
    pub fit_id: Option<String>,
    /// `<NAME>`.
    pub name: Option<String>,
    /// `<MEMO>`.
    pub memo: Option<String>,
    /// Все остальные теги блока `<STMTTRN>` в исходном виде.
    pub extra: BTreeMap<String, String>,
}

/// Документ выписки: заголовок счёта и транзакции в порядке документа.
///
/// Параметр `T` — форма транзакции: [`StatementTransaction`] для
/// сериализатора, [`ParsedTransaction`] (по умолчанию) для результата разбора.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementDocument<T = ParsedTransaction> {
    /// Заголовок счёта.
    pub header: AccountHeader,
    /// Транзакции.
    pub transactions: Vec<T>,
}

impl<T> StatementDocument<T> {
    /// Создаёт документ из заголовка и транзакций.
    pub fn new(header: AccountHeader, transactions: Vec<T>) -> Self {
        Self { header, transactions }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn make_transaction(amount: &str) -> StatementTransaction {
        StatementTransaction {
            posted: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: "Coffee Shop".to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            memo: None,
        }
    }

    #[test]
    fn polarity_follows_amount_sign() {
        assert_eq!(make_transaction("-4.50").polarity(), Polarity::Debit);
        assert_eq!(make_transaction("0").polarity(), Polarity::Credit);
        assert_eq!(make_transaction("12.00").polarity(), Polarity::Credit);
    }

    #[test]
    fn synthetic_id_starts_with_statement_date() {
        let id = make_transaction("1").synthetic_id();
        assert!(id.starts_with("20240115"));
        assert!(id.len() > 8);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn synthetic_id_ignores_amount() {
        assert_eq!(make_transaction("1").synthetic_id(), make_transaction("-99").synthetic_id());
    }

    #[test]
    fn checking_header() {
        let header = AccountHeader::checking("111", "222");
        assert_eq!(header.account_type, DEFAULT_ACCOUNT_TYPE);
        assert_eq!(header.bank_id, "111");
    }

    #[test]
    fn default_header_is_unknown() {
        let header = AccountHeader::default();
        assert_eq!(header.bank_id, UNKNOWN);
        assert_eq!(header.account_id, UNKNOWN);
        assert_eq!(header.account_type, UNKNOWN);
    }
}
