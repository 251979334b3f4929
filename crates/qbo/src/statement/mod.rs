//! Модель данных выписки.
//!
//! Этот модуль определяет заголовок счёта, две формы транзакции
//! (типизированную для сериализации и «сырую» после разбора) и сам документ.

mod types;

pub use types::{
    AccountHeader, DEFAULT_ACCOUNT_TYPE, ParsedTransaction, Polarity, StatementDocument,
    StatementTransaction, UNKNOWN,
};
