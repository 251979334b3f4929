//! Библиотека конвертации банковских выписок в формат QBO.
//!
//! Этот крейт переводит табличные транзакции (CSV) в тегированный формат
//! выписки (OFX/SGML-подобный, расширение `.qbo`) и разбирает такие выписки
//! обратно для отображения:
//!
//! - **Табличный формат** — CSV с колонками `Date`, `Description`, `Amount`, `Memo`
//! - **Формат выписки** — одна пара `<TAG>value` на строку, фиксированный каркас
//!
//! # Быстрый старт
//!
//! ```
//! use qbo::prelude::*;
//!
//! let rows = vec![TabularRow::from_pairs([
//!     ("Date", "01/15/2024"),
//!     ("Description", "Coffee Shop"),
//!     ("Amount", "-4.50"),
//! ])];
//!
//! let text = serialize(&rows, "123456789", "987654321").unwrap();
//! assert!(text.contains("<TRNTYPE>DEBIT"));
//!
//! let doc = parse(&text);
//! assert_eq!(doc.header.account_type, "CHECKING");
//! assert_eq!(doc.transactions.len(), 1);
//! ```

pub mod error;
pub mod normalize;
pub mod reader;
pub mod render;
pub mod statement;
pub mod tabular;
pub mod tagged;
pub mod writer;

pub use error::{StatementError, StatementResult};

/// Часто используемые типы и функции одним импортом.
pub mod prelude {
    pub use crate::{
        error::{StatementError, StatementResult},
        normalize::FieldError,
        reader::{StatementParser, parse, parse_reader},
        render::render_document,
        statement::{
            AccountHeader, ParsedTransaction, Polarity, StatementDocument, StatementTransaction,
        },
        tabular::{TabularRow, read_rows},
        writer::{serialize, to_statement_text, write_statement},
    };
}
