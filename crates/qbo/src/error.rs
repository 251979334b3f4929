//! Модуль ошибок конвертации выписок.

use thiserror::Error;

use crate::normalize::FieldError;

/// Главная ошибка крейта.
///
/// Разбор выписки ошибок не порождает (см. [`crate::reader`]), поэтому
/// здесь собраны только ошибки чтения CSV, сериализации и ввода/вывода.
#[derive(Debug, Error)]
pub enum StatementError {
    // === I/O ошибки ===
    /// Ошибка ввода/вывода.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Некорректный CSV (битый UTF-8, незакрытые кавычки и т.п.).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // === Ошибки строк таблицы ===
    /// Первая строка таблицы, которую не удалось нормализовать.
    ///
    /// Сериализация прерывается целиком, частичного документа нет.
    #[error("Row {row}: {error}")]
    InvalidRow {
        /// Номер строки данных (1-based, без заголовка).
        row: usize,
        /// Что именно не так с колонкой.
        error: FieldError,
    },

    // === Ошибки сериализатора тегов ===
    /// Значение не представимо в тегированном формате.
    #[error("Tag serialization error: {0}")]
    Tagged(#[from] crate::tagged::Error),
}

impl StatementError {
    /// Возвращает ошибку колонки, если это ошибка строки таблицы.
    #[must_use]
    pub fn field_error(&self) -> Option<&FieldError> {
        match self {
            Self::InvalidRow { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Удобный alias для Result со StatementError.
pub type StatementResult<T> = Result<T, StatementError>;
