//! # e2e-tests - End-to-end тесты CLI `qbo-converter`
//!
//! Подкоманды:
//! - `convert` — CSV → QBO
//! - `view` — разбор и вывод QBO
//!
//! ## Фикстуры
//!
//! Тестовые файлы расположены в `fixtures/`:
//! - `transactions.csv` — корректный CSV из четырёх строк
//! - `missing_amount.csv` — CSV без колонки `Amount`
//! - `invalid_date.csv` — вторая строка с несуществующей датой
//! - `foreign.qbo` — выписка «чужого» банка: лишние теги, нет `<ACCTTYPE>`
//! - `empty.qbo` — выписка без транзакций

use std::path::PathBuf;

use anyhow::Context;

/// Получить путь к директории фикстур.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Получить путь к фикстуре по имени файла.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Прочитать фикстуру как текст.
pub fn fixture_text(name: &str) -> anyhow::Result<String> {
    let path = fixture(name);
    std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture {}", path.display()))
}
