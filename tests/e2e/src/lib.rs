//! # e2e-tests - End-to-end тесты CLI инструментов
//!
//! Этот крейт содержит e2e тесты для CLI инструмента `psv-dump`,
//! который декодирует PSV-файл и печатает записи в виде JSON.
//!
//! ## Фикстуры
//!
//! Тестовые файлы расположены в `fixtures/`:
//! - `accounts.psv` — корректный файл со счетами
//! - `wide_row.psv` — файл, в котором одна строка шире заголовка
//! - `semicolon.txt` — файл с разделителем `;`

use std::path::PathBuf;

/// Получить путь к директории фикстур.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Получить путь к фикстуре по имени файла.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}
