//! Модуль ошибок чтения PSV-файлов.
//!
//! Ошибками считаются только структурные проблемы потока: невозможность
//! открыть или прочитать источник и строки, которые шире заголовка.
//! Проблемы качества данных в отдельных полях обрабатываются маппером и
//! сюда не попадают.

use std::path::PathBuf;

use thiserror::Error;

use crate::record::Record;

/// Главная ошибка декодирования PSV.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Не удалось открыть файл.
    #[error("Failed to open '{}': {source}", .path.display())]
    Open {
        /// Путь к файлу.
        path: PathBuf,
        /// Исходная ошибка.
        #[source]
        source: std::io::Error,
    },

    /// Ошибка чтения или разбора строки (I/O, невалидный UTF-8).
    #[error("PSV error: {0}")]
    Csv(#[from] csv::Error),

    /// В строке больше значений, чем полей в заголовке.
    #[error(
        "Wrong number of fields{}: header declares {expected}, row has {found}",
        at_line(.line)
    )]
    FieldCount {
        /// Номер строки в исходном потоке (1-based). `None`, если запись
        /// собрана не reader'ом.
        line: Option<u64>,
        /// Количество полей в заголовке.
        expected: usize,
        /// Количество значений в строке.
        found: usize,
    },

    /// Разделитель, который нельзя использовать: не ASCII, кавычка или
    /// перевод строки.
    #[error("Invalid delimiter {0:?}: must be an ASCII character other than a quote or line break")]
    InvalidDelimiter(char),
}

fn at_line(line: &Option<u64>) -> String {
    line.map(|line| format!(" at line {line}")).unwrap_or_default()
}

impl DecodeError {
    /// Номер строки, на которой произошла ошибка, если он известен.
    #[must_use]
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::FieldCount { line, .. } => *line,
            Self::Csv(err) => err.position().map(csv::Position::line),
            Self::Open { .. } | Self::InvalidDelimiter(_) => None,
        }
    }
}

/// Прерванное чтение: ошибка вместе с записями, прочитанными до неё.
///
/// Частичный результат доступен только через эту ошибку.
#[derive(Debug, Error)]
#[error("{error} (after {} record(s))", .records.len())]
pub struct PartialRead {
    /// Записи, успешно прочитанные до ошибки.
    pub records: Vec<Record>,
    /// Причина остановки.
    #[source]
    pub error: DecodeError,
}

impl PartialRead {
    /// Разделяет на частичный результат и ошибку.
    pub fn into_parts(self) -> (Vec<Record>, DecodeError) {
        (self.records, self.error)
    }
}

/// Удобный alias для Result с DecodeError.
pub type DecodeResult<T> = Result<T, DecodeError>;
