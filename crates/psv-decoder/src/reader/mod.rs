//! Потоковый reader для PSV-записей.
//!
//! Предоставляет [`RecordReader`] — итератор, который читает записи из
//! любого источника, реализующего [`Read`], и функции [`read_records`] /
//! [`read_records_from_path`] для чтения всего потока сразу.

mod leading_space;

use std::{fs::File, io::Read, path::Path};

use tracing::debug;

use self::leading_space::SkipLeadingSpace;
use crate::{
    config::{DEFAULT_TRIM_LEADING_SPACE, PIPE_SEPARATOR, ReaderConfig},
    error::{DecodeError, DecodeResult, PartialRead},
    record::Record,
};

/// Потоковый reader для PSV-записей.
///
/// Первая строка потока считается заголовком. Каждая следующая непустая
/// строка превращается в [`Record`]. После первой ошибки итератор
/// завершается.
///
/// # Пример
///
/// ```
/// use psv_decoder::RecordReader;
///
/// let input = "Name | Count\nA | 5\nB | 7\n";
/// let records: Result<Vec<_>, _> = RecordReader::new(input.as_bytes()).collect();
/// let records = records.unwrap();
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].get("Count"), Some("7"));
/// ```
pub struct RecordReader<R> {
    inner: csv::Reader<SkipLeadingSpace<R>>,
    /// Имена полей из заголовка.
    headers: Option<Vec<String>>,
    /// Счётчик прочитанных записей.
    records_read: usize,
    /// Флаг достижения EOF или ошибки.
    finished: bool,
}

impl<R: Read> RecordReader<R> {
    /// Создаёт reader с настройками по умолчанию.
    pub fn new(reader: R) -> Self {
        Self::build(reader, PIPE_SEPARATOR as u8, DEFAULT_TRIM_LEADING_SPACE)
    }

    /// Создаёт reader с указанными настройками.
    ///
    /// Возвращает [`DecodeError::InvalidDelimiter`], если разделитель
    /// нельзя использовать.
    pub fn with_config(reader: R, config: &ReaderConfig) -> DecodeResult<Self> {
        let delimiter = config.delimiter_byte()?;
        Ok(Self::build(reader, delimiter, config.trim_leading_space))
    }

    fn build(reader: R, delimiter: u8, trim_leading_space: bool) -> Self {
        let source = SkipLeadingSpace::new(reader, delimiter, trim_leading_space);
        let inner = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(source);
        Self { inner, headers: None, records_read: 0, finished: false }
    }

    /// Имена полей заголовка.
    ///
    /// Читает заголовок, если он ещё не прочитан. Для пустого потока
    /// возвращает пустой срез.
    pub fn headers(&mut self) -> DecodeResult<&[String]> {
        if self.headers.is_none() {
            let mut row = csv::StringRecord::new();
            let names = if self.inner.read_record(&mut row)? {
                row.iter().map(|name| name.trim().to_owned()).collect()
            } else {
                Vec::new()
            };
            debug!(fields = names.len(), "header read");
            self.headers = Some(names);
        }
        Ok(self.headers.as_deref().unwrap_or_default())
    }

    /// Возвращает количество успешно прочитанных записей.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Извлекает внутренний reader.
    pub fn into_inner(self) -> R {
        self.inner.into_inner().into_inner()
    }

    fn read_next(&mut self) -> DecodeResult<Option<Record>> {
        let expected = self.headers()?.len();
        let mut row = csv::StringRecord::new();
        if !self.inner.read_record(&mut row)? {
            return Ok(None);
        }

        let line = row.position().map(csv::Position::line);
        if row.len() > expected {
            return Err(DecodeError::FieldCount { line, expected, found: row.len() });
        }

        let headers = self.headers.as_deref().unwrap_or_default();
        let values: Vec<&str> = row.iter().collect();
        Ok(Some(Record::from_row(headers, &values)?.at_line(line)))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = DecodeResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_next() {
            Ok(Some(record)) => {
                self.records_read += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                self.finished = true;
                debug!(records = self.records_read, "end of stream");
                None
            }
            Err(e) => {
                self.finished = true; // Остановка при ошибке
                Some(Err(e))
            }
        }
    }
}

/// Читает все записи из потока с настройками по умолчанию.
///
/// При ошибке возвращает [`PartialRead`] с записями, прочитанными до неё.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, PartialRead> {
    read_records_with_config(reader, &ReaderConfig::default())
}

/// Читает все записи из потока с указанными настройками.
///
/// Некорректная конфигурация возвращается как [`PartialRead`] без записей.
pub fn read_records_with_config<R: Read>(
    reader: R,
    config: &ReaderConfig,
) -> Result<Vec<Record>, PartialRead> {
    let reader = RecordReader::with_config(reader, config)
        .map_err(|error| PartialRead { records: Vec::new(), error })?;

    let mut records = Vec::new();
    for result in reader {
        match result {
            Ok(record) => records.push(record),
            Err(error) => return Err(PartialRead { records, error }),
        }
    }
    Ok(records)
}

/// Открывает файл и читает из него все записи.
///
/// Файл закрывается при выходе из функции на любом пути.
pub fn read_records_from_path(path: impl AsRef<Path>) -> Result<Vec<Record>, PartialRead> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PartialRead {
        records: Vec::new(),
        error: DecodeError::Open { path: path.to_path_buf(), source },
    })?;
    read_records(file)
}
