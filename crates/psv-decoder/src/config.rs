//! Настройки reader'а.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};

/// Разделитель полей по умолчанию.
pub const PIPE_SEPARATOR: char = '|';

/// Обрезать ли пробелы перед значением по умолчанию.
pub const DEFAULT_TRIM_LEADING_SPACE: bool = true;

/// Параметры разбора входного потока.
///
/// Значения по умолчанию описывают обычный PSV: разделитель `|`,
/// пробелы перед каждым значением отбрасываются.
///
/// # Пример
///
/// ```
/// use psv_decoder::ReaderConfig;
///
/// let config: ReaderConfig = serde_json::from_str(r#"{ "delimiter": ";" }"#).unwrap();
/// assert_eq!(config.delimiter, ';');
/// assert!(config.trim_leading_space);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Разделитель полей. Должен быть ASCII-символом.
    pub delimiter: char,
    /// Отбрасывать пробелы в начале каждого значения до токенизации, то
    /// есть до проверки на открывающую кавычку.
    pub trim_leading_space: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { delimiter: PIPE_SEPARATOR, trim_leading_space: DEFAULT_TRIM_LEADING_SPACE }
    }
}

impl ReaderConfig {
    /// Конфигурация с другим разделителем.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Проверяет, что конфигурацию можно использовать для чтения.
    ///
    /// # Пример
    ///
    /// ```
    /// use psv_decoder::{DecodeError, ReaderConfig};
    ///
    /// assert!(ReaderConfig::default().validate().is_ok());
    ///
    /// let err = ReaderConfig::default().with_delimiter('¦').validate().unwrap_err();
    /// assert!(matches!(err, DecodeError::InvalidDelimiter('¦')));
    /// ```
    pub fn validate(&self) -> DecodeResult<()> {
        self.delimiter_byte().map(|_| ())
    }

    /// Разделитель в виде байта для `csv::ReaderBuilder`.
    pub(crate) fn delimiter_byte(&self) -> DecodeResult<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|byte| byte.is_ascii() && !matches!(byte, b'"' | b'\r' | b'\n'))
            .ok_or(DecodeError::InvalidDelimiter(self.delimiter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pipe_with_trimming() {
        let config = ReaderConfig::default();
        assert_eq!(config.delimiter, '|');
        assert!(config.trim_leading_space);
        assert_eq!(config.delimiter_byte().unwrap(), b'|');
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let config = ReaderConfig::default().with_delimiter('¦');
        assert!(matches!(config.validate(), Err(DecodeError::InvalidDelimiter('¦'))));
    }

    #[test]
    fn quote_and_line_breaks_are_rejected() {
        for delimiter in ['"', '\n', '\r'] {
            let config = ReaderConfig::default().with_delimiter(delimiter);
            assert!(config.validate().is_err(), "{delimiter:?} accepted");
        }
        assert!(ReaderConfig::default().with_delimiter('\t').validate().is_ok());
    }

    #[test]
    fn deserializes_partial_config() {
        let config: ReaderConfig =
            serde_json::from_str(r#"{ "trim_leading_space": false }"#).unwrap();
        assert_eq!(config, ReaderConfig { delimiter: '|', trim_leading_space: false });
    }
}
