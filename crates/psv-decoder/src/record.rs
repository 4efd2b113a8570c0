//! Запись — одна строка данных в виде «имя поля → значение».

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    error::{DecodeError, DecodeResult},
    mapper::{self, Unmarshal},
};

/// Одна строка PSV-файла.
///
/// Ключи берутся из заголовка, значения обрезаются от пробелов при
/// создании записи. В запись попадают только поля, для которых в строке
/// было значение. После создания запись не изменяется.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, String>,
    #[serde(skip)]
    line: Option<u64>,
}

impl Record {
    /// Собирает запись из заголовка и значений одной строки.
    ///
    /// Строка короче заголовка допустима: недостающие поля просто
    /// отсутствуют. Строка длиннее заголовка — ошибка
    /// [`DecodeError::FieldCount`]. При повторяющихся именах в заголовке
    /// побеждает последнее значение.
    pub fn from_row<K, V>(keys: &[K], values: &[V]) -> DecodeResult<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if keys.len() < values.len() {
            return Err(DecodeError::FieldCount {
                line: None,
                expected: keys.len(),
                found: values.len(),
            });
        }
        let fields = keys
            .iter()
            .zip(values)
            .map(|(key, value)| (key.as_ref().trim().to_owned(), value.as_ref().trim().to_owned()))
            .collect();
        Ok(Self { fields, line: None })
    }

    pub(crate) fn at_line(mut self, line: Option<u64>) -> Self {
        self.line = line;
        self
    }

    /// Номер строки исходного потока (1-based), если запись прочитана reader'ом.
    #[must_use]
    pub fn line(&self) -> Option<u64> {
        self.line
    }

    /// Значение поля по имени.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Есть ли в записи поле с таким именем.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Количество полей в записи.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Пустая ли запись.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Пары «имя → значение» в произвольном порядке.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Создаёт `T::default()` и заполняет его из записи.
    ///
    /// # Пример
    ///
    /// ```
    /// use psv_decoder::{Record, impl_unmarshal};
    ///
    /// #[derive(Debug, Default)]
    /// struct Plan {
    ///     id: u32,
    ///     name: String,
    /// }
    ///
    /// impl_unmarshal!(Plan {
    ///     "PlanID" => id,
    ///     "Name" => name,
    /// });
    ///
    /// let record = Record::from_row(&["PlanID", "Name"], &["7", "basic"]).unwrap();
    /// let plan: Plan = record.decode();
    /// assert_eq!(plan.id, 7);
    /// assert_eq!(plan.name, "basic");
    /// ```
    #[must_use]
    pub fn decode<T: Unmarshal + Default>(&self) -> T {
        let mut target = T::default();
        mapper::populate(self, &mut target);
        target
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into().trim().to_owned(), v.into().trim().to_owned()))
            .collect();
        Self { fields, line: None }
    }
}
