//! Отбрасывание пробелов в начале полей до токенизации.
//!
//! `csv::Trim` обрезает значения уже после разбора строки, поэтому
//! кавычка после пробелов (`1 | "x|y"`) для него не открывает поле, и
//! разделитель внутри неё режет значение. Этот адаптер убирает пробелы и
//! табуляции в начале каждого поля из самого потока, отслеживая кавычки,
//! чтобы не трогать содержимое quoted-полей.

use std::io::{self, Read};

/// Где находится поток относительно текущего поля.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Начало поля: после разделителя или перевода строки.
    FieldStart,
    /// Внутри поля без кавычек.
    Unquoted,
    /// Внутри поля в кавычках.
    Quoted,
    /// После кавычки внутри quoted-поля: либо `""`, либо конец кавычек.
    QuoteInQuoted,
}

/// [`Read`]-адаптер, выбрасывающий пробелы в начале каждого поля.
pub(crate) struct SkipLeadingSpace<R> {
    inner: R,
    delimiter: u8,
    enabled: bool,
    state: State,
}

impl<R: Read> SkipLeadingSpace<R> {
    /// При `enabled == false` поток передаётся без изменений.
    pub(crate) fn new(inner: R, delimiter: u8, enabled: bool) -> Self {
        Self { inner, delimiter, enabled, state: State::FieldStart }
    }

    pub(crate) fn into_inner(self) -> R {
        self.inner
    }

    /// Сдвигает состояние на один байт. Возвращает `false`, если байт
    /// нужно выбросить.
    fn step(&mut self, byte: u8) -> bool {
        let boundary = byte == self.delimiter || byte == b'\n' || byte == b'\r';
        self.state = match self.state {
            State::FieldStart if is_blank(byte) && byte != self.delimiter => return false,
            State::FieldStart | State::Unquoted if boundary => State::FieldStart,
            State::FieldStart if byte == b'"' => State::Quoted,
            State::FieldStart | State::Unquoted => State::Unquoted,
            State::Quoted if byte == b'"' => State::QuoteInQuoted,
            State::Quoted => State::Quoted,
            State::QuoteInQuoted if byte == b'"' => State::Quoted,
            State::QuoteInQuoted if boundary => State::FieldStart,
            State::QuoteInQuoted => State::Unquoted,
        };
        true
    }
}

impl<R: Read> Read for SkipLeadingSpace<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.enabled {
            return self.inner.read(buf);
        }
        loop {
            let n = self.inner.read(buf)?;
            if n == 0 {
                return Ok(0);
            }
            let mut kept = 0;
            for i in 0..n {
                let byte = buf[i];
                if self.step(byte) {
                    buf[kept] = byte;
                    kept += 1;
                }
            }
            // Буфер целиком из пробелов: читаем дальше, 0 означал бы EOF
            if kept > 0 {
                return Ok(kept);
            }
        }
    }
}

fn is_blank(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}
