//! Библиотека декодирования PSV-файлов (значения, разделённые `|`).
//!
//! Крейт состоит из двух частей:
//!
//! - **Reader** ([`RecordReader`], [`read_records`]) — превращает поток в
//!   последовательность [`Record`]: первая строка — заголовок с именами
//!   полей, каждая следующая строка — запись «имя поля → значение».
//! - **Маппер** ([`populate`], [`Unmarshal`]) — заполняет поля целевой
//!   структуры из записи, приводя строки к объявленным типам. Ошибки
//!   преобразования отдельных полей не фатальны: поле просто остаётся
//!   без изменений.
//!
//! # Быстрый старт
//!
//! ```
//! use chrono::NaiveDateTime;
//! use psv_decoder::{impl_unmarshal, read_records};
//!
//! #[derive(Debug, Default)]
//! struct Account {
//!     account_id: String,
//!     plan_id: u32,
//!     outstd_principal: f32,
//!     created: NaiveDateTime,
//! }
//!
//! impl_unmarshal!(Account {
//!     "AccountID" => account_id,
//!     "PlanID" => plan_id,
//!     "OutstdPrincipal" => outstd_principal,
//!     "PlanSegCreateDate" => created @ "2006-01-02 15:04:05",
//! });
//!
//! let input = "\
//! AccountID | PlanID | OutstdPrincipal | PlanSegCreateDate
//! A-1       | 12     | 10.5            | 2021-03-04 05:06:07
//! ";
//!
//! let records = read_records(input.as_bytes()).unwrap();
//! let account: Account = records[0].decode();
//!
//! assert_eq!(account.account_id, "A-1");
//! assert_eq!(account.plan_id, 12);
//! assert_eq!(account.outstd_principal, 10.5);
//! assert_eq!(account.created.to_string(), "2021-03-04 05:06:07");
//! ```

pub mod config;
pub mod error;
pub mod mapper;
pub mod reader;
pub mod record;

pub use config::ReaderConfig;
pub use error::{DecodeError, DecodeResult, PartialRead};
pub use mapper::{
    FieldDescriptor, FieldKind, FieldOutcome, FieldSlot, FieldTable, FieldTableBuilder,
    FieldValue, PopulateReport, SkipReason, Unmarshal, decode_all, populate, populate_with_report,
};
pub use reader::{RecordReader, read_records, read_records_from_path, read_records_with_config};
pub use record::Record;

/// Часто используемые типы одним импортом.
pub mod prelude {
    pub use crate::{
        DecodeError, PartialRead, ReaderConfig, Record, RecordReader, Unmarshal, impl_unmarshal,
        populate, populate_with_report, read_records, read_records_from_path,
    };
}
