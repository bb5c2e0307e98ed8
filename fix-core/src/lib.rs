//! # fix-core
//!
//! Разбор упрощённых FIX-сообщений (снимки котировок `35=W`).
//!
//! Этот крейт содержит:
//!
//! - [`field`] — словарь тегов и идентификаторы полей
//! - [`tokenizer`] — нарезка записи на поля `tag=value`
//! - [`checksum`] — контрольная сумма записи (поле 10)
//! - [`message`] — декодер и разобранное сообщение
//! - [`projection`] — компактное текстовое представление сообщения
//! - [`fast`] — однопроходная проекция без полного разбора
//! - [`source`] — чтение потока записей из файла/сокета
//! - [`error`] — типы ошибок
//!
//! ## Быстрый пример: разбор записи
//!
//! ```rust
//! use std::sync::Arc;
//! use fix_core::{checksum::seal, DecodeOptions, Decoder, FieldDictionary, FieldId};
//!
//! let record = seal(
//!     "8=FIX.4.4\u{1}35=W\u{1}52=20180206-21:43:36.000\u{1}55=EURUSD\u{1}\
//!      268=1\u{1}269=0\u{1}270=1.31678\u{1}271=100000.0\u{1}",
//! );
//!
//! let decoder = Decoder::new(Arc::new(FieldDictionary::new()), DecodeOptions::default());
//! let msg = decoder.decode(&record);
//!
//! assert!(msg.is_valid());
//! assert_eq!(msg.get(FieldId::Symbol), Some("EURUSD"));
//! assert_eq!(
//!     msg.projection().unwrap().to_string(),
//!     "EURUSD B 1.31678;100000.0 20180206-21:43:36.000"
//! );
//! ```
//!
//! ## Пример: чтение записей из потока
//!
//! ```rust
//! use fix_core::source::RecordReader;
//! use std::io::Cursor;
//!
//! let input = b"8=FIX.4.4\x0135=W\x018=FIX.4.4\x0135=W\x01".to_vec();
//! let records: Vec<String> = RecordReader::new(Cursor::new(input))
//!     .collect::<std::io::Result<_>>()
//!     .unwrap();
//! assert_eq!(records.len(), 2);
//! ```
//!
//! ## Дизайн
//!
//! Декодер чистый: без потоков, логов и глобального состояния.
//! Ошибки разбора не пробрасываются, а копятся в [`DecodedMessage`],
//! поэтому одна битая запись никак не влияет на остальные.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Контрольная сумма (поле 10).
pub mod checksum;

/// Ошибки `fix-core`.
pub mod error;

/// Быстрая проекция без полного разбора.
pub mod fast;

/// Словарь полей.
pub mod field;

/// Декодер и разобранное сообщение.
pub mod message;

/// Проекция сообщения в строку.
pub mod projection;

/// Источник записей.
pub mod source;

/// Нарезка записи на поля.
pub mod tokenizer;

/// Общие константы протокола
mod constants;
pub use constants::{CHECKSUM_MARKER, KV_SEPARATOR, RECORD_START, SOH};

// --- Re-exports (публичный фасад API) ---

pub use crate::error::{CoreError, DecodeError};
pub use crate::fast::fast_project;
pub use crate::field::{FieldDictionary, FieldId, GROUP_START};
pub use crate::message::{DecodeOptions, DecodedMessage, Decoder, GroupEntry};
pub use crate::projection::{Leg, Projection};
