use thiserror::Error;

use crate::field::FieldId;

/// Верхнеуровневый тип ошибок крейта
#[derive(Debug, Error)]
pub enum CoreError {
    /// Ошибки разбора сообщения
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Ошибки чтения источника записей
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Ошибки разбора одной записи.
///
/// Декодер не возвращает их наружу: они складываются в диагностику
/// [`DecodedMessage`](crate::DecodedMessage) и сбрасывают флаги
/// `syntax_ok` / `checksum_ok`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Поле не делится на ровно две части по '='
    #[error("field does not split into tag=value: {0:?}")]
    TokenShape(String),

    /// Тег не является целым числом (при проверке синтаксиса)
    #[error("tag is not an integer: {0:?}")]
    TagFormat(String),

    /// После начала группы нет двух полей (цена, объём)
    #[error("repeating group needs 2 more fields, got {got}")]
    GroupShape { got: usize },

    /// Значение поля 10 не число
    #[error("checksum value is not an integer: {0:?}")]
    ChecksumFormat(String),

    /// В записи нет поля 10
    #[error("checksum field is missing")]
    ChecksumMissing,

    /// Посчитанная сумма не совпала с указанной в записи
    #[error("checksum mismatch: computed={computed:03} declared={declared:03}")]
    ChecksumMismatch { computed: u8, declared: u32 },

    /// Для проекции не хватает поля
    #[error("missing field: {0:?}")]
    MissingField(FieldId),
}
