use std::collections::HashMap;

/// Поля сообщения, которые мы умеем разбирать.
///
/// Порядок вариантов совпадает с порядком номеров тегов, поэтому
/// `Ord` сортирует поля по тегу.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    /// 8
    BeginString,
    /// 9
    BodyLength,
    /// 10
    Checksum,
    /// 35
    MsgType,
    /// 52
    Timestamp,
    /// 55
    Symbol,
    /// 268
    GroupCount,
    /// 269, начало повторяющейся группы
    Side,
    /// 270
    Price,
    /// 271
    Amount,
    /// Тег, которого нет в словаре
    Unknown,
}

impl FieldId {
    /// Все известные поля (без `Unknown`)
    pub const KNOWN: [FieldId; 10] = [
        FieldId::BeginString,
        FieldId::BodyLength,
        FieldId::Checksum,
        FieldId::MsgType,
        FieldId::Timestamp,
        FieldId::Symbol,
        FieldId::GroupCount,
        FieldId::Side,
        FieldId::Price,
        FieldId::Amount,
    ];

    /// Номер тега; у `Unknown` его нет
    pub fn tag(self) -> Option<u32> {
        let tag = match self {
            FieldId::BeginString => 8,
            FieldId::BodyLength => 9,
            FieldId::Checksum => 10,
            FieldId::MsgType => 35,
            FieldId::Timestamp => 52,
            FieldId::Symbol => 55,
            FieldId::GroupCount => 268,
            FieldId::Side => 269,
            FieldId::Price => 270,
            FieldId::Amount => 271,
            FieldId::Unknown => return None,
        };
        Some(tag)
    }
}

/// Поле, с которого начинается повторяющаяся группа (сторона, цена, объём)
pub const GROUP_START: FieldId = FieldId::Side;

/// Словарь тег -> поле. Строится один раз и дальше только читается.
#[derive(Debug, Clone)]
pub struct FieldDictionary {
    by_tag: HashMap<u32, FieldId>,
}

impl FieldDictionary {
    pub fn new() -> Self {
        let by_tag = FieldId::KNOWN
            .into_iter()
            .filter_map(|f| f.tag().map(|t| (t, f)))
            .collect();

        Self { by_tag }
    }

    /// Тег в виде текста -> поле.
    ///
    /// Всё, что не является неотрицательным целым или отсутствует в словаре,
    /// превращается в [`FieldId::Unknown`].
    pub fn resolve(&self, tag: &str) -> FieldId {
        match tag.parse::<u32>() {
            Ok(t) if !tag.starts_with('+') => self.resolve_tag(t),
            _ => FieldId::Unknown,
        }
    }

    pub fn resolve_tag(&self, tag: u32) -> FieldId {
        self.by_tag.get(&tag).copied().unwrap_or(FieldId::Unknown)
    }
}

impl Default for FieldDictionary {
    fn default() -> Self {
        Self::new()
    }
}
