use std::collections::BTreeMap;
use std::sync::Arc;

use crate::checksum::checksum;
use crate::error::DecodeError;
use crate::field::{FieldDictionary, FieldId, GROUP_START};
use crate::tokenizer::{is_valid_tag, split_pair, tokenize};

/// Одно вхождение повторяющейся группы
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry<'a> {
    /// "0" - покупка, "1" - продажа
    pub side: &'a str,
    pub price: &'a str,
    pub amount: &'a str,
}

/// Какие проверки делает декодер
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub validate_checksum: bool,
    pub validate_syntax: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            validate_checksum: true,
            validate_syntax: false,
        }
    }
}

/// Разобранная запись. Заимствует значения из исходной строки.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage<'a> {
    fields: BTreeMap<FieldId, &'a str>,
    groups: Vec<GroupEntry<'a>>,
    syntax_ok: bool,
    checksum_ok: bool,
    errors: Vec<DecodeError>,
}

impl<'a> DecodedMessage<'a> {
    fn empty(checksum_ok: bool) -> Self {
        Self {
            fields: BTreeMap::new(),
            groups: Vec::new(),
            syntax_ok: true,
            checksum_ok,
            errors: Vec::new(),
        }
    }

    fn syntax_error(&mut self, err: DecodeError) {
        self.syntax_ok = false;
        self.errors.push(err);
    }

    fn checksum_error(&mut self, err: DecodeError) {
        self.checksum_ok = false;
        self.errors.push(err);
    }

    pub fn is_valid(&self) -> bool {
        self.syntax_ok && self.checksum_ok
    }

    pub fn is_syntax_ok(&self) -> bool {
        self.syntax_ok
    }

    /// При выключенной проверке суммы всегда `true`
    pub fn is_checksum_ok(&self) -> bool {
        self.checksum_ok
    }

    pub fn get(&self, field: FieldId) -> Option<&'a str> {
        self.fields.get(&field).copied()
    }

    /// Скалярные поля в порядке номеров тегов
    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &'a str)> + '_ {
        self.fields.iter().map(|(&f, &v)| (f, v))
    }

    pub fn groups(&self) -> &[GroupEntry<'a>] {
        &self.groups
    }

    /// Все ошибки, встреченные при разборе, в порядке появления
    pub fn errors(&self) -> &[DecodeError] {
        &self.errors
    }
}

/// Декодер записей. Дешёво клонируется: словарь общий.
#[derive(Debug, Clone)]
pub struct Decoder {
    dict: Arc<FieldDictionary>,
    opts: DecodeOptions,
}

impl Decoder {
    pub fn new(dict: Arc<FieldDictionary>, opts: DecodeOptions) -> Self {
        Self { dict, opts }
    }

    pub fn options(&self) -> DecodeOptions {
        self.opts
    }

    pub fn dictionary(&self) -> &FieldDictionary {
        &self.dict
    }

    /// Разбирает запись. Никогда не паникует и не возвращает ошибку:
    /// всё плохое попадает во флаги и [`DecodedMessage::errors`].
    pub fn decode<'a>(&self, record: &'a str) -> DecodedMessage<'a> {
        let DecodeOptions {
            validate_checksum,
            validate_syntax,
        } = self.opts;

        let mut msg = DecodedMessage::empty(!validate_checksum);
        let mut tokens = tokenize(record);

        while let Some(token) = tokens.next() {
            let Some(pair) = split_pair(token) else {
                if validate_checksum {
                    msg.syntax_error(DecodeError::TokenShape(token.to_string()));
                }
                continue;
            };

            if validate_syntax && !is_valid_tag(pair.tag) {
                msg.syntax_error(DecodeError::TagFormat(pair.tag.to_string()));
                continue;
            }

            let field = self.dict.resolve(pair.tag);
            if field == FieldId::Unknown {
                continue;
            }

            if field == GROUP_START {
                // группа фиксированной формы: сторона, цена, объём подряд
                let members: Vec<&str> = [tokens.next(), tokens.next()]
                    .into_iter()
                    .flatten()
                    .filter_map(member_value)
                    .collect();
                match members[..] {
                    [price, amount] => msg.groups.push(GroupEntry {
                        side: pair.value,
                        price,
                        amount,
                    }),
                    _ => msg.syntax_error(DecodeError::GroupShape {
                        got: members.len(),
                    }),
                }
                continue;
            }

            msg.fields.insert(field, pair.value);
        }

        if validate_checksum {
            match msg.get(FieldId::Checksum) {
                None => msg.checksum_error(DecodeError::ChecksumMissing),
                Some(raw) => match raw.parse::<u32>() {
                    Err(_) => msg.checksum_error(DecodeError::ChecksumFormat(raw.to_string())),
                    Ok(declared) => {
                        let computed = checksum(record);
                        if u32::from(computed) == declared {
                            msg.checksum_ok = true;
                        } else {
                            msg.checksum_error(DecodeError::ChecksumMismatch { computed, declared });
                        }
                    }
                },
            }
        }

        msg
    }
}

/// Значение члена группы: всё после первого '='.
/// Тег не проверяется, поле без '=' считается битым.
fn member_value(token: &str) -> Option<&str> {
    token.split_once('=').map(|(_, v)| v)
}
