use std::fmt;

use crate::error::DecodeError;
use crate::field::FieldId;
use crate::message::{DecodedMessage, GroupEntry};

/// Одна нога котировки: сторона, цена, объём
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub side: String,
    pub price: String,
    pub amount: String,
}

impl Leg {
    /// "0" -> " B ", всё остальное -> " S "
    pub fn side_label(&self) -> &'static str {
        side_label(&self.side)
    }
}

impl From<&GroupEntry<'_>> for Leg {
    fn from(g: &GroupEntry<'_>) -> Self {
        Self {
            side: g.side.to_string(),
            price: g.price.to_string(),
            amount: g.amount.to_string(),
        }
    }
}

pub fn side_label(side: &str) -> &'static str {
    if side == "0" { " B " } else { " S " }
}

/// Компактная проекция валидного сообщения:
/// `EURUSD B 1.31678;100000.0 S 1.31667;100000.0 20180206-21:43:36.000`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub symbol: String,
    pub legs: Vec<Leg>,
    pub timestamp: String,
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)?;
        for leg in &self.legs {
            write!(f, "{}{};{}", leg.side_label(), leg.price, leg.amount)?;
        }
        write!(f, " {}", self.timestamp)
    }
}

impl DecodedMessage<'_> {
    /// Проекция сообщения; нужны поля 55 и 52
    pub fn projection(&self) -> Result<Projection, DecodeError> {
        let symbol = self
            .get(FieldId::Symbol)
            .ok_or(DecodeError::MissingField(FieldId::Symbol))?;
        let timestamp = self
            .get(FieldId::Timestamp)
            .ok_or(DecodeError::MissingField(FieldId::Timestamp))?;

        Ok(Projection {
            symbol: symbol.to_string(),
            legs: self.groups().iter().map(Leg::from).collect(),
            timestamp: timestamp.to_string(),
        })
    }
}
