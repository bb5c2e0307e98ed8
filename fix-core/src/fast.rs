//! Быстрый путь: один проход по записи без построения [`DecodedMessage`].
//!
//! Смотрит только на поля 10, 52, 55 и группы 269; контрольная сумма
//! проверяется всегда, синтаксис остальных полей не проверяется.
//!
//! [`DecodedMessage`]: crate::DecodedMessage

use crate::checksum::checksum;
use crate::error::DecodeError;
use crate::field::FieldId;
use crate::projection::{Leg, Projection};
use crate::tokenizer::tokenize;

pub fn fast_project(record: &str) -> Result<Projection, DecodeError> {
    let computed = checksum(record);
    let mut tokens = tokenize(record);

    let mut symbol = None;
    let mut timestamp = None;
    let mut legs = Vec::with_capacity(2);
    let mut checksum_seen = false;

    while let Some(token) = tokens.next() {
        let Some((tag, value)) = token.split_once('=') else {
            continue;
        };
        match tag {
            "10" => {
                let declared: u32 = value
                    .parse()
                    .map_err(|_| DecodeError::ChecksumFormat(value.to_string()))?;
                if u32::from(computed) != declared {
                    return Err(DecodeError::ChecksumMismatch { computed, declared });
                }
                checksum_seen = true;
            }
            "52" => timestamp = Some(value),
            "55" => symbol = Some(value),
            "269" => {
                let price = tokens.next().and_then(|t| t.split_once('='));
                let amount = tokens.next().and_then(|t| t.split_once('='));
                match (price, amount) {
                    (Some((_, price)), Some((_, amount))) => legs.push(Leg {
                        side: value.to_string(),
                        price: price.to_string(),
                        amount: amount.to_string(),
                    }),
                    (price, _) => {
                        return Err(DecodeError::GroupShape {
                            got: usize::from(price.is_some()),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    if !checksum_seen {
        return Err(DecodeError::ChecksumMissing);
    }

    Ok(Projection {
        symbol: symbol
            .ok_or(DecodeError::MissingField(FieldId::Symbol))?
            .to_string(),
        legs,
        timestamp: timestamp
            .ok_or(DecodeError::MissingField(FieldId::Timestamp))?
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::seal;
    use crate::{DecodeOptions, Decoder, FieldDictionary};
    use std::sync::Arc;

    const SAMPLE: &str = "8=FIX.4.4\u{1}9=142\u{1}35=W\u{1}34=0\u{1}49=justtech\u{1}\
52=20180206-21:43:36.000\u{1}56=user\u{1}262=TEST\u{1}55=EURUSD\u{1}268=2\u{1}\
269=0\u{1}270=1.31678\u{1}271=100000.0\u{1}269=1\u{1}270=1.31667\u{1}271=100000.0\u{1}\
10=057\u{1}";

    #[test]
    fn fast_path_matches_full_decoder() {
        let full = Decoder::new(Arc::new(FieldDictionary::new()), DecodeOptions::default())
            .decode(SAMPLE)
            .projection()
            .unwrap();
        assert_eq!(fast_project(SAMPLE).unwrap(), full);
    }

    #[test]
    fn fast_path_rejects_bad_checksum() {
        let bad = SAMPLE.replace("EURUSD", "EURUSX");
        assert!(matches!(
            fast_project(&bad),
            Err(DecodeError::ChecksumMismatch { declared: 57, .. })
        ));
    }

    #[test]
    fn fast_path_requires_trailer() {
        assert_eq!(
            fast_project("8=FIX.4.4\u{1}55=X\u{1}52=T\u{1}"),
            Err(DecodeError::ChecksumMissing)
        );
    }

    #[test]
    fn fast_path_truncated_group() {
        let rec = seal("8=FIX.4.4\u{1}55=X\u{1}52=T\u{1}269=0\u{1}270=1.5\u{1}");
        // 10=NNN съедается как объём, а суммы уже нет
        assert_eq!(fast_project(&rec), Err(DecodeError::ChecksumMissing));

        assert_eq!(
            fast_project("55=X\u{1}269=0"),
            Err(DecodeError::GroupShape { got: 0 })
        );
    }
}
