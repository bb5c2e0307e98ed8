use chrono::Utc;
use fix_core::checksum::seal;
use rand::Rng;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub(crate) struct GeneratorConfig {
    /// Максимальный относительный шаг цены за запись (пример: 0.0005 = 0.05%)
    pub(crate) max_rel_step: f64,
    /// Спред между покупкой и продажей, относительный
    pub(crate) rel_spread: f64,
    /// Минимальная допустимая цена
    pub(crate) min_price: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_rel_step: 0.0005,
            rel_spread: 0.0001,
            min_price: 0.0001,
        }
    }
}

const AMOUNTS: [f64; 4] = [100_000.0, 250_000.0, 500_000.0, 1_000_000.0];

/// Генератор снимков котировок `35=W` с двумя ногами и верной суммой
pub(crate) struct SnapshotGenerator {
    cfg: GeneratorConfig,
    symbols: Vec<String>,
    mids: HashMap<String, f64>,
    seq: u64,
}

impl SnapshotGenerator {
    pub(crate) fn new(symbols: Vec<String>, cfg: GeneratorConfig) -> Self {
        let mut rng = rand::rng();

        let mids = symbols
            .iter()
            .map(|s| (s.clone(), rng.random_range(0.5..150.0)))
            .collect::<HashMap<_, _>>();

        Self {
            cfg,
            symbols,
            mids,
            seq: 0,
        }
    }

    /// сгенерировать запись для инструмента
    pub(crate) fn next_record(&mut self, symbol: &str) -> Option<String> {
        let mid = self.mids.get_mut(symbol)?;
        let mut rng = rand::rng();

        let delta = rng.random_range(-self.cfg.max_rel_step..self.cfg.max_rel_step);
        *mid = ((1.0 + delta) * *mid).max(self.cfg.min_price);

        let half_spread = *mid * self.cfg.rel_spread / 2.0;
        let bid = *mid - half_spread;
        let ask = *mid + half_spread;
        let amount = AMOUNTS[rng.random_range(0..AMOUNTS.len())];

        self.seq += 1;
        let timestamp = Utc::now().format("%Y%m%d-%H:%M:%S%.3f");

        let body = format!(
            "35=W\u{1}34={seq}\u{1}49=fix-gen\u{1}52={timestamp}\u{1}56=user\u{1}\
55={symbol}\u{1}268=2\u{1}\
269=0\u{1}270={bid:.5}\u{1}271={amount:.1}\u{1}\
269=1\u{1}270={ask:.5}\u{1}271={amount:.1}\u{1}",
            seq = self.seq,
        );

        Some(seal(&format!(
            "8=FIX.4.4\u{1}9={}\u{1}{body}",
            body.len()
        )))
    }

    /// `count` записей по кругу инструментов, `corrupt` из них испорчены
    pub(crate) fn batch(&mut self, count: usize, corrupt: usize) -> Vec<String> {
        let symbols = self.symbols.clone();
        if symbols.is_empty() {
            return Vec::new();
        }

        let mut out: Vec<String> = symbols
            .iter()
            .cycle()
            .take(count)
            .filter_map(|s| self.next_record(s))
            .collect();

        let mut rng = rand::rng();
        let corrupt = corrupt.min(out.len());
        for i in rand::seq::index::sample(&mut rng, out.len(), corrupt) {
            corrupt_record(&mut out[i]);
        }

        out
    }
}

/// Меняет одну букву инструмента: структура та же, сумма уже не сходится
pub(crate) fn corrupt_record(record: &mut String) {
    let Some(pos) = record.find("\u{1}55=").map(|p| p + 4) else {
        return;
    };
    let mut bytes = std::mem::take(record).into_bytes();
    let b = bytes[pos];
    bytes[pos] = if b.is_ascii_uppercase() {
        b'A' + (b - b'A' + 1) % 26
    } else if b == b'X' {
        b'Y'
    } else {
        b'X'
    };
    *record = String::from_utf8_lossy(&bytes).into_owned();
}

#[cfg(test)]
mod tests {
    use super::*;
    use fix_core::{DecodeOptions, Decoder, FieldDictionary, FieldId};
    use std::sync::Arc;

    fn decoder() -> Decoder {
        Decoder::new(
            Arc::new(FieldDictionary::new()),
            DecodeOptions {
                validate_checksum: true,
                validate_syntax: true,
            },
        )
    }

    fn generator() -> SnapshotGenerator {
        SnapshotGenerator::new(
            vec!["EURUSD".into(), "USDJPY".into(), "GBPUSD".into()],
            GeneratorConfig::default(),
        )
    }

    #[test]
    fn generated_records_are_valid() {
        let d = decoder();
        for rec in generator().batch(30, 0) {
            let m = d.decode(&rec);
            assert!(m.is_valid(), "{rec:?}: {:?}", m.errors());
            assert_eq!(m.groups().len(), 2);
            assert_eq!(m.groups()[0].side, "0");
            assert_eq!(m.groups()[1].side, "1");
            assert_eq!(m.get(FieldId::MsgType), Some("W"));
        }
    }

    #[test]
    fn body_length_matches() {
        let rec = generator().next_record("EURUSD").unwrap();
        let m = decoder().decode(&rec);
        let declared: usize = m.get(FieldId::BodyLength).unwrap().parse().unwrap();

        let start = rec.find("\u{1}35=").unwrap() + 1;
        let end = rec.rfind("\u{1}10=").unwrap() + 1;
        assert_eq!(end - start, declared);
    }

    #[test]
    fn unknown_symbol_gives_none() {
        assert!(generator().next_record("XXX").is_none());
    }

    #[test]
    fn batch_cycles_symbols() {
        let d = decoder();
        let recs = generator().batch(4, 0);
        let symbols: Vec<_> = recs
            .iter()
            .map(|r| d.decode(r).get(FieldId::Symbol).unwrap().to_string())
            .collect();
        assert_eq!(symbols, vec!["EURUSD", "USDJPY", "GBPUSD", "EURUSD"]);
    }

    #[test]
    fn corrupted_records_fail_only_checksum() {
        let d = decoder();
        let recs = generator().batch(20, 4);
        let bad: Vec<_> = recs.iter().map(|r| d.decode(r)).filter(|m| !m.is_valid()).collect();
        assert_eq!(bad.len(), 4);
        for m in bad {
            assert!(m.is_syntax_ok());
            assert!(!m.is_checksum_ok());
        }
    }

    #[test]
    fn corrupt_record_changes_symbol_letter() {
        let mut rec = "8=FIX.4.4\u{1}55=EURUSD\u{1}".to_string();
        corrupt_record(&mut rec);
        assert_eq!(rec, "8=FIX.4.4\u{1}55=FURUSD\u{1}");

        let mut rec = "8=FIX.4.4\u{1}55=ZAR\u{1}".to_string();
        corrupt_record(&mut rec);
        assert_eq!(rec, "8=FIX.4.4\u{1}55=AAR\u{1}");
    }
}
