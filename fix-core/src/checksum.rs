use crate::constants::{CHECKSUM_MARKER, SOH};

/// Контрольная сумма записи: сумма байтов по модулю 256.
///
/// Суммируются байты до SOH перед последним "10=" включительно.
/// Если поля 10 нет, суммируется вся запись.
pub fn checksum(record: &str) -> u8 {
    let bytes = record.as_bytes();
    let end = match record.rfind(CHECKSUM_MARKER) {
        Some(pos) => pos + 1,
        None => bytes.len(),
    };

    bytes[..end].iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Дописывает к телу записи поле "10=NNN" с правильной суммой.
///
/// `body` должен заканчиваться на SOH; если нет, разделитель добавляется.
pub fn seal(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 8);
    out.push_str(body);
    if !out.ends_with(SOH) {
        out.push(SOH);
    }
    let sum = checksum(&out);
    out.push_str(&format!("10={sum:03}{SOH}"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "8=FIX.4.4\u{1}9=142\u{1}35=W\u{1}34=0\u{1}49=justtech\u{1}\
52=20180206-21:43:36.000\u{1}56=user\u{1}262=TEST\u{1}55=EURUSD\u{1}268=2\u{1}\
269=0\u{1}270=1.31678\u{1}271=100000.0\u{1}269=1\u{1}270=1.31667\u{1}271=100000.0\u{1}\
10=057\u{1}";

    #[test]
    fn checksum_of_known_record() {
        assert_eq!(checksum(SAMPLE), 57);
    }

    #[test]
    fn checksum_ignores_everything_after_marker() {
        let other_tail = SAMPLE.replace("10=057\u{1}", "10=999\u{1}junk");
        assert_eq!(checksum(&other_tail), 57);
    }

    #[test]
    fn checksum_without_marker_covers_whole_record() {
        assert_eq!(checksum("A"), 65);
        assert_eq!(checksum(""), 0);
        // 122 * 3 = 366 -> 110
        assert_eq!(checksum("zzz"), 110);
    }

    #[test]
    fn checksum_uses_last_marker() {
        let rec = "1=a\u{1}10=000\u{1}2=b\u{1}10=123\u{1}";
        let expected = "1=a\u{1}10=000\u{1}2=b\u{1}"
            .bytes()
            .fold(0u8, |a, b| a.wrapping_add(b));
        assert_eq!(checksum(rec), expected);
    }

    #[test]
    fn checksum_is_deterministic() {
        assert_eq!(checksum(SAMPLE), checksum(&SAMPLE.to_string()));
    }

    #[test]
    fn seal_produces_matching_trailer() {
        let body = "8=FIX.4.4\u{1}35=W\u{1}";
        let sealed = seal(body);
        let declared: u8 = sealed
            .trim_end_matches('\u{1}')
            .rsplit("10=")
            .next()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(checksum(&sealed), declared);
        assert!(sealed.ends_with('\u{1}'));

        // без SOH в конце разделитель дописывается
        assert_eq!(seal("8=FIX.4.4\u{1}35=W"), sealed);
    }
}
