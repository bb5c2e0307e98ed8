use std::str::Split;

use crate::constants::{KV_SEPARATOR, SOH};

/// Пара (тег, значение) одного поля; живёт только во время разбора
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken<'a> {
    pub tag: &'a str,
    pub value: &'a str,
}

/// Ленивый однопроходный итератор по полям записи
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    inner: Split<'a, char>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Режет запись по SOH.
///
/// Завершающие разделители отбрасываются: "8=FIX.4.4\x01" даёт одно поле,
/// а не поле плюс пустую строку. Пустые поля в середине остаются,
/// их отбракует декодер.
pub fn tokenize(record: &str) -> Tokens<'_> {
    Tokens {
        inner: record.trim_end_matches(SOH).split(SOH),
    }
}

/// Делит поле на тег и значение.
///
/// Пустые хвосты отбрасываются, поэтому "55=" не является парой,
/// а "a=b=c" даёт три части и тоже не является парой.
pub fn split_pair(token: &str) -> Option<RawToken<'_>> {
    let body = token.trim_end_matches(KV_SEPARATOR);
    let (tag, value) = body.split_once(KV_SEPARATOR)?;
    if value.contains(KV_SEPARATOR) {
        return None;
    }
    Some(RawToken { tag, value })
}

/// Синтаксис тега: необязательный минус и хотя бы одна цифра
pub fn is_valid_tag(tag: &str) -> bool {
    let digits = tag.strip_prefix('-').unwrap_or(tag);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_keeps_order_and_drops_trailing_separator() {
        let got: Vec<_> = tokenize("8=FIX.4.4\u{1}35=W\u{1}10=001\u{1}").collect();
        assert_eq!(got, vec!["8=FIX.4.4", "35=W", "10=001"]);
    }

    #[test]
    fn tokenize_keeps_inner_empty_fields() {
        let got: Vec<_> = tokenize("8=FIX.4.4\u{1}\u{1}35=W").collect();
        assert_eq!(got, vec!["8=FIX.4.4", "", "35=W"]);
    }

    #[test]
    fn tokenize_empty_record_yields_one_empty_token() {
        let got: Vec<_> = tokenize("").collect();
        assert_eq!(got, vec![""]);
    }

    #[test]
    fn split_pair_accepts_exactly_two_parts() {
        assert_eq!(
            split_pair("55=EURUSD"),
            Some(RawToken {
                tag: "55",
                value: "EURUSD"
            })
        );
        assert_eq!(split_pair("=x"), Some(RawToken { tag: "", value: "x" }));
        assert_eq!(split_pair("55"), None);
        assert_eq!(split_pair("55="), None);
        assert_eq!(split_pair("a=b=c"), None);
        assert_eq!(split_pair(""), None);
    }

    #[test]
    fn tag_syntax() {
        assert!(is_valid_tag("10"));
        assert!(is_valid_tag("-1"));
        assert!(!is_valid_tag(""));
        assert!(!is_valid_tag("-"));
        assert!(!is_valid_tag("1a"));
        assert!(!is_valid_tag(" 10"));
    }
}
