/// Разделитель полей (SOH, 0x01)
pub const SOH: char = '\u{1}';

/// Разделитель тега и значения внутри поля
pub const KV_SEPARATOR: char = '=';

/// Начало поля контрольной суммы: SOH + "10="
pub const CHECKSUM_MARKER: &str = "\u{1}10=";

/// Начало каждой записи в потоке
pub const RECORD_START: &[u8] = b"8=FIX.";
