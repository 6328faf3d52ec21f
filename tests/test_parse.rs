mod fixtures;

use fixtures::*;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_parse_scenarios() {
    ensure_env_logger_initialized();

    assert_eq!(swar::atou4(&b"1234567890"[..3]), 123);
    assert_eq!(swar::atou8(&b"1234567890"[..8]), 12_345_678);
    assert_eq!(swar::atou(b"12345678901234567890"), 12_345_678_901_234_567_890);
    assert_eq!(swar::htou8(&b"123456789aBCDEf0"[..8]), 0x1234_5678);
    assert_eq!(swar::atoi(b"-12345"), -12345);
    assert_eq!(swar::atoi(b"+007"), 7);
}

#[test]
fn test_cast8() {
    assert_eq!(swar::cast8(b"1234567890", 0), 0);
    assert_eq!(swar::cast8(b"1234567890", 3), 0x33_3231);
    assert_eq!(swar::cast8(b"1234567890", 8), 0x3837_3635_3433_3231);
}

#[test]
fn test_parse_fields_split_by_scan() {
    let line = b"17|-250|ff00|20240131";
    let mut fields = Vec::new();
    let mut rest = &line[..];
    while let Some(end) = swar::pmemchr(rest, b'|') {
        fields.push(&rest[..end]);
        rest = &rest[end + 1..];
    }
    fields.push(rest);

    assert_eq!(swar::atou(fields[0]), 17);
    assert_eq!(swar::atoi(fields[1]), -250);
    assert_eq!(swar::htou(fields[2]), 0xff00);
    assert_eq!(swar::atou8(fields[3]), 20_240_131);
}

proptest! {
    #[test]
    fn atou_equals_from_str_radix(digits in "[0-9]{0,20}") {
        let want = if digits.is_empty() { Some(0) } else { u64::from_str_radix(&digits, 10).ok() };
        // Values past u64::MAX wrap; only compare representable ones.
        if let Some(want) = want {
            prop_assert_eq!(swar::atou(digits.as_bytes()), want);
        }
    }

    #[test]
    fn atou8_and_atou4_equal_from_str_radix(digits in "[0-9]{0,8}") {
        let want = if digits.is_empty() { 0 } else { digits.parse::<u32>().unwrap() };
        prop_assert_eq!(swar::atou8(digits.as_bytes()), want);

        let short = &digits.as_bytes()[..digits.len().min(4)];
        let want4 = if short.is_empty() { 0 } else { std::str::from_utf8(short).unwrap().parse::<u16>().unwrap() };
        prop_assert_eq!(swar::atou4(short), want4);
    }

    #[test]
    fn htou_equals_from_str_radix(digits in "[0-9a-fA-F]{0,16}") {
        let want = if digits.is_empty() { 0 } else { u64::from_str_radix(&digits, 16).unwrap() };
        prop_assert_eq!(swar::htou(digits.as_bytes()), want);
    }

    #[test]
    fn atoi_equals_parse(x in any::<i64>(), plus in any::<bool>()) {
        let text = if plus && x >= 0 { format!("+{x}") } else { x.to_string() };
        prop_assert_eq!(swar::atoi(text.as_bytes()), x);
    }
}
