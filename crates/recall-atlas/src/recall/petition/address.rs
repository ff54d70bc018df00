use std::sync::OnceLock;

use regex::{Captures, Regex};

static UNIT_NUMBER: OnceLock<Regex> = OnceLock::new();

fn unit_number() -> &'static Regex {
    // ASCII whitespace only; a full-width space ends the number.
    UNIT_NUMBER.get_or_init(|| {
        Regex::new(r"([0-9]+)[\t\n\f\r ]*(段|樓)").expect("unit pattern compiles")
    })
}

const NUMERALS: [&str; 10] = ["〇", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// Rewrite Arabic section (段) and floor (樓) numbers as Chinese numerals.
///
/// Only 1 through 99 are rewritten; any other match, including numbers with a
/// leading zero, is left exactly as written.
pub fn normalize_address(address: &str) -> String {
    unit_number()
        .replace_all(address, |caps: &Captures| match chinese_numeral(&caps[1]) {
            Some(numeral) => format!("{numeral}{}", &caps[2]),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn chinese_numeral(arabic: &str) -> Option<String> {
    if arabic.starts_with('0') {
        return None;
    }

    let value: usize = arabic.parse().ok()?;
    let (tens, ones) = (value / 10, value % 10);
    let numeral = match value {
        1..=9 => NUMERALS[ones].to_string(),
        10..=19 if ones == 0 => "十".to_string(),
        10..=19 => format!("十{}", NUMERALS[ones]),
        20..=99 if ones == 0 => format!("{}十", NUMERALS[tens]),
        20..=99 => format!("{}十{}", NUMERALS[tens], NUMERALS[ones]),
        _ => return None,
    };
    Some(numeral)
}
