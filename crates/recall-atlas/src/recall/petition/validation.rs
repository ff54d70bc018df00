use std::sync::OnceLock;

use regex::Regex;

static MOBILE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn mobile_pattern() -> &'static Regex {
    MOBILE_PATTERN.get_or_init(|| Regex::new(r"^09[0-9]{8}$").expect("mobile pattern compiles"))
}

/// `09` followed by eight more ASCII digits.
pub fn is_valid_mobile_number(text: &str) -> bool {
    mobile_pattern().is_match(text)
}

// Not alphabetical: the issuing-region codes put W after Y and I, O last.
const LETTER_CODES: [(u8, u32); 26] = [
    (b'A', 10),
    (b'B', 11),
    (b'C', 12),
    (b'D', 13),
    (b'E', 14),
    (b'F', 15),
    (b'G', 16),
    (b'H', 17),
    (b'J', 18),
    (b'K', 19),
    (b'L', 20),
    (b'M', 21),
    (b'N', 22),
    (b'P', 23),
    (b'Q', 24),
    (b'R', 25),
    (b'S', 26),
    (b'T', 27),
    (b'U', 28),
    (b'V', 29),
    (b'X', 30),
    (b'Y', 31),
    (b'W', 32),
    (b'Z', 33),
    (b'I', 34),
    (b'O', 35),
];

const CHECKSUM_WEIGHTS: [u32; 11] = [1, 9, 8, 7, 6, 5, 4, 3, 2, 1, 1];

fn letter_code(letter: u8) -> Option<u32> {
    LETTER_CODES
        .iter()
        .find(|(candidate, _)| *candidate == letter)
        .map(|&(_, code)| code)
}

/// National identification number checksum.
///
/// The leading letter expands to two digits, the nine remaining characters
/// must be digits, and the weighted sum of all eleven must be a multiple of 10.
pub fn is_valid_national_id(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 10 {
        return false;
    }

    let Some(code) = letter_code(bytes[0]) else {
        return false;
    };

    let mut digits = [0u32; 11];
    digits[0] = code / 10;
    digits[1] = code % 10;
    for (slot, &byte) in digits[2..].iter_mut().zip(&bytes[1..]) {
        if !byte.is_ascii_digit() {
            return false;
        }
        *slot = u32::from(byte - b'0');
    }

    let checksum: u32 = digits
        .iter()
        .zip(CHECKSUM_WEIGHTS)
        .map(|(digit, weight)| digit * weight)
        .sum();
    checksum % 10 == 0
}
