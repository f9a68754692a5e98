//! GTIN-14 structure and GS1 Modulus-10 check digit.

/// Number of digits in a GTIN-14.
pub const GTIN14_LEN: usize = 14;

/// Compute the GS1 Modulus-10 check digit for the first 13 digits of a
/// GTIN-14.
///
/// Weights alternate 3,1,3,… starting from the leftmost payload digit.
/// Returns `None` unless `payload` is exactly 13 ASCII digits.
pub fn gtin14_check_digit(payload: &str) -> Option<u8> {
    let bytes = payload.as_bytes();
    if bytes.len() != GTIN14_LEN - 1 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(check_digit_of(bytes))
}

fn check_digit_of(payload: &[u8]) -> u8 {
    let sum: u32 = payload
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 { digit * 3 } else { digit }
        })
        .sum();
    // sum % 10 < 10, so the result fits in a u8
    ((10 - sum % 10) % 10) as u8
}

/// Check that `input` is a structurally valid GTIN-14 with a matching check
/// digit.
///
/// Whitespace anywhere in the input is ignored. Any other malformation
/// (wrong length, non-digit characters, empty input) yields `false`.
pub fn validate_gtin14(input: &str) -> bool {
    let cleaned: Vec<u8> = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c.is_ascii() { c as u8 } else { b'x' })
        .collect();
    if cleaned.len() != GTIN14_LEN || !cleaned.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let (payload, check) = cleaned.split_at(GTIN14_LEN - 1);
    check[0] - b'0' == check_digit_of(payload)
}

/// The digits of a valid GTIN-14 with all whitespace removed, or `None`
/// when `input` does not validate.
pub fn normalize_gtin14(input: &str) -> Option<String> {
    validate_gtin14(input).then(|| input.chars().filter(|c| !c.is_whitespace()).collect())
}
