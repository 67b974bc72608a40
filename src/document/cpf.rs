//! CPF (Cadastro de Pessoas Físicas): 9 base digits followed by 2 check digits.

use super::{all_same, check_digit, digit_values};

pub const LEN: usize = 11;
const BASE_LEN: usize = 9;

/// Weights run 10..=2 for the first check digit and 11..=2 for the second.
fn weights(len: usize) -> impl Iterator<Item = u32> {
    (2..=(len as u32 + 1)).rev()
}

fn check_digits(base: &[u8]) -> [u8; 2] {
    let first = check_digit(&base[..BASE_LEN], weights(BASE_LEN));

    let mut with_first = base[..BASE_LEN].to_vec();
    with_first.push(first);
    let second = check_digit(&with_first, weights(BASE_LEN + 1));

    [first, second]
}

pub fn validate(input: &str) -> bool {
    let Some(digits) = digit_values(input, LEN) else {
        return false;
    };

    if all_same(&digits) {
        return false;
    }

    check_digits(&digits) == [digits[9], digits[10]]
}

/// `NNN.NNN.NNN-NN`, or `input` unchanged when it does not hold 11 digits.
pub fn format(input: &str) -> String {
    let digits = super::extract_digits(input);
    if digits.len() != LEN {
        return input.to_string();
    }

    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

/// Appends both check digits to a 9-digit base.
pub fn complete(base: &str) -> Option<String> {
    let digits = digit_values(base, BASE_LEN)?;
    let [first, second] = check_digits(&digits);

    let mut out = super::extract_digits(base);
    out.push(char::from(b'0' + first));
    out.push(char::from(b'0' + second));
    Some(out)
}
