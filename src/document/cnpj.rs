//! CNPJ (Cadastro Nacional da Pessoa Jurídica): 12 base digits followed by 2 check digits.

use super::{all_same, check_digit, digit_values};

pub const LEN: usize = 14;
const BASE_LEN: usize = 12;

const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

fn check_digits(base: &[u8]) -> [u8; 2] {
    let first = check_digit(&base[..BASE_LEN], FIRST_WEIGHTS);

    let mut with_first = base[..BASE_LEN].to_vec();
    with_first.push(first);
    let second = check_digit(&with_first, SECOND_WEIGHTS);

    [first, second]
}

pub fn validate(input: &str) -> bool {
    let Some(digits) = digit_values(input, LEN) else {
        return false;
    };

    if all_same(&digits) {
        return false;
    }

    check_digits(&digits) == [digits[12], digits[13]]
}

/// `NN.NNN.NNN/NNNN-NN`, or `input` unchanged when it does not hold 14 digits.
pub fn format(input: &str) -> String {
    let digits = super::extract_digits(input);
    if digits.len() != LEN {
        return input.to_string();
    }

    format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    )
}

/// Appends both check digits to a 12-digit base.
pub fn complete(base: &str) -> Option<String> {
    let digits = digit_values(base, BASE_LEN)?;
    let [first, second] = check_digits(&digits);

    let mut out = super::extract_digits(base);
    out.push(char::from(b'0' + first));
    out.push(char::from(b'0' + second));
    Some(out)
}
