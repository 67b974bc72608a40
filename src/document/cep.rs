//! CEP (Código de Endereçamento Postal) postal codes.

pub const LEN: usize = 8;

pub fn is_well_formed(input: &str) -> bool {
    super::extract_digits(input).len() == LEN
}

/// `NNNNN-NNN`, or `input` unchanged when it does not hold 8 digits.
pub fn format(input: &str) -> String {
    let digits = super::extract_digits(input);
    if digits.len() != LEN {
        return input.to_string();
    }

    format!("{}-{}", &digits[0..5], &digits[5..8])
}
