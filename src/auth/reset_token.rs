use rand::Rng;
use rand::distr::Alphanumeric;
use subtle::ConstantTimeEq;

pub const TOKEN_LEN: usize = 40;

/// Random alphanumeric reset token.
pub fn generate() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

pub fn matches(stored: &str, presented: &str) -> bool {
    stored.as_bytes().ct_eq(presented.as_bytes()).into()
}
