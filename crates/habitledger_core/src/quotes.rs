//! Motivational quote picker.

const QUOTES: [&str; 5] = [
    "Believe you can and you're halfway there.",
    "Don't watch the clock; do what it does. Keep going.",
    "The future depends on what we do in the present.",
    "You are never too old to set another goal or to dream a new dream.",
    "Act as if what you do makes a difference. It does.",
];

/// Picks a quote at random. Falls back to the first quote when system
/// randomness is unavailable.
pub fn motivational_quote() -> &'static str {
    let mut byte = [0u8; 1];
    if getrandom::getrandom(&mut byte).is_err() {
        return QUOTES[0];
    }
    QUOTES[usize::from(byte[0]) % QUOTES.len()]
}

/// The full quote pool, in fixed order.
pub fn quotes() -> &'static [&'static str] {
    &QUOTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picked_quote_comes_from_the_pool() {
        for _ in 0..32 {
            assert!(quotes().contains(&motivational_quote()));
        }
    }

    #[test]
    fn pool_is_five_non_empty_quotes() {
        assert_eq!(quotes().len(), 5);
        assert!(quotes().iter().all(|quote| !quote.is_empty()));
    }
}
