//! Random offer-code names.
//!
//! Names are drawn from lowercase ASCII letters and digits. The generator
//! re-draws while the candidate collides with an existing name, and refuses
//! to start when every name of the requested length is already taken.

use std::collections::HashSet;

use rand::Rng;

use crate::rest::GumroadError;

/// Default length of a generated offer code.
pub const DEFAULT_OFFER_CODE_LENGTH: usize = 32;

/// Characters an offer code is drawn from.
pub const OFFER_CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Draws a random offer code of `length` characters.
pub fn random_offer_code<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(OFFER_CODE_ALPHABET[rng.gen_range(0..OFFER_CODE_ALPHABET.len())]))
        .collect()
}

/// Draws codes from `draw` until one is not in `existing`.
///
/// # Errors
///
/// Returns [`GumroadError::InvalidOfferCodeLength`] for `length == 0`, and
/// [`GumroadError::OfferCodeSpaceExhausted`] when `existing` already holds
/// every possible code of that length.
pub fn generate_unique_offer_code<F>(
    existing: &HashSet<String>,
    length: usize,
    mut draw: F,
) -> Result<String, GumroadError>
where
    F: FnMut(usize) -> String,
{
    if length == 0 {
        return Err(GumroadError::InvalidOfferCodeLength);
    }

    let taken = existing
        .iter()
        .filter(|name| name.len() == length && name.bytes().all(|b| OFFER_CODE_ALPHABET.contains(&b)))
        .count();

    let alphabet_size = OFFER_CODE_ALPHABET.len();
    if alphabet_size.checked_pow(u32::try_from(length).unwrap_or(u32::MAX)).is_some_and(|space| taken >= space) {
        return Err(GumroadError::OfferCodeSpaceExhausted { length, taken });
    }

    let mut candidate = draw(length);
    while existing.contains(&candidate) {
        tracing::debug!("Offer code already exists: {}", candidate);
        candidate = draw(length);
    }

    tracing::info!("Generated new offer code: {}", candidate);
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_random_offer_code_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        let code = random_offer_code(&mut rng, DEFAULT_OFFER_CODE_LENGTH);

        assert_eq!(code.len(), 32);
        assert!(code.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[test]
    fn test_rerolls_past_collision() {
        let mut draws = vec!["abc", "xyz"].into_iter();
        let code = generate_unique_offer_code(&set(&["abc"]), 3, |_| {
            draws.next().unwrap().to_string()
        })
        .unwrap();

        assert_eq!(code, "xyz");
    }

    #[test]
    fn test_no_collision_returns_first_draw() {
        let mut calls = 0;
        let code = generate_unique_offer_code(&set(&["abc"]), 3, |_| {
            calls += 1;
            "q1w".to_string()
        })
        .unwrap();

        assert_eq!(code, "q1w");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_zero_length_rejected() {
        let result = generate_unique_offer_code(&HashSet::new(), 0, |_| String::new());
        assert!(matches!(result, Err(GumroadError::InvalidOfferCodeLength)));
    }

    #[test]
    fn test_exhausted_space_rejected() {
        let every_single_char: HashSet<String> = OFFER_CODE_ALPHABET
            .iter()
            .map(|b| char::from(*b).to_string())
            .collect();

        let result = generate_unique_offer_code(&every_single_char, 1, |_| "a".to_string());
        assert!(matches!(
            result,
            Err(GumroadError::OfferCodeSpaceExhausted { length: 1, taken: 36 })
        ));
    }

    #[test]
    fn test_names_outside_alphabet_do_not_count_as_taken() {
        let mut names: HashSet<String> = OFFER_CODE_ALPHABET[1..]
            .iter()
            .map(|b| char::from(*b).to_string())
            .collect();
        names.insert("A".to_string());
        names.insert("-".to_string());

        let mut rng = StdRng::seed_from_u64(1);
        let code = generate_unique_offer_code(&names, 1, |len| random_offer_code(&mut rng, len)).unwrap();
        assert_eq!(code, "a");
    }

    #[test]
    fn test_generated_code_never_in_existing_set() {
        let existing = set(&["aa", "ab", "ac", "ad"]);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let code = generate_unique_offer_code(&existing, 2, |len| random_offer_code(&mut rng, len)).unwrap();
            assert!(!existing.contains(&code));
            assert_eq!(code.len(), 2);
        }
    }
}
