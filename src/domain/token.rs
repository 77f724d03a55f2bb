//! Random lowercase base-36 tokens (image ids, fallback identities).

use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Returns `len` characters drawn uniformly from `[0-9a-z]`.
pub fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_requested_length_in_alphabet() {
        let token = random_base36(13);
        assert_eq!(token.len(), 13);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn empty_token() {
        assert!(random_base36(0).is_empty());
    }
}
