use rand::Rng;

/// Excludes O, 0, I and 1 so codes survive being read aloud or handwritten.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LENGTH: usize = 8;

pub fn generate_referral_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

pub fn generate_referral_link(base_url: &str, code: &str) -> String {
    format!("{}/subscribe?ref={}", base_url, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_has_expected_length() {
        assert_eq!(generate_referral_code().len(), CODE_LENGTH);
    }

    #[test]
    fn code_never_contains_ambiguous_characters() {
        for _ in 0..200 {
            let code = generate_referral_code();
            assert!(
                !code.contains(['O', '0', 'I', '1']),
                "ambiguous character in {}",
                code
            );
        }
    }

    #[test]
    fn link_embeds_code() {
        let link = generate_referral_link("https://news.example.com", "ABCD2345");
        assert_eq!(link, "https://news.example.com/subscribe?ref=ABCD2345");
    }
}
