//! Deterministic slug generation.
//!
//! A slug is a prefix of the lowercase hex SHA-256 digest of the input, so
//! shortening the same URL twice always yields the same slug without any
//! coordination between instances.

use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Supported slug lengths, in hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlugLength {
    Seven,
    #[default]
    Eight,
}

impl SlugLength {
    pub fn chars(self) -> usize {
        match self {
            SlugLength::Seven => 7,
            SlugLength::Eight => 8,
        }
    }
}

impl fmt::Display for SlugLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chars())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("slug length must be 7 or 8, got '{0}'")]
pub struct InvalidSlugLength(String);

impl FromStr for SlugLength {
    type Err = InvalidSlugLength;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7" => Ok(SlugLength::Seven),
            "8" => Ok(SlugLength::Eight),
            other => Err(InvalidSlugLength(other.to_string())),
        }
    }
}

/// Maps a seed (the primary URL) to its slug.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugGenerator {
    length: SlugLength,
}

impl SlugGenerator {
    pub fn new(length: SlugLength) -> Self {
        Self { length }
    }

    pub fn length(&self) -> SlugLength {
        self.length
    }

    /// Returns the slug for `seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use split_shortener::utils::slug_generator::{SlugGenerator, SlugLength};
    ///
    /// let generator = SlugGenerator::new(SlugLength::Eight);
    /// assert_eq!(generator.generate("https://example.com"), "100680ad");
    /// ```
    pub fn generate(&self, seed: &str) -> String {
        let digest = Sha256::digest(seed.as_bytes());
        let mut slug = hex::encode(digest);
        slug.truncate(self.length.chars());
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_is_deterministic() {
        let generator = SlugGenerator::default();

        assert_eq!(
            generator.generate("https://example.com/a"),
            generator.generate("https://example.com/a")
        );
    }

    #[test]
    fn test_generate_known_digest_prefix() {
        // sha256("abc") = ba7816bf8f01cfea...
        assert_eq!(SlugGenerator::new(SlugLength::Eight).generate("abc"), "ba7816bf");
        assert_eq!(SlugGenerator::new(SlugLength::Seven).generate("abc"), "ba7816b");
    }

    #[test]
    fn test_generate_respects_length() {
        let seven = SlugGenerator::new(SlugLength::Seven).generate("https://rust-lang.org");
        let eight = SlugGenerator::new(SlugLength::Eight).generate("https://rust-lang.org");

        assert_eq!(seven.len(), 7);
        assert_eq!(eight.len(), 8);
        assert!(eight.starts_with(&seven));
    }

    #[test]
    fn test_generate_lowercase_hex_only() {
        let slug = SlugGenerator::default().generate("HTTPS://EXAMPLE.COM/Path?Q=1");
        assert!(slug.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn test_generate_distinct_inputs_distinct_slugs() {
        let generator = SlugGenerator::default();
        let slugs: HashSet<String> = (0..1000)
            .map(|i| generator.generate(&format!("https://example.com/page/{i}")))
            .collect();

        assert_eq!(slugs.len(), 1000);
    }

    #[test]
    fn test_generate_empty_seed() {
        // sha256("") = e3b0c442...
        assert_eq!(SlugGenerator::default().generate(""), "e3b0c442");
    }

    #[test]
    fn test_slug_length_from_str() {
        assert_eq!("7".parse::<SlugLength>().unwrap(), SlugLength::Seven);
        assert_eq!("8".parse::<SlugLength>().unwrap(), SlugLength::Eight);
        assert!("6".parse::<SlugLength>().is_err());
        assert!("eight".parse::<SlugLength>().is_err());
    }
}
