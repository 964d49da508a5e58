use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TOKEN_LEN: usize = 8;

const TOKEN_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Eight upper-case alphanumeric characters issued when a purchase is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfirmationToken(String);

impl ConfirmationToken {
    /// Accepts lower case input and normalizes it.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let normalized = raw.trim().to_ascii_uppercase();

        let len = normalized.chars().count();
        if len != TOKEN_LEN {
            return Err(TokenError::InvalidLength(len));
        }
        if let Some(c) = normalized
            .chars()
            .find(|c| !c.is_ascii_digit() && !c.is_ascii_uppercase())
        {
            return Err(TokenError::InvalidCharacter(c));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ConfirmationToken {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ConfirmationToken> for String {
    fn from(token: ConfirmationToken) -> Self {
        token.0
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token must be 8 characters, got {0}")]
    InvalidLength(usize),

    #[error("Token contains invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("Token sequence is empty")]
    EmptySequence,
}

/// Source of confirmation tokens. Injected into the booking flow so tests can pin the output.
pub trait TokenGenerator: Send + Sync {
    fn generate_token(&self) -> ConfirmationToken;
}

/// Draws each character uniformly from `[0-9A-Z]` using the thread-local RNG.
/// Collisions are unlikely within a session but nothing guarantees uniqueness.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate_token(&self) -> ConfirmationToken {
        let mut rng = rand::thread_rng();
        let token = (0..TOKEN_LEN)
            .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
            .collect();
        ConfirmationToken(token)
    }
}

/// Hands out a fixed list of tokens in order, wrapping around at the end.
#[derive(Debug)]
pub struct SequenceTokenGenerator {
    tokens: Vec<ConfirmationToken>,
    next: AtomicUsize,
}

impl SequenceTokenGenerator {
    pub fn new(tokens: Vec<ConfirmationToken>) -> Result<Self, TokenError> {
        if tokens.is_empty() {
            return Err(TokenError::EmptySequence);
        }
        Ok(Self {
            tokens,
            next: AtomicUsize::new(0),
        })
    }

    pub fn from_strs(raw: &[&str]) -> Result<Self, TokenError> {
        let tokens = raw
            .iter()
            .map(|s| ConfirmationToken::parse(s))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tokens)
    }
}

impl TokenGenerator for SequenceTokenGenerator {
    fn generate_token(&self) -> ConfirmationToken {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.tokens.len();
        self.tokens[idx].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed(token: &ConfirmationToken) -> bool {
        token.as_str().len() == TOKEN_LEN
            && token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
    }

    #[test]
    fn test_random_tokens_are_well_formed() {
        let generator = RandomTokenGenerator;
        for _ in 0..500 {
            let token = generator.generate_token();
            assert!(well_formed(&token), "bad token {}", token);
        }
    }

    #[test]
    fn test_parse_normalizes_case() {
        let token = ConfirmationToken::parse("ab12cd34").unwrap();
        assert_eq!(token.as_str(), "AB12CD34");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(ConfirmationToken::parse("ABC123"), Err(TokenError::InvalidLength(6)));
        assert_eq!(ConfirmationToken::parse("ABC-1234"), Err(TokenError::InvalidCharacter('-')));
    }

    #[test]
    fn test_sequence_generator_wraps() {
        let generator = SequenceTokenGenerator::from_strs(&["AAAA1111", "BBBB2222"]).unwrap();

        assert_eq!(generator.generate_token().as_str(), "AAAA1111");
        assert_eq!(generator.generate_token().as_str(), "BBBB2222");
        assert_eq!(generator.generate_token().as_str(), "AAAA1111");
    }

    #[test]
    fn test_token_deserialization_validates() {
        let ok: ConfirmationToken = serde_json::from_str("\"zz99yy88\"").unwrap();
        assert_eq!(ok.as_str(), "ZZ99YY88");

        assert!(serde_json::from_str::<ConfirmationToken>("\"short\"").is_err());
    }
}
