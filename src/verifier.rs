//! The seed verifier boundary.
//!
//! The verifier service owns the actual cryptography: it generates fresh
//! seeds and checks seed phrases for well-formedness. This crate only talks
//! to it and interprets the answers.

pub mod http;

use crate::seed_words::NumberOfSeedWords;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifierError {
    /// The verifier authoritatively rejected the seed text. The only
    /// failure that marks a seed as suspect.
    #[error("seed rejected by verifier: {0}")]
    MalformedSeed(String),

    /// The verifier could not be reached. Treated as transient.
    #[error("verifier unreachable: {0}")]
    Transport(String),

    /// The verifier answered with something other than success or a seed
    /// rejection. Treated as transient.
    #[error("verifier returned unexpected status: {0}")]
    UnexpectedStatus(u16),
}

impl VerifierError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, VerifierError::MalformedSeed(_))
    }
}

#[async_trait::async_trait]
pub trait SeedVerifier: Send + Sync + std::fmt::Debug + 'static {
    /// Request a freshly generated seed with the given word count.
    async fn generate(&self, words: NumberOfSeedWords) -> Result<String, VerifierError>;

    /// Check a full seed phrase for well-formedness.
    async fn verify(&self, seed: &str) -> Result<(), VerifierError>;
}
