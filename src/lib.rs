//! Seed acquisition and verification workflow for wallet creation and
//! recovery.
//!
//! Reconciles three seed input modes — a generated seed confirmed word by
//! word, a manually typed custom seed revalidated asynchronously on every
//! edit, and word-by-word recovery entry — into one always-revalidated
//! "ready to submit" answer. The actual seed generation and checksum
//! validation live behind the [`verifier::SeedVerifier`] boundary; dialogs
//! live behind the [`prompt`] traits.

pub(crate) mod macros;

pub mod form;
pub mod logging;
pub mod manager;
pub mod prompt;
pub mod seed_words;
pub mod task;
pub mod verifier;
