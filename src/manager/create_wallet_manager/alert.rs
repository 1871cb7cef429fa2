/// User-facing error banner values, surfaced over the reconcile channel and
/// cleared on initialization, mode switches and stepper starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FormAlert {
    /// Create-mode stepper: the entered word does not match the generated
    /// seed at the current position.
    #[error("the entered word is not correct")]
    IncorrectWord,

    /// Recovery stepper: the assembled phrase failed verification.
    #[error("the entered seed is not valid")]
    InvalidSeed,

    /// The verifier could not produce a fresh seed.
    #[error("unable to generate a new seed")]
    GenerationFailed,
}
