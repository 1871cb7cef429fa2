//! Dialog boundaries. The frontend owns the presentation; the managers only
//! ask questions and wait for answers.

/// Everything a confirmation dialog needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationParams {
    pub header_text: String,
    pub text: String,
    /// When set, the dialog shows a checkbox the user must tick before the
    /// confirm button is enabled.
    pub checkbox_text: Option<String>,
    pub confirm_button_text: String,
    pub cancel_button_text: String,
}

/// Asks the user to confirm a destructive action before it happens.
#[async_trait::async_trait]
pub trait ConfirmationPrompt: Send + Sync + std::fmt::Debug + 'static {
    /// Returns true only on explicit confirmation; dismissing the dialog
    /// counts as declining.
    async fn confirm(&self, params: ConfirmationParams) -> bool;
}

/// Asks the user for a single seed word.
#[async_trait::async_trait]
pub trait WordPrompt: Send + Sync + std::fmt::Debug + 'static {
    /// `word_number` is 1-indexed, as the dialog displays it. Returns `None`
    /// when the dialog is dismissed without entering a word.
    async fn ask(&self, word_number: usize, recovering: bool) -> Option<String>;
}
