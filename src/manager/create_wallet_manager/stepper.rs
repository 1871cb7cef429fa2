use std::sync::Arc;

use flume::Sender;
use tracing::debug;

use super::CreateWalletManagerReconcileMessage;
use super::alert::FormAlert;
use crate::prompt::WordPrompt;

type Message = CreateWalletManagerReconcileMessage;

/// Outcome of one word-by-word pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StepperOutcome {
    /// Every word matched the generated seed.
    Confirmed,
    /// The full phrase as entered, joined with single spaces.
    Entered(String),
    /// A word dialog was dismissed; partial input is discarded.
    Cancelled,
}

/// Drives the strictly sequential word-entry dialogs. Created per run and
/// discarded with it; the next prompt only opens once the previous one has
/// resolved.
#[derive(Debug)]
pub(crate) struct WordStepper {
    prompt: Arc<dyn WordPrompt>,
    reconciler: Sender<Message>,
}

impl WordStepper {
    pub fn new(prompt: Arc<dyn WordPrompt>, reconciler: Sender<Message>) -> Self {
        Self { prompt, reconciler }
    }

    /// Ask for `total_words` words, one dialog at a time.
    ///
    /// With a reference seed each entered word must match the reference word
    /// at the current position; a mismatch keeps the run at the same position
    /// so the user can retry. Without a reference every word is accepted.
    pub async fn run(&self, total_words: usize, reference: Option<&str>) -> StepperOutcome {
        let reference_words: Option<Vec<&str>> =
            reference.map(|seed| seed.split_whitespace().collect());

        let mut collected: Vec<String> = Vec::with_capacity(total_words);

        while collected.len() < total_words {
            let index = collected.len();

            let Some(word) = self.prompt.ask(index + 1, reference.is_none()).await else {
                debug!("word entry cancelled at position {}", index + 1);
                return StepperOutcome::Cancelled;
            };

            if let Some(words) = &reference_words {
                let expected = words.get(index).copied().unwrap_or_default();
                if word != expected {
                    self.reconciler.try_send(Message::SetAlert(FormAlert::IncorrectWord)).ok();
                    continue;
                }
            }

            collected.push(word);
        }

        match reference_words {
            Some(_) => StepperOutcome::Confirmed,
            None => StepperOutcome::Entered(collected.join(" ").trim().to_string()),
        }
    }
}
