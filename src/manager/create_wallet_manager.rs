//! Top-level state holder for the wallet creation / recovery form.
//!
//! Owns the session state, mediates mode switches behind a destructive-action
//! confirmation, runs the word-by-word dialogs and composes the overall
//! "ready to submit" predicate out of the sync validators, the async seed
//! classification and the confirmation flags.

pub mod alert;
pub(crate) mod seed_watcher;
pub mod state;
pub(crate) mod stepper;

use std::sync::Arc;

use flume::{Receiver, Sender};
use parking_lot::RwLock;
use tracing::{debug, error, warn};

use crate::{
    form::{FormFields, WalletFormData},
    prompt::{ConfirmationParams, ConfirmationPrompt, WordPrompt},
    seed_words::NumberOfSeedWords,
    verifier::SeedVerifier,
};

use alert::FormAlert;
use seed_watcher::SeedWatcher;
use state::{CreateWalletManagerState, SeedEntryMode, State, WalletFormKind};
use stepper::{StepperOutcome, WordStepper};

type Action = CreateWalletManagerAction;
type Message = CreateWalletManagerReconcileMessage;

/// Tells the frontend to reconcile the manager changes
pub trait CreateWalletManagerReconciler: Send + Sync + std::fmt::Debug + 'static {
    fn reconcile(&self, message: Message);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateWalletManagerReconcileMessage {
    /// Generation rewrote the raw seed field.
    UpdateSeedField(String),
    EntryModeChanged(SeedEntryMode),
    /// Result of the latest async seed check.
    SeedClassified { normal: bool },
    AssistedSeedConfirmed,
    RecoverySeedAccepted(String),
    SetAlert(FormAlert),
    ClearAlert,
}

/// Action from the frontend to change the state of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateWalletManagerAction {
    UpdateLabel(String),
    UpdateSeed(String),
    UpdateConfirmSeed(String),
    UpdatePassword(String),
    UpdateConfirmPassword(String),
    UpdateNumberOfWords(usize),
    SetEncrypt(bool),
    SetCustomSeedAccepted(bool),
}

#[derive(Debug)]
pub struct CreateWalletManager {
    pub state: Arc<RwLock<CreateWalletManagerState>>,

    verifier: Arc<dyn SeedVerifier>,
    confirmation: Arc<dyn ConfirmationPrompt>,
    word_prompt: Arc<dyn WordPrompt>,

    reconciler: Sender<Message>,
    pub reconcile_receiver: Arc<Receiver<Message>>,

    watcher: RwLock<SeedWatcher>,
}

impl CreateWalletManager {
    pub fn new(
        verifier: Arc<dyn SeedVerifier>,
        confirmation: Arc<dyn ConfirmationPrompt>,
        word_prompt: Arc<dyn WordPrompt>,
        onboarding: bool,
    ) -> Self {
        let (sender, receiver) = flume::bounded(1000);
        let state = State::new(WalletFormKind::Create, onboarding).into_inner();

        let watcher = SeedWatcher::start(state.clone(), verifier.clone(), sender.clone());

        Self {
            state,
            verifier,
            confirmation,
            word_prompt,
            reconciler: sender,
            reconcile_receiver: Arc::new(receiver),
            watcher: RwLock::new(watcher),
        }
    }

    /// Start a fresh session, optionally restoring a previously entered
    /// snapshot.
    ///
    /// Creating with no snapshot immediately generates a 12 word seed. A
    /// snapshot is restored without re-running the word dialogs; its resolved
    /// seed is re-emitted into the validation stream instead.
    pub async fn initialize(&self, kind: WalletFormKind, data: Option<WalletFormData>) {
        self.clear_alert();

        // replace the validation stream wholesale, the old loop must not
        // report into the fresh session
        *self.watcher.write() =
            SeedWatcher::start(self.state.clone(), self.verifier.clone(), self.reconciler.clone());

        {
            let mut state = self.state.write();
            let onboarding = state.onboarding;
            *state = CreateWalletManagerState::new(kind, onboarding);
        }

        match data {
            Some(data) => self.restore(data),
            None if kind.is_create() => self.generate(NumberOfSeedWords::Twelve).await,
            None => {}
        }
    }

    fn restore(&self, data: WalletFormData) {
        let resolved_seed = data.seed;

        {
            let mut state = self.state.write();

            state.fields.label = data.label;
            state.fields.seed = data.last_custom_seed.clone();
            state.fields.confirm_seed = data.last_custom_seed;

            state.entry_mode = if data.enter_seed_with_assistance {
                SeedEntryMode::Assisted
            } else {
                SeedEntryMode::Custom
            };

            state.last_assisted_seed = data.last_assisted_seed;

            // a restored seed already went through confirmation in the
            // session that produced the snapshot
            state.custom_seed_accepted = true;
            state.assisted_seed_confirmed = true;

            if !state.onboarding {
                state.encrypt = data.password.is_some();
            }

            if let Some(password) = data.password {
                state.fields.password = password.clone();
                state.fields.confirm_password = password;
            }

            match state.kind {
                WalletFormKind::Create => state.generated_word_count = data.number_of_words,
                WalletFormKind::Recover => state.fields.number_of_words = data.number_of_words,
            }
        }

        // revalidate the restored seed without re-running the stepper
        self.watcher.read().push(&resolved_seed);
    }

    /// Request a fresh seed from the verifier and adopt it as the assisted
    /// seed. A newly generated seed has not been confirmed yet, so any prior
    /// confirmation flags are cleared.
    pub async fn generate(&self, words: NumberOfSeedWords) {
        self.state.write().generated_word_count = words.to_word_count();

        match self.verifier.generate(words).await {
            Ok(seed) => {
                {
                    let mut state = self.state.write();
                    state.last_assisted_seed = seed.clone();
                    state.fields.seed = seed.clone();
                }

                self.remove_confirmations(true);
                self.send(Message::UpdateSeedField(seed));
            }

            Err(error) => {
                error!("unable to generate a seed: {error}");
                self.set_alert(FormAlert::GenerationFailed);
            }
        }
    }

    /// Switch between assisted and custom seed entry.
    ///
    /// Switching into assisted entry is immediate. Switching out abandons the
    /// previously generated or verified seed, so it only happens after the
    /// user explicitly confirms; declining leaves the mode unchanged.
    pub async fn request_mode_switch(&self, to_assisted: bool) {
        self.clear_alert();

        let (entry_mode, kind) = {
            let state = self.state.read();
            (state.entry_mode, state.kind)
        };

        if to_assisted {
            if entry_mode.is_assisted() {
                return;
            }

            self.state.write().entry_mode = SeedEntryMode::Assisted;
            self.remove_confirmations(true);
            self.send(Message::EntryModeChanged(SeedEntryMode::Assisted));
            return;
        }

        if !entry_mode.is_assisted() {
            return;
        }

        if !self.confirmation.confirm(custom_seed_warning(kind)).await {
            debug!("switch to custom seed entry declined");
            return;
        }

        self.state.write().entry_mode = SeedEntryMode::Custom;
        self.remove_confirmations(true);
        self.send(Message::EntryModeChanged(SeedEntryMode::Custom));
    }

    /// Step through the generated seed one word at a time until the user has
    /// re-entered every word correctly.
    pub async fn confirm_generated_seed(&self) {
        let (kind, confirmed, total, reference) = {
            let state = self.state.read();
            (
                state.kind,
                state.assisted_seed_confirmed,
                state.generated_word_count,
                state.last_assisted_seed.clone(),
            )
        };

        if !kind.is_create() || confirmed {
            return;
        }

        self.clear_alert();

        let stepper = WordStepper::new(self.word_prompt.clone(), self.reconciler.clone());
        if stepper.run(total, Some(&reference)).await == StepperOutcome::Confirmed {
            self.state.write().assisted_seed_confirmed = true;
            self.send(Message::AssistedSeedConfirmed);
        }
    }

    /// Collect a recovery seed one word at a time and hand the assembled
    /// phrase to the verifier. Only a verified phrase is adopted.
    pub async fn enter_recovery_seed(&self) {
        let (kind, total) = {
            let state = self.state.read();
            (state.kind, state.fields.number_of_words)
        };

        if kind.is_create() {
            return;
        }

        self.clear_alert();

        let stepper = WordStepper::new(self.word_prompt.clone(), self.reconciler.clone());
        let phrase = match stepper.run(total, None).await {
            StepperOutcome::Entered(phrase) => phrase,
            StepperOutcome::Confirmed | StepperOutcome::Cancelled => return,
        };

        match self.verifier.verify(&phrase).await {
            Ok(()) => {
                self.state.write().last_assisted_seed = phrase.clone();
                self.send(Message::RecoverySeedAccepted(phrase));
            }

            Err(error) => {
                debug!("entered recovery seed failed verification: {error}");
                self.set_alert(FormAlert::InvalidSeed);
            }
        }
    }

    /// Action from the frontend to change the state of the form
    pub fn dispatch(&self, action: Action) {
        match action {
            Action::UpdateLabel(label) => self.update_field(|fields| fields.label = label),
            Action::UpdateSeed(seed) => self.update_field(|fields| fields.seed = seed),
            Action::UpdateConfirmSeed(seed) => {
                self.update_field(|fields| fields.confirm_seed = seed)
            }
            Action::UpdatePassword(password) => {
                self.update_field(|fields| fields.password = password)
            }
            Action::UpdateConfirmPassword(password) => {
                self.update_field(|fields| fields.confirm_password = password)
            }
            Action::UpdateNumberOfWords(count) => {
                self.update_field(|fields| fields.number_of_words = count)
            }

            Action::SetEncrypt(encrypt) => {
                self.state.write().encrypt = encrypt;
                self.on_fields_changed();
            }

            Action::SetCustomSeedAccepted(accepted) => {
                self.state.write().custom_seed_accepted = accepted;
            }
        }
    }

    /// Whether the current seed is trustworthy and the form complete.
    pub fn is_acceptable(&self) -> bool {
        let state = self.state.read();

        if !state.sync_valid() {
            return false;
        }

        match state.entry_mode {
            SeedEntryMode::Custom => state.custom_seed_is_normal || state.custom_seed_accepted,

            SeedEntryMode::Assisted => match state.kind {
                WalletFormKind::Create => state.assisted_seed_confirmed,
                // a non-trivial seed went through the stepper or a restore
                WalletFormKind::Recover => state.last_assisted_seed.len() > 2,
            },
        }
    }

    /// Immutable snapshot of the form for submission or later restore.
    pub fn snapshot(&self) -> WalletFormData {
        let state = self.state.read();

        WalletFormData {
            creating_new_wallet: state.kind.is_create(),
            label: state.fields.label.clone(),
            seed: state.resolved_seed().to_string(),
            password: (!state.onboarding && state.encrypt)
                .then(|| state.fields.password.clone()),
            enter_seed_with_assistance: state.entry_mode.is_assisted(),
            last_assisted_seed: state.last_assisted_seed.clone(),
            last_custom_seed: state.fields.seed.clone(),
            number_of_words: match state.kind {
                WalletFormKind::Create => state.generated_word_count,
                WalletFormKind::Recover => state.fields.number_of_words,
            },
        }
    }

    pub fn get_state(&self) -> CreateWalletManagerState {
        self.state.read().clone()
    }

    pub fn listen_for_updates(&self, reconciler: Box<dyn CreateWalletManagerReconciler>) {
        let reconcile_receiver = self.reconcile_receiver.clone();

        tokio::spawn(async move {
            while let Ok(message) = reconcile_receiver.recv_async().await {
                // call the reconcile method on the frontend
                reconciler.reconcile(message);
            }
        });
    }

    fn update_field(&self, update: impl FnOnce(&mut FormFields)) {
        update(&mut self.state.write().fields);
        self.on_fields_changed();
    }

    /// Any edit invalidates a previous acceptance and revalidates the seed.
    fn on_fields_changed(&self) {
        self.state.write().custom_seed_accepted = false;
        self.revalidate();
    }

    fn remove_confirmations(&self, clean_confirm_seed: bool) {
        {
            let mut state = self.state.write();
            state.custom_seed_accepted = false;
            state.assisted_seed_confirmed = false;

            if clean_confirm_seed {
                state.fields.confirm_seed.clear();
            }
        }

        self.revalidate();
    }

    fn revalidate(&self) {
        let seed = self.state.read().fields.seed.clone();
        self.watcher.read().push(&seed);
    }

    fn set_alert(&self, alert: FormAlert) {
        self.send(Message::SetAlert(alert));
    }

    fn clear_alert(&self) {
        self.send(Message::ClearAlert);
    }

    fn send(&self, message: Message) {
        debug!("reconcile: {message:?}");

        if let Err(error) = self.reconciler.try_send(message) {
            warn!("unable to send reconcile message: {error}");
        }
    }
}

fn custom_seed_warning(kind: WalletFormKind) -> ConfirmationParams {
    let text = if kind.is_create() {
        "A custom seed is not checked for mistakes. If you lose it or mistype it, \
         you will not be able to recover your wallet."
    } else {
        "You are about to abandon the seed entered with assistance and type the \
         full seed yourself."
    };

    ConfirmationParams {
        header_text: "Use a custom seed?".to_string(),
        text: text.to_string(),
        checkbox_text: kind
            .is_create()
            .then(|| "I understand the risks of using a custom seed".to_string()),
        confirm_button_text: "Continue".to_string(),
        cancel_button_text: "Cancel".to_string(),
    }
}
