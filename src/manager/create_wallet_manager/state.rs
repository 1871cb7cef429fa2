use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::form::{self, FormFields};

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, strum::Display)]
pub enum WalletFormKind {
    Create,
    Recover,
}

impl WalletFormKind {
    pub const fn is_create(self) -> bool {
        matches!(self, WalletFormKind::Create)
    }
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, strum::Display)]
pub enum SeedEntryMode {
    /// The seed is generated (create) or entered word by word (recovery)
    /// through the guided dialogs.
    Assisted,
    /// The user types the full seed into the field.
    Custom,
}

impl SeedEntryMode {
    pub const fn is_assisted(self) -> bool {
        matches!(self, SeedEntryMode::Assisted)
    }
}

#[derive(Debug, Clone, derive_more::Deref)]
pub struct State(Arc<RwLock<CreateWalletManagerState>>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWalletManagerState {
    pub kind: WalletFormKind,
    pub onboarding: bool,
    pub encrypt: bool,

    pub entry_mode: SeedEntryMode,
    /// True only right after the user acknowledged a flagged custom seed;
    /// any further edit resets it.
    pub custom_seed_accepted: bool,
    /// Optimistic until the verifier says otherwise.
    pub custom_seed_is_normal: bool,
    pub assisted_seed_confirmed: bool,

    pub generated_word_count: usize,
    /// The authoritative generated-or-verified seed text.
    pub last_assisted_seed: String,

    pub fields: FormFields,
}

/// MARK: State
impl State {
    pub fn new(kind: WalletFormKind, onboarding: bool) -> Self {
        Self(Arc::new(RwLock::new(CreateWalletManagerState::new(kind, onboarding))))
    }

    pub fn into_inner(self) -> Arc<RwLock<CreateWalletManagerState>> {
        self.0
    }

    pub fn read(&self) -> RwLockReadGuard<'_, CreateWalletManagerState> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, CreateWalletManagerState> {
        self.0.write()
    }
}

/// MARK: CreateWalletManagerState
impl CreateWalletManagerState {
    pub fn new(kind: WalletFormKind, onboarding: bool) -> Self {
        Self {
            kind,
            onboarding,
            encrypt: true,
            entry_mode: SeedEntryMode::Assisted,
            custom_seed_accepted: false,
            custom_seed_is_normal: true,
            assisted_seed_confirmed: false,
            generated_word_count: 0,
            last_assisted_seed: String::new(),
            fields: FormFields::new(),
        }
    }

    pub fn sync_valid(&self) -> bool {
        form::sync_valid(
            &self.fields,
            self.entry_mode.is_assisted(),
            self.encrypt,
            self.onboarding,
            !self.kind.is_create(),
        )
    }

    /// The seed a submission would use right now.
    pub fn resolved_seed(&self) -> &str {
        if self.entry_mode.is_assisted() { &self.last_assisted_seed } else { &self.fields.seed }
    }
}

impl From<CreateWalletManagerState> for State {
    fn from(state: CreateWalletManagerState) -> Self {
        Self(Arc::new(RwLock::new(state)))
    }
}

impl From<Arc<RwLock<CreateWalletManagerState>>> for State {
    fn from(state: Arc<RwLock<CreateWalletManagerState>>) -> Self {
        Self(state)
    }
}
