//! Form fields, the submission snapshot and the synchronous validators.
//!
//! The validators are pure functions over [`FormFields`] plus the few session
//! flags that change which checks apply. They return `None` when the check
//! passes, mirroring how the frontend surfaces them as inline field errors.

use serde::{Deserialize, Serialize};

use crate::impl_default_for;

/// Local, synchronous form errors surfaced inline next to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FieldError {
    #[error("a value is required")]
    Required,

    #[error("the values do not match")]
    NotEqual,
}

/// The user-editable form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub label: String,
    pub seed: String,
    pub confirm_seed: String,
    pub password: String,
    pub confirm_password: String,
    pub number_of_words: usize,
}

impl_default_for!(FormFields);

impl FormFields {
    pub fn new() -> Self {
        Self {
            label: String::new(),
            seed: String::new(),
            confirm_seed: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            number_of_words: 12,
        }
    }
}

/// Immutable snapshot of the form, produced for submission and restorable
/// through `CreateWalletManager::initialize`. The only persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletFormData {
    pub creating_new_wallet: bool,
    pub label: String,
    /// Resolved seed: the assisted-mode seed when assisted, else the raw
    /// custom seed field.
    pub seed: String,
    /// `None` when not encrypting or when onboarding.
    pub password: Option<String>,
    pub enter_seed_with_assistance: bool,
    pub last_assisted_seed: String,
    pub last_custom_seed: String,
    pub number_of_words: usize,
}

/// In custom entry the seed must be typed twice; assisted entry skips the
/// check entirely.
pub fn seed_match(fields: &FormFields, assisted: bool) -> Option<FieldError> {
    if assisted {
        return None;
    }

    if fields.seed == fields.confirm_seed { None } else { Some(FieldError::NotEqual) }
}

/// Password checks apply only when the wallet will be encrypted and the form
/// is not embedded in onboarding.
pub fn passwords(fields: &FormFields, encrypt: bool, onboarding: bool) -> Option<FieldError> {
    if !encrypt || onboarding {
        return None;
    }

    if fields.password.is_empty() {
        return Some(FieldError::Required);
    }

    if fields.password != fields.confirm_password {
        return Some(FieldError::NotEqual);
    }

    None
}

/// A custom seed has to actually be there.
pub fn seed_presence(fields: &FormFields, assisted: bool) -> Option<FieldError> {
    if assisted {
        return None;
    }

    if fields.seed.is_empty() { Some(FieldError::Required) } else { None }
}

/// Overall synchronous validity of the form.
pub fn sync_valid(
    fields: &FormFields,
    assisted: bool,
    encrypt: bool,
    onboarding: bool,
    recovering: bool,
) -> bool {
    if fields.label.is_empty() {
        return false;
    }

    if recovering && fields.number_of_words == 0 {
        return false;
    }

    seed_match(fields, assisted).is_none()
        && passwords(fields, encrypt, onboarding).is_none()
        && seed_presence(fields, assisted).is_none()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fields() -> FormFields {
        FormFields { label: "main wallet".to_string(), ..FormFields::new() }
    }

    #[test]
    fn seed_match_is_skipped_in_assisted_entry() {
        let mut fields = fields();
        fields.seed = "foo".to_string();
        fields.confirm_seed = "bar".to_string();

        assert_eq!(seed_match(&fields, true), None);
        assert_eq!(seed_match(&fields, false), Some(FieldError::NotEqual));

        fields.confirm_seed = "foo".to_string();
        assert_eq!(seed_match(&fields, false), None);
    }

    #[test]
    fn passwords_require_a_value_and_a_matching_confirmation() {
        let mut fields = fields();

        assert_eq!(passwords(&fields, true, false), Some(FieldError::Required));

        fields.password = "hunter2".to_string();
        assert_eq!(passwords(&fields, true, false), Some(FieldError::NotEqual));

        fields.confirm_password = "hunter2".to_string();
        assert_eq!(passwords(&fields, true, false), None);
    }

    #[test]
    fn passwords_are_ignored_when_not_encrypting_or_onboarding() {
        let fields = fields();

        assert_eq!(passwords(&fields, false, false), None);
        assert_eq!(passwords(&fields, true, true), None);
    }

    #[test]
    fn a_custom_seed_must_be_present() {
        let mut fields = fields();

        assert_eq!(seed_presence(&fields, false), Some(FieldError::Required));
        assert_eq!(seed_presence(&fields, true), None);

        fields.seed = "some seed".to_string();
        assert_eq!(seed_presence(&fields, false), None);
    }

    #[test]
    fn sync_validity_needs_a_label() {
        let mut fields = fields();
        fields.label = String::new();

        assert!(!sync_valid(&fields, true, false, false, false));
    }

    #[test]
    fn sync_validity_in_custom_entry() {
        let mut fields = fields();
        fields.seed = "foo".to_string();
        fields.confirm_seed = "bar".to_string();

        // mismatched seed fields keep the form invalid
        assert!(!sync_valid(&fields, false, false, false, false));

        fields.confirm_seed = "foo".to_string();
        assert!(sync_valid(&fields, false, false, false, false));
    }

    #[test]
    fn recovery_requires_a_word_count() {
        let mut fields = fields();
        fields.number_of_words = 0;

        assert!(!sync_valid(&fields, true, false, false, true));

        fields.number_of_words = 24;
        assert!(sync_valid(&fields, true, false, false, true));
    }

    #[test]
    fn wallet_form_data_round_trips_through_json() {
        let data = WalletFormData {
            creating_new_wallet: true,
            label: "main wallet".to_string(),
            seed: "one two three".to_string(),
            password: Some("hunter2".to_string()),
            enter_seed_with_assistance: true,
            last_assisted_seed: "one two three".to_string(),
            last_custom_seed: String::new(),
            number_of_words: 12,
        };

        let json = serde_json::to_string(&data).expect("serializes");
        let parsed: WalletFormData = serde_json::from_str(&json).expect("deserializes");

        assert_eq!(parsed, data);
    }
}
