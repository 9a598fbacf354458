//! Headless editor session.
//!
//! Mirrors the translator widget: the input pane is restored from the store,
//! every edit is persisted and retranslated, and the output pane always shows
//! the translation of the latest input.

use crate::error::TranslateResult;
use crate::rules::RuleSet;
use crate::store::ScriptStore;
use crate::translator::{Translation, Translator};

pub struct Session {
    store: ScriptStore,
    translator: Translator,
    input: String,
    translation: Translation,
}

impl Session {
    /// Restore the last input and translate it with the built-in rules
    pub fn restore(store: ScriptStore) -> TranslateResult<Self> {
        Self::restore_with(store, &RuleSet::postman_to_bruno())
    }

    /// Restore the last input and translate it with a custom rule set
    pub fn restore_with(store: ScriptStore, rules: &RuleSet) -> TranslateResult<Self> {
        let translator = Translator::new(rules)?;
        let input = store.load_or_default();
        let translation = translator.translate(&input);
        Ok(Self { store, translator, input, translation })
    }

    /// Replace the input, persist it and return the new output
    pub fn set_input(&mut self, code: &str) -> &str {
        self.store.save_or_warn(code);
        self.input = code.to_string();
        self.translation = self.translator.translate(&self.input);
        &self.translation.script
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.translation.script
    }

    pub fn translation(&self) -> &Translation {
        &self.translation
    }
}
