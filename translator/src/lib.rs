//! # Bruno Translator - Postman scripts to Bruno scripts
//!
//! Rewrites Postman `pm.*` test and variable calls into their Bruno
//! equivalents with an ordered list of regex rules. Anything the rules do not
//! recognize is copied through unchanged.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  pm.* code  │────▶│  Rule pass  │────▶│  bru/res    │
//! │  (editor)   │     │  (ordered)  │     │  code       │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                        │
//!        ▼                                        ▼
//!   last-input store                    diagnostics on failure
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use bruno_translator::translate;
//!
//! let bruno = translate("pm.expect(pm.response.responseTime).to.be.below(500);");
//! assert_eq!(bruno, "expect(res.getResponseTime()).to.be.below(500);");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`rules`] - Rule data model and the built-in rule set
//! - [`translator`] - The translation pass
//! - [`store`] - Last-input persistence
//! - [`session`] - Headless editor session
//! - [`config`] - Environment configuration
//! - [`diagnostics`] - Diagnostic channel

// Core modules
pub mod error;
pub mod rules;
pub mod translator;

// Editor support
pub mod session;
pub mod store;

// Ambient
pub mod config;
pub mod diagnostics;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CliError, StoreError, TranslateError};

// =============================================================================
// Re-exports - Rules
// =============================================================================

pub use rules::{rules_description, CompiledRule, Rule, RuleSet};

// =============================================================================
// Re-exports - Translator
// =============================================================================

pub use translator::{translate, translate_lines, translate_with, Outcome, RuleHit, Translation, Translator};

// =============================================================================
// Re-exports - Store and session
// =============================================================================

pub use session::Session;
pub use store::{ScriptBody, ScriptStore, StoredScript, LAST_INPUT_KEY, PLACEHOLDER_SCRIPT};

pub use config::TranslatorConfig;
