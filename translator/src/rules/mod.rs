//! Rewrite rules for Postman to Bruno script translation
//!
//! - `rule`: a single pattern/replacement pair and its compiled form
//! - `set`: ordered rule sets, including the built-in Postman to Bruno set
//!
//! Rules are plain data and can be loaded from JSON:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "rules": [
//!     {"name": "size", "pattern": "pm\\.response\\.responseSize", "replacement": "res.getSize()"}
//!   ]
//! }
//! ```

pub mod rule;
pub mod set;

pub use rule::{CompiledRule, Rule};
pub use set::{rules_description, RuleSet};
