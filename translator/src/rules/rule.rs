//! A single rewrite rule and its compiled form.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{TranslateError, TranslateResult};

/// A pattern-to-replacement rewrite applied once per translation pass.
///
/// The replacement uses the `regex` crate's template syntax: `$1` or `${1}`
/// for indexed groups, `${name}` for named groups and `$$` for a literal `$`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Short identifier, used in reports and diagnostics
    pub name: String,

    /// Human-readable description of the recognized construct
    #[serde(default)]
    pub description: String,

    /// Regular expression matched against the whole script
    pub pattern: String,

    /// Replacement template
    #[serde(default)]
    pub replacement: String,
}

impl Rule {
    pub fn new(name: &str, pattern: &str, replacement: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Compile the pattern and check every capture reference in the replacement.
    pub fn compile(&self) -> TranslateResult<CompiledRule> {
        let regex = Regex::new(&self.pattern).map_err(|e| TranslateError::InvalidPattern {
            rule: self.name.clone(),
            message: e.to_string(),
        })?;

        for reference in capture_references(&self.replacement) {
            let known = match reference.parse::<usize>() {
                Ok(index) => index < regex.captures_len(),
                Err(_) => regex.capture_names().flatten().any(|n| n == reference),
            };
            if !known {
                return Err(TranslateError::UnknownCapture {
                    rule: self.name.clone(),
                    reference: reference.to_string(),
                });
            }
        }

        Ok(CompiledRule {
            name: self.name.clone(),
            regex,
            replacement: self.replacement.clone(),
        })
    }
}

/// A rule whose pattern has been compiled and whose template has been checked
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub regex: Regex,
    pub replacement: String,
}

impl CompiledRule {
    /// Replace every non-overlapping match, returning the new text and the match count.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let count = self.regex.find_iter(text).count();
        if count == 0 {
            return (text.to_string(), 0);
        }
        let replaced = self.regex.replace_all(text, self.replacement.as_str());
        (replaced.into_owned(), count)
    }
}

/// Extract group references from a replacement template.
///
/// Mirrors the expansion rules of `regex::Captures::expand`: `$$` escapes,
/// `${...}` is taken verbatim (any name, even an empty one), and a bare `$`
/// takes the longest run of `[_0-9a-zA-Z]`. A `$` followed by anything else
/// is literal.
fn capture_references(template: &str) -> Vec<&str> {
    let mut refs = Vec::new();
    let bytes = template.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1) {
            Some(b'$') => i += 2,
            Some(b'{') => match template[i + 2..].find('}') {
                Some(end) => {
                    refs.push(&template[i + 2..i + 2 + end]);
                    i += end + 3;
                }
                None => i += 1,
            },
            Some(_) => {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
                    end += 1;
                }
                if end > start {
                    refs.push(&template[start..end]);
                }
                i = end.max(start);
            }
            None => i += 1,
        }
    }

    refs
}
