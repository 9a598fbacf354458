//! The translation pass.
//!
//! A [`Translator`] holds compiled rules and runs each one, in order, over the
//! text produced by the previous rule. It fails soft: whatever goes wrong, the
//! caller gets a string back and the failure goes to the diagnostic channel.
//!
//! ```rust
//! use bruno_translator::translate;
//!
//! let out = translate(r#"pm.environment.set("token", res.body.token);"#);
//! assert_eq!(out, r#"bru.setEnvVar("token", res.body.token);"#);
//! ```

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::diagnostics::{report, Diagnostic};
use crate::error::{TranslateError, TranslateResult};
use crate::rules::{CompiledRule, RuleSet};

/// Built-in rules, compiled on first use
static POSTMAN_TO_BRUNO: Lazy<TranslateResult<Translator>> = Lazy::new(Translator::postman_to_bruno);

/// How a translation ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Outcome {
    /// Every rule ran
    Translated,
    /// Empty or whitespace-only input; no rule ran
    Skipped,
    /// Something failed; the script is the untouched source
    FellBack(String),
}

/// Number of matches a rule rewrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub rule: String,
    pub count: usize,
}

/// Result of a translation pass. Always carries a usable script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub script: String,
    /// Rules that matched at least once, in rule order
    pub hits: Vec<RuleHit>,
    pub outcome: Outcome,
}

impl Translation {
    fn skipped(source: &str) -> Self {
        Self {
            script: source.to_string(),
            hits: Vec::new(),
            outcome: Outcome::Skipped,
        }
    }

    /// Report the failure and hand back the original source.
    fn fell_back(source: &str, err: &TranslateError) -> Self {
        report(Diagnostic::translation_failed(err));
        Self {
            script: source.to_string(),
            hits: Vec::new(),
            outcome: Outcome::FellBack(err.to_string()),
        }
    }

    pub fn into_script(self) -> String {
        self.script
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, Outcome::FellBack(_))
    }

    pub fn total_hits(&self) -> usize {
        self.hits.iter().map(|h| h.count).sum()
    }

    /// One-line summary for the CLI
    pub fn summary(&self) -> String {
        match &self.outcome {
            Outcome::Translated => format!(
                "Translated: {} replacements from {} matching rules",
                self.total_hits(),
                self.hits.len()
            ),
            Outcome::Skipped => "Nothing to translate".to_string(),
            Outcome::FellBack(message) => format!("Left untranslated: {}", message),
        }
    }
}

/// A compiled, immutable rule set
#[derive(Debug, Clone)]
pub struct Translator {
    rules: Vec<CompiledRule>,
}

impl Translator {
    /// Compile a rule set. Fails on the first ill-formed rule.
    pub fn new(rules: &RuleSet) -> TranslateResult<Self> {
        Ok(Self { rules: rules.compile()? })
    }

    /// Translator for the built-in Postman to Bruno rules
    pub fn postman_to_bruno() -> TranslateResult<Self> {
        Self::new(&RuleSet::postman_to_bruno())
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }

    /// Run every rule over `source` in order.
    pub fn translate(&self, source: &str) -> Translation {
        if source.trim().is_empty() {
            return Translation::skipped(source);
        }

        let mut script = source.to_string();
        let mut hits = Vec::new();

        for rule in &self.rules {
            let (next, count) = rule.apply(&script);
            if count > 0 {
                hits.push(RuleHit { rule: rule.name.clone(), count });
                script = next;
            }
        }

        Translation {
            script,
            hits,
            outcome: Outcome::Translated,
        }
    }
}

/// Translate a Postman script with the built-in rules.
///
/// Empty and whitespace-only input comes back as-is. Never fails: on error
/// the original script is returned.
pub fn translate(source: &str) -> String {
    translate_using(&POSTMAN_TO_BRUNO, source)
}

fn translate_using(translator: &TranslateResult<Translator>, source: &str) -> String {
    if source.trim().is_empty() {
        return source.to_string();
    }
    match translator {
        Ok(translator) => translator.translate(source).into_script(),
        Err(e) => Translation::fell_back(source, e).into_script(),
    }
}

/// Translate with a caller-supplied rule set, compiled for this call.
///
/// An ill-formed rule makes the whole pass fall back to the source.
pub fn translate_with(rules: &RuleSet, source: &str) -> Translation {
    if source.trim().is_empty() {
        return Translation::skipped(source);
    }
    match Translator::new(rules) {
        Ok(translator) => translator.translate(source),
        Err(e) => Translation::fell_back(source, &e),
    }
}

/// Translate a script held as editor lines.
pub fn translate_lines(lines: &[String]) -> Vec<String> {
    translate(&lines.join("\n"))
        .split('\n')
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Severity, DIAGNOSTICS};
    use crate::rules::Rule;

    #[test]
    fn test_empty_and_whitespace_input() {
        assert_eq!(translate(""), "");
        assert_eq!(translate("   \n\t"), "   \n\t");

        let translation = Translator::postman_to_bruno().unwrap().translate("  ");
        assert_eq!(translation.outcome, Outcome::Skipped);
        assert!(translation.hits.is_empty());
    }

    #[test]
    fn test_status_test_block() {
        let out = translate("pm.test(\"status ok\", function() {\n pm.response.to.have.status(200);\n});");
        assert!(out.contains(r#"test("status ok", function() {"#));
        assert!(out.contains("expect(res.getStatus()).to.equal(200)"));
        assert!(!out.contains("pm."));
    }

    #[test]
    fn test_environment_set() {
        assert_eq!(
            translate(r#"pm.environment.set("token", res.body.token);"#),
            r#"bru.setEnvVar("token", res.body.token);"#
        );
    }

    #[test]
    fn test_response_time() {
        assert_eq!(
            translate("pm.expect(pm.response.responseTime).to.be.below(500);"),
            "expect(res.getResponseTime()).to.be.below(500);"
        );
    }

    #[test]
    fn test_unrecognized_passthrough() {
        let source = r#"console.log("hello");"#;
        let translation = Translator::postman_to_bruno().unwrap().translate(source);
        assert_eq!(translation.script, source);
        assert_eq!(translation.outcome, Outcome::Translated);
        assert_eq!(translation.total_hits(), 0);
    }

    #[test]
    fn test_mixed_constructs_keep_order() {
        let source = [
            "// login flow",
            "pm.test('has token', function () {",
            "    const data = pm.response.json();",
            "    pm.expect(data.user).to.eql(\"alice\");",
            "    pm.globals.set(\"user\", data.user);",
            "    pm.collectionVariables.set('id', data.id);",
            "    pm.response.to.have.header(\"Content-Type\");",
            "});",
        ]
        .join("\n");

        let expected = [
            "// login flow",
            "test(\"has token\", function() {",
            "    const data = res.getBody();",
            "    expect(data.user).to.equal(\"alice\");",
            "    bru.setVar(\"user\", data.user);",
            "    bru.setVar(\"id\", data.id);",
            "    expect(res.getHeader(\"Content-Type\")).to.exist;",
            "});",
        ]
        .join("\n");

        assert_eq!(translate(&source), expected);
    }

    #[test]
    fn test_variable_getters_and_accessors() {
        let source = "const a = pm.environment.get(`host`);\n\
                      const b = pm.globals.get('user');\n\
                      const c = pm.collectionVariables.get(\"id\");\n\
                      const d = pm.response.text();\n\
                      const e = pm.response.responseSize;\n\
                      pm.expect(e).to.equal(42);";
        let expected = "const a = bru.getEnvVar(\"host\");\n\
                        const b = bru.getVar(\"user\");\n\
                        const c = bru.getVar(\"id\");\n\
                        const d = res.getBody();\n\
                        const e = res.getSize();\n\
                        expect(e).to.equal(42);";
        assert_eq!(translate(source), expected);
    }

    #[test]
    fn test_every_occurrence_is_rewritten() {
        let translation = Translator::postman_to_bruno()
            .unwrap()
            .translate("pm.response.json().a + pm.response.json().b");
        assert_eq!(translation.script, "res.getBody().a + res.getBody().b");
        assert_eq!(
            translation.hits,
            vec![RuleHit { rule: "json-body".to_string(), count: 2 }]
        );
    }

    #[test]
    fn test_deterministic() {
        let source = "pm.test(\"a\", function() { pm.response.to.have.status(201); });";
        assert_eq!(translate(source), translate(source));
    }

    #[test]
    fn test_empty_rule_set_is_identity() {
        let source = "pm.response.json()";
        let translation = translate_with(&RuleSet::new(), source);
        assert_eq!(translation.script, source);
        assert_eq!(translation.outcome, Outcome::Translated);
    }

    #[test]
    fn test_rules_run_in_order() {
        let rules = RuleSet::new()
            .with_rule(Rule::new("first", "a", "b"))
            .with_rule(Rule::new("second", "b", "c"));
        assert_eq!(translate_with(&rules, "ab").script, "cc");

        let reversed = RuleSet::new()
            .with_rule(Rule::new("second", "b", "c"))
            .with_rule(Rule::new("first", "a", "b"));
        assert_eq!(translate_with(&reversed, "ab").script, "bc");
    }

    #[test]
    fn test_ill_formed_rule_falls_back() {
        let mut rx = DIAGNOSTICS.subscribe();
        let rules = RuleSet::postman_to_bruno()
            .with_rule(Rule::new("bad-capture", r"pm\.info\.(\w+)", "bru.${3}"));
        let source = "pm.response.to.have.status(200);";

        let translation = translate_with(&rules, source);
        assert_eq!(translation.script, source);
        assert!(translation.is_fallback());
        assert!(translation.hits.is_empty());

        let mut reported = false;
        while let Ok(diagnostic) = rx.try_recv() {
            if diagnostic.severity == Severity::Error && diagnostic.rule.as_deref() == Some("bad-capture") {
                reported = true;
            }
        }
        assert!(reported, "expected a diagnostic for the failed rule");
    }

    #[test]
    fn test_broken_default_rules_return_source() {
        let mut rx = DIAGNOSTICS.subscribe();
        let broken: TranslateResult<Translator> = Err(TranslateError::InvalidPattern {
            rule: "broken-status".to_string(),
            message: "unclosed group".to_string(),
        });
        let source = "pm.response.to.have.status(200);";

        assert_eq!(translate_using(&broken, source), source);
        assert_eq!(translate_using(&broken, "  "), "  ");

        let mut reported = false;
        while let Ok(diagnostic) = rx.try_recv() {
            if diagnostic.severity == Severity::Error && diagnostic.rule.as_deref() == Some("broken-status") {
                reported = true;
            }
        }
        assert!(reported, "expected a diagnostic for the broken built-in rules");
    }

    #[test]
    fn test_non_ascii_digits_pass_through() {
        let source = "pm.response.to.have.status(\u{0662}\u{0660}\u{0660});\n\
                      pm.expect(pm.response.responseTime).to.be.below(\u{0665}\u{0660}\u{0660});";
        assert_eq!(translate(source), source);
    }

    #[test]
    fn test_translate_lines() {
        let lines = vec![
            "pm.test(\"ok\", function() {".to_string(),
            "  pm.response.to.have.status(200);".to_string(),
            "});".to_string(),
        ];
        assert_eq!(
            translate_lines(&lines),
            vec![
                "test(\"ok\", function() {".to_string(),
                "  expect(res.getStatus()).to.equal(200);".to_string(),
                "});".to_string(),
            ]
        );
    }

    #[test]
    fn test_summary() {
        let translator = Translator::postman_to_bruno().unwrap();
        let translation = translator.translate("pm.response.json(); pm.response.text();");
        assert_eq!(translation.summary(), "Translated: 2 replacements from 2 matching rules");
        assert_eq!(translator.rule_names().len(), 15);
    }
}
