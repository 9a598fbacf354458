//! Rule sets
//!
//! An ordered list of rules plus the built-in Postman to Bruno set.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::rule::{CompiledRule, Rule};
use crate::error::TranslateResult;

/// An ordered sequence of rules. Order matters: each rule sees the output of the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Version of the rule set format
    #[serde(default = "default_version")]
    pub version: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    pub rules: Vec<Rule>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl RuleSet {
    /// Create an empty rule set (translation is the identity)
    pub fn new() -> Self {
        Self {
            version: default_version(),
            description: String::new(),
            rules: Vec::new(),
        }
    }

    /// Parse a rule set from JSON string
    pub fn from_json(json: &str) -> TranslateResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a rule set from a JSON file
    pub fn from_file(path: &Path) -> TranslateResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> TranslateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compile every rule, stopping at the first ill-formed one
    pub fn compile(&self) -> TranslateResult<Vec<CompiledRule>> {
        self.rules.iter().map(Rule::compile).collect()
    }

    /// The built-in Postman `pm.*` to Bruno rule set.
    ///
    /// Globals and collection variables both land on `bru.setVar`/`bru.getVar`;
    /// Bruno has no separate collection scope for runtime variables.
    /// Numeric arguments are ASCII digits only.
    pub fn postman_to_bruno() -> Self {
        let rules = vec![
            Rule::new(
                "test",
                r#"pm\.test\s*\(\s*["'`]([^"'`]+)["'`]\s*,\s*function\s*\(\s*\)\s*\{"#,
                r#"test("${1}", function() {"#,
            )
            .with_description("Named test block"),
            Rule::new(
                "status",
                r"pm\.response\.to\.have\.status\(([0-9]+)\)",
                "expect(res.getStatus()).to.equal(${1})",
            )
            .with_description("Status code assertion"),
            Rule::new("json-body", r"pm\.response\.json\(\)", "res.getBody()")
                .with_description("Response body as JSON"),
            Rule::new(
                "env-set",
                r#"pm\.environment\.set\s*\(\s*["'`]([^"'`]+)["'`]\s*,\s*([^)]+)\)"#,
                r#"bru.setEnvVar("${1}", ${2})"#,
            )
            .with_description("Set environment variable"),
            Rule::new(
                "env-get",
                r#"pm\.environment\.get\s*\(\s*["'`]([^"'`]+)["'`]\s*\)"#,
                r#"bru.getEnvVar("${1}")"#,
            )
            .with_description("Get environment variable"),
            Rule::new(
                "global-set",
                r#"pm\.globals\.set\s*\(\s*["'`]([^"'`]+)["'`]\s*,\s*([^)]+)\)"#,
                r#"bru.setVar("${1}", ${2})"#,
            )
            .with_description("Set global variable"),
            Rule::new(
                "global-get",
                r#"pm\.globals\.get\s*\(\s*["'`]([^"'`]+)["'`]\s*\)"#,
                r#"bru.getVar("${1}")"#,
            )
            .with_description("Get global variable"),
            Rule::new(
                "collection-set",
                r#"pm\.collectionVariables\.set\s*\(\s*["'`]([^"'`]+)["'`]\s*,\s*([^)]+)\)"#,
                r#"bru.setVar("${1}", ${2})"#,
            )
            .with_description("Set collection variable"),
            Rule::new(
                "collection-get",
                r#"pm\.collectionVariables\.get\s*\(\s*["'`]([^"'`]+)["'`]\s*\)"#,
                r#"bru.getVar("${1}")"#,
            )
            .with_description("Get collection variable"),
            Rule::new(
                "response-time",
                r"pm\.expect\s*\(\s*pm\.response\.responseTime\s*\)\.to\.be\.below\s*\(\s*([0-9]+)\s*\)",
                "expect(res.getResponseTime()).to.be.below(${1})",
            )
            .with_description("Response time below threshold (ms)"),
            Rule::new(
                "header",
                r#"pm\.response\.to\.have\.header\s*\(\s*["'`]([^"'`]+)["'`]\s*\)"#,
                r#"expect(res.getHeader("${1}")).to.exist"#,
            )
            .with_description("Response header exists"),
            Rule::new("text-body", r"pm\.response\.text\(\)", "res.getBody()")
                .with_description("Response body as text"),
            Rule::new(
                "eql",
                r"pm\.expect\s*\(\s*([^)]+)\s*\)\.to\.eql\s*\(\s*([^)]+)\s*\)",
                "expect(${1}).to.equal(${2})",
            )
            .with_description("Deep equality assertion"),
            Rule::new(
                "equal",
                r"pm\.expect\s*\(\s*([^)]+)\s*\)\.to\.equal\s*\(\s*([^)]+)\s*\)",
                "expect(${1}).to.equal(${2})",
            )
            .with_description("Strict equality assertion"),
            Rule::new("response-size", r"pm\.response\.responseSize", "res.getSize()")
                .with_description("Response size in bytes"),
        ];

        Self {
            version: default_version(),
            description: "Postman pm.* scripts to Bruno".to_string(),
            rules,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Get a description of the built-in rules
pub fn rules_description() -> String {
    r#"Postman to Bruno translations (applied in this order):

| # | Rule | Postman | Bruno |
|---|------|---------|-------|
| 1 | test | pm.test("name", function() { | test("name", function() { |
| 2 | status | pm.response.to.have.status(200) | expect(res.getStatus()).to.equal(200) |
| 3 | json-body | pm.response.json() | res.getBody() |
| 4 | env-set | pm.environment.set("key", value) | bru.setEnvVar("key", value) |
| 5 | env-get | pm.environment.get("key") | bru.getEnvVar("key") |
| 6 | global-set | pm.globals.set("key", value) | bru.setVar("key", value) |
| 7 | global-get | pm.globals.get("key") | bru.getVar("key") |
| 8 | collection-set | pm.collectionVariables.set("key", value) | bru.setVar("key", value) |
| 9 | collection-get | pm.collectionVariables.get("key") | bru.getVar("key") |
| 10 | response-time | pm.expect(pm.response.responseTime).to.be.below(500) | expect(res.getResponseTime()).to.be.below(500) |
| 11 | header | pm.response.to.have.header("Content-Type") | expect(res.getHeader("Content-Type")).to.exist |
| 12 | text-body | pm.response.text() | res.getBody() |
| 13 | eql | pm.expect(a).to.eql(b) | expect(a).to.equal(b) |
| 14 | equal | pm.expect(a).to.equal(b) | expect(a).to.equal(b) |
| 15 | response-size | pm.response.responseSize | res.getSize() |

Anything else is copied through unchanged."#
        .to_string()
}
