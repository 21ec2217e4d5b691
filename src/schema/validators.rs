//! Attribute value validators
//!
//! Validators only inspect values of the type they apply to. Type mismatches
//! are reported by the configuration validator before these run.

use crate::diagnostics::Diagnostics;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

const DNS1123_LABEL: &str = "[a-z0-9]([-a-z0-9]*[a-z0-9])?";
const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;
const DNS1123_LABEL_MAX_LENGTH: usize = 63;
const QUALIFIED_NAME_MAX_LENGTH: usize = 63;
const LABEL_VALUE_MAX_LENGTH: usize = 63;
const TOTAL_ANNOTATION_SIZE_LIMIT: usize = 256 * 1024;

static DNS1123_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{DNS1123_LABEL}$")).expect("valid DNS label regex"));

static DNS1123_SUBDOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{DNS1123_LABEL}(\\.{DNS1123_LABEL})*$"))
        .expect("valid DNS subdomain regex")
});

static QUALIFIED_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").expect("valid qualified name regex")
});

/// Compiled `StringMatches` patterns keyed by source, compile errors included
static PATTERNS: Lazy<RwLock<HashMap<String, CompiledPattern>>> = Lazy::new(Default::default);

type CompiledPattern = std::result::Result<Regex, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    StringLengthAtLeast { min: usize },
    StringLengthBetween { min: usize, max: usize },
    StringMatches { pattern: String, message: String },
    StringOneOf { values: Vec<String> },
    Int64AtLeast { min: i64 },
    Int64Between { min: i64, max: i64 },
    /// RFC 1123 subdomain, as used by most object names
    DnsSubdomainName,
    /// RFC 1123 label, as used by namespace names
    DnsLabelName,
    /// Kubernetes label map (qualified keys, label values)
    Labels,
    /// Kubernetes annotation map (qualified keys, bounded total size)
    Annotations,
}

impl Validator {
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Validator::StringOneOf {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Validator::StringMatches {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Validator::StringLengthAtLeast { min } => {
                format!("string length must be at least {}", min)
            }
            Validator::StringLengthBetween { min, max } => {
                format!("string length must be between {} and {}", min, max)
            }
            Validator::StringMatches { message, .. } => message.clone(),
            Validator::StringOneOf { values } => {
                let quoted: Vec<String> = values.iter().map(|v| format!("\"{}\"", v)).collect();
                format!("value must be one of: [{}]", quoted.join(" "))
            }
            Validator::Int64AtLeast { min } => format!("value must be at least {}", min),
            Validator::Int64Between { min, max } => {
                format!("value must be between {} and {}", min, max)
            }
            Validator::DnsSubdomainName => {
                "value must be a lowercase RFC 1123 subdomain of at most 253 characters".to_string()
            }
            Validator::DnsLabelName => {
                "value must be a lowercase RFC 1123 label of at most 63 characters".to_string()
            }
            Validator::Labels => {
                "keys must be qualified names and values must be valid label values".to_string()
            }
            Validator::Annotations => {
                "keys must be qualified names and the total size must not exceed 256KiB"
                    .to_string()
            }
        }
    }

    /// Check `value` at attribute `path`, appending failures to `diagnostics`
    pub fn validate(&self, path: &str, value: &Value, diagnostics: &mut Diagnostics) {
        match self {
            Validator::StringLengthAtLeast { min } => {
                if let Some(s) = value.as_str() {
                    let len = s.chars().count();
                    if len < *min {
                        diagnostics.add_attribute_error(
                            path,
                            "Invalid Attribute Value Length",
                            format!(
                                "Attribute {} string length must be at least {}, got: {}",
                                path, min, len
                            ),
                        );
                    }
                }
            }
            Validator::StringLengthBetween { min, max } => {
                if let Some(s) = value.as_str() {
                    let len = s.chars().count();
                    if len < *min || len > *max {
                        diagnostics.add_attribute_error(
                            path,
                            "Invalid Attribute Value Length",
                            format!(
                                "Attribute {} string length must be between {} and {}, got: {}",
                                path, min, max, len
                            ),
                        );
                    }
                }
            }
            Validator::StringMatches { pattern, message } => {
                if let Some(s) = value.as_str() {
                    match compiled(pattern) {
                        Ok(re) if re.is_match(s) => {}
                        Ok(_) => diagnostics.add_attribute_error(
                            path,
                            "Invalid Attribute Value Match",
                            format!("Attribute {} {}, got: {}", path, message, s),
                        ),
                        Err(e) => diagnostics.add_attribute_error(
                            path,
                            "Invalid Validator",
                            format!("Pattern {} does not compile: {}", pattern, e),
                        ),
                    }
                }
            }
            Validator::StringOneOf { values } => {
                if let Some(s) = value.as_str() {
                    if !values.iter().any(|v| v == s) {
                        diagnostics.add_attribute_error(
                            path,
                            "Invalid Attribute Value Match",
                            format!("Attribute {} {}, got: \"{}\"", path, self.description(), s),
                        );
                    }
                }
            }
            Validator::Int64AtLeast { min } => {
                if let Some(n) = value.as_i64() {
                    if n < *min {
                        diagnostics.add_attribute_error(
                            path,
                            "Invalid Attribute Value",
                            format!(
                                "Attribute {} value must be at least {}, got: {}",
                                path, min, n
                            ),
                        );
                    }
                }
            }
            Validator::Int64Between { min, max } => {
                if let Some(n) = value.as_i64() {
                    if n < *min || n > *max {
                        diagnostics.add_attribute_error(
                            path,
                            "Invalid Attribute Value",
                            format!(
                                "Attribute {} value must be between {} and {}, got: {}",
                                path, min, max, n
                            ),
                        );
                    }
                }
            }
            Validator::DnsSubdomainName => {
                if let Some(s) = value.as_str() {
                    if !is_dns1123_subdomain(s) {
                        diagnostics.add_attribute_error(
                            path,
                            "Invalid Attribute Value Match",
                            format!("Attribute {} {}, got: {}", path, self.description(), s),
                        );
                    }
                }
            }
            Validator::DnsLabelName => {
                if let Some(s) = value.as_str() {
                    if !is_dns1123_label(s) {
                        diagnostics.add_attribute_error(
                            path,
                            "Invalid Attribute Value Match",
                            format!("Attribute {} {}, got: {}", path, self.description(), s),
                        );
                    }
                }
            }
            Validator::Labels => {
                if let Some(map) = value.as_object() {
                    for (key, v) in map {
                        if !is_qualified_name(key) {
                            diagnostics.add_attribute_error(
                                path,
                                "Invalid Label Key",
                                format!("Label key {} is not a valid qualified name", key),
                            );
                        }
                        if let Some(v) = v.as_str() {
                            if !is_label_value(v) {
                                diagnostics.add_attribute_error(
                                    path,
                                    "Invalid Label Value",
                                    format!("Label value {} of key {} is not valid", v, key),
                                );
                            }
                        }
                    }
                }
            }
            Validator::Annotations => {
                if let Some(map) = value.as_object() {
                    let mut total = 0;
                    for (key, v) in map {
                        if !is_qualified_name(key) {
                            diagnostics.add_attribute_error(
                                path,
                                "Invalid Annotation Key",
                                format!("Annotation key {} is not a valid qualified name", key),
                            );
                        }
                        total += key.len() + v.as_str().map_or(0, str::len);
                    }
                    if total > TOTAL_ANNOTATION_SIZE_LIMIT {
                        diagnostics.add_attribute_error(
                            path,
                            "Annotations Too Large",
                            format!(
                                "Total annotation size must not exceed {} bytes, got: {}",
                                TOTAL_ANNOTATION_SIZE_LIMIT, total
                            ),
                        );
                    }
                }
            }
        }
    }
}

/// Compile `pattern` once per process
fn compiled(pattern: &str) -> CompiledPattern {
    let cached = PATTERNS
        .read()
        .ok()
        .and_then(|patterns| patterns.get(pattern).cloned());
    if let Some(found) = cached {
        return found;
    }

    let result = Regex::new(pattern).map_err(|e| e.to_string());
    if let Ok(mut patterns) = PATTERNS.write() {
        patterns.insert(pattern.to_string(), result.clone());
    }
    result
}

pub(crate) fn is_dns1123_label(value: &str) -> bool {
    value.len() <= DNS1123_LABEL_MAX_LENGTH && DNS1123_LABEL_RE.is_match(value)
}

pub(crate) fn is_dns1123_subdomain(value: &str) -> bool {
    value.len() <= DNS1123_SUBDOMAIN_MAX_LENGTH && DNS1123_SUBDOMAIN_RE.is_match(value)
}

/// `[prefix/]name` where prefix is a DNS subdomain
pub(crate) fn is_qualified_name(value: &str) -> bool {
    let name = match value.split_once('/') {
        Some((prefix, name)) => {
            if prefix.is_empty() || !is_dns1123_subdomain(prefix) {
                return false;
            }
            name
        }
        None => value,
    };
    !name.is_empty() && name.len() <= QUALIFIED_NAME_MAX_LENGTH && QUALIFIED_NAME_RE.is_match(name)
}

pub(crate) fn is_label_value(value: &str) -> bool {
    value.is_empty()
        || (value.len() <= LABEL_VALUE_MAX_LENGTH && QUALIFIED_NAME_RE.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(validator: &Validator, value: Value) -> Diagnostics {
        let mut diags = Diagnostics::new();
        validator.validate("spec.field", &value, &mut diags);
        diags
    }

    #[test]
    fn test_dns_names() {
        assert!(is_dns1123_label("rook-ceph"));
        assert!(!is_dns1123_label("Rook"));
        assert!(!is_dns1123_label("-leading"));
        assert!(!is_dns1123_label(&"a".repeat(64)));

        assert!(is_dns1123_subdomain("my-nfs.example.com"));
        assert!(!is_dns1123_subdomain("my_nfs"));
        assert!(!is_dns1123_subdomain(""));
    }

    #[test]
    fn test_qualified_names() {
        assert!(is_qualified_name("app"));
        assert!(is_qualified_name("app.kubernetes.io/name"));
        assert!(is_qualified_name("Some_Key.v1"));
        assert!(!is_qualified_name("/name"));
        assert!(!is_qualified_name("example.com/"));
        assert!(!is_qualified_name("Example.com/name"));
        assert!(!is_qualified_name("trailing-"));
    }

    #[test]
    fn test_label_values() {
        assert!(is_label_value(""));
        assert!(is_label_value("v1.2_3"));
        assert!(!is_label_value("has space"));
        assert!(!is_label_value(&"a".repeat(64)));
    }

    #[test]
    fn test_int64_at_least() {
        let v = Validator::Int64AtLeast { min: 1 };
        assert!(run(&v, json!(1)).is_empty());
        let diags = run(&v, json!(0));
        assert!(diags.has_error());
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.attribute.as_deref(), Some("spec.field"));
        assert!(diag.detail.contains("at least 1, got: 0"));
    }

    #[test]
    fn test_int64_between() {
        let v = Validator::Int64Between { min: 0, max: 10 };
        assert!(run(&v, json!(10)).is_empty());
        assert!(run(&v, json!(11)).has_error());
        assert!(run(&v, json!(-1)).has_error());
    }

    #[test]
    fn test_one_of() {
        let v = Validator::one_of(["Exists", "Equal"]);
        assert!(run(&v, json!("Equal")).is_empty());
        let diags = run(&v, json!("Maybe"));
        assert!(diags
            .iter()
            .next()
            .unwrap()
            .detail
            .contains("[\"Exists\" \"Equal\"]"));
    }

    #[test]
    fn test_string_length() {
        assert!(run(&Validator::StringLengthAtLeast { min: 1 }, json!("")).has_error());
        assert!(run(&Validator::StringLengthAtLeast { min: 1 }, json!("x")).is_empty());
        let between = Validator::StringLengthBetween { min: 2, max: 3 };
        assert!(run(&between, json!("ab")).is_empty());
        assert!(run(&between, json!("abcd")).has_error());
    }

    #[test]
    fn test_matches() {
        let v = Validator::matches("^[A-Z]+$", "must be uppercase");
        assert!(run(&v, json!("ABC")).is_empty());
        let diags = run(&v, json!("abc"));
        assert!(diags.iter().next().unwrap().detail.contains("must be uppercase"));

        let broken = Validator::matches("([", "never");
        assert_eq!(
            run(&broken, json!("x")).iter().next().unwrap().summary,
            "Invalid Validator"
        );
    }

    #[test]
    fn test_patterns_are_compiled_once() {
        let v = Validator::matches("^cached-[0-9]+$", "must be cached");
        assert!(run(&v, json!("cached-1")).is_empty());
        assert!(run(&v, json!("cached-x")).has_error());
        assert!(PATTERNS.read().unwrap().contains_key("^cached-[0-9]+$"));

        let broken = Validator::matches("(cached", "never");
        assert!(run(&broken, json!("x")).has_error());
        assert!(PATTERNS.read().unwrap()["(cached"].is_err());
        assert!(run(&broken, json!("y")).has_error());
    }

    #[test]
    fn test_validators_skip_other_types() {
        assert!(run(&Validator::Int64AtLeast { min: 5 }, json!("1")).is_empty());
        assert!(run(&Validator::DnsLabelName, json!(3)).is_empty());
    }

    #[test]
    fn test_labels_and_annotations() {
        assert!(run(&Validator::Labels, json!({ "app.kubernetes.io/name": "nfs" })).is_empty());
        assert_eq!(
            run(&Validator::Labels, json!({ "bad key": "bad value" })).len(),
            2
        );

        assert!(run(
            &Validator::Annotations,
            json!({ "example.com/note": "any value at all, spaces included" })
        )
        .is_empty());
        let huge = "x".repeat(TOTAL_ANNOTATION_SIZE_LIMIT + 1);
        assert!(run(&Validator::Annotations, json!({ "note": huge })).has_error());
    }
}
