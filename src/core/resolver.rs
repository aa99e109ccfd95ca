use crate::utils::error::{ReportError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Group name for identifiers no rule matches.
pub const UNKNOWN_PBX: &str = "Unknown";

#[derive(Debug, Clone)]
enum Matcher {
    Prefix(String),
    Pattern(Regex),
}

#[derive(Debug, Clone)]
pub struct PbxRule {
    matcher: Matcher,
    name: String,
}

impl PbxRule {
    pub fn prefix(prefix: &str, name: &str) -> Self {
        Self {
            matcher: Matcher::Prefix(prefix.to_string()),
            name: name.to_string(),
        }
    }

    pub fn pattern(pattern: &str, name: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| ReportError::InvalidConfigValueError {
            field: "pattern".to_string(),
            value: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            matcher: Matcher::Pattern(regex),
            name: name.to_string(),
        })
    }

    fn matches(&self, identifier: &str) -> bool {
        match &self.matcher {
            Matcher::Prefix(prefix) => identifier.starts_with(prefix.as_str()),
            Matcher::Pattern(regex) => regex.is_match(identifier),
        }
    }
}

/// Ordered table mapping call-leg identifiers to PBX system names.
/// First matching rule wins.
#[derive(Debug, Clone)]
pub struct PbxRules {
    rules: Vec<PbxRule>,
}

#[derive(Debug, Deserialize)]
struct RawRuleFile {
    #[serde(rename = "rule", default)]
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    prefix: Option<String>,
    pattern: Option<String>,
    name: String,
}

impl PbxRules {
    pub fn new(rules: Vec<PbxRule>) -> Self {
        Self { rules }
    }

    /// Load an ordered rule table from a TOML file of `[[rule]]` entries,
    /// each carrying a `name` and exactly one of `prefix` or `pattern`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let raw: RawRuleFile = toml::from_str(&text)?;

        let mut rules = Vec::with_capacity(raw.rules.len());
        for entry in raw.rules {
            let rule = match (entry.prefix, entry.pattern) {
                (Some(prefix), None) => PbxRule::prefix(&prefix, &entry.name),
                (None, Some(pattern)) => PbxRule::pattern(&pattern, &entry.name)?,
                _ => {
                    return Err(ReportError::InvalidConfigValueError {
                        field: "rule".to_string(),
                        value: entry.name,
                        reason: "exactly one of 'prefix' or 'pattern' is required".to_string(),
                    })
                }
            };
            rules.push(rule);
        }

        tracing::debug!("Loaded {} PBX rule(s) from {}", rules.len(), path.display());
        Ok(Self { rules })
    }

    /// Canonical group name for an identifier, "Unknown" when nothing matches.
    pub fn resolve<'a>(&'a self, identifier: &str) -> &'a str {
        self.lookup(identifier).unwrap_or(UNKNOWN_PBX)
    }

    /// Like `resolve`, but falls back to the identifier itself. Used for
    /// interaction labels, where the raw identifier is more useful than
    /// "Unknown".
    pub fn display_name<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.lookup(identifier).unwrap_or(identifier)
    }

    fn lookup(&self, identifier: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(identifier))
            .map(|rule| rule.name.as_str())
    }
}

impl Default for PbxRules {
    /// Built-in table: a bare 32-char hex identifier is an anonymous PBX leg.
    fn default() -> Self {
        let hex_id = PbxRule::pattern("^[a-f0-9]{32}$", "PBX").expect("hex id pattern is valid");
        Self {
            rules: vec![hex_id],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_rules_match_hex_ids() {
        let rules = PbxRules::default();
        assert_eq!(rules.resolve("0123456789abcdef0123456789abcdef"), "PBX");
        assert_eq!(rules.resolve("alice@example.com"), UNKNOWN_PBX);
        assert_eq!(rules.resolve("0123456789ABCDEF0123456789ABCDEF"), UNKNOWN_PBX);
    }

    #[test]
    fn test_prefix_rules() {
        let rules = PbxRules::new(vec![
            PbxRule::prefix("pbxA", "PBX A"),
            PbxRule::prefix("pbxB", "PBX B"),
        ]);
        assert_eq!(rules.resolve("pbxA-123"), "PBX A");
        assert_eq!(rules.resolve("pbxB-9"), "PBX B");
        assert_eq!(rules.resolve("pbxC-1"), UNKNOWN_PBX);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = PbxRules::new(vec![
            PbxRule::prefix("pbx", "Generic"),
            PbxRule::prefix("pbxA", "PBX A"),
        ]);
        assert_eq!(rules.resolve("pbxA-123"), "Generic");
    }

    #[test]
    fn test_display_name_falls_back_to_identifier() {
        let rules = PbxRules::default();
        assert_eq!(
            rules.display_name("0123456789abcdef0123456789abcdef"),
            "PBX"
        );
        assert_eq!(rules.display_name("alice@example.com"), "alice@example.com");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[rule]]
            prefix = "pbxA"
            name = "PBX A"

            [[rule]]
            pattern = "^[a-f0-9]{{32}}$"
            name = "PBX"
            "#
        )
        .unwrap();

        let rules = PbxRules::from_file(file.path()).unwrap();
        assert_eq!(rules.resolve("pbxA-123"), "PBX A");
        assert_eq!(rules.resolve("0123456789abcdef0123456789abcdef"), "PBX");
    }

    #[test]
    fn test_from_file_rejects_ambiguous_rule() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[rule]]
            prefix = "pbxA"
            pattern = "^pbxA"
            name = "PBX A"
            "#
        )
        .unwrap();

        assert!(PbxRules::from_file(file.path()).is_err());
    }

    #[test]
    fn test_from_file_rejects_bad_regex() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[rule]]
            pattern = "["
            name = "Broken"
            "#
        )
        .unwrap();

        assert!(PbxRules::from_file(file.path()).is_err());
    }
}
