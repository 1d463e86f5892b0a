//! # 替换模块
//!
//! 负责对文本节点中的专有名词进行按词边界、保留大小写模式的替换。
//!
//! # 模块组织
//!
//! - `rule` - 规则定义、编译与单条规则的应用
//! - `casing` - 大小写类别识别与替换文本渲染
//!
//! 规则按列表顺序依次作用于同一段文本，每条规则内部的匹配互不重叠。

pub mod casing;
pub mod rule;

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::core::RelayError;

pub use casing::{classify, render, CaseClass};
pub use rule::{CaseMode, CompiledRule, SubstitutionRule};

pub const DEFAULT_FROM: &str = "Yale";
pub const DEFAULT_TO: &str = "Fale";

/// Which built-in rule set to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewritePolicy {
    /// Every whole-word occurrence, any case, casing mirrored
    #[default]
    Broad,
    /// Only the phrase-anchored occurrences (`Yale University`, `Yale College`, ...)
    Phrase,
}

impl FromStr for RewritePolicy {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "broad" => Ok(RewritePolicy::Broad),
            "phrase" | "narrow" => Ok(RewritePolicy::Phrase),
            other => Err(RelayError::Config(format!(
                "unknown rewrite policy '{}'. Use: broad, phrase",
                other
            ))),
        }
    }
}

impl fmt::Display for RewritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewritePolicy::Broad => write!(f, "broad"),
            RewritePolicy::Phrase => write!(f, "phrase"),
        }
    }
}

/// 规则文件格式
#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<SubstitutionRule>,
}

/// Ordered, compiled substitution rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compiles `rules`, keeping their order
    pub fn new(rules: Vec<SubstitutionRule>) -> Result<Self, RelayError> {
        let rules = rules
            .iter()
            .map(SubstitutionRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// 单条宽泛规则：不区分大小写的整词替换
    pub fn broad(from: &str, to: &str) -> Result<Self, RelayError> {
        Self::new(vec![SubstitutionRule::new(from, to, CaseMode::Preserve)])
    }

    /// 仅替换特定短语前的专有名词
    pub fn phrase_anchored() -> Result<Self, RelayError> {
        Self::new(vec![
            SubstitutionRule::new("YALE", "FALE", CaseMode::Exact).followed_by("University"),
            SubstitutionRule::new("Yale", "Fale", CaseMode::Exact).followed_by("University"),
            SubstitutionRule::new("Yale", "Fale", CaseMode::Exact).followed_by("College"),
            SubstitutionRule::new("yale", "fale", CaseMode::Exact).followed_by("medical school"),
        ])
    }

    pub fn from_policy(policy: RewritePolicy, from: &str, to: &str) -> Result<Self, RelayError> {
        match policy {
            RewritePolicy::Broad => Self::broad(from, to),
            RewritePolicy::Phrase => Self::phrase_anchored(),
        }
    }

    /// Parses a TOML rule file:
    ///
    /// ```toml
    /// [[rules]]
    /// pattern = "Yale"
    /// replacement = "Fale"
    /// case = "exact"
    /// followed_by = "University"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, RelayError> {
        let file: RuleFile = toml::from_str(content)
            .map_err(|e| RelayError::Config(format!("invalid rules file: {}", e)))?;

        if file.rules.is_empty() {
            return Err(RelayError::Config("rules file defines no rules".to_string()));
        }

        Self::new(file.rules)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RelayError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RelayError::Config(format!("cannot read rules file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Applies every rule in order
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.apply_counted(text).0
    }

    /// Like [`RuleSet::apply`], also returning the number of replacements made
    pub fn apply_counted<'t>(&self, text: &'t str) -> (Cow<'t, str>, usize) {
        let mut current: Cow<'t, str> = Cow::Borrowed(text);
        let mut total = 0;

        for rule in &self.rules {
            let replaced = match rule.apply(&current) {
                (Cow::Owned(s), count) => Some((s, count)),
                (Cow::Borrowed(_), _) => None,
            };
            if let Some((s, count)) = replaced {
                current = Cow::Owned(s);
                total += count;
            }
        }

        (current, total)
    }

    pub fn rules(&self) -> impl Iterator<Item = &SubstitutionRule> {
        self.rules.iter().map(CompiledRule::rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::broad(DEFAULT_FROM, DEFAULT_TO).expect("default rule set compiles")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_broad() {
        let rules = RuleSet::default();
        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules.apply("Yale was founded in 1701. YALE! yale?"),
            "Fale was founded in 1701. FALE! fale?"
        );
    }

    #[test]
    fn test_phrase_anchored_set() {
        let rules = RuleSet::phrase_anchored().unwrap();
        assert_eq!(
            rules.apply(
                "YALE University, Yale College, and yale medical school are all part of the same institution."
            ),
            "FALE University, Fale College, and fale medical school are all part of the same institution."
        );
        assert_eq!(rules.apply("Yale was founded in 1701."), "Yale was founded in 1701.");
    }

    #[test]
    fn test_rules_apply_in_order() {
        let rules = RuleSet::new(vec![
            SubstitutionRule::new("alpha", "beta", CaseMode::Exact),
            SubstitutionRule::new("beta", "gamma", CaseMode::Exact),
        ])
        .unwrap();
        let (result, count) = rules.apply_counted("alpha");
        assert_eq!(result, "gamma");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_second_pass_is_noop_for_disjoint_vocabulary() {
        let rules = RuleSet::default();
        let once = rules.apply("Yale and YALE and yale").into_owned();
        let twice = rules.apply(&once);
        assert!(matches!(twice, Cow::Borrowed(_)));
        assert_eq!(twice, once);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("broad".parse::<RewritePolicy>().unwrap(), RewritePolicy::Broad);
        assert_eq!("PHRASE".parse::<RewritePolicy>().unwrap(), RewritePolicy::Phrase);
        assert!("loose".parse::<RewritePolicy>().is_err());
        assert_eq!(RewritePolicy::Phrase.to_string(), "phrase");
    }

    #[test]
    fn test_rules_from_toml() {
        let rules = RuleSet::from_toml_str(
            r#"
            [[rules]]
            pattern = "Yale"
            replacement = "Fale"
            case = "exact"
            followed_by = "College"

            [[rules]]
            pattern = "Harvard"
            replacement = "Barvard"
            "#,
        )
        .unwrap();

        assert_eq!(rules.len(), 2);
        let collected: Vec<_> = rules.rules().collect();
        assert_eq!(collected[0].case, CaseMode::Exact);
        assert_eq!(collected[1].case, CaseMode::Preserve);
        assert_eq!(
            rules.apply("Yale College and Yale, HARVARD"),
            "Fale College and Yale, BARVARD"
        );
    }

    #[test]
    fn test_rules_from_toml_errors() {
        assert!(RuleSet::from_toml_str("").is_err());
        assert!(RuleSet::from_toml_str("[[rules]]\npattern = 1").is_err());
        assert!(RuleSet::from_file("/nonexistent/rules.toml").is_err());
    }
}
