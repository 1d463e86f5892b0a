//! 替换规则定义与编译

use std::borrow::Cow;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::core::RelayError;

use super::casing::{classify, render};

/// How a rule treats letter case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Case-insensitive match; the replacement mirrors the token's casing
    #[default]
    Preserve,
    /// Case-sensitive match; the replacement is inserted as written
    Exact,
}

/// A single substitution rule, as configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    /// Literal token to look for
    pub pattern: String,
    pub replacement: String,
    #[serde(default)]
    pub case: CaseMode,
    /// Word or phrase that must follow the token after whitespace.
    /// Checked but never consumed or replaced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followed_by: Option<String>,
}

impl SubstitutionRule {
    pub fn new(pattern: &str, replacement: &str, case: CaseMode) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            case,
            followed_by: None,
        }
    }

    /// Restricts the rule to tokens followed by `phrase`
    pub fn followed_by(mut self, phrase: &str) -> Self {
        self.followed_by = Some(phrase.to_string());
        self
    }

    /// 编译规则
    pub fn compile(&self) -> Result<CompiledRule, RelayError> {
        let pattern = self.pattern.trim();
        if pattern.is_empty() {
            return Err(RelayError::Config(
                "substitution pattern cannot be empty".to_string(),
            ));
        }

        let case_insensitive = self.case == CaseMode::Preserve;

        let token = RegexBuilder::new(&bounded(&regex::escape(pattern), pattern))
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| RelayError::Config(format!("invalid pattern \"{}\": {}", pattern, e)))?;

        let lookahead = match self.followed_by.as_deref().map(str::trim) {
            Some(phrase) if !phrase.is_empty() => {
                // 短语内部的空白可以是任意空白序列
                let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
                let body = format!(r"^\s+{}", words.join(r"\s+"));
                let regex = RegexBuilder::new(&bounded_end(&body, phrase))
                    .case_insensitive(case_insensitive)
                    .build()
                    .map_err(|e| {
                        RelayError::Config(format!("invalid lookahead \"{}\": {}", phrase, e))
                    })?;
                Some(regex)
            }
            _ => None,
        };

        Ok(CompiledRule {
            rule: self.clone(),
            token,
            lookahead,
        })
    }
}

/// A rule ready to be applied to text
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: SubstitutionRule,
    token: Regex,
    lookahead: Option<Regex>,
}

impl CompiledRule {
    pub fn rule(&self) -> &SubstitutionRule {
        &self.rule
    }

    /// Applies the rule once over `text`.
    ///
    /// Returns `Cow::Borrowed` exactly when nothing matched.
    pub fn apply<'t>(&self, text: &'t str) -> (Cow<'t, str>, usize) {
        let mut output = String::new();
        let mut last = 0;
        let mut count = 0;
        let mut start = 0;

        while start <= text.len() {
            let found = match self.token.find_at(text, start) {
                Some(m) => m,
                None => break,
            };
            start = found.end();

            if let Some(ref lookahead) = self.lookahead {
                if !lookahead.is_match(&text[found.end()..]) {
                    continue;
                }
            }

            output.push_str(&text[last..found.start()]);
            output.push_str(&self.replacement_for(found.as_str()));
            last = found.end();
            count += 1;
        }

        if count == 0 {
            return (Cow::Borrowed(text), 0);
        }

        output.push_str(&text[last..]);
        (Cow::Owned(output), count)
    }

    fn replacement_for(&self, matched: &str) -> String {
        match self.rule.case {
            CaseMode::Preserve => render(&self.rule.replacement, classify(matched)),
            CaseMode::Exact => self.rule.replacement.clone(),
        }
    }
}

/// 在以单词字符开头/结尾的模式两侧加上单词边界
fn bounded(escaped: &str, raw: &str) -> String {
    let starts_with_word = raw.chars().next().map_or(false, is_word_char);
    let prefix = if starts_with_word { r"\b" } else { "" };
    format!("{}{}", prefix, bounded_end(escaped, raw))
}

fn bounded_end(escaped: &str, raw: &str) -> String {
    let ends_with_word = raw.chars().last().map_or(false, is_word_char);
    if ends_with_word {
        format!(r"{}\b", escaped)
    } else {
        escaped.to_string()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
