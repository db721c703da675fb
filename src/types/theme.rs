//! Loosely-typed model of a VS Code color theme document.
//!
//! Every field is optional: theme files in the wild omit most of them, and
//! absence must stay distinguishable from an empty value so the presence
//! flags on the final result come out right. Unknown fields are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A parsed theme document. `colors` maps UI-element keys to color strings;
/// `token_colors` is the ordered list of syntax-highlighting rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDocument {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub publisher: Option<String>,
    /// Declared appearance, usually `dark`, `light` or `hc`. Kept free-form:
    /// the schema is best-effort and editors ship other values too.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub colors: Option<BTreeMap<String, String>>,
    pub token_colors: Option<Vec<TokenColorRule>>,
    pub semantic_token_colors: Option<BTreeMap<String, SemanticTokenStyle>>,
    pub semantic_highlighting: Option<bool>,
}

impl ThemeDocument {
    /// True iff `colors` is present and contains at least one entry.
    pub fn has_colors(&self) -> bool {
        self.colors.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// True iff `token_colors` is present and contains at least one rule.
    pub fn has_token_colors(&self) -> bool {
        self.token_colors.as_ref().is_some_and(|t| !t.is_empty())
    }
}

/// One scope-to-style rule. `scope` accepts both a single selector string
/// and an ordered list of selectors; both forms are valid in theme files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenColorRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeSelector>,
    pub settings: TokenSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeSelector {
    Single(String),
    Multiple(Vec<String>),
}

impl ScopeSelector {
    /// Flattened view of the selector, regardless of declared form.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            ScopeSelector::Single(s) => vec![s.as_str()],
            ScopeSelector::Multiple(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// e.g. `"italic bold"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
}

/// Value of a `semanticTokenColors` entry: either a bare color string or a
/// full settings record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SemanticTokenStyle {
    Color(String),
    Settings(TokenSettings),
}
