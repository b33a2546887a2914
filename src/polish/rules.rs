//! Ordered literal rewrite rules.
//!
//! Rules are applied one after another with replace-all; a later rule sees
//! the output of the earlier ones.  There is no precedence or overlap
//! handling beyond list order, so longer phrases must come before the words
//! they contain.
//!
//! User rules persist as JSON in the platform config directory:
//!
//! | Platform | Path |
//! |----------|------|
//! | Windows  | `%APPDATA%\tamil-translator\polish-rules.json` |
//! | macOS    | `~/Library/Application Support/tamil-translator/polish-rules.json` |
//! | Linux    | `~/.config/tamil-translator/polish-rules.json` |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::AppPaths;

// ---------------------------------------------------------------------------
// RewriteRule
// ---------------------------------------------------------------------------

/// A single literal substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Text to look for.
    pub from: String,
    /// Replacement.
    pub to: String,
}

impl RewriteRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

/// Formal → colloquial Tamil.  Phrases precede the words inside them.
const BUILTIN: &[(&str, &str)] = &[
    ("எப்படி இருக்கிறீர்கள்", "எப்படி இருக்கீங்க"),
    ("நன்றாக இருக்கிறேன்", "நல்லா இருக்கேன்"),
    ("இருக்கிறீர்கள்", "இருக்கீங்க"),
    ("இருக்கிறேன்", "இருக்கேன்"),
    ("இருக்கிறது", "இருக்கு"),
    ("இருக்கின்றன", "இருக்கு"),
    ("போகிறேன்", "போறேன்"),
    ("வருகிறேன்", "வரேன்"),
    ("செய்கிறேன்", "செய்யறேன்"),
    ("சொல்கிறேன்", "சொல்றேன்"),
    ("பார்க்கிறேன்", "பாக்குறேன்"),
    ("வேண்டும்", "வேணும்"),
    ("இல்லை", "இல்ல"),
    ("அவர்கள்", "அவங்க"),
    ("நீங்கள்", "நீங்க"),
    ("நன்றாக", "நல்லா"),
    ("என்னுடைய", "என்"),
    ("உங்களுடைய", "உங்க"),
];

/// The built-in formal → colloquial rules, in application order.
pub fn builtin_rules() -> Vec<RewriteRule> {
    BUILTIN
        .iter()
        .map(|(from, to)| RewriteRule::new(*from, *to))
        .collect()
}

// ---------------------------------------------------------------------------
// PolishRules
// ---------------------------------------------------------------------------

/// Built-in plus user-defined rewrite rules.
///
/// User rules are persisted to JSON after every [`add`](PolishRules::add)
/// call and always run after the built-in table.
pub struct PolishRules {
    builtin: Vec<RewriteRule>,
    user: Vec<RewriteRule>,
    path: PathBuf,
}

impl PolishRules {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Built-in rules plus user rules from the platform config directory.
    pub fn load_or_default() -> Self {
        Self::load_from(AppPaths::new().polish_rules_file, true)
    }

    /// Load user rules from an explicit path (useful for tests).
    ///
    /// A missing or unreadable file yields no user rules.
    pub fn load_from(path: PathBuf, include_builtin: bool) -> Self {
        let user = Self::load_rules(&path);
        let builtin = if include_builtin {
            builtin_rules()
        } else {
            Vec::new()
        };
        Self {
            builtin,
            user,
            path,
        }
    }

    fn load_rules(path: &Path) -> Vec<RewriteRule> {
        if !path.exists() {
            return Vec::new();
        }
        let data = std::fs::read_to_string(path).unwrap_or_default();
        match serde_json::from_str(&data) {
            Ok(rules) => rules,
            Err(e) => {
                log::warn!("polish: ignoring unreadable rules file {}: {e}", path.display());
                Vec::new()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Add or update a user rule, then persist to disk.
    ///
    /// An existing rule with the same `from` is updated in place (keeping its
    /// position in the order); otherwise the rule is appended.  An empty
    /// `from` is ignored.
    pub fn add(&mut self, from: String, to: String) {
        if from.is_empty() {
            return;
        }
        if let Some(rule) = self.user.iter_mut().find(|r| r.from == from) {
            rule.to = to;
        } else {
            self.user.push(RewriteRule { from, to });
        }
        self.save();
    }

    // -----------------------------------------------------------------------
    // Application
    // -----------------------------------------------------------------------

    /// Apply every rule, built-in first, in list order.
    ///
    /// ```
    /// use tamil_translator::polish::PolishRules;
    ///
    /// let rules = PolishRules::load_from("/nonexistent/rules.json".into(), true);
    /// assert_eq!(rules.apply("நீங்கள் எப்படி இருக்கிறீர்கள்"), "நீங்க எப்படி இருக்கீங்க");
    /// ```
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for rule in self.rules() {
            if !rule.from.is_empty() && out.contains(rule.from.as_str()) {
                out = out.replace(rule.from.as_str(), &rule.to);
            }
        }
        out
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// All rules in application order.
    pub fn rules(&self) -> impl Iterator<Item = &RewriteRule> {
        self.builtin.iter().chain(self.user.iter())
    }

    /// User-defined rules only.
    pub fn user_rules(&self) -> &[RewriteRule] {
        &self.user
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.builtin.len() + self.user.len()
    }

    /// Returns `true` when there are no rules at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    fn save(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(&self.user) {
            Ok(data) => {
                if let Err(e) = std::fs::write(&self.path, data) {
                    log::warn!("polish: could not save rules to {}: {e}", self.path.display());
                }
            }
            Err(e) => log::warn!("polish: could not serialise rules: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
