use serde::Serialize;
use std::path::PathBuf;

/// Everything from this character to the end of a line is a comment.
pub const COMMENT_MARKER: char = '#';

/// Repository names read from one or more filtering files.
///
/// Entries keep file order, but only membership matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterRule {
    entries: Vec<String>,
}

impl FilterRule {
    /// Parse filtering file content.
    ///
    /// ```
    /// use mgit::domain::entities::filter_policy::FilterRule;
    ///
    /// let rule = FilterRule::parse("repo1\n  repo2  # keep\n# repo3 excluded\n");
    /// assert_eq!(rule.entries(), ["repo1", "repo2"]);
    /// ```
    pub fn parse(content: &str) -> Self {
        Self {
            entries: content
                .lines()
                .filter_map(Self::strip_line)
                .map(str::to_string)
                .collect(),
        }
    }

    /// Remove the comment and surrounding whitespace from one line.
    ///
    /// Returns `None` when nothing is left. There is no escaping: the first
    /// `#` always starts a comment.
    pub fn strip_line(line: &str) -> Option<&str> {
        let without_comment = match line.find(COMMENT_MARKER) {
            Some(index) => &line[..index],
            None => line,
        };
        let trimmed = without_comment.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Append the entries of another rule (union of several files).
    pub fn extend(&mut self, other: FilterRule) {
        self.entries.extend(other.entries);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry == name)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where the active rules came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "paths")]
pub enum FilterSource {
    /// Filtering is off
    None,
    /// Files named with `--filtering-file`
    ExplicitFile(Vec<PathBuf>),
    /// The dotfile found at the scan root
    AutoDiscovered(PathBuf),
}

/// Inclusion policy for one scan root, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterPolicy {
    pub enabled: bool,
    pub invert: bool,
    pub rules: FilterRule,
    pub source: FilterSource,
}

impl FilterPolicy {
    /// Policy that includes every repository.
    pub fn disabled(invert: bool) -> Self {
        Self {
            enabled: false,
            invert,
            rules: FilterRule::default(),
            source: FilterSource::None,
        }
    }

    pub fn from_rules(rules: FilterRule, invert: bool, source: FilterSource) -> Self {
        Self {
            enabled: true,
            invert,
            rules,
            source,
        }
    }

    /// `(name in rules) XOR invert` when enabled, always `true` otherwise.
    pub fn includes(&self, name: &str) -> bool {
        if !self.enabled {
            return true;
        }
        self.rules.contains(name) != self.invert
    }

    /// Rules picked up implicitly must be confirmed before anything runs.
    pub fn requires_confirmation(&self) -> bool {
        self.enabled && matches!(self.source, FilterSource::AutoDiscovered(_))
    }
}
