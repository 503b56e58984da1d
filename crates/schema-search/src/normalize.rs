/// Canonicalize a raw search string.
///
/// Trims the input, drops one trailing `s` (a naive singular), removes any remaining
/// whitespace and lower-cases what is left. `"Product Variants "` becomes
/// `"productvariant"`.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let singular = trimmed.strip_suffix('s').unwrap_or(trimmed);
    singular
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A normalized search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    term: String,
    match_all: bool,
}

impl SearchTerm {
    pub fn parse(raw: &str) -> Self {
        Self {
            term: normalize(raw),
            match_all: raw.trim().is_empty(),
        }
    }

    /// The normalized term, matched as a substring of lower-cased names.
    pub fn as_str(&self) -> &str {
        &self.term
    }

    /// True when the raw query was empty or only whitespace. The type list is then
    /// returned whole instead of being filtered.
    pub fn matches_all(&self) -> bool {
        self.match_all
    }
}
