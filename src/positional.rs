// Wordshard positional matcher
// Searches the wordlist for fragment occurrences at the start, end,
// or strict interior of candidate words

use crate::wordlist::WordList;

/// Maximum number of matches returned per search; the true total is still
/// reported so callers can render "(showing first 200)"
pub const RESULT_LIMIT: usize = 200;

/// Where the fragment must occur within a candidate word
///
/// Every rule requires the candidate to be strictly longer than the
/// fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionalRule {
    /// Candidate begins with the fragment
    Starts,

    /// Candidate ends with the fragment
    Ends,

    /// First occurrence of the fragment touches neither edge of the
    /// candidate. With `symmetric` set, the length difference must also be
    /// even (equal-length padding on both sides).
    Center { symmetric: bool },
}

impl std::fmt::Display for PositionalRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionalRule::Starts => write!(f, "Starts"),
            PositionalRule::Ends => write!(f, "Ends"),
            PositionalRule::Center { symmetric } => write!(f, "Center(symmetric={})", symmetric),
        }
    }
}

/// Outcome of a positional search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    /// Up to [`RESULT_LIMIT`] matches, ascending by length then alphabetical
    pub words: Vec<String>,

    /// True number of matches before truncation
    pub total: usize,

    /// Whether `words` was cut off at the limit
    pub truncated: bool,
}

impl MatchSet {
    /// A search that matched nothing
    pub fn empty() -> Self {
        Self {
            words: Vec::new(),
            total: 0,
            truncated: false,
        }
    }

    /// Whether the search matched nothing
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Render one `word (len)` line per match, in ranked order
    pub fn lines(&self) -> Vec<String> {
        self.words
            .iter()
            .map(|word| format!("{} ({})", word, word.chars().count()))
            .collect()
    }
}

/// Search the wordlist for words containing `fragment` under `rule`
///
/// Results are ranked ascending by word length with ties broken
/// alphabetically, then truncated to [`RESULT_LIMIT`]. An empty fragment
/// matches nothing; the no-selection guard belongs to the caller.
pub fn search(rule: PositionalRule, fragment: &str, wordlist: &WordList) -> MatchSet {
    if fragment.is_empty() {
        return MatchSet::empty();
    }

    let mut matches: Vec<String> = wordlist
        .iter()
        .filter(|word| matches_rule(rule, fragment, word))
        .map(str::to_string)
        .collect();

    matches.sort_by(|a, b| {
        let (la, lb) = (a.chars().count(), b.chars().count());
        la.cmp(&lb).then_with(|| a.cmp(b))
    });

    let total = matches.len();
    let truncated = total > RESULT_LIMIT;
    matches.truncate(RESULT_LIMIT);

    MatchSet {
        words: matches,
        total,
        truncated,
    }
}

/// Check one candidate word against one positional rule
///
/// Length comparisons count characters rather than bytes, so multi-byte
/// words see the same strictly-longer and even-padding rules as ASCII ones.
pub fn matches_rule(rule: PositionalRule, fragment: &str, word: &str) -> bool {
    let (m, n) = (fragment.chars().count(), word.chars().count());
    if n <= m {
        return false;
    }
    match rule {
        PositionalRule::Starts => word.starts_with(fragment),
        PositionalRule::Ends => word.ends_with(fragment),
        PositionalRule::Center { symmetric } => {
            if symmetric && (n - m) % 2 != 0 {
                return false;
            }
            // First occurrence must be strictly interior: not at index 0
            // and not reaching the final letter. Byte offsets are exact for
            // both edge checks.
            match word.find(fragment) {
                Some(index) => index > 0 && index + fragment.len() < word.len(),
                None => false,
            }
        }
    }
}
