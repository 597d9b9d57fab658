// Wordshard letter selection model
// Owns the headword and the set of selected letter indices

use std::collections::BTreeSet;

/// Selection model over a headword's letter positions
///
/// The fragment is derived by concatenating the letters at the selected
/// indices in ascending index order, so the order in which indices were
/// toggled never affects the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterSelection {
    word: String,
    letters: Vec<char>,
    selected: BTreeSet<usize>,
}

impl LetterSelection {
    /// Create a selection over `word` with every letter selected
    ///
    /// The word is lowercased on entry. An empty word yields an empty
    /// selection and an empty fragment.
    pub fn new(word: &str) -> Self {
        let mut selection = Self {
            word: String::new(),
            letters: Vec::new(),
            selected: BTreeSet::new(),
        };
        selection.set_word(word);
        selection
    }

    /// Replace the headword and reset the selection to all indices
    pub fn set_word(&mut self, word: &str) {
        self.word = word.to_lowercase();
        self.letters = self.word.chars().collect();
        self.selected = (0..self.letters.len()).collect();
    }

    /// The current headword
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Number of letters in the headword
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Whether the headword is empty
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Flip membership of index `i` in the selection
    ///
    /// Out-of-range indices are ignored; stale UI references must never
    /// panic the model.
    pub fn toggle(&mut self, i: usize) {
        if i >= self.letters.len() {
            return;
        }
        if !self.selected.remove(&i) {
            self.selected.insert(i);
        }
    }

    /// Select every letter
    pub fn select_all(&mut self) {
        self.selected = (0..self.letters.len()).collect();
    }

    /// Deselect every letter
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Whether index `i` is currently selected
    pub fn is_selected(&self, i: usize) -> bool {
        self.selected.contains(&i)
    }

    /// Number of selected letters
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Derive the fragment: selected letters in original word order
    ///
    /// Empty iff the selection is empty.
    pub fn fragment(&self) -> String {
        self.selected.iter().map(|&i| self.letters[i]).collect()
    }
}
