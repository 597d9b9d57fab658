// Wordshard anagram engine
// Generates distinct letter-multiset permutations and filters them
// against the wordlist

use rustc_hash::FxHashSet;

use crate::wordlist::WordList;

/// Generate every distinct permutation of the fragment's letter multiset
///
/// Repeated letters collapse duplicate arrangements: `"aab"` yields exactly
/// `{"aab", "aba", "baa"}`, not 3! = 6 strings. The empty fragment yields
/// the empty-string singleton and a single letter yields itself. Output
/// carries no ordering guarantee.
pub fn generate(fragment: &str) -> FxHashSet<String> {
    let letters: Vec<char> = fragment.chars().collect();
    let mut result = FxHashSet::default();
    permute(&letters, String::with_capacity(letters.len()), &mut result);
    result
}

/// Recursive multiset-permutation step
///
/// At each level, each distinct letter value is chosen once as the next
/// character and exactly that occurrence is removed from the remainder,
/// which prunes duplicate branches before they are generated.
fn permute(remaining: &[char], prefix: String, out: &mut FxHashSet<String>) {
    if remaining.is_empty() {
        out.insert(prefix);
        return;
    }
    let mut chosen = FxHashSet::default();
    for (i, &ch) in remaining.iter().enumerate() {
        if !chosen.insert(ch) {
            continue;
        }
        let mut rest = remaining.to_vec();
        rest.remove(i);
        let mut next = prefix.clone();
        next.push(ch);
        permute(&rest, next, out);
    }
}

/// Keep the anagrams present in the wordlist, sorted lexicographically
///
/// The set iteration order of `generate` is unspecified, so results are
/// sorted for deterministic display.
pub fn filter_against_wordlist(anagrams: &FxHashSet<String>, wordlist: &WordList) -> Vec<String> {
    let mut found: Vec<String> = anagrams
        .iter()
        .filter(|candidate| wordlist.contains(candidate))
        .cloned()
        .collect();
    found.sort();
    found
}
