// Wordshard static lookup tables
// Abbreviation dictionary and cryptic-indicator categories, loaded once
// at startup and queried by exact key

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;
use rustc_hash::FxHashMap;

use crate::types::LoadError;

/// The eight cryptic-indicator categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorCategory {
    Anagrams,
    Hidden,
    Insertion,
    Deletion,
    Reversal,
    First,
    Last,
    Edge,
}

impl IndicatorCategory {
    /// All categories in display order
    pub const ALL: [IndicatorCategory; 8] = [
        IndicatorCategory::Anagrams,
        IndicatorCategory::Hidden,
        IndicatorCategory::Insertion,
        IndicatorCategory::Deletion,
        IndicatorCategory::Reversal,
        IndicatorCategory::First,
        IndicatorCategory::Last,
        IndicatorCategory::Edge,
    ];

    /// Stable identifier, used as the source-document name
    pub fn id(&self) -> &'static str {
        match self {
            IndicatorCategory::Anagrams => "anagrams",
            IndicatorCategory::Hidden => "hidden",
            IndicatorCategory::Insertion => "insertion",
            IndicatorCategory::Deletion => "deletion",
            IndicatorCategory::Reversal => "reversal",
            IndicatorCategory::First => "first",
            IndicatorCategory::Last => "last",
            IndicatorCategory::Edge => "edge",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            IndicatorCategory::Anagrams => "Anagrams",
            IndicatorCategory::Hidden => "Hidden",
            IndicatorCategory::Insertion => "Insertion",
            IndicatorCategory::Deletion => "Deletion",
            IndicatorCategory::Reversal => "Reversal",
            IndicatorCategory::First => "First",
            IndicatorCategory::Last => "Last",
            IndicatorCategory::Edge => "Edge",
        }
    }

    /// Resolve an id string; unknown ids are `None`, never an error
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|cat| cat.id() == id)
    }
}

impl std::fmt::Display for IndicatorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Abbreviation dictionary: lowercase fragment → ordered meanings
#[derive(Debug, Clone, Default)]
pub struct AbbreviationTable {
    entries: FxHashMap<String, Vec<String>>,
}

impl AbbreviationTable {
    /// Build a table from (key, meanings) pairs; keys are lowercased
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v))
            .collect();
        Self { entries }
    }

    /// Parse a JSON object of `{ "fragment": ["meaning", ...] }`
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let raw: FxHashMap<String, Vec<String>> = serde_json::from_reader(reader)?;
        info!("loaded abbreviation table: {} entries", raw.len());
        Ok(Self::from_entries(raw))
    }

    /// Load the abbreviation table from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Exact case-insensitive key lookup
    pub fn lookup(&self, fragment: &str) -> Option<&[String]> {
        let key = fragment.to_lowercase();
        self.entries.get(&key).map(Vec::as_slice)
    }

    /// Number of abbreviation keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Indicator phrases for one category, grouped by sub-category label
///
/// Sub-categories are kept in sorted label order for deterministic display;
/// phrase lists keep their document order.
pub type IndicatorList = BTreeMap<String, Vec<String>>;

/// Indicator tables for the eight categories
#[derive(Debug, Clone, Default)]
pub struct IndicatorTables {
    categories: FxHashMap<IndicatorCategory, IndicatorList>,
}

impl IndicatorTables {
    /// Create an empty table set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) one category's lists
    pub fn insert(&mut self, category: IndicatorCategory, list: IndicatorList) {
        self.categories.insert(category, list);
    }

    /// Parse one category document: `{ "sub_category": ["phrase", ...] }`
    pub fn load_category<R: Read>(
        &mut self,
        category: IndicatorCategory,
        reader: R,
    ) -> Result<(), LoadError> {
        let list: IndicatorList = serde_json::from_reader(reader)?;
        info!(
            "loaded indicator category '{}': {} sub-categories",
            category,
            list.len()
        );
        self.insert(category, list);
        Ok(())
    }

    /// Load all eight category documents from `dir/<id>.json`
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let mut tables = Self::new();
        for category in IndicatorCategory::ALL {
            let path = dir.as_ref().join(format!("{}.json", category.id()));
            let file = File::open(path)?;
            tables.load_category(category, BufReader::new(file))?;
        }
        Ok(tables)
    }

    /// Exact category lookup; a loaded-but-unpopulated category is `None`
    pub fn lookup(&self, category: IndicatorCategory) -> Option<&IndicatorList> {
        self.categories.get(&category)
    }

    /// Lookup by id string; unknown ids resolve to `None`, never an error
    pub fn lookup_id(&self, id: &str) -> Option<&IndicatorList> {
        IndicatorCategory::from_id(id).and_then(|cat| self.lookup(cat))
    }

    /// Number of loaded categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether no categories are loaded
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
