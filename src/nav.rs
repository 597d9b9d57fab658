// Wordshard navigation state machine
// Active mode/submode tracking and pattern formatting for the external
// pattern-search collaborators

use crate::tables::IndicatorCategory;

/// Primary navigation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeId {
    Definition,
    Synonyms,
    Abbreviations,
    Anagram,
    Starts,
    Ends,
    Center,
    Indicators,
}

impl ModeId {
    /// Resolve an id string; unknown ids are `None`
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "definition" => Some(ModeId::Definition),
            "synonyms" => Some(ModeId::Synonyms),
            "abbreviations" => Some(ModeId::Abbreviations),
            "anagram" => Some(ModeId::Anagram),
            "starts" => Some(ModeId::Starts),
            "ends" => Some(ModeId::Ends),
            "center" => Some(ModeId::Center),
            "indicators" => Some(ModeId::Indicators),
            _ => None,
        }
    }
}

/// Secondary navigation selection inside a composite mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmodeId {
    /// Run the local analysis over the loaded wordlist
    Wordlist,

    /// Hand the pattern to the Nutrimatic collaborator
    Nutrimatic,

    /// Hand the pattern to the OneLook collaborator
    Onelook,

    /// Show one indicator category
    Indicator(IndicatorCategory),
}

/// External pattern-search collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternTarget {
    Nutrimatic,
    Onelook,
}

/// A formatted pattern string bound for one collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternQuery {
    pub target: PatternTarget,
    pub pattern: String,
}

/// Static mode configuration: simple modes carry no submodes, composite
/// modes carry an ordered submode list whose first entry is the reset
/// target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Simple {
        id: ModeId,
        label: &'static str,
    },
    Composite {
        id: ModeId,
        label: &'static str,
        submodes: &'static [SubmodeId],
    },
}

impl Mode {
    /// The mode's id regardless of shape
    pub fn id(&self) -> ModeId {
        match self {
            Mode::Simple { id, .. } | Mode::Composite { id, .. } => *id,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Simple { label, .. } | Mode::Composite { label, .. } => label,
        }
    }

    /// Submodes in configured order; empty for simple modes
    pub fn submodes(&self) -> &'static [SubmodeId] {
        match self {
            Mode::Simple { .. } => &[],
            Mode::Composite { submodes, .. } => submodes,
        }
    }
}

const SEARCH_SUBMODES: &[SubmodeId] = &[
    SubmodeId::Wordlist,
    SubmodeId::Nutrimatic,
    SubmodeId::Onelook,
];

const INDICATOR_SUBMODES: &[SubmodeId] = &[
    SubmodeId::Indicator(IndicatorCategory::Anagrams),
    SubmodeId::Indicator(IndicatorCategory::Hidden),
    SubmodeId::Indicator(IndicatorCategory::Insertion),
    SubmodeId::Indicator(IndicatorCategory::Deletion),
    SubmodeId::Indicator(IndicatorCategory::Reversal),
    SubmodeId::Indicator(IndicatorCategory::First),
    SubmodeId::Indicator(IndicatorCategory::Last),
    SubmodeId::Indicator(IndicatorCategory::Edge),
];

/// The configured navigation modes, in display order
pub const MODES: &[Mode] = &[
    Mode::Simple {
        id: ModeId::Definition,
        label: "Def",
    },
    Mode::Simple {
        id: ModeId::Synonyms,
        label: "Syn",
    },
    Mode::Simple {
        id: ModeId::Abbreviations,
        label: "Abbr",
    },
    Mode::Composite {
        id: ModeId::Anagram,
        label: "Anagram",
        submodes: SEARCH_SUBMODES,
    },
    Mode::Composite {
        id: ModeId::Starts,
        label: "Starts",
        submodes: SEARCH_SUBMODES,
    },
    Mode::Composite {
        id: ModeId::Ends,
        label: "Ends",
        submodes: SEARCH_SUBMODES,
    },
    Mode::Composite {
        id: ModeId::Center,
        label: "Center",
        submodes: SEARCH_SUBMODES,
    },
    Mode::Composite {
        id: ModeId::Indicators,
        label: "Indicators",
        submodes: INDICATOR_SUBMODES,
    },
];

/// Look up the static configuration for a mode id
pub fn mode_config(id: ModeId) -> &'static Mode {
    MODES
        .iter()
        .find(|mode| mode.id() == id)
        .expect("every ModeId is configured")
}

/// Format the pattern string handed to an external collaborator
///
/// Only the four pattern-capable modes produce a pattern:
/// anagram `<fragment>`, starts `fragment*`, ends `*fragment`,
/// center `A<fragment>A`.
pub fn pattern_for(mode: ModeId, fragment: &str) -> Option<String> {
    match mode {
        ModeId::Anagram => Some(format!("<{}>", fragment)),
        ModeId::Starts => Some(format!("{}*", fragment)),
        ModeId::Ends => Some(format!("*{}", fragment)),
        ModeId::Center => Some(format!("A<{}>A", fragment)),
        _ => None,
    }
}

/// Current navigation state
///
/// Selecting a composite mode resets the submode to that mode's first
/// configured submode; selecting a simple mode clears it. Invalid submode
/// selections are absorbed silently, since they arise from stale UI
/// references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    mode: ModeId,
    submode: Option<SubmodeId>,
}

impl Navigation {
    /// Start in the default dictionary view
    pub fn new() -> Self {
        Self {
            mode: ModeId::Definition,
            submode: None,
        }
    }

    /// Active mode
    pub fn mode(&self) -> ModeId {
        self.mode
    }

    /// Active submode, `None` in simple modes
    pub fn submode(&self) -> Option<SubmodeId> {
        self.submode
    }

    /// Switch modes, resetting the submode per the mode's shape
    pub fn select_mode(&mut self, id: ModeId) {
        self.mode = id;
        self.submode = mode_config(id).submodes().first().copied();
    }

    /// Switch modes by id string; unknown ids are a no-op
    pub fn select_mode_id(&mut self, id: &str) {
        if let Some(mode) = ModeId::from_id(id) {
            self.select_mode(mode);
        }
    }

    /// Switch submodes within the active composite mode
    ///
    /// No-op while a simple mode is active or when the submode does not
    /// belong to the active mode.
    pub fn select_submode(&mut self, id: SubmodeId) {
        if mode_config(self.mode).submodes().contains(&id) {
            self.submode = Some(id);
        }
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}
