//! Ordered keyword table
//!
//! Sets are checked top to bottom and the first set with a matching keyword
//! wins, so the declared order decides ambiguous inputs.

use crate::{ClassifierError, Intent, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    pub intent: Intent,
    pub keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(intent: Intent, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            intent,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// First keyword that occurs anywhere in `text`. Case-sensitive.
    pub fn find_in(&self, text: &str) -> Option<&str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .find(|keyword| text.contains(keyword))
    }
}

/// A validated, ordered list of keyword sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<KeywordSet>", into = "Vec<KeywordSet>")]
pub struct KeywordTable {
    sets: Vec<KeywordSet>,
}

impl KeywordTable {
    pub fn new(sets: Vec<KeywordSet>) -> Result<Self> {
        if sets.is_empty() {
            return Err(ClassifierError::EmptyTable);
        }
        let mut seen = HashSet::new();
        for set in &sets {
            if set.intent == Intent::Unknown {
                return Err(ClassifierError::UnknownEntry);
            }
            if !seen.insert(set.intent) {
                return Err(ClassifierError::DuplicateIntent(set.intent));
            }
            if set.keywords.iter().any(String::is_empty) {
                return Err(ClassifierError::EmptyKeyword(set.intent));
            }
        }
        Ok(Self { sets })
    }

    pub fn sets(&self) -> &[KeywordSet] {
        &self.sets
    }

    pub fn keywords_for(&self, intent: Intent) -> Option<&[String]> {
        self.sets
            .iter()
            .find(|set| set.intent == intent)
            .map(|set| set.keywords.as_slice())
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        let sets = vec![
            KeywordSet::new(
                Intent::Stand,
                ["stand up", "get up", "wake up", "rise", "on feet", "stand"],
            ),
            KeywordSet::new(
                Intent::Sit,
                ["sit", "sit down", "down", "rest", "take a seat"],
            ),
            KeywordSet::new(
                Intent::StandDown,
                ["stand down", "lie down", "downward", "floor", "ground"],
            ),
            KeywordSet::new(Intent::Stretch, ["stretch", "extend", "reach out"]),
            KeywordSet::new(
                Intent::Move,
                ["move", "move forward", "walk", "march", "advance", "step"],
            ),
            KeywordSet::new(Intent::Stop, ["stop", "halt", "freeze", "pause", "stay"]),
            KeywordSet::new(
                Intent::Balance,
                ["balance", "steady", "stabilize", "hold"],
            ),
            KeywordSet::new(
                Intent::Recover,
                ["recover", "get up again", "reset", "back up"],
            ),
        ];
        Self { sets }
    }
}

impl TryFrom<Vec<KeywordSet>> for KeywordTable {
    type Error = ClassifierError;

    fn try_from(sets: Vec<KeywordSet>) -> Result<Self> {
        Self::new(sets)
    }
}

impl From<KeywordTable> for Vec<KeywordSet> {
    fn from(table: KeywordTable) -> Self {
        table.sets
    }
}
