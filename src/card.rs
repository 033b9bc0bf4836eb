use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CardError;

/// Part of speech a vocabulary card belongs to
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WordType {
    Verb,
    Noun,
    Adjective,
    Adverb,
}

impl WordType {
    pub const ALL: [WordType; 4] = [
        WordType::Verb,
        WordType::Noun,
        WordType::Adjective,
        WordType::Adverb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WordType::Verb => "verb",
            WordType::Noun => "noun",
            WordType::Adjective => "adjective",
            WordType::Adverb => "adverb",
        }
    }
}

impl fmt::Display for WordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WordType {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verb" => Ok(WordType::Verb),
            "noun" => Ok(WordType::Noun),
            "adjective" => Ok(WordType::Adjective),
            "adverb" => Ok(WordType::Adverb),
            other => Err(CardError::UnknownWordType(other.to_string())),
        }
    }
}

/// Word-type filter applied to the working set
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum WordFilter {
    #[default]
    All,
    Only(WordType),
}

impl WordFilter {
    pub const CHOICES: [WordFilter; 5] = [
        WordFilter::All,
        WordFilter::Only(WordType::Verb),
        WordFilter::Only(WordType::Noun),
        WordFilter::Only(WordType::Adjective),
        WordFilter::Only(WordType::Adverb),
    ];

    pub fn matches(&self, card: &VocabularyCard) -> bool {
        match self {
            WordFilter::All => true,
            WordFilter::Only(word_type) => card.word_type == *word_type,
        }
    }
}

impl fmt::Display for WordFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordFilter::All => f.write_str("all"),
            WordFilter::Only(word_type) => word_type.fmt(f),
        }
    }
}

impl FromStr for WordFilter {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(WordFilter::All);
        }
        s.parse().map(WordFilter::Only)
    }
}

impl TryFrom<String> for WordFilter {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WordFilter> for String {
    fn from(filter: WordFilter) -> Self {
        filter.to_string()
    }
}

/// Which list of the deck a card lives in
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Builtin,
    Custom,
}

/// A single vocabulary flashcard
///
/// Cards are never edited in place; deleting one removes it from the list
/// that owns it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyCard {
    pub term: String,
    pub definition: String,
    pub example: String,
    pub word_type: WordType,
    #[serde(default)]
    pub word_family: Vec<String>,
}

impl VocabularyCard {
    pub fn new(
        term: impl Into<String>,
        definition: impl Into<String>,
        example: impl Into<String>,
        word_type: WordType,
    ) -> Self {
        VocabularyCard {
            term: term.into(),
            definition: definition.into(),
            example: example.into(),
            word_type,
            word_family: Vec::new(),
        }
    }

    pub fn with_family<I, S>(mut self, family: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.word_family = family.into_iter().map(Into::into).collect();
        self
    }

    /// Word family joined the way it is shown and exported: `"a, b"`
    pub fn family_label(&self) -> String {
        self.word_family.join(", ")
    }

    /// Checks the fields the add-card form marks as required
    pub fn validate(&self) -> Result<(), CardError> {
        if self.term.trim().is_empty() {
            return Err(CardError::MissingField("term"));
        }
        if self.definition.trim().is_empty() {
            return Err(CardError::MissingField("definition"));
        }
        if self.example.trim().is_empty() {
            return Err(CardError::MissingField("example"));
        }
        Ok(())
    }
}

/// Splits a comma-separated word family, dropping empty pieces
pub fn split_family(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw input of the add-card form
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CardForm {
    pub term: String,
    pub definition: String,
    pub example: String,
    pub word_type: WordType,
    /// Comma-separated, e.g. `"Achievement (n), Achieve (v)"`
    #[serde(default)]
    pub word_family: String,
}

impl From<CardForm> for VocabularyCard {
    fn from(form: CardForm) -> Self {
        let family = split_family(&form.word_family);
        VocabularyCard::new(form.term, form.definition, form.example, form.word_type)
            .with_family(family)
    }
}
