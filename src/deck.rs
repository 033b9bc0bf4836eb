use crate::card::{Origin, VocabularyCard, WordFilter};
use crate::vocabulary::builtin_cards;

/// Built-in cards plus the cards a user added or imported
#[derive(Clone, Debug)]
pub struct Deck {
    builtin: Vec<VocabularyCard>,
    custom: Vec<VocabularyCard>,
}

/// A card in the working set together with the list it came from
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeckEntry<'a> {
    pub card: &'a VocabularyCard,
    pub origin: Origin,
    /// Index inside the owning list
    pub slot: usize,
}

impl DeckEntry<'_> {
    pub fn is_custom(&self) -> bool {
        self.origin == Origin::Custom
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new(builtin_cards().to_vec())
    }
}

impl Deck {
    pub fn new(builtin: Vec<VocabularyCard>) -> Self {
        Deck {
            builtin,
            custom: Vec::new(),
        }
    }

    pub fn builtin(&self) -> &[VocabularyCard] {
        &self.builtin
    }

    pub fn custom(&self) -> &[VocabularyCard] {
        &self.custom
    }

    pub fn len(&self) -> usize {
        self.builtin.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Built-in cards followed by custom cards, built fresh on every call
    pub fn working_set(&self) -> impl Iterator<Item = DeckEntry<'_>> + '_ {
        let builtin = self.builtin.iter().enumerate().map(|(slot, card)| DeckEntry {
            card,
            origin: Origin::Builtin,
            slot,
        });
        let custom = self.custom.iter().enumerate().map(|(slot, card)| DeckEntry {
            card,
            origin: Origin::Custom,
            slot,
        });
        builtin.chain(custom)
    }

    pub fn filtered(&self, filter: WordFilter) -> Vec<DeckEntry<'_>> {
        self.working_set()
            .filter(|entry| filter.matches(entry.card))
            .collect()
    }

    pub(crate) fn push_custom(&mut self, card: VocabularyCard) {
        self.custom.push(card);
    }

    pub(crate) fn extend_custom(&mut self, cards: impl IntoIterator<Item = VocabularyCard>) {
        self.custom.extend(cards);
    }

    /// Removes one custom card; built-in cards are never removed
    pub(crate) fn remove_custom(&mut self, slot: usize) -> Option<VocabularyCard> {
        if slot < self.custom.len() {
            Some(self.custom.remove(slot))
        } else {
            None
        }
    }
}
