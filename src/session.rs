use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::{BTreeSet, VecDeque};
use std::path::Path;

use crate::card::{Origin, VocabularyCard, WordFilter};
use crate::deck::{Deck, DeckEntry};
use crate::downloader::{self, ExportFile, SheetFormat};
use crate::error::{ImportError, Result, SessionError};
use crate::loader;

/// A question the front end has to answer through [`Session::respond`]
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub term: String,
    pub prompt: String,
}

/// Messages the front end shows to the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Imported { count: usize },
    NothingToImport,
    ImportFailed { reason: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Imported { count } => {
                format!("Successfully imported {} vocabulary cards!", count)
            }
            Notice::NothingToImport => {
                "No valid vocabulary cards found in the file. Please check the format.".to_string()
            }
            Notice::ImportFailed { .. } => "Error importing file. Please make sure it's a valid CSV or Excel file with the correct format.".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Imported { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    ConfirmationNeeded(Confirmation),
    Notify(Notice),
}

impl SessionEvent {
    pub fn message(&self) -> String {
        match self {
            SessionEvent::ConfirmationNeeded(confirmation) => confirmation.prompt.clone(),
            SessionEvent::Notify(notice) => notice.message(),
        }
    }
}

#[derive(Clone, Debug)]
struct PendingDelete {
    slot: usize,
    confirmation: Confirmation,
}

/// Snapshot of everything the card viewer displays
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub filter: WordFilter,
    /// 1-based position of the current card, 0 when nothing matches
    pub position: usize,
    pub total: usize,
    pub card: Option<VocabularyCard>,
    pub origin: Option<Origin>,
    pub flipped: bool,
    pub reviewed: usize,
    pub score: u32,
    pub custom_count: usize,
    pub deletable: bool,
    pub has_previous: bool,
    pub has_next: bool,
    pub pending_confirmation: Option<Confirmation>,
}

/// Viewer state: deck, active filter, cursor, flip flag and review progress
///
/// The cursor and the reviewed set are positions in the filtered set.
/// While a deletion waits for confirmation every other state change is
/// refused with [`SessionError::ConfirmationPending`].
#[derive(Debug)]
pub struct Session {
    deck: Deck,
    filter: WordFilter,
    cursor: usize,
    flipped: bool,
    reviewed: BTreeSet<usize>,
    score: u32,
    pending: Option<PendingDelete>,
    events: VecDeque<SessionEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Deck::default())
    }
}

impl Session {
    pub fn new(deck: Deck) -> Self {
        Session {
            deck,
            filter: WordFilter::All,
            cursor: 0,
            flipped: false,
            reviewed: BTreeSet::new(),
            score: 0,
            pending: None,
            events: VecDeque::new(),
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn filter(&self) -> WordFilter {
        self.filter
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn reviewed(&self) -> &BTreeSet<usize> {
        &self.reviewed
    }

    pub fn filtered(&self) -> Vec<DeckEntry<'_>> {
        self.deck.filtered(self.filter)
    }

    pub fn filtered_len(&self) -> usize {
        self.deck
            .working_set()
            .filter(|entry| self.filter.matches(entry.card))
            .count()
    }

    pub fn current(&self) -> Option<DeckEntry<'_>> {
        self.deck
            .working_set()
            .filter(|entry| self.filter.matches(entry.card))
            .nth(self.cursor)
    }

    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.filtered_len()
    }

    pub fn can_delete(&self) -> bool {
        self.current().is_some_and(|entry| entry.is_custom())
    }

    pub fn pending_confirmation(&self) -> Option<&Confirmation> {
        self.pending.as_ref().map(|pending| &pending.confirmation)
    }

    /// Drains queued confirmations and notices
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.pending.is_some() {
            warn!("Operation refused: deletion is waiting for confirmation");
            return Err(SessionError::ConfirmationPending);
        }
        Ok(())
    }

    fn notify(&mut self, notice: Notice) {
        self.events.push_back(SessionEvent::Notify(notice));
    }

    pub fn set_filter(&mut self, filter: WordFilter) -> Result<()> {
        self.ensure_idle()?;
        debug!("Filter set to {}", filter);
        self.filter = filter;
        self.cursor = 0;
        self.flipped = false;
        self.reviewed.clear();
        self.score = 0;
        Ok(())
    }

    pub fn next(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if self.has_next() {
            self.cursor += 1;
            self.flipped = false;
            debug!("Moved to card {}", self.cursor);
        }
        Ok(())
    }

    pub fn previous(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if self.has_previous() {
            self.cursor -= 1;
            self.flipped = false;
            debug!("Moved to card {}", self.cursor);
        }
        Ok(())
    }

    /// Flips the current card; the first reveal of a position scores a point
    pub fn reveal(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if self.filtered_len() == 0 {
            return Ok(());
        }
        self.flipped = !self.flipped;
        if self.flipped && self.reviewed.insert(self.cursor) {
            self.score += 1;
            debug!("Card {} reviewed, score {}", self.cursor, self.score);
        }
        Ok(())
    }

    pub fn add_card(&mut self, card: VocabularyCard) -> Result<()> {
        self.ensure_idle()?;
        card.validate()?;
        info!("Added custom card '{}' ({})", card.term, card.word_type);
        self.deck.push_custom(card);
        Ok(())
    }

    /// Asks for confirmation before deleting the current custom card
    pub fn request_delete(&mut self) -> Result<Confirmation> {
        self.ensure_idle()?;
        let (slot, term) = match self.current() {
            None => return Err(SessionError::NoCurrentCard),
            Some(entry) if entry.origin == Origin::Builtin => {
                warn!("Refusing to delete built-in card '{}'", entry.card.term);
                return Err(SessionError::BuiltinCard(entry.card.term.clone()));
            }
            Some(entry) => (entry.slot, entry.card.term.clone()),
        };

        let confirmation = Confirmation {
            prompt: format!(
                "Are you sure you want to delete the card \"{}\"? This action cannot be undone.",
                term
            ),
            term,
        };
        self.pending = Some(PendingDelete {
            slot,
            confirmation: confirmation.clone(),
        });
        self.events
            .push_back(SessionEvent::ConfirmationNeeded(confirmation.clone()));
        Ok(confirmation)
    }

    /// Answers the pending confirmation; returns the deleted card, if any
    pub fn respond(&mut self, confirmed: bool) -> Result<Option<VocabularyCard>> {
        let pending = self
            .pending
            .take()
            .ok_or(SessionError::NoPendingConfirmation)?;

        if !confirmed {
            info!("Deletion of '{}' cancelled", pending.confirmation.term);
            return Ok(None);
        }
        Ok(self.apply_delete(pending.slot))
    }

    fn apply_delete(&mut self, slot: usize) -> Option<VocabularyCard> {
        let position = self.cursor;
        let was_last = position + 1 >= self.filtered_len();

        let removed = self.deck.remove_custom(slot)?;

        self.flipped = false;
        if was_last {
            self.cursor = self.cursor.saturating_sub(1);
        }
        self.reviewed = self
            .reviewed
            .iter()
            .filter(|&&index| index != position)
            .map(|&index| if index > position { index - 1 } else { index })
            .collect();

        info!("Deleted custom card '{}'", removed.term);
        Some(removed)
    }

    /// Parses a tabular file and appends its cards to the custom list
    pub fn import(&mut self, bytes: &[u8], format: SheetFormat) -> Result<usize> {
        self.ensure_idle()?;
        let loaded = loader::load_cards(bytes, format);
        self.merge_import(loaded)
    }

    /// Import an uploaded file, picking the format from its name
    pub fn import_named(&mut self, filename: &str, bytes: &[u8]) -> Result<usize> {
        self.ensure_idle()?;
        let loaded = SheetFormat::from_path(filename)
            .and_then(|format| loader::load_cards(bytes, format));
        self.merge_import(loaded)
    }

    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        self.ensure_idle()?;
        let loaded = loader::load_file(path);
        self.merge_import(loaded)
    }

    fn merge_import(
        &mut self,
        loaded: std::result::Result<Vec<VocabularyCard>, ImportError>,
    ) -> Result<usize> {
        let cards = match loaded {
            Ok(cards) => cards,
            Err(e) => {
                warn!("Error importing file: {}", e);
                self.notify(Notice::ImportFailed {
                    reason: e.to_string(),
                });
                return Err(e.into());
            }
        };
        self.import_cards(cards)
    }

    /// Appends already parsed cards in order; an empty batch is refused
    pub fn import_cards(&mut self, cards: Vec<VocabularyCard>) -> Result<usize> {
        self.ensure_idle()?;
        if cards.is_empty() {
            warn!("Import contained no cards");
            self.notify(Notice::NothingToImport);
            return Err(ImportError::Empty.into());
        }

        let count = cards.len();
        self.deck.extend_custom(cards);
        info!("Imported {} vocabulary cards", count);
        self.notify(Notice::Imported { count });
        Ok(count)
    }

    /// Writes the filtered set in the requested format
    pub fn export(&self, format: SheetFormat, date: NaiveDate) -> Result<ExportFile> {
        let entries = self.filtered();
        let file = downloader::export_cards(entries.iter().map(|entry| entry.card), format, date)?;
        info!("Exported {} cards to {}", entries.len(), file.filename);
        Ok(file)
    }

    pub fn view(&self) -> SessionView {
        let total = self.filtered_len();
        let current = self.current();
        SessionView {
            filter: self.filter,
            position: if total == 0 { 0 } else { self.cursor + 1 },
            total,
            card: current.map(|entry| entry.card.clone()),
            origin: current.map(|entry| entry.origin),
            flipped: self.flipped,
            reviewed: self.reviewed.len(),
            score: self.score,
            custom_count: self.deck.custom().len(),
            deletable: current.is_some_and(|entry| entry.is_custom()),
            has_previous: self.has_previous(),
            has_next: self.cursor + 1 < total,
            pending_confirmation: self.pending_confirmation().cloned(),
        }
    }
}
