/*!
# Vocabulary Cards

A vocabulary flashcard viewer built in Rust: flip word cards, filter them by
word type, add and delete your own cards, move cards in and out of CSV or
Excel files and print the whole set as a grid.

## Architecture

### Frontend Layer
- **Browser page** served by the web binary: shows the current card, the
  filter buttons, navigation and the add/import/export/print controls.
- **Terminal REPL** (`vocab-cli`): the same operations from stdin.

### Core Layer
- **Card model** - `VocabularyCard`, `WordType`, `WordFilter`, `Origin`
- **Deck** - immutable built-in list plus the growable custom list; the
  working set is `builtin ++ custom`, every entry tagged with its origin
- **Session** - the single controller: filter, cursor, flip flag, reviewed
  set and score; add and delete with a confirmation handshake; import merge;
  an event queue carrying confirmations and notices to the front end

### File Layer
- **loader** - CSV / XLSX / XLS rows to cards
- **downloader** - cards to CSV / XLSX with a dated filename
- **print** - printable grid of the filtered set

## Session rules

- Changing the filter resets cursor, flip flag, reviewed set and score.
- Navigation saturates at both ends.
- The first reveal of a position scores one point; re-flipping never does.
- Only custom cards can be deleted, and only after the pending confirmation
  is answered with yes. The reviewed set is re-keyed so it keeps pointing at
  the same cards.
- An import either appends every row of the file or changes nothing.

## REST API Endpoints

- `GET /api/session` - current view
- `POST /api/filter`, `/api/next`, `/api/previous`, `/api/reveal`
- `POST /api/cards` - add a card
- `POST /api/delete`, `/api/confirm` - two-step delete
- `GET /api/export?format=csv|xlsx`, `POST /api/import`
- `GET /print` - printable grid
*/

pub mod card;
pub mod config;
pub mod deck;
pub mod downloader;
pub mod error;
pub mod loader;
pub mod print;
pub mod session;
pub mod vocabulary;

#[cfg(feature = "web")]
pub mod app;

/// Re-export everything from these modules to make it easier to use
pub use card::*;
pub use deck::*;
pub use downloader::{ExportFile, SheetFormat};
pub use error::{CardError, ExportError, ImportError, SessionError};
pub use session::*;
