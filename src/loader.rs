use std::io::Cursor;
use std::path::Path;

use log::debug;

use crate::card::{VocabularyCard, WordType, split_family};
use crate::downloader::{COLUMNS, SheetFormat};
use crate::error::ImportError;

/// Positions of the known columns inside a header row
#[derive(Debug, Default)]
struct ColumnMap {
    indices: [Option<usize>; 5],
}

impl ColumnMap {
    fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut map = ColumnMap::default();
        for (position, header) in headers.into_iter().enumerate() {
            let header = header.trim();
            if let Some(column) = COLUMNS.iter().position(|c| c.eq_ignore_ascii_case(header)) {
                if map.indices[column].is_none() {
                    map.indices[column] = Some(position);
                }
            }
        }
        map
    }

    /// Value of a named column; empty cells count as missing
    fn get<'r>(&self, column: usize, row: &'r [String]) -> Option<&'r str> {
        self.indices[column]
            .and_then(|position| row.get(position))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Turns one data row into a card
///
/// Missing text fields become empty strings, a missing word type becomes
/// `noun` and an unknown word type rejects the row.
fn card_from_row(map: &ColumnMap, row: &[String], line: usize) -> Result<VocabularyCard, ImportError> {
    let text = |column: usize| map.get(column, row).unwrap_or_default().to_string();

    let word_type = match map.get(3, row).map(str::trim).filter(|t| !t.is_empty()) {
        Some(raw) => raw
            .parse::<WordType>()
            .map_err(|source| ImportError::MalformedRow { row: line, source })?,
        None => WordType::Noun,
    };

    let word_family = map.get(4, row).map(split_family).unwrap_or_default();

    Ok(VocabularyCard::new(text(0), text(1), text(2), word_type).with_family(word_family))
}

/// Maps header + rows to cards, skipping rows with only empty cells
fn cards_from_rows(
    headers: &[String],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<Vec<VocabularyCard>, ImportError> {
    let map = ColumnMap::from_headers(headers.iter().map(String::as_str));
    let mut cards = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        // header is line 1
        cards.push(card_from_row(&map, &row, index + 2)?);
    }

    Ok(cards)
}

/// Load vocabulary cards from CSV bytes
///
/// The first record is the header; records may have fewer or more fields
/// than the header.
///
/// # Examples
/// ```
/// use vocab_cards::loader::from_csv;
///
/// let data = b"term,definition,example,wordType,wordFamily\nAdapt,Adjust,They adapted.,Verb,\"Adaptation (n), Adaptable (adj)\"\n";
/// let cards = from_csv(data).unwrap();
/// assert_eq!(cards[0].word_type.to_string(), "verb");
/// assert_eq!(cards[0].word_family, vec!["Adaptation (n)", "Adaptable (adj)"]);
/// ```
pub fn from_csv(bytes: &[u8]) -> Result<Vec<VocabularyCard>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    cards_from_rows(&headers, rows)
}

fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;

    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        _ => String::new(),
    }
}

/// Load vocabulary cards from an Excel workbook (XLSX or XLS)
///
/// Only the first worksheet is read.
pub fn from_excel(bytes: &[u8]) -> Result<Vec<VocabularyCard>, ImportError> {
    use calamine::{Reader, open_workbook_auto_from_rs};

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoSheets)??;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());

    let headers = match rows.next() {
        Some(headers) => headers,
        None => return Ok(Vec::new()),
    };

    cards_from_rows(&headers, rows)
}

pub fn load_cards(bytes: &[u8], format: SheetFormat) -> Result<Vec<VocabularyCard>, ImportError> {
    match format {
        SheetFormat::Csv => from_csv(bytes),
        SheetFormat::Xlsx => from_excel(bytes),
    }
}

/// Detect file type and load appropriate format
///
/// # Examples
/// ```no_run
/// use vocab_cards::loader::load_file;
///
/// match load_file("cards.xlsx") {
///     Ok(cards) => println!("Loaded {} cards", cards.len()),
///     Err(e) => eprintln!("Error loading file: {}", e),
/// }
/// ```
pub fn load_file(filepath: impl AsRef<Path>) -> Result<Vec<VocabularyCard>, ImportError> {
    let path = filepath.as_ref();
    let format = SheetFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    load_cards(&bytes, format)
}
