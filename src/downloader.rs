use chrono::NaiveDate;
use std::path::Path;

use crate::card::VocabularyCard;
use crate::error::{ExportError, ImportError};

/// Column headers shared by export and import
pub const COLUMNS: [&str; 5] = ["term", "definition", "example", "wordType", "wordFamily"];

/// Worksheet name used for XLSX exports
pub const SHEET_NAME: &str = "Vocabulary Cards";

/// Tabular file formats understood by the loader and the downloader
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Xlsx,
}

impl SheetFormat {
    /// Maps a file extension to a format; `xls` is read as a workbook too
    pub fn from_extension(ext: &str) -> Result<Self, ImportError> {
        match ext.to_lowercase().as_str() {
            "csv" => Ok(SheetFormat::Csv),
            "xlsx" | "xls" => Ok(SheetFormat::Xlsx),
            other => Err(ImportError::UnsupportedExtension(other.to_string())),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or(ImportError::MissingExtension)?;
        SheetFormat::from_extension(ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Csv => "csv",
            SheetFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            SheetFormat::Csv => "text/csv; charset=utf-8",
            SheetFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// An exported file ready to be offered as a download
#[derive(Clone, Debug)]
pub struct ExportFile {
    pub filename: String,
    pub format: SheetFormat,
    pub bytes: Vec<u8>,
}

/// Builds `vocabulary-cards-<YYYY-MM-DD>.<ext>`
pub fn export_filename(date: NaiveDate, format: SheetFormat) -> String {
    format!(
        "vocabulary-cards-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

fn card_row(card: &VocabularyCard) -> [String; 5] {
    [
        card.term.clone(),
        card.definition.clone(),
        card.example.clone(),
        card.word_type.to_string(),
        card.family_label(),
    ]
}

/// Convert cards to CSV
///
/// Writes a header row followed by one row per card. Quoting of commas,
/// quotes and newlines is left to the `csv` writer.
///
/// # Examples
/// ```
/// use vocab_cards::card::{VocabularyCard, WordType};
/// use vocab_cards::downloader::to_csv;
///
/// let card = VocabularyCard::new("Adapt", "Adjust, Modify", "They adapted.", WordType::Verb);
/// let csv = String::from_utf8(to_csv([&card]).unwrap()).unwrap();
/// assert_eq!(
///     csv,
///     "term,definition,example,wordType,wordFamily\nAdapt,\"Adjust, Modify\",They adapted.,verb,\n"
/// );
/// ```
pub fn to_csv<'a>(
    cards: impl IntoIterator<Item = &'a VocabularyCard>,
) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for card in cards {
        writer.write_record(card_row(card))?;
    }
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// Convert cards to XLSX
///
/// Produces a single worksheet named [`SHEET_NAME`] with the header in the
/// first row, using the rust_xlsxwriter library.
pub fn to_xlsx<'a>(
    cards: impl IntoIterator<Item = &'a VocabularyCard>,
) -> Result<Vec<u8>, ExportError> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name(SHEET_NAME)?;

    for (c, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, c as u16, *header)?;
    }

    for (r, card) in cards.into_iter().enumerate() {
        let row = (r + 1) as u32;
        for (c, value) in card_row(card).iter().enumerate() {
            worksheet.write_string(row, c as u16, value.as_str())?;
        }
    }

    workbook.push_worksheet(worksheet);

    let buffer = workbook.save_to_buffer()?;

    Ok(buffer)
}

pub fn export_cards<'a>(
    cards: impl IntoIterator<Item = &'a VocabularyCard>,
    format: SheetFormat,
    date: NaiveDate,
) -> Result<ExportFile, ExportError> {
    let bytes = match format {
        SheetFormat::Csv => to_csv(cards)?,
        SheetFormat::Xlsx => to_xlsx(cards)?,
    };
    Ok(ExportFile {
        filename: export_filename(date, format),
        format,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::WordType;

    #[test]
    fn filename_embeds_date_and_extension() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            export_filename(date, SheetFormat::Xlsx),
            "vocabulary-cards-2024-03-07.xlsx"
        );
        assert_eq!(
            export_filename(date, SheetFormat::Csv),
            "vocabulary-cards-2024-03-07.csv"
        );
    }

    #[test]
    fn csv_joins_word_family() {
        let card = VocabularyCard::new("Deploy", "Implement", "Deploy it.", WordType::Verb)
            .with_family(["Deployment (n)", "Deployable (adj)"]);
        let csv = String::from_utf8(to_csv([&card]).unwrap()).unwrap();
        let second = csv.lines().nth(1).unwrap();
        assert_eq!(
            second,
            "Deploy,Implement,Deploy it.,verb,\"Deployment (n), Deployable (adj)\""
        );
    }

    #[test]
    fn empty_export_still_has_header() {
        let csv = String::from_utf8(to_csv(std::iter::empty()).unwrap()).unwrap();
        assert_eq!(csv, "term,definition,example,wordType,wordFamily\n");
    }

    #[test]
    fn extensions_map_to_formats() {
        assert_eq!(SheetFormat::from_extension("CSV").unwrap(), SheetFormat::Csv);
        assert_eq!(SheetFormat::from_extension("xls").unwrap(), SheetFormat::Xlsx);
        assert!(matches!(
            SheetFormat::from_extension("txt"),
            Err(ImportError::UnsupportedExtension(ext)) if ext == "txt"
        ));
        assert!(matches!(
            SheetFormat::from_path("cards"),
            Err(ImportError::MissingExtension)
        ));
    }
}
