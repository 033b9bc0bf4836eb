use chrono::NaiveDate;
use proptest::prelude::*;
use std::io::Write;

use vocab_cards::downloader::{export_cards, to_csv, to_xlsx};
use vocab_cards::loader::{from_csv, from_excel, load_file};
use vocab_cards::{
    Deck, ImportError, Session, SheetFormat, VocabularyCard, WordFilter, WordType,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

fn session_with_custom() -> Session {
    let mut session = Session::default();
    session
        .add_card(
            VocabularyCard::new(
                "Throughput",
                "Amount processed, Rate",
                "The \"new\" queue doubled throughput.",
                WordType::Noun,
            )
            .with_family(["Throughputs (n)"]),
        )
        .unwrap();
    session
        .add_card(VocabularyCard::new("Idle", "Unused", "The worker is idle.", WordType::Adjective))
        .unwrap();
    session
}

fn filtered_cards(session: &Session) -> Vec<VocabularyCard> {
    session.filtered().iter().map(|entry| entry.card.clone()).collect()
}

#[test]
fn csv_export_round_trips() {
    let session = session_with_custom();
    let file = session.export(SheetFormat::Csv, date()).unwrap();
    assert_eq!(file.filename, "vocabulary-cards-2025-01-31.csv");

    let cards = from_csv(&file.bytes).unwrap();
    assert_eq!(cards, filtered_cards(&session));
}

#[test]
fn xlsx_export_round_trips() {
    let session = session_with_custom();
    let file = session.export(SheetFormat::Xlsx, date()).unwrap();
    assert_eq!(file.filename, "vocabulary-cards-2025-01-31.xlsx");

    let cards = from_excel(&file.bytes).unwrap();
    assert_eq!(cards, filtered_cards(&session));
}

#[test]
fn export_uses_the_filtered_set() {
    let mut session = session_with_custom();
    session
        .set_filter(WordFilter::Only(WordType::Adjective))
        .unwrap();
    let file = session.export(SheetFormat::Csv, date()).unwrap();
    let cards = from_csv(&file.bytes).unwrap();

    let terms: Vec<&str> = cards.iter().map(|card| card.term.as_str()).collect();
    assert_eq!(terms, ["Achievable", "Adjustable", "Idle"]);
}

#[test]
fn reimported_export_lands_in_custom() {
    let source = session_with_custom();
    let file = source.export(SheetFormat::Xlsx, date()).unwrap();

    let mut target = Session::new(Deck::new(Vec::new()));
    let count = target.import(&file.bytes, SheetFormat::Xlsx).unwrap();
    assert_eq!(count, 11);
    assert_eq!(target.deck().custom(), filtered_cards(&source).as_slice());
    assert!(target.deck().builtin().is_empty());
}

#[test]
fn empty_workbook_yields_no_cards() {
    let bytes = to_xlsx(std::iter::empty()).unwrap();
    assert!(from_excel(&bytes).unwrap().is_empty());

    let csv = to_csv(std::iter::empty()).unwrap();
    assert!(from_csv(&csv).unwrap().is_empty());
}

#[test]
fn missing_columns_fall_back_to_defaults() {
    let cards = from_csv(b"term,wordFamily\nSandbox,\" Sandboxed (adj) ,Sandboxing (n)\"\n").unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].term, "Sandbox");
    assert_eq!(cards[0].definition, "");
    assert_eq!(cards[0].example, "");
    assert_eq!(cards[0].word_type, WordType::Noun);
    assert_eq!(cards[0].word_family, vec!["Sandboxed (adj)", "Sandboxing (n)"]);
}

#[test]
fn numeric_workbook_cells_become_text() {
    use rust_xlsxwriter::Workbook;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (c, header) in ["term", "definition", "example", "wordType"].iter().enumerate() {
        worksheet.write_string(0, c as u16, *header).unwrap();
    }
    worksheet.write_number(1, 0, 404.0).unwrap();
    worksheet.write_string(1, 1, "Not found").unwrap();
    worksheet.write_string(1, 2, "The page returned 404.").unwrap();
    worksheet.write_string(1, 3, "Noun").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let cards = from_excel(&bytes).unwrap();
    assert_eq!(cards[0].term, "404");
    assert_eq!(cards[0].word_type, WordType::Noun);
}

#[test]
fn load_file_picks_format_from_extension() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(b"term,definition,example,wordType\nPing,Probe,Ping the host.,verb\n")
        .unwrap();

    let cards = load_file(file.path()).unwrap();
    assert_eq!(cards, vec![VocabularyCard::new("Ping", "Probe", "Ping the host.", WordType::Verb)]);

    let mut session = Session::default();
    assert_eq!(session.import_file(file.path()).unwrap(), 1);
    assert_eq!(session.deck().custom().len(), 1);
}

#[test]
fn load_file_rejects_unknown_extension() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    assert!(matches!(
        load_file(file.path()),
        Err(ImportError::UnsupportedExtension(ext)) if ext == "txt"
    ));
}

#[test]
fn uploaded_name_selects_format() {
    let mut session = Session::default();
    let data = b"term,definition,example,wordType\nShard,Partition,Shard the table.,noun\n";
    assert_eq!(session.import_named("cards.CSV", data).unwrap(), 1);
    assert!(session.import_named("cards.pdf", data).is_err());
    assert_eq!(session.deck().custom().len(), 1);
}

#[test]
fn export_file_carries_format() {
    let card = VocabularyCard::new("Queue", "Line", "Queue the job.", WordType::Noun);
    let file = export_cards([&card], SheetFormat::Xlsx, date()).unwrap();
    assert_eq!(file.format, SheetFormat::Xlsx);
    assert!(file.bytes.starts_with(b"PK"));
}

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.'\"]{0,24}"
}

fn family_member() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ()]{0,12}[A-Za-z)]"
}

fn card() -> impl Strategy<Value = VocabularyCard> {
    (
        text(),
        text(),
        text(),
        prop::sample::select(WordType::ALL.to_vec()),
        prop::collection::vec(family_member(), 0..4),
    )
        .prop_map(|(term, definition, example, word_type, family)| {
            VocabularyCard::new(term, definition, example, word_type).with_family(family)
        })
}

proptest! {
    #[test]
    fn csv_round_trip_preserves_cards(cards in prop::collection::vec(card(), 1..12)) {
        let bytes = to_csv(cards.iter()).unwrap();
        let back = from_csv(&bytes).unwrap();
        prop_assert_eq!(back, cards);
    }
}
