//! Print view: every card of the filtered set laid out as a grid

use handlebars::Handlebars;
use serde::Serialize;

use crate::card::VocabularyCard;
use crate::error::ExportError;

const PRINT_TEMPLATE: &str = include_str!("static/print.hbs");

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrintCard {
    pub word_type: String,
    pub term: String,
    pub definition: String,
    pub example: String,
    /// `None` when the card has no word family
    pub word_family: Option<String>,
}

impl From<&VocabularyCard> for PrintCard {
    fn from(card: &VocabularyCard) -> Self {
        PrintCard {
            word_type: card.word_type.to_string(),
            term: card.term.clone(),
            definition: card.definition.clone(),
            example: card.example.clone(),
            word_family: (!card.word_family.is_empty()).then(|| card.family_label()),
        }
    }
}

pub fn print_cards<'a>(cards: impl IntoIterator<Item = &'a VocabularyCard>) -> Vec<PrintCard> {
    cards.into_iter().map(PrintCard::from).collect()
}

/// Plain-text rendering for terminals
pub fn render_text(cards: &[PrintCard]) -> String {
    let mut out = String::new();
    for card in cards {
        out.push_str(&format!("[{}]\n", card.word_type.to_uppercase()));
        out.push_str(&format!("{}\n", card.term));
        out.push_str(&format!("  Definition: {}\n", card.definition));
        out.push_str(&format!("  Example: {}\n", card.example));
        if let Some(family) = &card.word_family {
            out.push_str(&format!("  Word Family: {}\n", family));
        }
        out.push('\n');
    }
    out
}

/// Template registry holding the print page
pub fn templates() -> Result<Handlebars<'static>, ExportError> {
    let mut registry = Handlebars::new();
    registry.register_template_string("print", PRINT_TEMPLATE)?;
    Ok(registry)
}

#[derive(Serialize)]
struct PrintPage<'a> {
    filter: String,
    cards: &'a [PrintCard],
}

pub fn render_html(
    registry: &Handlebars<'_>,
    filter: &str,
    cards: &[PrintCard],
) -> Result<String, ExportError> {
    let page = PrintPage {
        filter: filter.to_string(),
        cards,
    };
    Ok(registry.render("print", &page)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::WordType;

    #[test]
    fn family_is_omitted_when_empty() {
        let plain = VocabularyCard::new("Cache", "Store", "Hit.", WordType::Noun);
        let cards = print_cards([&plain]);
        assert_eq!(cards[0].word_family, None);
        assert!(!render_text(&cards).contains("Word Family"));
    }

    #[test]
    fn html_lists_every_card() {
        let a = VocabularyCard::new("Adapt", "Adjust", "Adapt it.", WordType::Verb)
            .with_family(["Adaptation (n)"]);
        let b = VocabularyCard::new("Agile", "Nimble", "<b>Agile</b> team.", WordType::Adjective);
        let registry = templates().unwrap();
        let html = render_html(&registry, "all", &print_cards([&a, &b])).unwrap();
        assert!(html.contains("Adapt"));
        assert!(html.contains("Adaptation (n)"));
        assert!(html.contains("&lt;b&gt;Agile&lt;/b&gt; team."));
    }
}
