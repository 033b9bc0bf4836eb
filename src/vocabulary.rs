use lazy_static::lazy_static;

use crate::card::{VocabularyCard, WordType};

lazy_static! {
    static ref BUILTIN: Vec<VocabularyCard> = vec![
        // Verbs
        VocabularyCard::new(
            "Accomplish",
            "Achieve, Complete, Fulfill",
            "We will work hard to accomplish our goal.",
            WordType::Verb,
        )
        .with_family(["Accomplishment (n)"]),
        VocabularyCard::new(
            "Adapt",
            "Adjust, Modify, Change",
            "Many software companies have adapted popular programs to the new operating system.",
            WordType::Verb,
        )
        .with_family(["Adaptation (n)", "Adaptable (adj)"]),
        VocabularyCard::new(
            "Deploy",
            "Put into use, Implement",
            "Airbags deploy in case of an accident.",
            WordType::Verb,
        )
        .with_family(["Deployment (n)", "Deployable (adj)"]),
        // Nouns
        VocabularyCard::new(
            "Accommodation",
            "Place to stay, Adjustment",
            "The program was not big enough to accommodate all the modules.",
            WordType::Noun,
        )
        .with_family(["Accommodate (v)"]),
        VocabularyCard::new(
            "Achievement",
            "Accomplishment, Fulfillment",
            "Finishing the project before its due date was a remarkable achievement.",
            WordType::Noun,
        )
        .with_family(["Achieve (v)", "Achievable (adj)"]),
        // Adjectives
        VocabularyCard::new(
            "Achievable",
            "Possible, Attainable",
            "The goal is achievable within six months.",
            WordType::Adjective,
        )
        .with_family(["Achieve (v)", "Achievement (n)"]),
        VocabularyCard::new(
            "Adjustable",
            "Modifiable, Flexible",
            "The seat is adjustable for comfort.",
            WordType::Adjective,
        )
        .with_family(["Adjust (v)", "Adjustment (n)"]),
        // Adverbs
        VocabularyCard::new(
            "Actively",
            "Energetically, Dynamically",
            "He actively participated in the project.",
            WordType::Adverb,
        )
        .with_family(["Act (v)", "Action (n)"]),
        VocabularyCard::new(
            "Simultaneously",
            "At the same time, Concurrently",
            "The tests were executed simultaneously.",
            WordType::Adverb,
        )
        .with_family(["Simultaneous (adj)"]),
    ];
}

/// The cards every session starts with
pub fn builtin_cards() -> &'static [VocabularyCard] {
    BUILTIN.as_slice()
}
