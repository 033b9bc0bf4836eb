use proptest::prelude::*;

use vocab_cards::{Session, VocabularyCard, WordFilter, WordType};

#[derive(Debug, Clone)]
enum Op {
    Next,
    Previous,
    Reveal,
    Filter(usize),
    Add(usize),
    Delete(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Next),
        3 => Just(Op::Previous),
        3 => Just(Op::Reveal),
        1 => (0..WordFilter::CHOICES.len()).prop_map(Op::Filter),
        2 => (0..WordType::ALL.len()).prop_map(Op::Add),
        2 => any::<bool>().prop_map(Op::Delete),
    ]
}

fn apply(session: &mut Session, op: &Op, counter: &mut usize) {
    match op {
        Op::Next => session.next().unwrap(),
        Op::Previous => session.previous().unwrap(),
        Op::Reveal => session.reveal().unwrap(),
        Op::Filter(i) => session.set_filter(WordFilter::CHOICES[*i]).unwrap(),
        Op::Add(i) => {
            *counter += 1;
            let card = VocabularyCard::new(
                format!("Custom {}", counter),
                "Definition",
                "Example.",
                WordType::ALL[*i],
            );
            session.add_card(card).unwrap();
        }
        Op::Delete(confirm) => {
            if session.can_delete() {
                session.request_delete().unwrap();
                session.respond(*confirm).unwrap();
            }
        }
    }
}

proptest! {
    #[test]
    fn cursor_and_review_state_stay_consistent(ops in prop::collection::vec(op(), 0..80)) {
        let mut session = Session::default();
        let mut counter = 0;

        for op in &ops {
            let builtin_before = session.deck().builtin().len();
            let len_before = session.deck().len();
            let reviewed_cards_before: Vec<String> = session
                .reviewed()
                .iter()
                .map(|&p| session.filtered()[p].card.term.clone())
                .collect();
            let current_before = session.current().map(|entry| entry.card.term.clone());
            let deletable = session.can_delete();

            apply(&mut session, op, &mut counter);

            let len = session.filtered_len();
            if len == 0 {
                prop_assert_eq!(session.cursor(), 0);
            } else {
                prop_assert!(session.cursor() < len);
            }
            prop_assert!(session.reviewed().iter().all(|&p| p < len));
            prop_assert!(session.score() as usize >= session.reviewed().len());
            prop_assert_eq!(session.deck().builtin().len(), builtin_before);

            if let Op::Delete(true) = op {
                if deletable {
                    prop_assert_eq!(session.deck().len(), len_before - 1);
                    prop_assert!(!session.is_flipped());
                    let deleted = current_before.clone().unwrap();
                    let expected: Vec<String> = reviewed_cards_before
                        .iter()
                        .filter(|term| **term != deleted)
                        .cloned()
                        .collect();
                    let now: Vec<String> = session
                        .reviewed()
                        .iter()
                        .map(|&p| session.filtered()[p].card.term.clone())
                        .collect();
                    prop_assert_eq!(now, expected);
                }
            }
            if let Op::Filter(_) = op {
                prop_assert_eq!(session.cursor(), 0);
                prop_assert!(!session.is_flipped());
                prop_assert!(session.reviewed().is_empty());
                prop_assert_eq!(session.score(), 0);
            }
        }
    }

    #[test]
    fn repeated_reveals_score_once(flips in 1usize..10) {
        let mut session = Session::default();
        for _ in 0..flips {
            session.reveal().unwrap();
        }
        prop_assert_eq!(session.score(), 1);
        prop_assert_eq!(session.is_flipped(), flips % 2 == 1);
    }
}
