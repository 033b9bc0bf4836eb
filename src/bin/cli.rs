use chrono::Utc;
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;

use vocab_cards::config::{CliConfig, init_logging};
use vocab_cards::print;
use vocab_cards::{
    CardForm, Session, SessionEvent, SheetFormat, VocabularyCard, WordFilter, WordType,
};

fn show_card(session: &Session) {
    let view = session.view();
    println!("--------------------------------------------");
    match &view.card {
        None => println!("No cards available for this category. Try adding some!"),
        Some(card) => {
            let tag = if view.deletable { " (custom)" } else { "" };
            println!("[{}]{}", card.word_type.as_str().to_uppercase(), tag);
            println!("{}", card.term);
            if view.flipped {
                println!("  Definition: {}", card.definition);
                println!("  Example: {}", card.example);
                if !card.word_family.is_empty() {
                    println!("  Word Family: {}", card.family_label());
                }
            } else {
                println!("  (r to reveal)");
            }
        }
    }
    println!(
        "Card {} of {} | Cards Reviewed: {} | Score: {} | Custom Cards: {}",
        view.position, view.total, view.reviewed, view.score, view.custom_count
    );
}

fn show_notices(session: &mut Session) {
    for event in session.take_events() {
        if let SessionEvent::Notify(notice) = event {
            println!("{}", notice.message());
        }
    }
}

fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask(question: &str) -> io::Result<String> {
    print!("{}: ", question);
    io::stdout().flush()?;
    Ok(read_line()?.unwrap_or_default())
}

fn add_card(session: &mut Session) -> Result<String, Box<dyn std::error::Error>> {
    let term = ask("Term")?;
    let definition = ask("Definition")?;
    let example = ask("Example")?;
    let word_type = ask("Word Type (verb, noun, adjective, adverb) [verb]")?;
    let word_family = ask("Word Family (comma-separated)")?;

    let word_type: WordType = if word_type.is_empty() {
        "verb".parse()?
    } else {
        word_type.parse()?
    };
    let form = CardForm {
        term,
        definition,
        example,
        word_type,
        word_family,
    };
    session.add_card(VocabularyCard::from(form))?;
    Ok("card added".to_string())
}

fn delete_card(session: &mut Session) -> Result<String, Box<dyn std::error::Error>> {
    let confirmation = session.request_delete()?;
    // the prompt was queued as an event; it is answered right here
    session.take_events();
    print!("{} [y/N] ", confirmation.prompt);
    io::stdout().flush()?;
    let answer = read_line()?.unwrap_or_default();
    let confirmed = matches!(answer.to_lowercase().as_str(), "y" | "yes");

    match session.respond(confirmed)? {
        Some(card) => Ok(format!("deleted {}", card.term)),
        None => Ok("kept".to_string()),
    }
}

fn export(session: &Session, args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    let format = SheetFormat::from_extension(args.first().copied().unwrap_or("xlsx"))?;
    let dir = Path::new(args.get(1).copied().unwrap_or("."));
    let file = session.export(format, Utc::now().date_naive())?;
    let target = dir.join(&file.filename);
    std::fs::write(&target, &file.bytes)?;
    Ok(format!("exported to {}", target.display()))
}

fn print_cards(session: &Session, target: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let cards = print::print_cards(session.filtered().iter().map(|entry| entry.card));
    match target {
        None => {
            print!("{}", print::render_text(&cards));
            Ok("ok".to_string())
        }
        Some(path) => {
            let registry = print::templates()?;
            let html = print::render_html(&registry, &session.filter().to_string(), &cards)?;
            std::fs::write(path, html)?;
            Ok(format!("print page written to {}", path))
        }
    }
}

fn show_help() {
    println!("Commands:");
    println!("  n: Next card");
    println!("  p: Previous card");
    println!("  r: Reveal / hide the current card");
    println!("  f <all|verb|noun|adjective|adverb>: Filter by word type");
    println!("  add: Add a custom card");
    println!("  del: Delete the current custom card");
    println!("  import <file.csv|file.xlsx>: Import custom cards");
    println!("  export [csv|xlsx] [dir]: Export the filtered cards");
    println!("  print [file.html]: Print the filtered cards");
    println!("  q: Quit");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    let mut session = Session::default();
    if let Some(path) = &config.import {
        // failures are reported through the notice below
        let _ = session.import_file(path);
        show_notices(&mut session);
    }

    let mut status = String::from("ok");
    let mut show = true;
    loop {
        if show {
            show_card(&session);
        }
        show = true;

        let view = session.view();
        print!("[{}/{}] ({}) > ", view.position, view.total, status);
        io::stdout().flush()?;

        let Some(command) = read_line()? else {
            break;
        };
        let words: Vec<&str> = command.split_whitespace().collect();
        let Some((&name, args)) = words.split_first() else {
            status = String::from("invalid command");
            show = false;
            continue;
        };

        let result: Result<String, Box<dyn std::error::Error>> = match name {
            "q" => break,
            "help" => {
                show_help();
                show = false;
                Ok("ok".to_string())
            }
            "n" => session.next().map(|_| "ok".to_string()).map_err(Into::into),
            "p" => session.previous().map(|_| "ok".to_string()).map_err(Into::into),
            "r" => session.reveal().map(|_| "ok".to_string()).map_err(Into::into),
            "f" => match args.first().copied().unwrap_or("all").parse::<WordFilter>() {
                Ok(filter) => session
                    .set_filter(filter)
                    .map(|_| "ok".to_string())
                    .map_err(Into::into),
                Err(e) => Err(e.into()),
            },
            "add" => add_card(&mut session),
            "del" => delete_card(&mut session),
            "import" => match args.first() {
                Some(path) => session
                    .import_file(path)
                    .map(|count| format!("{} cards imported", count))
                    .map_err(Into::into),
                None => Err("usage: import <file>".into()),
            },
            "export" => export(&session, args),
            "print" => {
                show = false;
                print_cards(&session, args.first().copied())
            }
            _ => Err("invalid command".into()),
        };

        show_notices(&mut session);
        status = match result {
            Ok(message) => message,
            Err(e) => e.to_string(),
        };
    }

    Ok(())
}
