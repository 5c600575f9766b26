use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::browser::Browser;
use crate::meals::Category;
use crate::view::{render, Commit, Intent, LoadTicket};

const HELP: &str = "\
commands:
  search <text>     search recipes by name
  type <text>       edit the search box without searching
  category <name>   show one category
  all               clear filters
  refresh           reload the current listing
  open <n>          show recipe number n
  close             close the recipe
  categories        reload the category list
  help              this text
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Show,
    Categories,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a recipe number")]
    BadNumber(String),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => Command::Show,
        "search" | "s" => Command::Intent(Intent::SubmitSearch(rest.to_string())),
        "type" => Command::Intent(Intent::EditSearch(rest.to_string())),
        "category" | "c" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("category"));
            }
            Command::Intent(Intent::SelectCategory(rest.to_string()))
        }
        "all" | "clear" => Command::Intent(Intent::ClearFilters),
        "refresh" | "r" => Command::Intent(Intent::Refresh),
        "open" | "o" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("open"));
            }
            match rest.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Intent(Intent::OpenMeal(n - 1)),
                _ => return Err(CommandError::BadNumber(rest.to_string())),
            }
        }
        "close" | "x" => Command::Intent(Intent::CloseMeal),
        "categories" => Command::Categories,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Matches a typed category name against the loaded chips, ignoring case.
pub fn resolve_category(name: &str, categories: &[Category]) -> String {
    categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| name.to_string())
}

/// Interactive loop: reads commands from stdin and prints the screen after
/// every change. Loads run in the background and print when they commit.
pub async fn run(browser: Browser) -> anyhow::Result<()> {
    println!("{HELP}");
    spawn_categories(&browser);
    let first = browser.reload().await;
    spawn_load(&browser, first);
    print_screen(&browser).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Err(e) => {
                println!("{e}");
                continue;
            }
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                println!("{HELP}");
                continue;
            }
            Ok(Command::Show) => {}
            Ok(Command::Categories) => spawn_categories(&browser),
            Ok(Command::Intent(intent)) => {
                let intent = match intent {
                    Intent::SelectCategory(name) => {
                        let view = browser.snapshot().await;
                        Intent::SelectCategory(resolve_category(&name, &view.categories))
                    }
                    other => other,
                };
                if let Some(ticket) = browser.apply(intent).await {
                    spawn_load(&browser, ticket);
                }
            }
        }
        print_screen(&browser).await;
    }
    Ok(())
}

fn spawn_load(browser: &Browser, ticket: LoadTicket) {
    let browser = browser.clone();
    tokio::spawn(async move {
        let report = browser.run(ticket).await;
        debug!(generation = report.generation, commit = ?report.commit, "load finished");
        if report.commit == Commit::Applied {
            print_screen(&browser).await;
        }
    });
}

fn spawn_categories(browser: &Browser) {
    let browser = browser.clone();
    tokio::spawn(async move {
        if browser.load_categories().await.is_ok() {
            print_screen(&browser).await;
        }
    });
}

async fn print_screen(browser: &Browser) {
    println!("\n{}", render(&browser.snapshot().await));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(line: &str) -> Intent {
        match parse_command(line) {
            Ok(Command::Intent(intent)) => intent,
            other => panic!("expected intent for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn parses_intents() {
        assert_eq!(intent("search  chicken curry "), Intent::SubmitSearch("chicken curry".into()));
        assert_eq!(intent("type pie"), Intent::EditSearch("pie".into()));
        assert_eq!(intent("category Seafood"), Intent::SelectCategory("Seafood".into()));
        assert_eq!(intent("ALL"), Intent::ClearFilters);
        assert_eq!(intent("r"), Intent::Refresh);
        assert_eq!(intent("open 3"), Intent::OpenMeal(2));
        assert_eq!(intent("close"), Intent::CloseMeal);
    }

    #[test]
    fn parses_screen_commands() {
        assert_eq!(parse_command(""), Ok(Command::Show));
        assert_eq!(parse_command("categories"), Ok(Command::Categories));
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_command("dance"), Err(CommandError::Unknown("dance".into())));
        assert_eq!(parse_command("category"), Err(CommandError::MissingArgument("category")));
        assert_eq!(parse_command("open 0"), Err(CommandError::BadNumber("0".into())));
        assert_eq!(parse_command("open two"), Err(CommandError::BadNumber("two".into())));
    }

    #[test]
    fn category_names_resolve_case_insensitively() {
        let cats = vec![
            Category { name: "Seafood".into(), description: None },
            Category { name: "Beef".into(), description: None },
        ];
        assert_eq!(resolve_category("seafood", &cats), "Seafood");
        assert_eq!(resolve_category("Goat", &cats), "Goat");
    }
}
