//! Drug Craft terminal front end
//!
//! Combine the building blocks, discover new items and browse the inventory.
//! Progress is saved after every discovery.

use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

use drug_craft::{CraftConfig, GameSession, Item, ResolutionSource};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List(Option<String>),
    Search(String),
    Categories,
    Combine(String, String),
    Reset,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some((a, b)) = line.split_once('+') {
        let (a, b) = (a.trim(), b.trim());
        if !a.is_empty() && !b.is_empty() && !a.contains(' ') && !b.contains(' ') {
            return Some(Command::Combine(a.to_lowercase(), b.to_lowercase()));
        }
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    let command = match (verb.as_str(), args.as_slice()) {
        ("list" | "ls", []) => Command::List(None),
        ("list" | "ls", [category]) => Command::List(Some(category.to_lowercase())),
        ("search" | "find", terms) if !terms.is_empty() => Command::Search(terms.join(" ")),
        ("categories" | "cats", []) => Command::Categories,
        ("combine" | "mix", [a, b]) => Command::Combine(a.to_lowercase(), b.to_lowercase()),
        ("reset", []) => Command::Reset,
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit" | "q", []) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

fn print_items(items: &[Item]) {
    if items.is_empty() {
        println!("   (nothing here)");
        return;
    }
    for item in items {
        println!("   {}  [{}]  {}", item, item.category, item.id);
    }
}

fn print_help() {
    println!("💡 Commands:");
    println!("   list [category]     show discovered items");
    println!("   search <term>       find items by name");
    println!("   categories          show known categories");
    println!("   combine <a> <b>     combine two items by id (or: a + b)");
    println!("   reset               clear discoveries, keep known combinations");
    println!("   quit");
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Both looked-up items, or the first id that was not found.
fn select_pair<'a>(
    (a, item_a): (&'a str, Option<Item>),
    (b, item_b): (&'a str, Option<Item>),
) -> Result<(Item, Item), &'a str> {
    match (item_a, item_b) {
        (Some(item_a), Some(item_b)) => Ok((item_a, item_b)),
        (None, _) => Err(a),
        (_, None) => Err(b),
    }
}

async fn combine(session: &GameSession, a: &str, b: &str) {
    let (item_a, item_b) = match select_pair((a, session.item(a).await), (b, session.item(b).await)) {
        Ok(pair) => pair,
        Err(missing) => return println!("❓ You haven't discovered '{missing}' yet."),
    };

    if !session.is_resolved(&item_a, &item_b).await {
        println!("⏳ Generating combination...");
    }

    let outcome = session.combine(&item_a, &item_b).await;
    let marker = if outcome.is_new { "  (New Discovery!)" } else { "" };
    println!("✨ {} + {} = {}{}", item_a, item_b, outcome.result, marker);
    if let Some(description) = &outcome.result.description {
        println!("   {description}");
    }
    if outcome.source == ResolutionSource::Fallback {
        info!("Result for {} + {} came from the local fallback", a, b);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("drug_craft=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = CraftConfig::from_env().context("Failed to read configuration")?;
    info!("Generator backend: {:?}", config.generator);

    let session = GameSession::open(&config).await;

    println!("\n{}", "═".repeat(60));
    println!("🧪 Drug Craft");
    println!("{}", "═".repeat(60));
    println!(
        "📦 {} items discovered, {} combinations known",
        session.registry_len().await,
        session.cache_len().await
    );
    if config.ephemeral {
        println!("💾 Ephemeral session: nothing will be saved");
    } else {
        println!("💾 Saving to '{}'", config.data_dir.display());
    }
    println!();
    print_help();
    println!();

    loop {
        print!("🧪 > ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let Some(command) = parse_command(&input) else {
            continue;
        };

        match command {
            Command::List(category) => print_items(&session.filter("", category.as_deref()).await),
            Command::Search(term) => print_items(&session.filter(&term, None).await),
            Command::Categories => println!("   all, {}", session.categories().await.join(", ")),
            Command::Combine(a, b) => combine(&session, &a, &b).await,
            Command::Reset => {
                if confirm("Reset all your discoveries? Known combinations are kept.")? {
                    session.reset().await;
                    println!("🔄 Back to the basics.");
                }
            }
            Command::Help => print_help(),
            Command::Quit => break,
            Command::Unknown(line) => println!("❓ Unknown command: '{line}' (try 'help')"),
        }
    }

    println!("👋 Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_combine_forms() {
        assert_eq!(
            parse_command("combine plant chemical"),
            Some(Command::Combine("plant".into(), "chemical".into()))
        );
        assert_eq!(
            parse_command("  Plant + Method "),
            Some(Command::Combine("plant".into(), "method".into()))
        );
    }

    #[test]
    fn test_parse_listing_commands() {
        assert_eq!(parse_command("list"), Some(Command::List(None)));
        assert_eq!(parse_command("list Drug"), Some(Command::List(Some("drug".into()))));
        assert_eq!(parse_command("search plant stash"), Some(Command::Search("plant stash".into())));
        assert_eq!(parse_command("categories"), Some(Command::Categories));
    }

    #[test]
    fn test_select_pair_reports_first_missing() {
        let plant = Item::new("plant", "Plant", "🌿", "natural");
        let weed = Item::new("weed", "Weed", "🥬", "natural");

        assert_eq!(
            select_pair(("plant", Some(plant.clone())), ("weed", Some(weed.clone()))),
            Ok((plant.clone(), weed))
        );
        assert_eq!(select_pair(("ghost", None), ("plant", Some(plant.clone()))), Err("ghost"));
        assert_eq!(select_pair(("plant", Some(plant)), ("ghost", None)), Err("ghost"));
        assert_eq!(select_pair(("x", None), ("y", None)), Err("x"));
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("reset"), Some(Command::Reset));
        assert_eq!(parse_command("combine plant"), Some(Command::Unknown("combine plant".into())));
    }
}
