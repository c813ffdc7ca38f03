use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use good_vibes::{
    article_card, repo_card, validate_required, Article, Controller, Repo, SECTION_IDS,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "good-vibes", about = "Render and inspect the Good Vibes page", version)]
pub struct Cli {
    /// Emit JSON instead of human-readable output.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the page as HTML.
    Render {
        /// Section to activate before rendering.
        #[arg(long)]
        section: Option<String>,
        /// JSON file with repository records to populate the repos panel.
        #[arg(long)]
        repos: Option<PathBuf>,
        /// JSON file with article records to populate the articles panel.
        #[arg(long)]
        articles: Option<PathBuf>,
    },
    /// Replay a sequence of navigation clicks and report the final state.
    Navigate {
        /// Section ids to navigate through, in order.
        #[arg(required = true)]
        sections: Vec<String>,
    },
    /// Render a single card from a JSON record.
    #[command(subcommand)]
    Card(CardCommand),
}

#[derive(Subcommand, Debug)]
enum CardCommand {
    /// Render a repository card.
    Repo {
        /// JSON file holding one repository record.
        file: PathBuf,
    },
    /// Render an article card.
    Article {
        /// JSON file holding one article record.
        file: PathBuf,
    },
}

pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            section,
            repos,
            articles,
        } => handle_render(section, repos, articles, cli.json),
        Command::Navigate { sections } => handle_navigate(sections, cli.json),
        Command::Card(CardCommand::Repo { file }) => handle_repo_card(file, cli.json),
        Command::Card(CardCommand::Article { file }) => handle_article_card(file, cli.json),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn handle_render(
    section: Option<String>,
    repos: Option<PathBuf>,
    articles: Option<PathBuf>,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let mut controller = Controller::new();

    if let Some(path) = repos {
        let records: Vec<Repo> = read_json(&path)?;
        controller.populate_repositories(&records);
    }
    if let Some(path) = articles {
        let records: Vec<Article> = read_json(&path)?;
        controller.populate_articles(&records);
    }
    if let Some(section) = section {
        if !SECTION_IDS.contains(&section.as_str()) {
            return Err(format!("Unknown section {section:?}").into());
        }
        controller.navigate_to(&section);
    }

    if as_json {
        let payload = json!({
            "active_section": controller.active_section(),
            "html": controller.document().to_html(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", controller.document().to_html());
    }
    Ok(())
}

fn handle_navigate(sections: Vec<String>, as_json: bool) -> Result<(), Box<dyn Error>> {
    let mut controller = Controller::new();
    for section in &sections {
        if !SECTION_IDS.contains(&section.as_str()) {
            return Err(format!("Unknown section {section:?}").into());
        }
        controller.navigate_to(section);
    }

    let doc = controller.document();
    let rows: Vec<(String, bool, String)> = SECTION_IDS
        .iter()
        .map(|&id| {
            let node = doc.get_element_by_id(id).expect("page section present");
            let active = doc.has_class(node, "active");
            let hidden = doc.attr(node, "aria-hidden").unwrap_or("").to_string();
            (id.to_string(), active, hidden)
        })
        .collect();

    if as_json {
        let payload = json!({
            "clicks": sections,
            "active_section": controller.active_section(),
            "sections": rows.iter().map(|(id, active, hidden)| {
                json!({"id": id, "active": active, "aria_hidden": hidden})
            }).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_section_table(&rows);
    }
    Ok(())
}

fn handle_repo_card(file: PathBuf, as_json: bool) -> Result<(), Box<dyn Error>> {
    let repo: Repo = read_json(&file)?;
    let check = validate_required(
        &serde_json::to_value(&repo)?,
        &["name", "html_url"],
    );
    if !check.is_valid {
        return Err(format!("Repository record is missing: {}", check.missing.join(", ")).into());
    }
    let html = repo_card(&repo);
    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "kind": "repo", "html": html }))?
        );
    } else {
        println!("{html}");
    }
    Ok(())
}

fn handle_article_card(file: PathBuf, as_json: bool) -> Result<(), Box<dyn Error>> {
    let article: Article = read_json(&file)?;
    let check = validate_required(
        &serde_json::to_value(&article)?,
        &["title", "slug", "excerpt"],
    );
    if !check.is_valid {
        return Err(format!("Article record is missing: {}", check.missing.join(", ")).into());
    }
    let html = article_card(&article);
    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "kind": "article", "html": html }))?
        );
    } else {
        println!("{html}");
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
    let value = serde_json::from_str(&text)
        .map_err(|err| format!("Failed to parse {}: {err}", path.display()))?;
    Ok(value)
}

fn print_section_table(rows: &[(String, bool, String)]) {
    let width = rows
        .iter()
        .map(|(id, _, _)| id.len())
        .max()
        .unwrap_or(7)
        .max("SECTION".len());
    println!("{:<width$}  {:<6}  {}", "SECTION", "ACTIVE", "ARIA-HIDDEN", width = width);
    println!("{:-<width$}  {:-<6}  {:-<11}", "", "", "", width = width);
    for (id, active, hidden) in rows {
        println!("{:<width$}  {:<6}  {}", id, active, hidden, width = width);
    }
}
