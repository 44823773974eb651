use crate::client::{HttpSearchBackend, ResultSource, SearchController, SearchOutcome};
use crate::config::Config;
use crate::db::{init_db, replace_all_properties, Database};
use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::search::{FilterField, SampleDataset};
use crate::state::AppState;
use astra::Server;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod auth;
mod client;
mod config;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod routes;
mod search;
mod state;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "estates", version, about = "Property listing API and search client")]
struct Cli {
    /// SQLite database file (overrides DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Listen address (overrides ESTATES_ADDR)
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
    /// Replace every stored property with a JSON dataset
    Seed {
        /// JSON array of properties; the bundled sample set when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Interactive search against a running API
    Search {
        /// API base URL (overrides API_BASE)
        #[arg(long)]
        api: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = cli.database {
        cfg.database_path = path;
    }

    let result = match cli.command.unwrap_or(Command::Serve { addr: None }) {
        Command::Serve { addr } => {
            if let Some(addr) = addr {
                cfg.addr = addr;
            }
            serve(&cfg)
        }
        Command::Seed { file } => seed(&cfg, file),
        Command::Search { api } => {
            if let Some(api) = api {
                cfg.api_base = api;
            }
            search_repl(&cfg)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn serve(cfg: &Config) -> Result<(), String> {
    let db = Database::new(cfg.database_path.clone());
    init_db(&db).map_err(|e| format!("database initialization failed: {e}"))?;

    let sample = SampleDataset::load(cfg.sample_data_path.as_deref())
        .map_err(|e| format!("sample data unavailable: {e}"))?;
    info!(records = sample.len(), "sample dataset loaded");

    let state = AppState::new(db, sample);

    info!("listening on http://{}", cfg.addr);
    Server::bind(&cfg.addr)
        .max_workers(cfg.max_workers)
        .serve(move |req, _info| {
            handle(req, &state).unwrap_or_else(error_to_response)
        })
        .map_err(|e| format!("server ended with error: {e}"))?;

    info!("server shut down");
    Ok(())
}

fn seed(cfg: &Config, file: Option<PathBuf>) -> Result<(), String> {
    let db = Database::new(cfg.database_path.clone());
    init_db(&db).map_err(|e| format!("database initialization failed: {e}"))?;

    let dataset = SampleDataset::load(file.as_deref().or(cfg.sample_data_path.as_deref()))
        .map_err(|e| format!("cannot read seed data: {e}"))?;

    let inserted = replace_all_properties(&db, dataset.all()).map_err(|e: ServerError| e.to_string())?;
    info!(inserted, database = %cfg.database_path, "properties seeded");
    Ok(())
}

const SEARCH_HELP: &str = "\
commands:
  <field>=<value>   set a filter (search, location, type, bedrooms, minPrice, maxPrice)
  page <n>          jump to a page
  limit <n>         results per page
  clear             drop all filters
  submit | <empty>  search now
  quit";

fn search_repl(cfg: &Config) -> Result<(), String> {
    let backend = HttpSearchBackend::new(cfg.api_base.clone()).map_err(|e| e.to_string())?;
    let fallback = SampleDataset::load(cfg.sample_data_path.as_deref())
        .map_err(|e| format!("sample data unavailable: {e}"))?;

    let mut controller = SearchController::new(
        Arc::new(backend),
        Arc::new(fallback),
        cfg.search_debounce,
        print_outcome,
    );

    println!("{SEARCH_HELP}");
    controller.submit();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        let line = line.trim();

        match line {
            "quit" | "exit" => break,
            "" | "submit" => controller.submit(),
            "clear" => controller.clear(),
            "help" => println!("{SEARCH_HELP}"),
            _ => {
                if let Some(n) = line.strip_prefix("page ") {
                    match n.trim().parse() {
                        Ok(n) => controller.set_page(n),
                        Err(_) => println!("not a page number: {n}"),
                    }
                } else if let Some(n) = line.strip_prefix("limit ") {
                    match n.trim().parse() {
                        Ok(n) => controller.set_page_size(n),
                        Err(_) => println!("not a page size: {n}"),
                    }
                } else if let Some((field, value)) = line.split_once('=') {
                    match field.parse::<FilterField>() {
                        Ok(field) => controller.set_filter(field, value),
                        Err(e) => println!("{e}"),
                    }
                } else {
                    println!("{SEARCH_HELP}");
                }
            }
        }
        let _ = io::stdout().flush();
    }

    Ok(())
}

fn print_outcome(outcome: SearchOutcome) {
    let page = &outcome.page;
    let origin = match outcome.source {
        ResultSource::Remote => "",
        ResultSource::LocalFallback => " (offline, local results)",
    };

    let filters: Vec<String> = outcome
        .criteria
        .to_query_pairs()
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    let filters = if filters.is_empty() {
        "no filters".to_string()
    } else {
        filters.join(" ")
    };

    println!(
        "\n#{} [{}] {} results, page {}/{}{}",
        outcome.seq,
        filters,
        page.total,
        page.page,
        page.total_pages.max(1),
        origin
    );
    for p in &page.properties {
        println!(
            "  [{}] {} | {} | {} | {} bd | {}",
            p.id, p.title, p.location, p.property_type, p.bedrooms, p.price
        );
    }
    let _ = io::stdout().flush();
}
