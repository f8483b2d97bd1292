//! Storyview CLI - serve, import and inspect short stories

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storyview::config::{self, StoryviewConfig};
use storyview::images::StorageResolver;
use storyview::page::{PageBuilder, PageOutcome, StoryRequest};
use storyview::storage::SqliteStore;
use storyview::ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "storyview")]
#[command(version)]
#[command(about = "Short story viewer - renders stories with previous/next navigation")]
#[command(long_about = r#"
Storyview serves short stories from a document store:
  • One page per story: title, publication date, collapsible chapters
  • Chapter images resolved from storage references
  • Links to the previous and next story by creation time

Example usage:
  storyview import --file stories.json
  storyview serve --port 8080
  storyview show --story the-last-orbit-1234
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Import stories from a JSON file
    Import {
        /// JSON array of stories
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Render a story page to stdout
    Show {
        /// Story id (defaults to the newest story)
        #[arg(short, long)]
        story: Option<String>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Print the page model as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Show statistics about the story collection
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut cfg = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Serve { port, database } => {
            if let Some(port) = port {
                cfg.port = port;
            }
            apply_database(&mut cfg, database);
            config::ensure_db_dir(Path::new(&cfg.database))?;

            ui::header("Starting storyview");
            ui::info("Database", &cfg.database);
            ui::info("Collection", &cfg.collection);
            storyview::server::start_server(&cfg).await?;
        }

        Commands::Import { file, database } => {
            apply_database(&mut cfg, database);
            config::ensure_db_dir(Path::new(&cfg.database))?;
            let store = SqliteStore::open(Path::new(&cfg.database))?;

            let stories = storyview::import::import_file(&store, &cfg.collection, &file)?;
            if stories.is_empty() {
                ui::warn(&format!("No stories found in {}", file.display()));
                return Ok(());
            }
            for story in &stories {
                ui::imported(&story.title, story.id.as_str());
            }
            ui::success(&format!("Imported {} stories into {}", stories.len(), cfg.database));
        }

        Commands::Show { story, database, json } => {
            apply_database(&mut cfg, database);
            let store = SqliteStore::open(Path::new(&cfg.database))?;
            let pages = PageBuilder::new(
                Arc::new(store),
                Arc::new(StorageResolver::new(cfg.images.download_base.clone())),
                cfg.render_options(),
            );

            let request = match story {
                Some(id) => StoryRequest::for_story(id),
                None => StoryRequest::latest(),
            };

            match pages.build(&request).await {
                PageOutcome::Render(page) if json => println!("{}", serde_json::to_string_pretty(&page)?),
                PageOutcome::Render(page) => print!("{}", page.to_html()),
                PageOutcome::Redirect(to) => {
                    ui::error(&format!("Story not found (page would redirect to {})", to));
                    std::process::exit(2);
                }
            }
        }

        Commands::Stats { database } => {
            apply_database(&mut cfg, database);
            let store = SqliteStore::open(Path::new(&cfg.database))?;
            let stats = store.stats(&cfg.collection)?;

            ui::section(&format!("Storyview Statistics ({})", cfg.database));
            print!("{}", stats);
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &StoryviewConfig::default(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}

fn apply_database(cfg: &mut StoryviewConfig, database: Option<PathBuf>) {
    if let Some(database) = database {
        cfg.database = database.to_string_lossy().into_owned();
    }
}
