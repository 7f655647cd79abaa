//! mediadesk CLI
//!
//! Local execution entry point. For AWS Lambda, use `mediadesk-lambda`.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use mediadesk::{
    client::{ContentClient, Query, queries},
    error::{AppError, Result},
    listing::content_list,
    models::{Config, ContentItem, ContentKind},
    ordering::day_seed,
    routes::RouteTable,
    sections::HomeFeed,
    sitemap::SitemapService,
};

/// mediadesk - content tooling for the magazine site
#[derive(Parser, Debug)]
#[command(name = "mediadesk", version, about = "Content retrieval and sitemap tooling")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the XML sitemap
    Sitemap {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a raw query and print the JSON result
    Query {
        /// Query text
        text: String,

        /// Parameters as name=value; values are parsed as JSON, else taken as strings
        #[arg(short, long = "param")]
        params: Vec<String>,
    },

    /// Show the day's picks and the featured selection
    Feed {
        /// Day to compute picks for (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Page through a content listing
    List {
        /// Content kind (articles, series, portraits, recommendations, universes)
        kind: String,

        /// Search term
        #[arg(short, long)]
        search: Option<String>,

        /// Category filter
        #[arg(long)]
        category: Option<String>,

        /// Zero-based page index
        #[arg(short, long, default_value_t = 0)]
        page: usize,

        /// Number of items to fetch before filtering
        #[arg(long, default_value_t = 200)]
        limit: usize,
    },

    /// Fetch a single document by slug
    Show {
        /// Content kind
        kind: String,

        /// Document slug
        slug: String,
    },

    /// Resolve a URL path against the routing table
    Route { path: String },

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, default_level: &str) {
    let level = if verbose { "debug" } else { default_level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn parse_param(raw: &str) -> Result<(String, serde_json::Value)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| AppError::validation(format!("parameter '{raw}' must be name=value")))?;
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((name.trim_start_matches('$').to_string(), value))
}

fn print_items(title: &str, items: &[ContentItem]) {
    println!("{title}:");
    if items.is_empty() {
        println!("  (none)");
    }
    for item in items {
        println!(
            "  - {} [{}] {}",
            item.title,
            item.category.as_deref().unwrap_or("-"),
            item.slug.as_deref().unwrap_or("")
        );
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The file sets the log level, so load outcomes are reported once logging is up.
    let loaded = Config::load_optional(&cli.config);
    let mut config = loaded.as_ref().ok().cloned().flatten().unwrap_or_default();
    config.apply_env();
    init_logging(cli.verbose, &config.logging.level);

    match loaded {
        Ok(Some(_)) => tracing::debug!("Loaded configuration from {}", cli.config.display()),
        Ok(None) => tracing::warn!(
            "No configuration at {}, using defaults",
            cli.config.display()
        ),
        Err(e) => {
            tracing::error!("Config load failed from {}: {}", cli.config.display(), e);
            return Err(e);
        }
    }

    match cli.command {
        Command::Sitemap { output } => {
            config.validate()?;
            let client = ContentClient::from_config(&config)?;
            let service = SitemapService::new(client, config.sitemap.clone());
            let xml = service.generate(Local::now().date_naive()).await?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, xml.as_bytes()).await?;
                    tracing::info!("Sitemap written to {}", path.display());
                }
                None => print!("{xml}"),
            }
        }

        Command::Query { text, params } => {
            let client = ContentClient::from_config(&config)?;
            let mut query = Query::new(text);
            for raw in &params {
                let (name, value) = parse_param(raw)?;
                query = query.param(name, value);
            }
            tracing::debug!("Query cache key: {}", query.cache_key());

            let result: serde_json::Value = client.fetch_with_retry(&query).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Feed { date } => {
            let client = ContentClient::from_config(&config)?;
            let day = date.unwrap_or_else(|| Local::now().date_naive());
            tracing::info!("Computing feed for {} (seed {})", day, day_seed(day));

            let feed = HomeFeed::load(&client, &config.listing, day).await;
            print_items("Today's picks", &feed.daily_picks);
            print_items("Featured", &feed.featured);
        }

        Command::List {
            kind,
            search,
            category,
            page,
            limit,
        } => {
            let kind = ContentKind::parse(&kind)
                .ok_or_else(|| AppError::validation(format!("unknown content kind '{kind}'")))?;
            let client = ContentClient::from_config(&config)?;
            let items: Vec<ContentItem> = client
                .fetch_with_retry(&queries::latest(kind, limit))
                .await?;

            let mut list = content_list(items, config.listing.page_size);
            if let Some(term) = search {
                list.set_search(term);
            }
            list.set_category(category);
            list.go_to(page);

            let current = list.page();
            println!(
                "Page {}/{} ({} matching {})",
                current.index + 1,
                current.total_pages.max(1),
                current.total_items,
                kind
            );
            let shown: Vec<ContentItem> = current.items.into_iter().cloned().collect();
            print_items("Items", &shown);
        }

        Command::Show { kind, slug } => {
            let kind = ContentKind::parse(&kind)
                .ok_or_else(|| AppError::validation(format!("unknown content kind '{kind}'")))?;
            let client = ContentClient::from_config(&config)?;
            let item: Option<ContentItem> = client
                .fetch_with_retry(&queries::by_slug(kind, &slug))
                .await?;

            match item {
                Some(item) => println!("{}", serde_json::to_string_pretty(&item)?),
                None => {
                    return Err(AppError::validation(format!("no {kind} with slug '{slug}'")));
                }
            }
        }

        Command::Route { path } => {
            let table = RouteTable::default();
            match table.resolve(&path) {
                Some(found) => {
                    println!("{:?}", found.page);
                    if let Some(slug) = &found.slug {
                        println!("slug: {slug}");
                    }
                    if found.legacy {
                        if let Some(pattern) = table.canonical_pattern(found.page) {
                            println!("legacy alias of {pattern}");
                        }
                    }
                }
                None => {
                    tracing::warn!("No route matches {}", path);
                    return Err(AppError::validation(format!("no route for '{path}'")));
                }
            }
        }

        Command::Validate => {
            tracing::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                tracing::error!("Config validation failed: {}", e);
                return Err(e);
            }
            tracing::info!(
                "Config OK ({} static routes, {:?} transport, {} picks/day)",
                config.sitemap.static_routes.len(),
                config.content.transport,
                config.listing.daily_picks
            );
        }
    }

    Ok(())
}
