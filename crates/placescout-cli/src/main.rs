use std::path::PathBuf;

use clap::Parser;
use placescout_api::YelpClient;
use placescout_cache::{FavoritesStore, Item, ItemStore, StoreHandle};
use placescout_core::{providers::YelpProvider, Config, NearbySearch, SearchGateway};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "placescout")]
#[command(version, about = "Nearby place search with a local cache and favorites", long_about = None)]
struct Cli {
    /// Override the cache database path
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Search for nearby places (every result is cached)
    Search {
        /// Latitude of the search point
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude of the search point
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Search term; omit for an unfiltered nearby search
        #[arg(long)]
        term: Option<String>,
        /// Yelp Fusion API key
        #[arg(long, env = "YELP_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// Mark items as favorites for a user
    Favorite {
        user_id: String,
        #[arg(required = true)]
        item_ids: Vec<String>,
    },
    /// Unmark favorites for a user
    Unfavorite {
        user_id: String,
        #[arg(required = true)]
        item_ids: Vec<String>,
    },
    /// List a user's favorite items, hydrated from the cache
    Favorites { user_id: String },
    /// Show one cached item
    Show { item_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "placescout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => config.storage.resolve_db_path()?,
    };
    // One handle per command invocation, dropped on every exit path.
    let handle = StoreHandle::open(&db_path)?;

    match cli.command {
        Commands::Search {
            lat,
            lon,
            term,
            api_key,
        } => {
            let api_key = api_key
                .or_else(|| config.provider.yelp.api_key.clone())
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "No API key configured. Set YELP_API_KEY or add it to the config file."
                    )
                })?;

            let client = YelpClient::with_base_url(api_key, config.provider.yelp.api_url.clone());
            let gateway = SearchGateway::new(Box::new(YelpProvider::with_client(client)));
            let query = NearbySearch {
                lat,
                lon,
                term,
                radius_m: config.search.radius_m,
                limit: config.search.limit,
            };

            tracing::info!("Searching near {}, {}", lat, lon);
            let items = gateway.search(&handle, &query).await?;
            print_items(&items, cli.json)?;
        }
        Commands::Favorite { user_id, item_ids } => {
            FavoritesStore::new(&handle).add(&user_id, &item_ids)?;
            println!("Recorded {} favorite(s) for {}", item_ids.len(), user_id);
        }
        Commands::Unfavorite { user_id, item_ids } => {
            FavoritesStore::new(&handle).remove(&user_id, &item_ids)?;
            println!("Removed {} favorite(s) for {}", item_ids.len(), user_id);
        }
        Commands::Favorites { user_id } => {
            let items = FavoritesStore::new(&handle).items(&user_id)?;
            if items.is_empty() && !cli.json {
                println!("No favorites for {}", user_id);
            } else {
                print_items(&items, cli.json)?;
            }
        }
        Commands::Show { item_id } => {
            let item = ItemStore::new(&handle).get(&item_id)?;
            print_items(std::slice::from_ref(&item), cli.json)?;
        }
    }

    Ok(())
}

fn print_items(items: &[Item], as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    for item in items {
        let mut categories: Vec<&str> = item.categories.iter().map(String::as_str).collect();
        categories.sort_unstable();

        println!(
            "{}  {}  [{:.1} stars, {:.0} m]",
            item.item_id, item.name, item.rating, item.distance
        );
        if !item.address.is_empty() {
            println!("    {}", item.address);
        }
        if !categories.is_empty() {
            println!("    {}", categories.join(", "));
        }
        println!("    {}", item.url);
    }
    Ok(())
}
