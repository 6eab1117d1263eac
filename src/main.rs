use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use immoteur::{Config, ImmoteurClient, SearchOutcome, classifieds};

#[derive(Parser)]
#[command(
    name = "immoteur",
    about = "Query the Immoteur classifieds search API"
)]
struct Cli {
    /// Department code to filter on, or "all" when no-department queries
    /// are enabled via ALLOW_NO_DEPARTMENT.
    department: String,

    /// Override the configured result cap for this query.
    #[arg(long)]
    max_results: Option<usize>,

    /// Print cards as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let client = ImmoteurClient::new(Config::from_env());
    let card_limit = cli.max_results.unwrap_or_else(|| client.max_results());

    match client
        .search_by_department(&cli.department, cli.max_results)
        .await?
    {
        SearchOutcome::Success(page) => {
            let cards = classifieds::to_property_cards(&page.items, card_limit);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else {
                for card in &cards {
                    let price = card
                        .price
                        .map_or_else(|| "n/a".to_string(), |price| format!("{price:.0}"));
                    println!(
                        "{} | {} {} | {} | first seen {}",
                        card.id, card.postcode, card.city, price, card.first_seen_at
                    );
                }
                println!("{} of {} listings", cards.len(), page.meta.total);
            }
        }
        SearchOutcome::Failure(state) => {
            if cli.json {
                eprintln!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                eprintln!("search failed: {}", state.message);
                if let Some(status) = state.status {
                    eprintln!(
                        "status: {} {}",
                        status,
                        state.status_text.unwrap_or_default()
                    );
                }
                for (name, value) in &state.rate_limit_headers {
                    eprintln!("{name}: {value}");
                }
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
