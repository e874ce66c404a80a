//! Command definitions and dispatch.

use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use dealflow::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "dfl", version, about = "Browse the dealflow startup catalog")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Record store url (default: DEALFLOW_URL or the local endpoint)
    #[arg(long, global = true, env = "DEALFLOW_URL")]
    pub url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List startups
    List {
        /// Free-text search over name and tagline
        #[arg(short, long)]
        query: Option<String>,
        /// Restrict to one sector (e.g. "AI", "Fintech")
        #[arg(short, long)]
        sector: Option<String>,
        /// Sort key: recently_added, most_raised, or highest_valuation
        #[arg(long)]
        sort: Option<String>,
        /// Show bookmarked startups only
        #[arg(short, long)]
        watchlist: bool,
    },
    /// Show one startup in detail
    Show { id: String },
    /// Toggle the bookmark on a startup
    Bookmark { id: String },
    /// Register interest in a startup
    Interest { id: String },
    /// List known sectors
    Sectors,
}

/// Connects to the record store and loads the catalog.
async fn open_session(url: Option<String>) -> Result<Session<HttpRecordStore>> {
    let mut config = StoreConfig::default();
    if let Some(url) = url {
        config = config.base_url(url);
    }
    let store = HttpRecordStore::with_config(config)?;
    let mut session = Session::new(store);
    let count = session.load().await;
    tracing::debug!(count, "catalog loaded");
    Ok(session)
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Sectors => {
            for sector in Sector::ALL {
                println!("{sector}");
            }
        }
        Command::List {
            query,
            sector,
            sort,
            watchlist,
        } => {
            let mut session = open_session(cli.url).await?;
            if let Some(query) = query {
                session.set_query(query);
            }
            if let Some(sector) = sector {
                let sector = Sector::from_str(&sector)
                    .with_context(|| format!("unknown sector {sector:?} (try 'dfl sectors')"))?;
                session.set_sector(Some(sector));
            }
            if let Some(sort) = sort {
                let sort = SortKey::from_str(&sort).with_context(|| {
                    format!("unknown sort key {sort:?} (recently_added, most_raised, highest_valuation)")
                })?;
                session.set_sort(sort);
            }
            if watchlist {
                session.navigate(View::Watchlist);
            }
            list(&session.visible());
        }
        Command::Show { id } => {
            let mut session = open_session(cli.url).await?;
            session.select(&id)?;
            let startup = session
                .selected()
                .context("selection missing after select")?;
            show(&startup);
        }
        Command::Bookmark { id } => {
            let session = open_session(cli.url).await?;
            match session.toggle_bookmark(&id).await? {
                ToggleOutcome::Confirmed { bookmarked } => {
                    println!("{id}: bookmarked = {bookmarked}");
                }
                ToggleOutcome::Reverted { bookmarked } => {
                    bail!("bookmark write failed; {id} remains bookmarked = {bookmarked}");
                }
                ToggleOutcome::Superseded => {}
            }
        }
        Command::Interest { id } => {
            let mut session = open_session(cli.url).await?;
            session.register_interest(&id)?;
            println!("Registration successful. Founders have been notified of your interest.");
        }
    }
    Ok(())
}

fn list(startups: &[StartupRecord]) {
    if startups.is_empty() {
        println!("No startups found. Try adjusting your filters or search query.");
        return;
    }
    for startup in startups {
        let mark = if startup.bookmarked { "*" } else { " " };
        println!(
            "{mark} {:<4} {:<16} {:<10} {:<9} raised {} / {} ({}%)",
            startup.id,
            startup.name,
            startup.sector,
            startup.stage,
            millions(startup.raised),
            millions(startup.target),
            startup.percent_raised(),
        );
    }
}

fn show(startup: &StartupRecord) {
    println!("{} - {}", startup.name, startup.tagline);
    println!("  sector:    {}", startup.sector);
    println!("  stage:     {}", startup.stage);
    println!("  location:  {}", startup.location);
    println!("  valuation: {}", millions(startup.valuation));
    println!(
        "  raised:    {} / {} ({}%)",
        millions(startup.raised),
        millions(startup.target),
        startup.percent_raised()
    );
    println!("  bookmarked: {}", startup.bookmarked);
    if !startup.description.is_empty() {
        println!("\n  {}", startup.description);
    }
    if !startup.validation.is_empty() {
        println!("\n  validation: {}", startup.validation.join(", "));
    }
    if !startup.team.is_empty() {
        println!("\n  team:");
        for member in &startup.team {
            println!("    {} - {}", member.name, member.role);
        }
    }
    if !startup.metrics.is_empty() {
        println!("\n  traction:");
        for metric in &startup.metrics {
            println!("    {:<14} {}", metric.label, metric.value);
        }
    }
    println!("\n  pitch deck: {}", startup.pitch_deck_url);
}

/// Formats minor currency units as "$N.NM", rounding half up.
fn millions(amount: u64) -> String {
    let tenths = (amount + 50_000) / 100_000;
    format!("${}.{}M", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millions_formatting_rounds_half_up() {
        assert_eq!(millions(1_200_000), "$1.2M");
        assert_eq!(millions(250_000), "$0.3M");
        assert_eq!(millions(240_000), "$0.2M");
        assert_eq!(millions(150_000), "$0.2M");
        assert_eq!(millions(85_000_000), "$85.0M");
        assert_eq!(millions(0), "$0.0M");
    }

    #[tokio::test]
    async fn sectors_command_needs_no_store() {
        let cli = Cli {
            verbose: 0,
            url: None,
            command: Command::Sectors,
        };
        run(cli).await.expect("sectors");
    }
}
