use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use client_core::{
    config::normalize_api_base, load_settings, Dashboard, DashboardSnapshot, PitcherCard,
    UploadFile,
};
use shared::{
    domain::{SortKey, SortOrder},
    protocol::RosterQuery,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "bullpen", about = "Bullpen usage and fatigue tracker")]
struct Cli {
    /// Overrides bullpen.toml and BULLPEN_API_BASE.
    #[arg(long, global = true)]
    api_base: Option<String>,
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the roster and print one card per pitcher.
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Upload a game-log CSV, then print the refreshed roster.
    Upload {
        path: PathBuf,
        #[arg(long, default_value = "")]
        search: String,
    },
    Show {
        name: String,
    },
    Health,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    #[arg(long)]
    team: Option<String>,
    #[arg(long)]
    min_fatigue: Option<f64>,
    #[arg(long)]
    max_fatigue: Option<f64>,
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
    #[arg(long, value_enum)]
    order: Option<OrderArg>,
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Fatigue,
    Name,
    Team,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<FilterArgs> for RosterQuery {
    fn from(args: FilterArgs) -> Self {
        RosterQuery {
            team: args.team,
            min_fatigue: args.min_fatigue,
            max_fatigue: args.max_fatigue,
            sort: args.sort.map(|sort| match sort {
                SortArg::Fatigue => SortKey::Fatigue,
                SortArg::Name => SortKey::Name,
                SortArg::Team => SortKey::Team,
            }),
            order: args.order.map(|order| match order {
                OrderArg::Asc => SortOrder::Asc,
                OrderArg::Desc => SortOrder::Desc,
            }),
            limit: args.limit,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings()?;
    if let Some(raw) = cli.api_base.as_deref() {
        settings.api_base =
            normalize_api_base(raw).ok_or_else(|| anyhow!("invalid --api-base '{raw}'"))?;
    }
    info!(api_base = %settings.api_base, "bullpen: starting");
    let dashboard = Dashboard::from_settings(&settings);

    match cli.command {
        Command::List { search, filters } => {
            dashboard.store.set_search_term(search).await;
            dashboard.store.refresh_with(filters.into()).await;
            print_snapshot(&dashboard.store.snapshot().await, cli.json)?;
        }
        Command::Upload { path, search } => {
            let file = UploadFile::from_path(&path).await?;
            dashboard.store.set_search_term(search).await;
            // Same order as the browser view: load on mount, then upload.
            dashboard.store.refresh().await;
            dashboard.uploads.submit(Some(&file)).await;
            print_snapshot(&dashboard.store.snapshot().await, cli.json)?;
        }
        Command::Show { name } => {
            match dashboard.store.gateway().fetch_pitcher(&name).await {
                Ok(Some(pitcher)) => {
                    let card = PitcherCard::from_pitcher(&pitcher);
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&card)?);
                    } else {
                        print!("{}", render::render_card(&card));
                    }
                }
                Ok(None) => println!("No pitcher named '{name}'."),
                Err(err) => println!("{err}"),
            }
        }
        Command::Health => match dashboard.store.gateway().health().await {
            Ok(health) if health.is_ok() => println!("Backend at {} is healthy.", settings.api_base),
            Ok(health) => println!(
                "Backend at {} reported status '{}'.",
                settings.api_base, health.status
            ),
            Err(err) => println!("Backend at {} is unreachable: {err}", settings.api_base),
        },
    }

    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", render::dashboard_json(snapshot)?);
    } else {
        print!("{}", render::render_dashboard(snapshot));
    }
    Ok(())
}
