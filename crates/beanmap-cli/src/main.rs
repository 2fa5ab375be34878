mod render;

use anyhow::Context;
use beanmap_core::{
    load_app_config, reduce, Action, AppConfig, Coordinates, SortKey, Specialty, ViewState,
};
use beanmap_places::{ConfiguredLocator, FixedLocation, SearchOutcome};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "beanmap")]
#[command(about = "Find coffee shops, cafes, bakeries, and roasters nearby")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search around a free-text location (address, neighbourhood, city)
    Search {
        /// Location to search around
        query: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Search around the current device location
    Near {
        /// Latitude to use instead of detecting the device location
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude to use instead of detecting the device location
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show the built-in sample dataset
    Default {
        #[command(flatten)]
        view: ViewArgs,
    },
}

/// Filter, sort, and paging options shared by every search command.
#[derive(Debug, Args)]
struct ViewArgs {
    /// Specialty filter: all, coffee, cafe, bakery, or roastery
    #[arg(long, default_value = "all")]
    specialty: String,
    /// Sort order: distance, name, or rating
    #[arg(long, default_value_t = SortKey::Distance)]
    sort: SortKey,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Search radius in kilometres (defaults to BEANMAP_DEFAULT_RADIUS_KM)
    #[arg(long)]
    radius: Option<f64>,
    /// Seed for the mock place generator
    #[arg(long)]
    seed: Option<u64>,
    /// Print the result view as JSON
    #[arg(long)]
    json: bool,
}

impl ViewArgs {
    fn specialty_filter(&self) -> anyhow::Result<Option<Specialty>> {
        Specialty::parse_filter(&self.specialty).context("invalid --specialty")
    }

    fn radius_km(&self, default_km: f64) -> anyhow::Result<f64> {
        match self.radius {
            Some(r) if r.is_finite() && r > 0.0 => Ok(r),
            Some(r) => anyhow::bail!("--radius must be a positive number of kilometres, got {r}"),
            None => Ok(default_km),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = load_app_config().context("failed to load configuration")?;
    init_tracing(&config.log_level);

    run(cli.command, config).await
}

fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands, mut config: AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Search { query, view } => {
            apply_seed(&mut config, &view);
            let radius = view.radius_km(config.default_radius_km)?;
            let locator = build_locator(&config)?;
            let outcome = locator.search_text(&query, radius).await;
            present(outcome, &view)
        }
        Commands::Near { lat, lng, view } => {
            apply_seed(&mut config, &view);
            let radius = view.radius_km(config.default_radius_km)?;
            let locator = build_locator(&config)?;
            let outcome = match (lat, lng) {
                (Some(latitude), Some(longitude)) => {
                    let coords = Coordinates::new(latitude, longitude);
                    anyhow::ensure!(coords.is_valid(), "coordinates ({coords}) are out of range");
                    locator
                        .with_location(FixedLocation(Some(coords)))
                        .near_me(radius)
                        .await
                }
                _ => locator.near_me(radius).await,
            };
            present(outcome, &view)
        }
        Commands::Default { view } => present(SearchOutcome::default_area(), &view),
    }
}

fn apply_seed(config: &mut AppConfig, view: &ViewArgs) {
    if view.seed.is_some() {
        config.mock_seed = view.seed;
    }
}

fn build_locator(config: &AppConfig) -> anyhow::Result<ConfiguredLocator> {
    ConfiguredLocator::from_config(config).context("failed to build place search clients")
}

/// Feed a search outcome and the requested view options through the reducer.
fn view_state(outcome: SearchOutcome, view: &ViewArgs) -> anyhow::Result<ViewState> {
    let actions = [
        Action::SpecialtyChanged(view.specialty_filter()?),
        Action::SortChanged(view.sort),
        outcome.into_action(),
        Action::PageRequested(view.page),
    ];
    Ok(actions.into_iter().fold(ViewState::default(), reduce))
}

fn present(outcome: SearchOutcome, view: &ViewArgs) -> anyhow::Result<()> {
    let place_name = outcome.place_name.clone();
    let state = view_state(outcome, view)?;
    let result = state.derived();
    if view.json {
        let json = serde_json::to_string_pretty(&render::JsonView {
            place_name: place_name.as_deref(),
            view: &result,
        })?;
        println!("{json}");
    } else {
        print!("{}", render::render_text(&result, place_name.as_deref())?);
    }
    Ok(())
}
