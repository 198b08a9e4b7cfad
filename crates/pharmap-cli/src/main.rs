mod app;
mod output;

use clap::{Args, Parser, Subcommand};
use pharmap_core::Coordinate;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pharmap")]
#[command(about = "Find nearby pharmacies and whether they are open right now")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Overrides the configured device position for one run.
#[derive(Debug, Clone, Copy, Default, Args)]
struct PositionArgs {
    /// Device latitude in degrees
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Device longitude in degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
}

impl PositionArgs {
    fn coordinate(self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List nearby pharmacies, nearest first
    Search {
        /// Only pharmacies whose name contains this text
        #[arg(short, long, default_value = "")]
        keyword: String,

        /// Print the result set as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        position: PositionArgs,
    },
    /// Print map markers for nearby pharmacies
    Map {
        #[command(flatten)]
        position: PositionArgs,
    },
    /// List nearby pharmacies marked as favorites
    Favorites {
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Add or remove a pharmacy from the favorites
    Favorite {
        /// Pharmacy id (hpid)
        id: String,
    },
    /// Print the dial URI for a nearby pharmacy
    Call {
        /// Pharmacy id (hpid)
        id: String,

        #[command(flatten)]
        position: PositionArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pharmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rendered = match cli.command {
        Commands::Search {
            keyword,
            json,
            position,
        } => app::run_search(&config, &keyword, position.coordinate(), json).await?,
        Commands::Map { position } => app::run_map(&config, position.coordinate()).await?,
        Commands::Favorites { position } => {
            app::run_favorites(&config, position.coordinate()).await?
        }
        Commands::Favorite { id } => app::run_toggle_favorite(&config, &id).await?,
        Commands::Call { id, position } => {
            app::run_call(&config, &id, position.coordinate()).await?
        }
    };
    println!("{rendered}");

    Ok(())
}
