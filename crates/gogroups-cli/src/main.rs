mod groups;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gogroups_core::{FilterField, SearchCriteria};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gogroups")]
#[command(about = "Browse Go user groups from a groups server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the groups matching the filters, with their member total
    List {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Write the matching groups as clustered GeoJSON markers
    Map {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Output file for the GeoJSON feature collection
        #[arg(long)]
        out: PathBuf,
        /// Cluster cell size in degrees
        #[arg(long, default_value_t = 10.0)]
        cell_degrees: f64,
    },
}

/// Where the group list is loaded from.
#[derive(Debug, Args)]
struct SourceArgs {
    /// Groups server base URL (overrides `GOGROUPS_API_BASE_URL`)
    #[arg(long)]
    base_url: Option<String>,
    /// Read a local YAML catalog instead of calling a server
    #[arg(long, conflicts_with = "base_url")]
    catalog: Option<PathBuf>,
}

/// Case-insensitive substring filters; an empty value means no filter.
#[derive(Debug, Default, Args)]
struct FilterArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    continent: Option<String>,
}

impl FilterArgs {
    fn to_criteria(&self) -> SearchCriteria {
        let mut search = SearchCriteria::new();
        let values = [
            (FilterField::Name, &self.name),
            (FilterField::City, &self.city),
            (FilterField::Country, &self.country),
            (FilterField::Continent, &self.continent),
        ];
        for (field, value) in values
            .into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        {
            search.set(field, value);
        }
        search
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = gogroups_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List { source, filters } => {
            let source = groups::Source::resolve(&config, &source)?;
            groups::run_list(&source, &filters.to_criteria()).await;
        }
        Commands::Map {
            source,
            filters,
            out,
            cell_degrees,
        } => {
            let source = groups::Source::resolve(&config, &source)?;
            groups::run_map(&source, &filters.to_criteria(), &out, cell_degrees).await?;
        }
    }

    Ok(())
}
