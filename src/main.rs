use anyhow::Result;
use ardl::{commands, commands::Options, domain::model::Channel};
use clap::Parser;
use std::path::PathBuf;

/// ardl - ArTeam plugin release browser
///
/// Browse the GitHub releases and recent CI builds of ArTeam plugins.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This is useful for avoiding rate limits.
///
/// Examples:
///   ardl releases                  # Stable releases of the default plugin
///   ardl releases -p arlibs -c all # Every release of ArLibs
///   ardl builds                    # Recent CI builds of the default plugin
#[derive(Parser, Debug)]
#[command(author, version = env!("ARDL_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", env = "ARDL_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// GitHub web URL used for links (defaults to https://github.com)
    #[arg(long = "web-url", value_name = "URL", global = true)]
    pub web_url: Option<String>,

    /// Plugin catalog file (JSON)
    #[arg(long = "catalog", env = "ARDL_CATALOG", value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List the plugins in the catalog
    Plugins,

    /// Show the downloadable releases of a plugin
    Releases(ReleasesArgs),

    /// Show the recent CI builds of a plugin
    Builds(BuildsArgs),

    /// Browse releases and builds interactively
    Browse(BrowseArgs),
}

#[derive(clap::Args, Debug)]
pub struct ReleasesArgs {
    /// Plugin id (defaults to the first available plugin)
    #[arg(short, long, value_name = "ID")]
    pub plugin: Option<String>,

    /// Release channel: stable, preview or all
    #[arg(short, long, default_value = "stable")]
    pub channel: Channel,

    /// Print the release list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct BuildsArgs {
    /// Plugin id (defaults to the first available plugin)
    #[arg(short, long, value_name = "ID")]
    pub plugin: Option<String>,

    /// Print the build panel as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct BrowseArgs {
    /// Plugin id to open first
    #[arg(short, long, value_name = "ID")]
    pub plugin: Option<String>,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            api_url: self.api_url.clone(),
            web_url: self.web_url.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let options = cli.options();
    let runtime = ardl::runtime::RealRuntime;

    match cli.command {
        Commands::Plugins => commands::plugins(runtime, &options)?,
        Commands::Releases(args) => {
            commands::releases(
                runtime,
                &options,
                args.plugin.as_deref(),
                args.channel,
                args.json,
            )
            .await?
        }
        Commands::Builds(args) => {
            commands::builds(runtime, &options, args.plugin.as_deref(), args.json).await?
        }
        Commands::Browse(args) => {
            commands::browse(runtime, &options, args.plugin.as_deref()).await?
        }
    }
    Ok(())
}
