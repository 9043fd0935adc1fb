use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode};
use tracing::{info, warn};
use weather_core::{
    Config, DashboardRequest, ForecastDays, LocationQuery, Sections, WeatherProvider,
    fetch_dashboard, provider_from_config,
};

use std::process::ExitCode;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Log request details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and display defaults.
    Configure,

    /// Print where the configuration file lives.
    ConfigPath,

    /// Show the dashboard for a city.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// City name, e.g. "London".
    pub city: String,

    /// Optional country code appended to the query, e.g. "GB".
    #[arg(long, short)]
    pub country: Option<String>,

    /// Forecast days (1-7); defaults to the configured value.
    #[arg(long, short, value_parser = clap::value_parser!(u8).range(1..=7))]
    pub days: Option<u8>,

    /// Hide the hourly table.
    #[arg(long)]
    pub no_hourly: bool,

    /// Hide the radar section.
    #[arg(long)]
    pub no_radar: bool,

    /// Re-fetch and redraw on the configured refresh interval until Ctrl-C.
    #[arg(long)]
    pub watch: bool,
}

impl ShowArgs {
    fn request(&self, config: &Config) -> anyhow::Result<DashboardRequest> {
        let query = LocationQuery::new(&self.city, self.country.as_deref())?;
        let days = self.days.map_or_else(|| config.default_days(), ForecastDays::new);

        Ok(DashboardRequest {
            query,
            days,
            sections: Sections { hourly: !self.no_hourly, radar: !self.no_radar },
        })
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure().map(|()| ExitCode::SUCCESS),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(ExitCode::SUCCESS)
            }
            Command::Show(args) => show(args).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    config.default_days = CustomType::<u8>::new("Default forecast days (1-7):")
        .with_default(config.default_days)
        .prompt()
        .context("Failed to read forecast days")?
        .clamp(ForecastDays::MIN, ForecastDays::MAX);

    config.refresh_minutes = CustomType::<u64>::new("Refresh interval for --watch (minutes):")
        .with_default(config.refresh_minutes)
        .prompt()
        .context("Failed to read refresh interval")?
        .max(1);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(args: ShowArgs) -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let request = args.request(&config)?;

    if args.watch {
        watch(provider.as_ref(), &request, config.refresh_interval(), ctrl_c()).await;
        return Ok(ExitCode::SUCCESS);
    }

    match render_cycle(provider.as_ref(), &request).await {
        Ok(dashboard) => {
            print!("{dashboard}");
            Ok(ExitCode::SUCCESS)
        }
        Err(message) => {
            eprint!("{message}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// One fetch-and-render pass: the dashboard, or the single error line shown instead.
async fn render_cycle(
    provider: &dyn WeatherProvider,
    request: &DashboardRequest,
) -> Result<String, String> {
    match fetch_dashboard(provider, request).await {
        Ok(dashboard) => Ok(render::render_dashboard(&dashboard)),
        Err(err) => {
            warn!(kind = ?err.kind(), "fetch cycle failed");
            Err(render::render_error(&err))
        }
    }
}

async fn refresh(provider: &dyn WeatherProvider, request: &DashboardRequest) {
    let output = render_cycle(provider, request).await.unwrap_or_else(|message| message);
    // Clear the screen and move the cursor home.
    print!("\x1B[2J\x1B[H{output}");
    println!(
        "\nUpdated {}. Press Ctrl-C to quit.",
        chrono::Local::now().format("%H:%M:%S")
    );
}

/// Resolves on the first Ctrl-C; never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Redraw on every tick until `shutdown` resolves, including mid-fetch.
async fn watch(
    provider: &dyn WeatherProvider,
    request: &DashboardRequest,
    every: std::time::Duration,
    shutdown: impl Future<Output = ()>,
) {
    info!(interval_secs = every.as_secs(), "watching");
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    // One listener for the whole loop so a signal during a refresh is not lost.
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => return,
            _ = ticker.tick() => {}
        }
        tokio::select! {
            () = &mut shutdown => return,
            () = refresh(provider, request) => {}
        }
    }
}
