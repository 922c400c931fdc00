mod analyzer;
mod cli;
mod config;
mod dashboard;
mod model;
mod normalizer;
mod parser;
mod provider;
mod render;
mod utils;

use analyzer::{Analyzer, AnalyzerImpl};
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::Cli;
use config::{load_or_default, AppConfig, DashboardParams};
use dashboard::Dashboard;
use model::ConfigError;
use provider::{PriceProvider, YahooProvider};
use render::{ConsoleRenderer, JsonRenderer, Renderer};
use std::process;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let cli = Cli::parse();
    // Defaults stand in for the file only if it was absent from the start
    let allow_missing = !cli.config.exists();

    let config = match load_settings(&cli, true) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            process::exit(1);
        }
    };
    let mut params = match DashboardParams::resolve(&config, today()) {
        Ok(p) => p,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let provider = match YahooProvider::new(&config.provider) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to initialize data provider: {}", e);
            process::exit(1);
        }
    };
    let dashboard = Dashboard::new(provider, AnalyzerImpl::new());
    let mut renderers = build_renderers(&config);

    run_once(&dashboard, &params, &mut renderers).await;

    let Some(interval) = config.refresh_interval_seconds else {
        return;
    };

    // Watch mode: recompute whenever the resolved parameters change
    loop {
        info!("Waiting {}s before re-checking parameters...", interval);
        tokio::select! {
            _ = sleep(Duration::from_secs(interval)) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down.");
                break;
            }
        }

        let next = match load_settings(&cli, allow_missing).and_then(|cfg| DashboardParams::resolve(&cfg, today())) {
            Ok(p) => p,
            Err(e) => {
                warn!("Keeping previous parameters: {}", e);
                continue;
            }
        };
        if next == params {
            debug!("Parameters unchanged.");
            continue;
        }

        info!("Parameters changed, recomputing.");
        params = next;
        run_once(&dashboard, &params, &mut renderers).await;
    }
}

/// Config file (or defaults) with command-line overrides applied.
fn load_settings(cli: &Cli, allow_missing: bool) -> Result<AppConfig, ConfigError> {
    let mut config = load_or_default(&cli.config, allow_missing)?;
    cli.apply(&mut config);
    Ok(config)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn build_renderers(config: &AppConfig) -> Vec<Box<dyn Renderer>> {
    let mut renderers: Vec<Box<dyn Renderer>> = vec![Box::new(ConsoleRenderer::stdout())];
    if let Some(path) = &config.output.json_path {
        renderers.push(Box::new(JsonRenderer::new(path)));
    }
    renderers
}

async fn run_once<P: PriceProvider, A: Analyzer>(
    dashboard: &Dashboard<P, A>,
    params: &DashboardParams,
    renderers: &mut [Box<dyn Renderer>],
) {
    let report = dashboard.run(params).await;
    if !report.errors.is_empty() {
        warn!("Run finished with {} error(s)", report.errors.len());
    }
    for renderer in renderers.iter_mut() {
        if let Err(e) = renderer.render(&report) {
            warn!("Render failed: {}", e);
        }
    }
}
