use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use hoodscout::classify::CategoryTable;
use hoodscout::config::{FileConfig, OrsConfig};
use hoodscout::pipeline;

/// Collect points of interest around a coordinate and classify them into
/// neighborhood-character categories
///
/// Examples:
///   # POIs within 1km of a point, classified locally via Overpass
///   hoodscout --lat 55.748 --lon 48.746
///
///   # Wider radius, results to a file
///   hoodscout --lat 55.748 --lon 48.746 -r 2500 -o pois.json
///
///   # OpenRouteService rectangle search (needs secrets/ors_secret.txt)
///   hoodscout --lat 55.748 --lon 48.746 --provider ors --step-lat 0.02 --step-lon 0.03
///
///   # Custom category rules
///   hoodscout --lat 55.748 --lon 48.746 --rules my-rules.toml
#[derive(Parser, Debug)]
#[command(name = "hoodscout")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches hoodscout.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Latitude of the search origin
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the search origin
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Search radius in meters (overpass provider)
    #[arg(short = 'r', long, default_value = "1000")]
    radius: u32,

    /// Data provider to query
    #[arg(short = 'p', long, default_value = "overpass")]
    provider: Provider,

    /// Latitude extent of the search rectangle (ors provider)
    #[arg(long, default_value = "0.02", allow_hyphen_values = true)]
    step_lat: f64,

    /// Longitude extent of the search rectangle (ors provider)
    #[arg(long, default_value = "0.03", allow_hyphen_values = true)]
    step_lon: f64,

    /// Path to a category rules file (defaults to the builtin table)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Path to the ORS API key file
    #[arg(long)]
    ors_key_file: Option<PathBuf>,

    /// Output JSON file path (prints to stdout if omitted)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Provider {
    Overpass,
    Ors,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let lat = args
        .lat
        .or_else(|| file_config.as_ref().and_then(|c| c.lat));
    let lon = args
        .lon
        .or_else(|| file_config.as_ref().and_then(|c| c.lon));
    let radius = if args.radius != 1000 {
        args.radius
    } else {
        file_config.as_ref().map(|c| c.radius).unwrap_or(1000)
    };
    let step_lat = if (args.step_lat - 0.02).abs() > 1e-9 {
        args.step_lat
    } else {
        file_config.as_ref().map(|c| c.step_lat).unwrap_or(0.02)
    };
    let step_lon = if (args.step_lon - 0.03).abs() > 1e-9 {
        args.step_lon
    } else {
        file_config.as_ref().map(|c| c.step_lon).unwrap_or(0.03)
    };
    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    let rules_path = args
        .rules
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.rules.clone()));
    let output = args
        .output
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.output.clone()));

    let overpass_config = file_config
        .as_ref()
        .and_then(|c| c.overpass.clone())
        .unwrap_or_default();
    let mut ors_config = file_config
        .as_ref()
        .and_then(|c| c.ors.clone())
        .unwrap_or_else(OrsConfig::default);
    if let Some(key_file) = args.ors_key_file.clone() {
        ors_config.key_file = key_file;
    }

    let (Some(lat), Some(lon)) = (lat, lon) else {
        bail!("Must provide --lat and --lon (or set them in a config file)");
    };
    let origin = (lat, lon);

    println!("hoodscout - Neighborhood POI Collector");
    println!("======================================");
    println!();

    let custom_table;
    let table: &CategoryTable = match rules_path {
        Some(ref path) => {
            custom_table = CategoryTable::from_path(path)
                .with_context(|| format!("Failed to load category rules from {:?}", path))?;
            &custom_table
        }
        None => CategoryTable::builtin(),
    };

    if verbose {
        println!("Configuration:");
        println!("  Origin: ({:.4}, {:.4})", lat, lon);
        println!("  Provider: {:?}", args.provider);
        match args.provider {
            Provider::Overpass => {
                println!("  Radius: {}m", radius);
                println!("  Overpass endpoint: {}", overpass_config.url);
            }
            Provider::Ors => {
                println!("  Steps: ({}, {})", step_lat, step_lon);
                println!("  ORS endpoint: {}", ors_config.url);
                println!("  ORS key file: {}", ors_config.key_file.display());
            }
        }
        println!(
            "  Rules: {}",
            rules_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "builtin".to_string())
        );
        println!(
            "  Recognized tag keys: {}",
            table.recognized_keys().count()
        );
        println!();
    }

    match args.provider {
        Provider::Overpass => {
            let spinner = create_spinner("Querying Overpass API...");
            let start = Instant::now();
            let pois = pipeline::overpass_nearby(origin, radius, table, &overpass_config);
            spinner.finish_with_message(format!(
                "Collected {} classified POIs [{:.1}s]",
                pois.len(),
                start.elapsed().as_secs_f32()
            ));

            write_output(&pois, output.as_deref())?;
        }
        Provider::Ors => {
            let spinner = create_spinner("Querying OpenRouteService...");
            let start = Instant::now();
            let pois = pipeline::ors_nearby(origin, step_lat, step_lon, &ors_config)
                .context("Failed to fetch POIs from OpenRouteService")?;
            spinner.finish_with_message(format!(
                "Collected {} POIs [{:.1}s]",
                pois.len(),
                start.elapsed().as_secs_f32()
            ));

            write_output(&pois, output.as_deref())?;
        }
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn write_output<T: Serialize>(pois: &[T], path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(pois).context("Failed to serialize POIs to JSON")?;

    match path {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write output file {:?}", path))?;
            println!("Output: {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
