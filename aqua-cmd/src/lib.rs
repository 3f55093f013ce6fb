//! Command implementations for the AquaGuardian CLI.
//!
//! Provides subcommands for browsing the region catalogue, estimating
//! household water usage, and exporting map and chart data.

use aqua_core::region::{catalogue, RegionCatalogue};
use aqua_core::stress::StressLevel;
use clap::{Subcommand, ValueEnum};
use std::io::Write;
use std::path::Path;

pub mod estimate;
pub mod regions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all regions with their water-stress level
    Regions {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Load regions from this CSV instead of the built-in catalogue
        #[arg(short = 'r', long = "regions")]
        regions_csv: Option<String>,
    },

    /// Show detail, chart series and tips for one region
    Region {
        /// Region id, e.g. IN-DL
        id: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,

        /// Load regions from this CSV instead of the built-in catalogue
        #[arg(short = 'r', long = "regions")]
        regions_csv: Option<String>,
    },

    /// Estimate daily household water usage
    Estimate {
        /// JSON household profile; missing keys use the defaults
        #[arg(short, long)]
        profile: Option<String>,

        /// Number of people in the household
        #[arg(short = 'n', long)]
        family_size: Option<u32>,

        /// Region whose conservation tips should be shown
        #[arg(long)]
        region: Option<String>,

        /// Override a habit, e.g. --set showerMinutes=5 (repeatable)
        #[arg(short, long = "set", value_name = "HABIT=VALUE")]
        set: Vec<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,

        /// Load regions from this CSV instead of the built-in catalogue
        #[arg(short = 'r', long = "regions")]
        regions_csv: Option<String>,
    },

    /// Print conservation tips for a water-stress level
    Tips {
        /// low, medium, high, critical or emergency
        #[arg(short, long, default_value_t = StressLevel::DEFAULT_TIPS_LEVEL)]
        level: StressLevel,
    },

    /// Export map markers, legend and view as JSON
    Map {
        /// Emit a GeoJSON FeatureCollection instead
        #[arg(long)]
        geojson: bool,

        /// Load regions from this CSV instead of the built-in catalogue
        #[arg(short = 'r', long = "regions")]
        regions_csv: Option<String>,
    },
}

/// The built-in catalogue, or one read from `path`.
pub fn load_catalogue(path: Option<&str>) -> anyhow::Result<RegionCatalogue> {
    match path {
        Some(p) => RegionCatalogue::from_csv_path(Path::new(p))
            .map_err(|e| anyhow::anyhow!("Failed to load regions from {}: {}", p, e)),
        None => Ok(catalogue().clone()),
    }
}

pub fn run(command: Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Regions { format, regions_csv } => {
            let catalogue = load_catalogue(regions_csv.as_deref())?;
            regions::write_regions(&mut out, &catalogue, format)
        }
        Command::Region { id, json, regions_csv } => {
            let catalogue = load_catalogue(regions_csv.as_deref())?;
            regions::write_region_detail(&mut out, &catalogue, &id, json)
        }
        Command::Estimate {
            profile,
            family_size,
            region,
            set,
            json,
            regions_csv,
        } => {
            let catalogue = load_catalogue(regions_csv.as_deref())?;
            let request = estimate::EstimateRequest {
                profile_path: profile,
                family_size,
                region,
                overrides: set,
            };
            estimate::run_estimate(&mut out, &catalogue, &request, json)
        }
        Command::Tips { level } => write_tips(&mut out, level),
        Command::Map { geojson, regions_csv } => {
            let catalogue = load_catalogue(regions_csv.as_deref())?;
            regions::write_map(&mut out, &catalogue, geojson)
        }
    }
}

fn write_tips<W: Write>(out: &mut W, level: StressLevel) -> anyhow::Result<()> {
    writeln!(out, "Water conservation tips ({}):", level.display_name())?;
    for tip in level.tips() {
        writeln!(out, "  - {}", tip)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_tips() {
        let mut out = Vec::new();
        write_tips(&mut out, StressLevel::High).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Water conservation tips (High Water Stress):"));
        assert!(text.contains("  - Reuse greywater from laundry for toilets"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_load_builtin_catalogue() {
        let catalogue = load_catalogue(None).unwrap();
        assert_eq!(catalogue.len(), 8);
    }

    #[test]
    fn test_load_missing_catalogue_file() {
        let err = load_catalogue(Some("/nonexistent/regions.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/regions.csv"));
    }
}
