//! # Conveyor CLI Application
//!
//! Command-line front end for the conveyor engineering engine.
//!
//! ```text
//! conveyor calc app.json               # validate + calculate
//! conveyor validate app.json           # findings only
//! conveyor tracking app.json           # tracking-risk assessment
//! conveyor bom "SK 1SI50-56C-71S/4" --hp 0.5 --worm-ratio 80 --mounting bottom_mount \
//!     --shaft-option single_extended --catalog nord.json
//! ```
//!
//! Every command accepts `--json` for machine-readable output. Exit status is
//! 1 when a configuration has blocking errors or a BOM is incomplete.

mod catalog;
mod config;
mod logging;
mod render;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use conveyor_core::bom::{self, ResolveContext};
use conveyor_core::inputs;
use conveyor_core::orchestrator::{run_calculation, CalcContext, CalcObserver, CalculationRequest};
use conveyor_core::parameters::effective_parameters;
use conveyor_core::tracking;
use conveyor_core::validation;
use conveyor_core::vocabulary::{MountingStyle, ProductKey, ShaftOption, ShaftStyle};
use serde_json::{json, Value};

use crate::config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "conveyor", author, version, about = "Conveyor engineering calculations", long_about = None)]
struct Cli {
    /// Path to configuration file (default: ./conveyor.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Product family (overrides the configured product)
    #[arg(short, long, global = true, value_parser = parse_product)]
    product: Option<ProductKey>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate and calculate a configuration
    Calc {
        /// Configuration JSON file
        input: PathBuf,
    },

    /// Validate a configuration without calculating
    Validate {
        /// Configuration JSON file
        input: PathBuf,
    },

    /// Assess belt tracking risk
    Tracking {
        /// Configuration JSON file
        input: PathBuf,
    },

    /// Resolve a drivetrain model code to vendor part numbers
    Bom {
        /// Drivetrain model code, e.g. "SK 1SI50-56C-71S/4"
        model_code: String,

        /// Motor horsepower
        #[arg(long)]
        hp: f64,

        /// Drive mounting style
        #[arg(long, default_value = "shaft_mounted", value_parser = parse_mounting)]
        mounting: MountingStyle,

        /// Worm-stage gear ratio
        #[arg(long)]
        worm_ratio: Option<f64>,

        /// Output shaft option (bottom-mount drives)
        #[arg(long, value_parser = parse_shaft_option)]
        shaft_option: Option<ShaftOption>,

        /// Output shaft style
        #[arg(long, value_parser = parse_shaft_style)]
        shaft_style: Option<ShaftStyle>,

        /// Output shaft diameter (in)
        #[arg(long)]
        shaft_diameter: Option<f64>,

        /// Vendor catalog JSON file (overrides the configured catalog)
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },
}

fn parse_product(s: &str) -> Result<ProductKey, String> {
    ProductKey::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_mounting(s: &str) -> Result<MountingStyle, String> {
    MountingStyle::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_shaft_option(s: &str) -> Result<ShaftOption, String> {
    ShaftOption::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_shaft_style(s: &str) -> Result<ShaftStyle, String> {
    ShaftStyle::from_str_flexible(s).map_err(|e| e.to_string())
}

/// Forwards calculation telemetry to the log
struct LogObserver;

impl CalcObserver for LogObserver {
    fn on_calc_start(&self, product: ProductKey) {
        tracing::info!(product = product.code(), "calculation started");
    }

    fn on_calc_success(&self, duration_ms: f64) {
        tracing::info!(duration_ms, "calculation finished");
    }

    fn on_calc_error(&self, message: &str) {
        tracing::error!(error = message, "calculation rejected");
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_status(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    logging::init(&config.log_level)?;

    let product = cli.product.unwrap_or(config.product);
    tracing::debug!(?config, product = product.code(), "configuration loaded");

    match cli.command {
        Command::Calc { input } => {
            let request = CalculationRequest {
                product,
                inputs: read_json(&input)?,
                parameter_overrides: config.parameters,
            };
            let observer = LogObserver;
            let result = run_calculation(&request, &CalcContext::with_observer(&observer))?;
            if cli.json {
                print_json(&result)?;
            } else {
                print!("{}", render::calculation(&result));
            }
            Ok(exit_status(result.success))
        }

        Command::Validate { input } => {
            let input = inputs::normalize(&read_json(&input)?)?;
            let params = effective_parameters(product, &config.parameters, &input);
            let report = validation::validate(&input, &params, Some(product));
            if cli.json {
                print_json(&report)?;
            } else {
                print!("{}", render::validation(&report));
            }
            Ok(exit_status(report.is_valid()))
        }

        Command::Tracking { input } => {
            let input = inputs::normalize(&read_json(&input)?)?;
            let assessment = tracking::assess(&input);
            if cli.json {
                print_json(&assessment)?;
            } else {
                print!("{}", render::tracking(&assessment));
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Bom {
            model_code,
            hp,
            mounting,
            worm_ratio,
            shaft_option,
            shaft_style,
            shaft_diameter,
            catalog: catalog_file,
        } => {
            let catalog_path = catalog_file.or(config.catalog_path);
            let vendor_catalog = catalog::load_optional(catalog_path.as_deref())?;
            let ctx = ResolveContext {
                vendor: config.vendor,
                mounting_style: mounting,
                shaft_option,
                shaft_style,
                shaft_diameter_in: shaft_diameter,
                worm_ratio,
            };

            let resolution = bom::resolve(&vendor_catalog, &model_code, hp, &ctx).await;
            if cli.json {
                print_json(&json!({
                    "model_code": resolution.model_code,
                    "parsed": resolution.parsed,
                    "components": resolution.views(),
                    "complete": resolution.complete,
                    "summary": bom::render_summary(&resolution),
                }))?;
            } else {
                print!("{}", bom::render_summary(&resolution));
            }
            Ok(exit_status(resolution.complete))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bom_command() {
        let cli = Cli::try_parse_from([
            "conveyor",
            "bom",
            "SK 1SI50-56C-71S/4",
            "--hp",
            "0.5",
            "--mounting",
            "chain",
            "--shaft-option",
            "single",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Bom {
                mounting, shaft_option, ..
            } => {
                assert_eq!(mounting, MountingStyle::BottomMount);
                assert_eq!(shaft_option, Some(ShaftOption::SingleExtended));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_product_flag() {
        let cli = Cli::try_parse_from(["conveyor", "--product", "Slider Bed Conveyor", "calc", "app.json"]).unwrap();
        assert_eq!(cli.product, Some(ProductKey::SliderBed));
        assert!(Cli::try_parse_from(["conveyor", "--product", "forklift", "calc", "app.json"]).is_err());
    }

    #[test]
    fn test_read_json_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.json");
        fs::write(&path, "not json").unwrap();
        assert!(read_json(&path).is_err());
        fs::write(&path, r#"{ "belt_width_in": 18.0 }"#).unwrap();
        assert_eq!(read_json(&path).unwrap()["belt_width_in"], json!(18.0));
    }
}
