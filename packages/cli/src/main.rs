#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the LifeCost+ city engine.
//!
//! Every subcommand reads the embedded city dataset unless `--catalog`
//! points at a TOML catalog file. `serve` starts the HTTP API with the
//! same catalog.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use lifecost_catalog::validate::validate_catalog;
use lifecost_catalog::{CatalogError, CityCatalog, InMemoryCatalog};
use lifecost_city_models::Priority;
use lifecost_engine::compare::{Comparison, Highlight};
use lifecost_engine::filter::FilterParams;
use lifecost_engine::format::{format_currency, format_minutes, format_percent};
use lifecost_engine::proximity::{
    DEFAULT_RADIUS_MILES, DistanceUnit, NearbyCity, format_distance,
};
use lifecost_engine::ranking::RankedCity;
use lifecost_ratings::taxes::{calculate_tax_savings, format_tax_rate};
use lifecost_ratings::{environment, safety, transportation};
use lifecost_ratings_models::{AirQualityTrend, CrimeTrend, RatingKind, TransportationTrend};
use lifecost_server::ServerConfig;

#[derive(Parser)]
#[command(name = "lifecost", about = "City affordability and livability explorer")]
struct Cli {
    /// TOML catalog file to use instead of the embedded dataset
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every city in the catalog
    List,
    /// Filter cities by income and rent, then rank by priorities
    Search {
        /// Annual income in dollars
        #[arg(long)]
        income: f64,
        /// Maximum monthly rent in dollars
        #[arg(long)]
        max_rent: f64,
        /// Maximum average commute in minutes
        #[arg(long)]
        max_commute: Option<f64>,
        /// Minimum safety score
        #[arg(long)]
        min_safety: Option<f64>,
        /// Comma-separated priorities (affordability, commute, safety,
        /// lifestyle, education)
        #[arg(long, value_delimiter = ',', value_parser = parse_name::<Priority>)]
        priorities: Vec<Priority>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Compare two cities side by side
    Compare {
        /// Slug of the first city
        first: String,
        /// Slug of the second city
        second: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List cities near another city
    Nearby {
        /// Slug of the origin city
        slug: String,
        /// Search radius, in `unit`
        #[arg(long, default_value_t = DEFAULT_RADIUS_MILES)]
        radius: f64,
        /// `miles` or `kilometers`
        #[arg(long, default_value = "miles", value_parser = parse_name::<DistanceUnit>)]
        unit: DistanceUnit,
    },
    /// Distance between two cities
    Distance {
        /// Slug of the first city
        first: String,
        /// Slug of the second city
        second: String,
        /// `miles` or `kilometers`
        #[arg(long, default_value = "miles", value_parser = parse_name::<DistanceUnit>)]
        unit: DistanceUnit,
    },
    /// Rate a metric value
    Rate {
        /// Metric kind (e.g. safety, air-quality, income-tax)
        #[arg(value_parser = parse_name::<RatingKind>)]
        kind: RatingKind,
        /// Value to rate
        value: f64,
        /// The jurisdiction has no income tax
        #[arg(long)]
        no_income_tax: bool,
    },
    /// Compute the year-over-year change from a JSON trend file
    Trend {
        /// Trend domain
        #[arg(value_enum)]
        kind: TrendKind,
        /// JSON array of yearly entries, most recent first
        file: PathBuf,
    },
    /// Estimate savings between two tax burdens
    TaxSavings {
        /// Current total tax burden in percent
        #[arg(long)]
        current: f64,
        /// Compared total tax burden in percent
        #[arg(long)]
        compare: f64,
        /// Annual income in dollars
        #[arg(long)]
        income: f64,
    },
    /// Check the catalog for data issues
    Validate,
    /// Start the HTTP API server
    Serve {
        /// Address to bind (overrides `BIND_ADDR`)
        #[arg(long)]
        bind_addr: Option<String>,
        /// Port to bind (overrides `PORT`)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TrendKind {
    Safety,
    Transportation,
    AirQuality,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            print_cities(&catalog)?;
        }
        Commands::Search {
            income,
            max_rent,
            max_commute,
            min_safety,
            priorities,
            json,
        } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let params = FilterParams {
                income,
                max_rent,
                max_commute,
                min_safety,
            };
            let ranked = lifecost_engine::search(&catalog, &params, &priorities)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                print_ranked(&ranked, income);
            }
        }
        Commands::Compare {
            first,
            second,
            json,
        } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let comparison = lifecost_engine::compare_by_slug(&catalog, &first, &second)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                print_comparison(&comparison);
            }
        }
        Commands::Nearby { slug, radius, unit } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let nearby = lifecost_engine::nearby_by_slug(&catalog, &slug, radius, unit)?;
            if nearby.is_empty() {
                println!("No cities within {radius} {unit} of {slug}");
            }
            print_nearby(&nearby);
        }
        Commands::Distance {
            first,
            second,
            unit,
        } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let distance = lifecost_engine::distance_by_slug(&catalog, &first, &second, unit)?;
            println!("{first} -> {second}: {}", format_distance(distance, unit));
        }
        Commands::Rate {
            kind,
            value,
            no_income_tax,
        } => print_rating(kind, value, !no_income_tax),
        Commands::Trend { kind, file } => {
            let contents = std::fs::read_to_string(&file)?;
            println!("{}", trend_change_json(kind, &contents)?);
        }
        Commands::TaxSavings {
            current,
            compare,
            income,
        } => {
            print_tax_savings(current, compare, income);
        }
        Commands::Validate => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            validate(&catalog)?;
        }
        Commands::Serve { bind_addr, port } => {
            let config = serve_config(cli.catalog, bind_addr, port);
            actix_rt::System::new().block_on(lifecost_server::run_server(config))?;
        }
    }

    Ok(())
}

/// Year-over-year change for a trend file, pretty-printed. `null` when the
/// file has fewer than two entries.
fn trend_change_json(kind: TrendKind, contents: &str) -> Result<String, serde_json::Error> {
    match kind {
        TrendKind::Safety => {
            let trends: Vec<CrimeTrend> = serde_json::from_str(contents)?;
            serde_json::to_string_pretty(&safety::year_over_year_change(&trends))
        }
        TrendKind::Transportation => {
            let trends: Vec<TransportationTrend> = serde_json::from_str(contents)?;
            serde_json::to_string_pretty(&transportation::year_over_year_change(&trends))
        }
        TrendKind::AirQuality => {
            let trends: Vec<AirQualityTrend> = serde_json::from_str(contents)?;
            serde_json::to_string_pretty(&environment::year_over_year_change(&trends))
        }
    }
}

fn print_ranked(ranked: &[RankedCity], income: f64) {
    println!(
        "{:<4} {:<26} {:>8} {:>8} {:>8} {:>7}",
        "#", "CITY", "RENT", "RATIO", "COMMUTE", "SCORE"
    );
    println!("{}", "-".repeat(66));
    for (i, entry) in ranked.iter().enumerate() {
        let city = &entry.city;
        println!(
            "{:<4} {:<26} {:>8} {:>8} {:>8} {:>7.1}",
            i + 1,
            city.display_name(),
            format_currency(city.avg_rent),
            format_percent(city.rent_to_income(income) * 100.0),
            format_minutes(city.commute_time),
            entry.rank_score
        );
    }
    println!();
    println!("{} cities matched", ranked.len());
}

fn print_comparison(comparison: &Comparison) {
    println!(
        "{:<22} {:>16} {:>16}",
        "",
        comparison.first.display_name(),
        comparison.second.display_name()
    );
    println!("{}", "-".repeat(56));
    for row in &comparison.rows {
        // Asterisk marks the better side.
        let (left, right) = match row.highlight {
            Highlight::First => ("*", " "),
            Highlight::Second => (" ", "*"),
            Highlight::Neither => (" ", " "),
        };
        println!(
            "{:<22} {:>15}{left} {:>15}{right}",
            row.label, row.first_display, row.second_display
        );
    }
}

fn print_nearby(nearby: &[NearbyCity]) {
    for entry in nearby {
        println!(
            "{:<26} {:>11} {:>11}",
            entry.city.display_name(),
            format_distance(entry.distance_miles, DistanceUnit::Miles),
            format_distance(entry.distance_km, DistanceUnit::Kilometers)
        );
    }
}

fn print_rating(kind: RatingKind, value: f64, has_income_tax: bool) {
    let band = lifecost_ratings::rate(kind, value, has_income_tax);
    if band.description.is_empty() {
        println!("{kind} {value}: {}", band.rating);
    } else {
        println!("{kind} {value}: {} ({})", band.rating, band.description);
    }
}

/// Prints every catalog issue and fails if there were any.
fn validate(catalog: &InMemoryCatalog) -> Result<(), Box<dyn std::error::Error>> {
    let issues = validate_catalog(&catalog.cities()?);
    for issue in &issues {
        println!("{issue}");
    }
    if !issues.is_empty() {
        return Err(format!("{} catalog issues found", issues.len()).into());
    }
    println!("{} cities, no issues found", catalog.len());
    Ok(())
}

fn print_tax_savings(current: f64, compare: f64, income: f64) {
    let savings = calculate_tax_savings(current, compare, income);
    println!(
        "{} -> {} on {}",
        format_tax_rate(current),
        format_tax_rate(compare),
        format_currency(income)
    );
    println!("Annual savings:  {}", format_currency(savings.annual_savings));
    println!("Monthly savings: {}", format_currency(savings.monthly_savings));
    if let Some(percent) = savings.percent_difference {
        println!("Difference:      {}", format_percent(percent));
    }
}

/// Environment settings overridden by any flags given on the command line.
fn serve_config(
    catalog: Option<PathBuf>,
    bind_addr: Option<String>,
    port: Option<u16>,
) -> ServerConfig {
    let mut config = ServerConfig::from_env();
    if let Some(bind_addr) = bind_addr {
        config.bind_addr = bind_addr;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if catalog.is_some() {
        config.catalog_path = catalog;
    }
    config
}

fn parse_name<T: FromStr>(s: &str) -> Result<T, String> {
    s.parse().map_err(|_| format!("unrecognized value '{s}'"))
}

fn load_catalog(path: Option<&Path>) -> Result<InMemoryCatalog, CatalogError> {
    let catalog = match path {
        Some(path) => InMemoryCatalog::from_path(path)?,
        None => InMemoryCatalog::embedded()?,
    };
    log::debug!("Catalog has {} cities", catalog.len());
    Ok(catalog)
}

fn print_cities(catalog: &InMemoryCatalog) -> Result<(), CatalogError> {
    println!(
        "{:<20} {:<26} {:>8} {:>9} {:>7}",
        "SLUG", "CITY", "RENT", "COST", "OVERALL"
    );
    println!("{}", "-".repeat(74));
    for city in catalog.cities()? {
        println!(
            "{:<20} {:<26} {:>8} {:>9} {:>7}",
            city.slug,
            city.display_name(),
            format_currency(city.avg_rent),
            format_currency(city.monthly_cost),
            city.scores.overall
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_priorities_and_global_catalog() {
        let cli = Cli::try_parse_from([
            "lifecost",
            "search",
            "--income",
            "60000",
            "--max-rent",
            "1500",
            "--priorities",
            "safety,Commute",
            "--catalog",
            "cities.toml",
        ])
        .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("cities.toml")));
        let Commands::Search { priorities, .. } = cli.command else {
            panic!("expected search");
        };
        assert_eq!(priorities, [Priority::Safety, Priority::Commute]);
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(Cli::try_parse_from(["lifecost", "rate", "happiness", "5"]).is_err());
        assert!(
            Cli::try_parse_from(["lifecost", "nearby", "austin-tx", "--unit", "furlongs"])
                .is_err()
        );
    }

    #[test]
    fn parses_distance_unit() {
        let cli = Cli::try_parse_from([
            "lifecost",
            "distance",
            "austin-tx",
            "denver-co",
            "--unit",
            "KILOMETERS",
        ])
        .unwrap();
        let Commands::Distance {
            first,
            second,
            unit,
        } = cli.command
        else {
            panic!("expected distance command");
        };
        assert_eq!((first.as_str(), second.as_str()), ("austin-tx", "denver-co"));
        assert_eq!(unit, DistanceUnit::Kilometers);
    }

    #[test]
    fn embedded_catalog_validates_cleanly() {
        let catalog = load_catalog(None).unwrap();
        assert!(validate(&catalog).is_ok());
    }

    #[test]
    fn trend_json_reports_direction() {
        let json = trend_change_json(
            TrendKind::AirQuality,
            r#"[
                {"year": 2023, "avgAnnualAqi": 45, "avgAnnualPm25": 8, "avgAnnualPm10": 20, "goodAirDays": 260, "unhealthyAirDays": 2},
                {"year": 2022, "avgAnnualAqi": 50, "avgAnnualPm25": 10, "avgAnnualPm10": 20, "goodAirDays": 250, "unhealthyAirDays": 3}
            ]"#,
        )
        .unwrap();
        assert!(json.contains("\"direction\": \"improving\""));

        assert_eq!(trend_change_json(TrendKind::Safety, "[]").unwrap(), "null");
    }

    #[test]
    fn serve_flags_override_environment() {
        let config = serve_config(
            Some(PathBuf::from("alt.toml")),
            Some("0.0.0.0".to_string()),
            Some(9000),
        );
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.catalog_path, Some(PathBuf::from("alt.toml")));
    }
}
