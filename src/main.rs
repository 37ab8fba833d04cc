use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use travelweather::{
    Month, MonthMatchPolicy, QueryResult, SearchEngine, TravelWeatherConfig, TravelWeatherError,
    build_state, load_dataset, telemetry, web,
};

/// TravelWeather - find the best month to visit a destination
#[derive(Parser, Debug)]
#[command(name = "travelweather", author, version)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search by country (e.g. Japan) or month (e.g. March)
    Search {
        /// Country or month name; several words are joined with spaces
        query: Vec<String>,

        /// How month queries pick destinations: best_months or rating_filtered
        #[arg(long, value_parser = MonthMatchPolicy::from_str)]
        policy: Option<MonthMatchPolicy>,
    },
    /// List the known destinations
    Regions,
    /// List the month names accepted by search
    Months,
    /// Run the HTTP API
    Serve,
}

fn print_result(result: &QueryResult) {
    match result {
        QueryResult::Month(report) => {
            println!("🌟 Best Destinations for {}", report.month);
            if report.entries.is_empty() {
                println!("   No destinations recommended this month.");
            }
            for entry in &report.entries {
                println!("{}", entry.region);
                println!("   🌡️ Temperature: {}", entry.record.temperature);
                println!("   ☔ Rainfall: {}", entry.record.rainfall);
                println!("   👥 Crowds: {}", entry.record.crowd_level);
                println!("   ⭐ {}", entry.record.rating);
            }
        }
        QueryResult::Region(report) => {
            println!("Travel Information: {}", report.region);
            let best: Vec<&str> = report.best_months.iter().map(|m| m.name()).collect();
            println!("🌟 Best Months: {}", best.join(", "));
            for (month, record) in &report.records {
                println!(
                    "   {:<10} {:<10} {}",
                    month.name(),
                    record.temperature,
                    record.rating
                );
            }
        }
        QueryResult::NotFound { query, suggestions } => {
            println!("No data found for \"{query}\"");
            println!("Try searching for: {}", suggestions.join(", "));
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = TravelWeatherConfig::load_from_path(cli.config)?;
    telemetry::setup_tracing(&config.logging);

    match command {
        Command::Search { query, policy } => {
            let dataset = load_dataset(&config)?;
            let engine = SearchEngine::new(
                &dataset,
                policy.unwrap_or(config.search.month_policy),
            );
            match engine.search(&query.join(" ")) {
                Ok(result) => print_result(&result),
                Err(err @ TravelWeatherError::EmptyQuery) => bail!(err.user_message()),
                Err(err) => return Err(err.into()),
            }
        }
        Command::Regions => {
            let dataset = load_dataset(&config)?;
            for name in dataset.region_names() {
                println!("{name}");
            }
        }
        Command::Months => {
            for month in Month::ALL {
                println!("{month}");
            }
        }
        Command::Serve => {
            let state = build_state(&config)?;
            web::run(state, &config.server).await?;
        }
    }

    Ok(())
}
