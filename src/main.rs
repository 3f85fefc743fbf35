//! wqi - command line front end for the Dongcheon water-quality forecast.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use wqi_forecast::config::{resolve_selection, Config, TrendSettings};
use wqi_forecast::logging::{self, Component, LogLevel};
use wqi_forecast::report::{self, OutputFormat};
use wqi_forecast::{forecast_for_selection, Regressor, WqiError};

#[derive(Parser)]
#[command(
    name = "wqi",
    version,
    about = "Dongcheon river water-quality forecast"
)]
struct Cli {
    /// TOML configuration file (defaults to $WQI_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict and grade water quality for one month
    Predict {
        /// Date to forecast, YYYY-MM-DD (day is ignored)
        #[arg(long)]
        date: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Predicted values for one month across a range of years
    Trend {
        #[arg(long)]
        from: Option<i32>,

        #[arg(long)]
        to: Option<i32>,

        #[arg(long)]
        month: Option<u32>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the station observations and fitted trend lines
    Observations,
}

fn run(cli: Cli) -> Result<(), WqiError> {
    let level_override = cli.verbose.then_some(LogLevel::Debug);
    let config = Config::load(cli.config.as_deref(), level_override)?;

    logging::init_logger(
        config.logging.level()?,
        config.logging.file.as_deref(),
        config.logging.timestamps,
    );

    let regressor = Regressor::from_station_data()?;
    logging::debug(Component::System, None, "trend models fitted");

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Predict { date, format } => {
            let selection = resolve_selection(date.as_deref(), config.default_date()?)?;
            if let Some(forecast) = forecast_for_selection(&regressor, selection, &config.trend) {
                logging::info(
                    Component::Scorer,
                    Some(&forecast.date.to_string()),
                    &format!("WQI {} ({})", forecast.wqi.value, forecast.wqi_grade.index_label()),
                );
                let rendered = match format {
                    OutputFormat::Text => report::render_text(&forecast),
                    OutputFormat::Json => report::render_json(&forecast)?,
                };
                report::write_output(&mut stdout, &rendered)?;
            }
        }
        Command::Trend { from, to, month, format } => {
            let trend = TrendSettings {
                start_year: from.unwrap_or(config.trend.start_year),
                end_year: to.unwrap_or(config.trend.end_year),
                month: month.unwrap_or(config.trend.month),
            };
            trend.validate()?;
            let points = regressor.trend(trend.years(), trend.month);
            let rendered = match format {
                OutputFormat::Text => report::render_trend_text(&points, trend.month),
                OutputFormat::Json => report::render_trend_json(&points)?,
            };
            report::write_output(&mut stdout, &rendered)?;
        }
        Command::Observations => {
            report::write_output(&mut stdout, &report::render_observations(&regressor))?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Config loading may have failed before the logger was set up.
            logging::ensure_logger(LogLevel::Error);
            logging::log_failure("wqi", &e);
            ExitCode::FAILURE
        }
    }
}
