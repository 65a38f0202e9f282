//! valutakurs CLI - NOK exchange rates from Norges Bank
//!
//! ## Example Usage
//!
//! ```bash
//! # Monthly USD and EUR against NOK
//! valutakurs fetch -c USD -c EUR -f M --start 2020-01-01 --end 2023-12-31
//!
//! # Extract a saved response as CSV
//! valutakurs parse response.json -c SEK -f A --format csv
//!
//! # Search the currency list
//! valutakurs currencies kroner
//!
//! # Show the series key table
//! valutakurs keys
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use valutakurs::chart::{write_csv, ChartData};
use valutakurs::config::EngineConfig;
use valutakurs::currency::{CurrencyCatalog, CurrencyCode};
use valutakurs::data::frequency::Frequency;
use valutakurs::data::sources::NorgesBankSource;
use valutakurs::engine::ExtractionEngine;
use valutakurs::request::{parse_date, RateRequest};
use valutakurs::sdmx::AlignedDataset;

/// valutakurs: historical exchange rates against NOK
#[derive(Parser)]
#[command(name = "valutakurs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Historical exchange rates against NOK from Norges Bank", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch rates from the API
    Fetch {
        #[command(flatten)]
        query: QueryArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Extract a saved SDMX-JSON response
    Parse {
        /// Path to the response body
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        query: QueryArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// List or search the available currencies
    Currencies {
        /// Case-insensitive search text
        #[arg(value_name = "QUERY")]
        query: Option<String>,
    },

    /// Show the series key for each currency and frequency
    Keys,
}

#[derive(clap::Args)]
struct QueryArgs {
    /// Currency code, repeat for several series
    #[arg(short = 'c', long = "currency", default_value = "USD")]
    currencies: Vec<String>,

    /// Frequency: A (annual), M (monthly), B (daily)
    #[arg(short = 'f', long, default_value = "A")]
    frequency: String,

    /// Start date (YYYY-MM-DD)
    #[arg(short = 's', long, default_value = "1994-04-15")]
    start: String,

    /// End date (YYYY-MM-DD)
    #[arg(short = 'e', long, default_value = "2024-04-15")]
    end: String,
}

impl QueryArgs {
    fn to_request(&self) -> Result<RateRequest> {
        let currencies = self
            .currencies
            .iter()
            .flat_map(|arg| arg.split(['+', ',']))
            .filter(|code| !code.trim().is_empty())
            .map(CurrencyCode::new)
            .collect::<valutakurs::error::Result<Vec<_>>>()?;

        Ok(RateRequest::new(
            currencies,
            Frequency::from_code(&self.frequency)?,
            parse_date(&self.start)?,
            parse_date(&self.end)?,
        )?)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("valutakurs").join("config.toml"))
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config_path = cli.config.clone().or_else(default_config_path);
    let config = match EngineConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    if cli.verbose {
        println!(
            "{} v{}",
            "valutakurs".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!("API: {}", config.api.base_url.dimmed());
    }

    let result = match cli.command {
        Commands::Fetch {
            query,
            format,
            output,
        } => fetch(&config, &query, format, output.as_deref()),
        Commands::Parse {
            file,
            query,
            format,
            output,
        } => parse_file(&config, &file, &query, format, output.as_deref()),
        Commands::Currencies { query } => {
            list_currencies(query.as_deref());
            Ok(())
        }
        Commands::Keys => show_keys(&config),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn fetch(
    config: &EngineConfig,
    query: &QueryArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let request = query.to_request()?;
    let engine = ExtractionEngine::from_config(config)?;
    let source = NorgesBankSource::new(&config.api)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("invalid spinner template")?,
    );
    pb.set_message(format!("Fetching {}", request.series_path()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let result = runtime.block_on(source.fetch_dataset(&request, &engine));
    pb.finish_and_clear();

    let dataset = result.context("Error fetching data")?;
    emit(config, &dataset, format, output)
}

fn parse_file(
    config: &EngineConfig,
    file: &Path,
    query: &QueryArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let request = query.to_request()?;
    let engine = ExtractionEngine::from_config(config)?;
    let body = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let dataset = engine.extract_str(&body, &request)?;
    emit(config, &dataset, format, output)
}

fn emit(
    config: &EngineConfig,
    dataset: &AlignedDataset,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        OutputFormat::Json => {
            let chart = ChartData::from_dataset(dataset, &config.scale);
            writeln!(writer, "{}", chart.to_json()?)?;
        }
        OutputFormat::Csv => write_csv(dataset, &mut writer)?,
        OutputFormat::Table => print_table(dataset, &mut writer)?,
    }

    if let Some(path) = output {
        println!("{} {}", "Wrote".green().bold(), path.display());
    }
    Ok(())
}

fn print_table(dataset: &AlignedDataset, writer: &mut dyn Write) -> io::Result<()> {
    write!(writer, "{:<12}", "Period".bold())?;
    for currency in dataset.currencies() {
        write!(writer, "{:>12}", currency.as_str().bold())?;
    }
    writeln!(writer)?;

    for (i, period) in dataset.axis().iter().enumerate() {
        write!(writer, "{:<12}", period)?;
        for series in dataset.series() {
            match series.observations[i].rate() {
                Some(value) => write!(writer, "{:>12.4}", value)?,
                None => write!(writer, "{:>12}", "-".dimmed())?,
            }
        }
        writeln!(writer)?;
    }

    writeln!(writer)?;
    for series in dataset.series() {
        let missing = series.len() - series.present_count();
        if missing > 0 {
            writeln!(
                writer,
                "{} {} has {} of {} periods without a value",
                "Note:".yellow(),
                series.currency,
                missing,
                series.len()
            )?;
        }
    }
    Ok(())
}

fn list_currencies(query: Option<&str>) {
    let entries: Vec<_> = match query {
        Some(text) => CurrencyCatalog::search(text),
        None => CurrencyCatalog::all().iter().collect(),
    };

    if entries.is_empty() {
        println!("{}", "No matching currencies".yellow());
        return;
    }

    for info in entries {
        println!("  {}  {}", info.code.cyan().bold(), info.name);
    }
}

fn show_keys(config: &EngineConfig) -> Result<()> {
    let table = config.key_table()?;

    println!("{}", "Series Keys".cyan().bold());
    println!("{}", "===========".cyan());
    for frequency in Frequency::ALL {
        println!();
        println!("  {} ({})", frequency.as_str().bold(), frequency.code());
        for currency in table.order(frequency)? {
            let key = table.key_for(frequency, currency)?;
            println!("    {}  {}", currency, key.as_str().dimmed());
        }
    }
    println!();
    println!(
        "{}",
        "A single requested currency is always series 0:0:0:0".dimmed()
    );
    Ok(())
}
