use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use epicurve_dashboard::{
    analysis::{Analyzer, CurveModel},
    io,
    models::{CaseSeries, FeedRecord, Metric},
    visualization::{print_fit_summary, print_forecast_table, print_projection_chart},
};

#[derive(Parser)]
#[command(
    name = "epicurve",
    about = "Epidemic curve dashboard - growth-curve fitting and forecasting for COVID-19 case counts",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a feed snapshot to a local JSON file
    Fetch {
        /// Feed URL (defaults to the DPC national feed)
        #[arg(short, long)]
        url: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Display a quick summary of the series in a feed snapshot
    Summary {
        /// Path to a feed snapshot (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Metric to summarize
        #[arg(short, long, default_value = "total-cases")]
        metric: String,

        /// Region name (regional feeds only)
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Fit a growth curve to a training window and print the forecast
    Forecast {
        /// Path to a feed snapshot (JSON); fetched from the feed URL if omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Metric to fit
        #[arg(short, long, default_value = "total-cases")]
        metric: String,

        /// Region name (regional feeds only)
        #[arg(short, long)]
        region: Option<String>,

        /// Training window in days; defaults to the full observed series
        #[arg(short, long)]
        window: Option<usize>,

        /// Curve model: exponential, logistic, sigmoid, or auto
        #[arg(short = 'M', long, default_value = "auto")]
        model: String,

        /// Days to project past the last observed day
        #[arg(short = 'H', long, default_value = "30")]
        horizon: usize,

        /// Print the full day-by-day forecast table
        #[arg(long)]
        table: bool,
    },

    /// Start the dashboard web server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Path to a feed snapshot (JSON); fetched from the feed URL if omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Feed URL (defaults to the DPC national feed)
        #[arg(short, long)]
        url: Option<String>,
    },
}

fn load_records(input: Option<&PathBuf>, url: Option<&str>) -> Result<Vec<FeedRecord>> {
    match input {
        Some(path) => Ok(io::read_feed_file(path)?),
        None => Ok(io::fetch_feed(url.unwrap_or(io::DEFAULT_FEED_URL))?),
    }
}

fn print_series_summary(series: &CaseSeries) {
    println!("\n{}", "Series Summary".bold().cyan());
    println!("{}", "=".repeat(40));
    println!("  Name:        {}", series.name);
    println!("  First day:   {}", series.first_date);
    println!("  Days:        {}", series.day_count());
    println!("  Latest:      {:.0}", series.values.last().copied().unwrap_or(0.0));
    println!("  Maximum:     {:.0}", series.max_value());
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { url, output, pretty } => {
            let records = io::fetch_feed(url.as_deref().unwrap_or(io::DEFAULT_FEED_URL))?;
            io::write_feed_file(&records, &output, pretty)?;
            println!(
                "{} Saved {} daily reports to {}",
                "Success:".green().bold(),
                records.len(),
                output.display()
            );
        }

        Commands::Summary {
            input,
            metric,
            region,
        } => {
            let records = io::read_feed_file(&input)?;
            let metric: Metric = metric.parse()?;
            let series = io::series_from_records(&records, metric, region.as_deref())?;
            print_series_summary(&series);
        }

        Commands::Forecast {
            input,
            metric,
            region,
            window,
            model,
            horizon,
            table,
        } => {
            let records = load_records(input.as_ref(), None)?;
            let metric: Metric = metric.parse()?;
            let series = io::series_from_records(&records, metric, region.as_deref())?;
            let window = window.unwrap_or_else(|| series.day_count());

            let analyzer = Analyzer::new(&series);
            let outcome = match model.to_lowercase().as_str() {
                "exponential" | "exp" => analyzer.fit(CurveModel::Exponential, window, horizon),
                "logistic" | "log" => analyzer.fit(CurveModel::Logistic, window, horizon),
                "sigmoid" | "sig" => analyzer.fit(CurveModel::Sigmoid, window, horizon),
                "auto" => analyzer.fit_preferred(window, horizon),
                _ => anyhow::bail!(
                    "Unknown model: {model}. Use: exponential, logistic, sigmoid, or auto"
                ),
            }?;

            println!(
                "\n{}",
                format!(
                    "Forecast: {} days observed, {window}-day window, {horizon}-day horizon",
                    series.day_count()
                )
                .bold()
                .cyan()
            );
            print_fit_summary(&outcome);
            print_projection_chart(&series, &outcome, window);
            if table {
                print_forecast_table(&series, &outcome);
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, input, url } => {
            let records = load_records(input.as_ref(), url.as_deref())?;
            let mut series = Vec::new();
            for metric in Metric::ALL {
                series.push(io::series_from_records(&records, metric, None)?);
            }
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(epicurve_dashboard::web::start_server(port, series))?;
        }
    }

    Ok(())
}
