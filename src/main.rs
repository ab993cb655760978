//! basket-pnl: serve the live PnL dashboard, or print one summary and exit.

use std::path::PathBuf;

use anyhow::{Context, Result};
use basket_pnl::{AsyncPnlDashboard, Outcome, PnlDashboard, Report};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "basket-pnl", version, about = "Live basket PnL dashboard")]
struct Cli {
    /// Settings file (TOML). Falls back to $BASKET_PNL_CONFIG, then the
    /// user config directory, then built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the dashboard over HTTP
    Serve {
        /// Address to bind, overriding the settings file
        #[arg(long)]
        bind: Option<String>,
    },
    /// Compute the summary once and print it
    Summary {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run a read-only SQL query against the source database and print the rows as JSON
    Query { sql: String },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut builder = PnlDashboard::builder();
    if let Some(path) = &cli.config {
        builder = builder.config_file(path);
    }
    let dashboard = builder.build().context("failed to load settings")?;
    tracing::info!("{dashboard}");

    match cli.command {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| dashboard.settings().server.bind.clone());
            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime
                .block_on(basket_pnl::server::serve(AsyncPnlDashboard::new(dashboard), &addr))
                .with_context(|| format!("server on {addr} failed"))?;
        }
        Command::Summary { json } => {
            let report = dashboard.report();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::Query { sql } => {
            let (rows, notices) = dashboard.sql(&sql);
            for notice in &notices {
                eprintln!("{:?}: {}", notice.level, notice.message);
            }
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}

fn init_logging() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn print_report(report: &Report) {
    for notice in &report.notices {
        eprintln!("{:?}: {}", notice.level, notice.message);
    }

    let summary = match &report.outcome {
        Outcome::Ready { summary } => summary,
        Outcome::NoData { reason } => {
            println!("{reason}");
            return;
        }
    };

    println!("Last Updated: {}", summary.last_update);
    println!("Total PnL: {:.2}", summary.total_live);
    println!("Intraday:  {:.2}", summary.live_intra);
    println!("Daily:     {:.2}", summary.live_daily);
    println!("Paper:     {:.2}", summary.paper);

    for (title, rows) in [
        ("Intraday baskets", &summary.intra_baskets),
        ("Daily baskets", &summary.daily_baskets),
        ("Paper baskets", &summary.paper_baskets),
    ] {
        println!("\n{title}");
        if rows.is_empty() {
            println!("  (none)");
        }
        for row in rows {
            println!("  {:<24} {:>12.2}", row.name, row.pnl);
        }
    }
}
