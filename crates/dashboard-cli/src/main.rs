//! Terminal host for the stock dashboard
//!
//! # Usage
//!
//! ```bash
//! # Point at the backend (defaults to http://127.0.0.1:5000)
//! export DASHBOARD_API_BASE="http://localhost:5000"
//!
//! # Interactive
//! cargo run -p dashboard-cli
//!
//! # One shot
//! cargo run -p dashboard-cli -- --ticker aapl --analysis risk
//! ```

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dashboard_utils::{Config, LogFormat, init_tracing};
use dashboard_view::{
    AnalysisKind, Command, DashboardBackend, DashboardConfig, DashboardController, DashboardView,
    HttpBackend, RequestOutcome, TextBarChart,
};
use tracing::{debug, info};

const DEFAULT_LOG_FILTER: &str = "warn,dashboard_view=info,dashboard_cli=info";
const PROMPT: &str = "dashboard> ";

#[derive(Parser, Debug)]
#[command(name = "dashboard-cli")]
#[command(about = "Terminal stock dashboard", long_about = None)]
struct Args {
    /// Backend base URL (falls back to DASHBOARD_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// Search this ticker, render once and exit
    #[arg(short, long)]
    ticker: Option<String>,

    /// Analysis to request after a one-shot search (analyze, predict, risk)
    #[arg(short, long, requires = "ticker")]
    analysis: Option<AnalysisKind>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Leave the chart section out
    #[arg(long)]
    no_chart: bool,

    /// Log format: pretty or json (falls back to DASHBOARD_LOG_FORMAT)
    #[arg(long)]
    log_format: Option<LogFormat>,
}

fn build_config(args: &Args) -> dashboard_view::Result<DashboardConfig> {
    let mut builder = DashboardConfig::builder();
    if let Some(base) = &args.api_base {
        builder = builder.api_base(base.clone());
    }
    if let Some(secs) = args.timeout_secs {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    builder.with_env_api_base().build()
}

/// The text chart is only offered when stdout is a terminal
fn build_view(no_chart: bool) -> DashboardView {
    let view = DashboardView::new();
    if no_chart || !io::stdout().is_terminal() {
        debug!("Chart renderer unavailable");
        view
    } else {
        view.with_chart(Arc::new(TextBarChart::default()))
    }
}

async fn one_shot<B>(
    controller: &DashboardController<B>,
    view: &DashboardView,
    ticker: &str,
    analysis: Option<AnalysisKind>,
) -> anyhow::Result<()>
where
    B: DashboardBackend + ?Sized,
{
    controller.submit_ticker_search(ticker).await;
    if let Some(kind) = analysis {
        controller.request_analysis(kind).await;
    }

    let state = controller.state();
    println!("{}", view.render(&state));

    match state.error {
        Some(error) => anyhow::bail!(error),
        None => Ok(()),
    }
}

async fn run_repl<B>(controller: DashboardController<B>, view: DashboardView) -> anyhow::Result<()>
where
    B: DashboardBackend + ?Sized + 'static,
{
    println!("Stock Dashboard - type a ticker to begin, /help for commands\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{PROMPT}");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        if input.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&input) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}\n");
                continue;
            }
        };
        debug!(command = command.description(), "Running command");

        match command {
            Command::Search { ticker } => {
                controller.set_ticker(ticker.clone());
                let handle = controller.spawn_ticker_search(ticker);
                println!("Loading...");
                handle.await?;
                println!("{}\n", view.render(&controller.state()));
            }
            Command::Analysis { kind } => {
                if controller.state().data.is_some() {
                    println!("Requesting {}...", kind.label().to_lowercase());
                }
                if controller.spawn_analysis(kind).await? == RequestOutcome::Skipped {
                    println!("Load a ticker first.\n");
                } else {
                    println!("{}\n", view.render(&controller.state()));
                }
            }
            Command::Show => println!("{}\n", view.render(&controller.state())),
            Command::Help => println!("{}", Command::help_text()),
            Command::Exit => {
                println!("Goodbye!");
                break;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut host = Config::from_env()?;
    if let Some(format) = args.log_format {
        host.log_format = format;
    }
    init_tracing(DEFAULT_LOG_FILTER, host.log_format);

    let config = build_config(&args)?;
    info!(
        app = %host.app_name,
        environment = %host.environment,
        api_base = %config.api_base,
        "Starting dashboard-cli"
    );

    let controller = DashboardController::new(Arc::new(HttpBackend::new(&config)?));
    let view = build_view(args.no_chart);

    match args.ticker.as_deref() {
        Some(ticker) => one_shot(&controller, &view, ticker, args.analysis).await,
        None => run_repl(controller, view).await,
    }
}
