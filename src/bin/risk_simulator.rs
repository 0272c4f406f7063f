//! Risk Simulator CLI
//!
//! Command-line front end for the risk simulator backend:
//! - Sign up / sign in with a tracked ticker
//! - Ticker processing (risk extraction)
//! - Risk catalog listing and Monte Carlo simulation per selected risk
//!
//! Run with: cargo run --bin risk_simulator -- --help

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use risk_simulator::{
    flows::{self, Route},
    logging::{init_logging, LogFormat},
    render, ApiClient, AppConfig, ExecutionMode, HttpClient, Notice, Notifier, RiskBackend,
    RiskCatalog, SelectionSet, SessionStore, SignInRequest, SignUpRequest,
    SimulationOrchestrator,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser)]
#[command(name = "risk_simulator")]
#[command(version, about = "Ticker risk extraction and Monte Carlo loss simulation", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "risk_simulator.toml")]
    config: String,

    /// Override backend base URL
    #[arg(long, env = "RISK_SIMULATOR_URL")]
    base_url: Option<String>,

    /// Override session file path
    #[arg(long)]
    session: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output format (pretty, json, compact)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Log file path (JSON, in addition to stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sample config file
    GenerateConfig {
        /// Output file path
        #[arg(short, long, default_value = "risk_simulator.toml")]
        output: String,
    },
    /// Register a user with a tracked ticker
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long, env = "RISK_SIMULATOR_PASSWORD")]
        password: String,
        #[arg(long)]
        ticker: String,
    },
    /// Sign in and store the user's ticker in the session
    Signin {
        #[arg(long)]
        username: String,
        #[arg(long, env = "RISK_SIMULATOR_PASSWORD")]
        password: String,
    },
    /// Run risk extraction for the session's ticker
    Process,
    /// List the selectable risk catalog
    Risks,
    /// Simulate selected risks
    Simulate {
        /// Risk to simulate (repeatable, processed in the given order)
        #[arg(short, long = "risk")]
        risks: Vec<String>,

        /// Simulate every risk in the catalog
        #[arg(long, conflicts_with = "risks")]
        all: bool,

        /// Directory to write distribution charts to
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Issue up to N requests at once instead of one at a time
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Forget the signed-in ticker and extracted risks
    Logout,
}

// ============================================================================
// Notifications
// ============================================================================

/// Prints every notice to stderr as it happens.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        warn!(notice = %notice, "User notice");
        eprintln!("! {notice}");
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::GenerateConfig { output } = &cli.command {
        return generate_sample_config(output);
    }

    let mut config = AppConfig::load(Path::new(&cli.config))?;
    apply_overrides(&mut config, &cli);
    let _log_guard = init_logging(&config.logging)?;

    info!(
        base_url = %config.network.base_url,
        session = %config.session.path.display(),
        "Risk simulator starting"
    );

    let client = HttpClient::build_client(config.network.timeout())?;
    let api = ApiClient::new(Some(client), Some(config.network.base_url()))
        .with_paths(config.network.paths.clone())
        .with_max_retries(config.network.max_retries);
    let backend: Arc<dyn RiskBackend> = Arc::new(api);
    let store = SessionStore::new(&config.session.path);
    let notifier = ConsoleNotifier;

    match cli.command {
        Commands::GenerateConfig { .. } => {}
        Commands::Signup {
            username,
            password,
            ticker,
        } => {
            let form = SignUpRequest {
                username,
                password,
                ticker,
            };
            let next = flows::register(backend.as_ref(), &notifier, &form).await?;
            println!("Registered {}. Next: {}", form.username, describe(next));
        }
        Commands::Signin { username, password } => {
            let mut session = store.load()?;
            let form = SignInRequest { username, password };
            let next = flows::sign_in(backend.as_ref(), &notifier, &mut session, &form).await?;
            store.save(&session)?;
            println!(
                "Signed in, tracking {}. Next: {}",
                session.ticker().unwrap_or("-"),
                describe(next)
            );
        }
        Commands::Process => {
            let mut session = store.load()?;
            println!("Processing your ticker... please wait");
            let next = flows::prepare_risks(backend.as_ref(), &notifier, &mut session).await?;
            if next == Route::Simulate {
                store.save(&session)?;
                println!("Extracted {} risks:", session.risks().len());
                for risk in session.risks() {
                    println!("  - {risk}");
                }
            }
            println!("Next: {}", describe(next));
        }
        Commands::Risks => {
            let session = store.load()?;
            let mut catalog = RiskCatalog::new();
            catalog.activate(backend.as_ref(), &notifier).await;
            if catalog.has_failed() {
                return Err("risk catalog unavailable".into());
            }
            println!("Select Risks to Simulate:");
            for risk in catalog.risks() {
                println!("  [ ] {}", risk.name());
            }
            if let Some(ticker) = session.ticker() {
                println!(
                    "\n{} risks extracted for {ticker} in this session",
                    session.risks().len()
                );
            }
        }
        Commands::Simulate {
            risks,
            all,
            out_dir,
            concurrency,
        } => {
            let session = store.load()?;
            if flows::simulator_route(&session) != Route::Simulate {
                notifier.notify(Notice::validation(
                    risk_simulator::Error::MissingTicker.to_string(),
                ));
                println!("Next: {}", describe(Route::SignIn));
                return Err(risk_simulator::Error::MissingTicker.into());
            }

            let mut catalog = RiskCatalog::new();
            catalog.activate(backend.as_ref(), &notifier).await;

            let mut selection = SelectionSet::new();
            if all {
                for risk in catalog.risks() {
                    selection.select(risk.name());
                }
            } else {
                for name in &risks {
                    if catalog.contains(name) {
                        selection.select(name);
                    } else {
                        notifier.notify(Notice::validation(format!(
                            "Unknown risk \"{name}\", not in the catalog"
                        )));
                    }
                }
            }

            let mode = match concurrency {
                Some(n) if n > 1 => ExecutionMode::Concurrent { max_in_flight: n },
                Some(_) => ExecutionMode::Sequential,
                None => config.simulation.execution_mode(),
            };
            let orchestrator = SimulationOrchestrator::new(backend.clone())
                .with_params(config.simulation.params())
                .with_mode(mode);

            println!("Simulating...");
            let report = orchestrator.run(&selection, &notifier).await?;

            println!(
                "\nMonte Carlo Risk Simulator ({} of {} succeeded)",
                report.results.len(),
                report.attempted()
            );
            for (index, result) in report.results.iter().enumerate() {
                println!("\n{}", render::result_card(result));
                if !result.is_consistent() {
                    warn!(risk = %result.risk, "Result violates min <= avg <= max");
                }
                if let Some(dir) = &out_dir {
                    match render::write_graph(result, index, dir) {
                        Ok(path) => println!("  Chart: {}", path.display()),
                        Err(err) => {
                            eprintln!("! Chart for \"{}\" not written: {err}", result.risk)
                        }
                    }
                }
            }
        }
        Commands::Logout => {
            store.clear()?;
            println!("Session cleared. Next: {}", describe(Route::SignIn));
        }
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(url) = &cli.base_url {
        config.network.base_url = url.clone();
    }
    if let Some(path) = &cli.session {
        config.session.path = path.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if let Some(file) = &cli.log_file {
        config.logging.log_file = Some(file.clone());
    }
}

fn describe(route: Route) -> &'static str {
    match route {
        Route::SignUp => "sign up (risk_simulator signup)",
        Route::SignIn => "sign in (risk_simulator signin)",
        Route::Loading => "process ticker (risk_simulator process)",
        Route::Simulate => "simulate (risk_simulator risks / simulate)",
    }
}

fn generate_sample_config(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let sample = AppConfig::default();
    let content = sample.to_toml()?;

    let with_comments = format!(
        r#"# Risk Simulator Configuration
# See: cargo run --bin risk_simulator -- --help
#
# [network]      backend URL, optional timeout_secs, max_retries on 502/503/504
# [simulation]   mean/stddev/simulations sent with every request;
#                mode = "sequential" | "concurrent" (bounded by max_in_flight)
# [session]      where the signed-in ticker and extracted risks are kept
# [logging]      level, format (pretty | json | compact), optional log_file

{content}"#
    );

    std::fs::write(path, with_comments)?;
    println!("Sample config written to: {path}");
    Ok(())
}
