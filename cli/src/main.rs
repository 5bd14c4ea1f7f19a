//! CLI entrypoint for uniapp
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uniapp_application::{ApplicantService, AuditLogger, ProgramService, QuestionService};
use uniapp_infrastructure::{
    ConfigLoader, Database, FileConfig, JsonlAuditLogger, SqliteApplicantRepository,
    SqliteProgramRepository, SqliteQuestionRepository,
};
use uniapp_server::{AppState, build_router, serve};

#[derive(Parser)]
#[command(name = "uniapp", version, about = "Universal benefits-application platform")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Explicit config file (highest priority)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip config files and use built-in defaults
        #[arg(long)]
        no_config: bool,

        /// Override the bind address
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port
        #[arg(long)]
        port: Option<u16>,

        /// Override the database file path
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Create or migrate the database, then exit
    Migrate {
        /// Explicit config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the database file path
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Show which config files are in use
    ConfigSources,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            no_config,
            host,
            port,
            database,
        } => {
            let mut file_config = load_config(config.as_ref(), no_config)?;
            if let Some(host) = host {
                file_config.server.host = host;
            }
            if let Some(port) = port {
                file_config.server.port = port;
            }
            if let Some(database) = database {
                file_config.database.path = database.display().to_string();
            }
            if let Err(e) = file_config.validate() {
                bail!("Invalid configuration: {}", e);
            }

            init_logging(cli.verbose, &file_config);
            info!("Starting uniapp");
            run_server(file_config).await
        }

        Commands::Migrate { config, database } => {
            let mut file_config = load_config(config.as_ref(), false)?;
            if let Some(database) = database {
                file_config.database.path = database.display().to_string();
            }

            init_logging(cli.verbose, &file_config);
            let path = PathBuf::from(&file_config.database.path);
            Database::open(&path)
                .with_context(|| format!("Could not open database at {}", path.display()))?;
            println!("Database migrated: {}", path.display());
            Ok(())
        }

        Commands::ConfigSources => {
            ConfigLoader::print_config_sources();
            Ok(())
        }
    }
}

fn load_config(path: Option<&PathBuf>, no_config: bool) -> Result<FileConfig> {
    if no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(path).context("Could not load configuration")
}

/// Initialize logging: verbosity flags win over the configured level.
fn init_logging(verbose: u8, config: &FileConfig) {
    let filter = match verbose {
        0 => EnvFilter::new(config.logging.level.clone()),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run_server(config: FileConfig) -> Result<()> {
    // === Dependency Injection ===
    // Open the database and build the repository adapters
    let db_path = PathBuf::from(&config.database.path);
    let db = Database::open(&db_path)
        .with_context(|| format!("Could not open database at {}", db_path.display()))?;
    let applicants = Arc::new(SqliteApplicantRepository::new(&db));
    let programs = Arc::new(SqliteProgramRepository::new(&db));
    let questions = Arc::new(SqliteQuestionRepository::new(&db));

    // Optional JSONL audit trail
    let audit: Option<Arc<dyn AuditLogger>> = config
        .logging
        .audit_log
        .as_ref()
        .and_then(|path| JsonlAuditLogger::new(path))
        .map(|logger| {
            info!("Audit log: {}", logger.path().display());
            Arc::new(logger) as Arc<dyn AuditLogger>
        });

    // Build the services, attaching the audit logger when configured
    let mut applicant_service = ApplicantService::new(applicants, programs.clone());
    let mut program_service = ProgramService::new(programs);
    let mut question_service = QuestionService::new(questions);
    if let Some(audit) = audit {
        applicant_service = applicant_service.with_audit_logger(audit.clone());
        program_service = program_service.with_audit_logger(audit.clone());
        question_service = question_service.with_audit_logger(audit);
    }

    let state = AppState::new(
        Arc::new(applicant_service),
        Arc::new(program_service),
        Arc::new(question_service),
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    serve(addr, build_router(state))
        .await
        .context("Server error")
}
