use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use persona::client::{HttpCollaborator, MAX_COUNT};
use persona::model::Field;
use persona::output;
use persona::pipeline::SortSpec;
use persona::render::ViewKind;
use persona::session::Session;
use persona::utils::logging::{self, Verbosity};
use persona::utils::progress::Spinner;
use persona::utils::{AppConfig, get_config_path, get_log_path};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "persona")]
#[command(about = "Browse, search and export generated Israeli profiles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Generator service base URL (overrides the config file)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive browser (default)
    Tui {
        /// Profiles per generation
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=MAX_COUNT as i64))]
        count: Option<u32>,

        /// Initial view
        #[arg(long, value_enum)]
        view: Option<ViewKind>,
    },
    /// Generate profiles and print them
    Generate {
        #[command(flatten)]
        batch: Batch,

        /// Layout for plain output
        #[arg(long, value_enum)]
        view: Option<ViewKind>,

        /// Print JSON instead of a view
        #[arg(long)]
        json: bool,
    },
    /// Generate profiles and save them as a spreadsheet
    Export {
        #[command(flatten)]
        batch: Batch,

        /// Output file (defaults to the service's file name in the export directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show or create the config file
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Options shared by the batch commands
#[derive(Args)]
struct Batch {
    /// Number of profiles to generate
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=MAX_COUNT as i64))]
    count: Option<u32>,

    /// Fields to leave out (repeatable)
    #[arg(long, value_enum)]
    hide: Vec<Field>,

    /// Keep only profiles matching this search
    #[arg(long)]
    query: Option<String>,

    /// Sort by this column
    #[arg(long, value_enum)]
    sort: Option<Field>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);
    let config = AppConfig::load()?;
    let backend_url = cli.backend.unwrap_or_else(|| config.backend_url.clone());

    match cli.command {
        Some(Commands::Generate { batch, view, json }) => {
            logging::init_stderr(verbosity);
            let mut session = run_batch(&config, &backend_url, &batch)?;
            if json {
                output::print_json(&session.displayed())?;
            } else {
                session.set_view(view.unwrap_or(config.default_view));
                let presentation = session.present();
                output::print_presentation(&presentation, std::io::stdout().is_terminal())?;
            }
        }
        Some(Commands::Export { batch, out }) => {
            logging::init_stderr(verbosity);
            export(&config, &backend_url, &batch, out)?;
        }
        Some(Commands::Config { init }) => {
            logging::init_stderr(verbosity);
            show_config(&config, init)?;
        }
        Some(Commands::Tui { count, view }) => {
            run_tui(&config, &backend_url, verbosity, count, view)?;
        }
        None => {
            run_tui(&config, &backend_url, verbosity, None, None)?;
        }
    }

    Ok(())
}

fn connect(config: &AppConfig, backend_url: &str) -> Result<HttpCollaborator> {
    debug!(backend = backend_url, "connecting to generator service");
    HttpCollaborator::new(backend_url, config.request_timeout())
        .with_context(|| format!("Failed to create HTTP client for {backend_url}"))
}

/// Build a session from the batch options and fill it with one generation
fn run_batch(config: &AppConfig, backend_url: &str, batch: &Batch) -> Result<Session> {
    if let Some(field) = batch.sort
        && !Field::COLUMNS.contains(&field)
    {
        bail!("Cannot sort by {field}");
    }

    let visibility = config.visibility.without(&batch.hide);
    let count = batch.count.unwrap_or_else(|| config.effective_count());
    let mut session = Session::new(count, visibility, config.default_view);

    let backend = connect(config, backend_url)?;
    let spinner = Spinner::start(&format!("Generating {count} profiles..."));
    match session.generate(&backend) {
        Ok(received) => spinner.finish(&format!("{received} profiles generated")),
        Err(e) => {
            spinner.clear();
            error!("{e}");
            bail!(e.user_message());
        }
    }

    if let Some(query) = &batch.query {
        session.set_query(query);
    }
    if let Some(field) = batch.sort {
        let spec = if batch.desc {
            SortSpec::descending(field)
        } else {
            SortSpec::ascending(field)
        };
        session.set_sort(Some(spec));
    }
    Ok(session)
}

fn export(config: &AppConfig, backend_url: &str, batch: &Batch, out: Option<PathBuf>) -> Result<()> {
    let mut session = run_batch(config, backend_url, batch)?;
    let backend = connect(config, backend_url)?;

    let spinner = Spinner::start(&format!("Exporting {} profiles...", session.displayed_len()));
    let file = match session.export(&backend) {
        Ok(file) => {
            spinner.clear();
            file
        }
        Err(e) => {
            spinner.clear();
            error!("{e}");
            bail!(e.user_message());
        }
    };

    let path = out.unwrap_or_else(|| config.export_dir().join(&file.file_name));
    std::fs::write(&path, &file.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Saved {}", path.display());
    Ok(())
}

fn show_config(config: &AppConfig, init: bool) -> Result<()> {
    let path = get_config_path()?;
    if init {
        if path.exists() {
            println!("Config already exists: {}", path.display());
        } else {
            let written = config.save()?;
            println!("Wrote default config: {}", written.display());
        }
        return Ok(());
    }

    println!("Config file: {}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

#[cfg(feature = "interactive")]
fn run_tui(
    config: &AppConfig,
    backend_url: &str,
    verbosity: Verbosity,
    count: Option<u32>,
    view: Option<ViewKind>,
) -> Result<()> {
    use persona::feedback::SystemClipboard;
    use persona::tui::{self, App};
    use std::sync::Arc;

    // The TUI owns the terminal, so logs go to a file
    logging::init_file(verbosity, &get_log_path()?)?;

    let session = Session::new(
        count.unwrap_or_else(|| config.effective_count()),
        config.visibility,
        view.unwrap_or(config.default_view),
    );
    let backend = connect(config, backend_url)?;
    let app = App::new(
        session,
        Arc::new(backend),
        Box::new(SystemClipboard::new()),
        config.export_dir(),
    );
    tui::run(app)
}

#[cfg(not(feature = "interactive"))]
fn run_tui(
    _config: &AppConfig,
    _backend_url: &str,
    _verbosity: Verbosity,
    _count: Option<u32>,
    _view: Option<ViewKind>,
) -> Result<()> {
    bail!("Interactive mode is not available in this build; use `generate` or `export`")
}
