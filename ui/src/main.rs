use barberbook::app::application_lifecycle::ApplicationLifecycle;
use barberbook::app::model::ModelOptions;
use barberbook::app::router::Route;
use barberbook::config::{self, ConfigLoadResult};
use barberbook::logger::setup_logger;
use barberbook::theme::ThemeManager;
use chrono::NaiveDate;
use clap::Parser;
use std::error::Error as StdError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "barberbook")]
#[command(about = "Book your next haircut from the terminal")]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Page to open first, e.g. /servicos or /agendamento
    #[arg(short, long, default_value = "/")]
    route: String,

    /// Booking date to start from (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Keep the session and booking history in memory only
    #[arg(long)]
    ephemeral: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn StdError>> {
    let args = Args::parse();

    match config::init_config(args.config.clone()) {
        ConfigLoadResult::Success(_) => {}
        ConfigLoadResult::LoadError(e) | ConfigLoadResult::DeserializeError(e) => {
            eprintln!("Failed to load {}: {e}", args.config.display());
            return Err(e.clone().into());
        }
    }

    setup_logger()?;
    ThemeManager::init_global(config::get_config_or_panic().theme())?;

    let options = ModelOptions {
        route: Route::from_path(&args.route),
        date: args.date,
        ephemeral: args.ephemeral,
    };

    let mut model = ApplicationLifecycle::initialize(options)?;
    ApplicationLifecycle::setup_terminal(&mut model)?;

    let result = ApplicationLifecycle::run_application_loop(&mut model);
    ApplicationLifecycle::shutdown_application(model)?;
    result
}
