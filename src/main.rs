use fifastat::config::{self, CONFIG_FILE_NAME};
use fifastat::report;
use fifastat::Database;
use std::io;
use std::process::ExitCode;
use tracing::info;

fn run() -> fifastat::Result<()> {
    let mut config = config::load_config_or_default(CONFIG_FILE_NAME)?;

    // An explicit path on the command line wins over the config file
    if let Some(db_path) = std::env::args().nth(1) {
        config.database.path = db_path.into();
    }

    info!("Using database {:?}", config.database.path);
    Database::scoped(&config.database.path, |db| {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        report::write_report(db, &config.preview, &mut out)
    })
}

fn main() -> ExitCode {
    // Initialize the logging system using tracing subscriber
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
