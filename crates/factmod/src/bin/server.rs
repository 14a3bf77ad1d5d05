//! factmod-server: worker that computes modular range products.

use std::process::ExitCode;

use tracing::Level;

use factmod_cli::ui;
use factmod_lib::{app, config, errors};

fn main() -> ExitCode {
    let config = config::ServerConfig::parse();
    app::init_tracing(Level::INFO, config.verbose);

    match app::run_server(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::print_error(&format!("{e:#}"));
            errors::to_exit_code(errors::handle_error(&e))
        }
    }
}
