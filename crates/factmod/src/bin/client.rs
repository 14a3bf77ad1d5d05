//! factmod-client: distributes k! mod m across worker servers.

use std::process::ExitCode;

use tracing::Level;

use factmod_cli::presenter::CLIResultPresenter;
use factmod_lib::{app, config, errors};
use factmod_orchestration::interfaces::ResultPresenter;

fn main() -> ExitCode {
    let config = config::ClientConfig::parse();
    app::init_tracing(Level::WARN, config.verbose);

    let presenter = CLIResultPresenter::new(config.verbose, config.quiet || config.json);
    match app::run_client(&config, &presenter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            presenter.present_error(&format!("{e:#}"));
            errors::to_exit_code(errors::handle_error(&e))
        }
    }
}
