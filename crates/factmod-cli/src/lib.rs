//! # factmod-cli
//!
//! Terminal output for the distribution client: result presenter,
//! formatting helpers and styled status lines.

pub mod output;
pub mod presenter;
pub mod ui;

pub use presenter::CLIResultPresenter;
