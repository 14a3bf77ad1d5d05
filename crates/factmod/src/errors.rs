//! Error handling and exit codes.

use std::process::ExitCode;

use factmod_core::constants::exit_codes;
use factmod_core::error::FactError;

/// Exit code for an application error. Errors that do not originate from a
/// `FactError` map to `ERROR_GENERIC`.
#[must_use]
pub fn handle_error(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<FactError>()
        .map_or(exit_codes::ERROR_GENERIC, FactError::exit_code)
}

/// Convert an exit code to a process `ExitCode`.
#[must_use]
pub fn to_exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn error_codes() {
        let code = |e: FactError| handle_error(&anyhow::Error::new(e));
        assert_eq!(code(FactError::Config("bad".into())), 4);
        assert_eq!(code(FactError::ZeroModulus), 4);
        assert_eq!(code(FactError::NoResults { attempted: 2 }), 5);
        assert_eq!(
            code(FactError::Mismatch {
                distributed: 1,
                reference: 2
            }),
            3
        );
        assert_eq!(code(FactError::Thread("boom".into())), 6);
    }

    #[test]
    fn context_keeps_exit_code() {
        let err = Err::<(), _>(FactError::NoResults { attempted: 1 })
            .context("distributing work")
            .unwrap_err();
        assert_eq!(handle_error(&err), exit_codes::ERROR_NO_RESULTS);
    }

    #[test]
    fn foreign_errors_are_generic() {
        assert_eq!(handle_error(&anyhow::anyhow!("disk full")), 1);
    }
}
