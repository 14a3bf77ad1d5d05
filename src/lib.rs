//! Workspace-level integration tests for factmod. See `tests/`.
