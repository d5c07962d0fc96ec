//! Scenario tests live under `tests/`; this crate exports nothing.
