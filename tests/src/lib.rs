//! Integration test harness for the envcrypt workspace
//!
//! The actual tests live in `tests/`; this library target only exists so
//! the package builds on its own.
