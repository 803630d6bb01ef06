//! nwtunnel command-line layer
//!
//! Reads tunnel-system descriptions from JSON files, hands them to the
//! `nwtunnel_core` engine and renders the outcome for a terminal or for
//! other programs.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod driver;
pub mod loader;
pub mod report;

pub use self::driver::{run, Cli};
pub use self::loader::{load_graph, parse_graph, LoadError};
pub use self::report::{
    render_no_path, render_success, OutputFormat, EXIT_LOAD_FAILURE, EXIT_NO_PATH, EXIT_SUCCESS,
};
