//
// lib.rs
// xmldiff
//
// Library entry that re-exports modules so the binary and any external users can access CLI parsing, XML loading, tree comparison, scanning, and report writing.
//
// Thales Matheus Mendonça Santos - March 2026
//
// Public crate interface: re-export modules used by the binary and tests.
pub mod cli;
pub mod compare;
pub mod element;
pub mod report;
pub mod runner;
pub mod scanner;
pub mod utils;

pub use cli::{build_options, Args, Options};
pub use compare::compare_elements;
pub use element::{load_document, parse_document, Element, LoadError};
pub use report::{compare_pair, render_report, PairOutcome};
pub use runner::{run_compare, Counters};
pub use scanner::{scan_dir, ScanResult};
