//
// main.rs
// xmldiff
//
// Binary entry: validates the input directories, creates the timestamped
// results directory, runs the comparison, and prints the summary.
//
// Thales Matheus Mendonça Santos - March 2026
//
use std::fs;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use xmldiff::cli::{build_options, Args};
use xmldiff::runner::run_compare;
use xmldiff::utils::results_dir_name;

fn main() -> Result<()> {
    let args = Args::parse();

    let root1 = args
        .input1_dir
        .canonicalize()
        .context("Invalid input1_dir")?;
    let root2 = args
        .input2_dir
        .canonicalize()
        .context("Invalid input2_dir")?;

    if root1 == root2 {
        anyhow::bail!("input1_dir and input2_dir cannot be the same directory.");
    }

    if args.output_dir.exists() {
        let out_abs = args.output_dir.canonicalize()?;
        if out_abs.starts_with(&root1) || out_abs.starts_with(&root2) {
            anyhow::bail!("output_dir cannot be inside input1_dir or input2_dir.");
        }
    }

    let opts = build_options(&args)?;

    let out_root = args.output_dir.join(results_dir_name(Local::now()));
    fs::create_dir_all(&out_root)
        .with_context(|| format!("Cannot create results directory {out_root:?}"))?;

    let counters = run_compare(&root1, &root2, &out_root, &opts)?;

    println!("\n== xmldiff: Summary ==");
    println!("Identical:            {}", counters.identical);
    println!("With differences:     {}", counters.differing);
    println!("Parse errors:         {}", counters.parse_errors);
    println!("Missing files:        {}", counters.missing);
    println!("Other errors:         {}", counters.failed);
    println!("Reports at:           {out_root:?}");

    Ok(())
}
