use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::Options;
use crate::element::LoadError;
use crate::report::{compare_pair, PairOutcome};
use crate::scanner::scan_dir;
use crate::utils::avoid_collision;

#[derive(Default, Debug)]
pub struct Counters {
    pub identical: usize,
    pub differing: usize,
    pub parse_errors: usize,
    pub missing: usize,
    pub failed: usize,
}

pub fn run_compare(
    root1: &Path,
    root2: &Path,
    out_root: &Path,
    opts: &Options,
) -> Result<Counters> {
    let scan1 = scan_dir(root1, &opts.extension, &opts.ignore_patterns);
    let scan2 = scan_dir(root2, &opts.extension, &opts.ignore_patterns);

    let mut counters = Counters::default();

    let mut common: Vec<&PathBuf> = scan1
        .files
        .keys()
        .filter(|k| scan2.files.contains_key(*k))
        .collect();
    common.sort();

    if common.is_empty() {
        println!(
            "⚠️ No matching .{} filenames found in both input directories.",
            opts.extension
        );
        return Ok(counters);
    }

    for rel in common {
        let file1 = &scan1.files[rel];
        let file2 = &scan2.files[rel];

        let mut report_path = out_root.join(rel);
        report_path.set_extension("txt");
        let report_path = avoid_collision(&report_path);

        println!("\n🔍 Comparing: {}", rel.display());
        match compare_pair(file1, file2, &report_path)? {
            PairOutcome::Compared(diffs) if diffs.is_empty() => counters.identical += 1,
            PairOutcome::Compared(_) => counters.differing += 1,
            PairOutcome::Failed(LoadError::Parse(_)) => counters.parse_errors += 1,
            PairOutcome::Failed(LoadError::NotFound(_)) => counters.missing += 1,
            PairOutcome::Failed(LoadError::Unexpected(_)) => counters.failed += 1,
        }
    }

    Ok(counters)
}
