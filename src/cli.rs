use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glob::Pattern;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// First input directory (the "file1" side of every report)
    pub input1_dir: PathBuf,

    /// Second input directory (the "file2" side of every report)
    pub input2_dir: PathBuf,

    /// Directory under which the timestamped results folder is created
    #[arg(default_value = ".")]
    pub output_dir: PathBuf,

    /// Glob patterns to ignore (can be repeated or comma separated)
    #[arg(short, long, value_delimiter = ',', num_args = 1..)]
    pub ignore: Vec<String>,

    /// File extension to pair up across the two inputs
    #[arg(short, long, default_value = "xml")]
    pub extension: String,
}

#[derive(Debug)]
pub struct Options {
    pub extension: String,
    pub ignore_patterns: Vec<Pattern>,
}

pub fn build_options(args: &Args) -> Result<Options> {
    let patterns = args
        .ignore
        .iter()
        .map(|s| Pattern::new(s).with_context(|| format!("Invalid glob pattern: {s}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(Options {
        extension: args.extension.trim_start_matches('.').to_string(),
        ignore_patterns: patterns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(argv.iter().copied())
    }

    #[test]
    fn extension_defaults_to_xml_and_drops_leading_dot() {
        let opts = build_options(&args(&["xmldiff", "a", "b"])).unwrap();
        assert_eq!(opts.extension, "xml");

        let opts = build_options(&args(&["xmldiff", "a", "b", "-e", ".svg"])).unwrap();
        assert_eq!(opts.extension, "svg");
    }

    #[test]
    fn comma_separated_ignores_compile_to_patterns() {
        let opts = build_options(&args(&["xmldiff", "a", "b", "-i", "*.bak,drafts/*"])).unwrap();
        assert_eq!(opts.ignore_patterns.len(), 2);
        assert!(opts.ignore_patterns[0].matches("old.bak"));
        assert!(opts.ignore_patterns[1].matches("drafts/d.xml"));
    }

    #[test]
    fn invalid_glob_is_rejected_with_context() {
        let err = build_options(&args(&["xmldiff", "a", "b", "-i", "[bad"])).unwrap_err();
        assert!(err.to_string().contains("Invalid glob pattern"));
    }
}
