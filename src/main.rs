// CSV Merger - local runner
// Merges the CSV files given on the command line and writes merged_file.csv.

use anyhow::{bail, Result};
use csv_merger::{merge_files, MERGED_FILE_NAME};
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut inputs: Vec<PathBuf> = Vec::new();
    let mut output = PathBuf::from(MERGED_FILE_NAME);

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                match args.get(i) {
                    Some(path) => output = PathBuf::from(path),
                    None => bail!("missing path after {}", args[i - 1]),
                }
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            path => inputs.push(PathBuf::from(path)),
        }
        i += 1;
    }

    if inputs.is_empty() {
        print_usage();
        bail!("no input files given");
    }

    println!("📄 CSV Merger v{}", csv_merger::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let report = merge_files(&inputs)?;
    println!("✓ {}", report.summary());

    if report.is_empty() {
        println!("  Nothing to export - no output written");
        return Ok(());
    }

    fs::write(&output, report.to_csv()?)?;
    println!("✓ Wrote {}", output.display());

    Ok(())
}

fn print_usage() {
    println!("Usage: csv-merger <file1.csv> [file2.csv ...] [-o merged_file.csv]");
    println!();
    println!("Merges the rows of every input CSV into one table. Columns are");
    println!("the union of all input headers; rows missing a column get an");
    println!("empty value; rows whose every cell is blank are dropped.");
}
