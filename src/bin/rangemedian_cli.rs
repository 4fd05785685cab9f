// src/bin/rangemedian_cli.rs
use clap::{Parser, Subcommand};
use rangemedian::RunningMedian;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Summary capacity (max entries held after any call)
    #[arg(short = 'c', long, default_value_t = 64)]
    capacity: usize,

    /// Read values from this file instead of stdin (one integer per line)
    #[arg(long)]
    input: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Stream every value through the estimator, printing an `exact,approx`
    /// CSV row per value and echoing the input series at the end
    Trace,
    /// Ingest all values and print the final approximate median
    Median,
    /// Ingest all values and dump the summary state as JSON
    Describe,
}

fn parse_values(s: &str) -> Result<Vec<i64>, Box<dyn Error>> {
    let mut out = Vec::new();
    for line in s.lines() {
        let tok = line.trim();
        if tok.is_empty() {
            continue;
        }
        out.push(tok.parse::<i64>()?);
    }
    Ok(out)
}

fn read_values(input: Option<&PathBuf>) -> Result<Vec<i64>, Box<dyn Error>> {
    let mut s = String::new();
    match input {
        Some(path) => s = fs::read_to_string(path)?,
        None => {
            io::stdin().read_to_string(&mut s)?;
        }
    }
    parse_values(&s)
}

/// Full-history reference median: sort everything, take the middle, average
/// the two middles on even counts. Kept independent of the estimator so the
/// trace output validates one against the other.
fn exact_median(series: &[i64]) -> f64 {
    let mut sorted = series.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let values = read_values(args.input.as_ref())?;
    let mut rm = RunningMedian::builder().capacity(args.capacity).build()?;

    match args.cmd {
        Cmd::Trace => {
            let mut series: Vec<i64> = Vec::with_capacity(values.len());
            println!("exact,approx");
            for v in values {
                rm.insert(v);
                series.push(v);
                let approx = rm.median()?;
                println!("{},{}", exact_median(&series), approx);
            }
            println!("series: {:?}", series);
        }
        Cmd::Median => {
            for v in values {
                rm.insert(v);
            }
            println!("{}", rm.median()?);
        }
        Cmd::Describe => {
            for v in values {
                rm.insert(v);
            }
            println!("{}", serde_json::to_string_pretty(&rm.describe())?);
        }
    }
    Ok(())
}
