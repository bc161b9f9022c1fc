//! Coverage estimation CLI
//!
//! Generates a table set in-process and measures the recovery success rate
//! over sequential plaintext counters, printing a running estimate with a
//! 95% confidence interval.
//!
//! Usage: pwcrack_coverage [options]
//!
//! Options:
//!   --length <N>        Password length (default: 3)
//!   --chain-length <N>  Plaintexts per chain (default: 100)
//!   --tables <N>        Number of tables (default: 1)
//!   --alpha <F>         Maximality coefficient in (0, 1) (default: 0.952)
//!   --hash <NAME>       Hash primitive, sha1 or ntlm (default: sha1)
//!   --samples <N>       Number of plaintexts to query (default: 1000)
//!   --help, -h          Show help

use std::env;
use std::io::{self, Write};
use std::time::Instant;

use pwcrack_rainbow::app::coverage::measure_coverage_with_progress;
use pwcrack_rainbow::app::generator::offline;
use pwcrack_rainbow::constants::{
    DEFAULT_ALPHA, DEFAULT_CHAIN_LENGTH, DEFAULT_PASSWORD_LENGTH, DEFAULT_TABLE_COUNT,
};
use pwcrack_rainbow::{HashKind, TableParams};

struct Args {
    length: usize,
    chain_length: u32,
    tables: u32,
    alpha: f64,
    hash: HashKind,
    samples: u64,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --length <N>        Password length (default: {})", DEFAULT_PASSWORD_LENGTH);
    eprintln!("  --chain-length <N>  Plaintexts per chain (default: {})", DEFAULT_CHAIN_LENGTH);
    eprintln!("  --tables <N>        Number of tables (default: {})", DEFAULT_TABLE_COUNT);
    eprintln!("  --alpha <F>         Maximality coefficient in (0, 1) (default: {})", DEFAULT_ALPHA);
    eprintln!("  --hash <NAME>       Hash primitive, sha1 or ntlm (default: sha1)");
    eprintln!("  --samples <N>       Number of plaintexts to query (default: 1000)");
    eprintln!("  --help, -h          Show this help message");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();

    let mut parsed = Args {
        length: DEFAULT_PASSWORD_LENGTH,
        chain_length: DEFAULT_CHAIN_LENGTH,
        tables: DEFAULT_TABLE_COUNT,
        alpha: DEFAULT_ALPHA,
        hash: HashKind::Sha1,
        samples: 1000,
    };

    let mut i = 1;
    while i < args.len() {
        let option = args[i].as_str();
        match option {
            "--help" | "-h" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            "--length" | "--chain-length" | "--tables" | "--alpha" | "--hash" | "--samples" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| format!("{} requires a value", option))?;
                let invalid = || format!("Invalid value for {}: {}", option, value);

                match option {
                    "--length" => parsed.length = value.parse().map_err(|_| invalid())?,
                    "--chain-length" => {
                        parsed.chain_length = value.parse().map_err(|_| invalid())?
                    }
                    "--tables" => parsed.tables = value.parse().map_err(|_| invalid())?,
                    "--alpha" => parsed.alpha = value.parse().map_err(|_| invalid())?,
                    "--hash" => parsed.hash = value.parse().map_err(|_| invalid())?,
                    "--samples" => parsed.samples = value.parse().map_err(|_| invalid())?,
                    _ => unreachable!(),
                }
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(parsed)
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage(&env::args().next().unwrap_or_default());
            std::process::exit(1);
        }
    };

    let params = match TableParams::new(args.length, args.chain_length, args.tables, args.alpha) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Generating {} table(s) of up to {} chains...",
        params.table_count(),
        params.chain_count()
    );
    let generation_start = Instant::now();
    let tables = match offline(&params, &args.hash) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Generated in {:.2} seconds.",
        generation_start.elapsed().as_secs_f64()
    );

    let samples = args.samples.min(params.password_space());
    let report = measure_coverage_with_progress(
        &params,
        &args.hash,
        &tables,
        0..samples,
        |tally| {
            let progress = tally.queried as f64 / samples as f64 * 100.0;
            let rate = tally.success_rate();
            let confidence = tally.confidence_95();

            if confidence > 0.001 {
                print!(
                    "\rprogress: {:.2}% | success rate: [{:.2}%, {:.2}%]",
                    progress,
                    (rate - confidence) * 100.0,
                    (rate + confidence) * 100.0
                );
            } else {
                print!(
                    "\rprogress: {:.2}% | success rate: {:.2}%          ",
                    progress,
                    rate * 100.0
                );
            }
            io::stdout().flush().ok();
        },
    );

    println!();
    println!(
        "Recovered {}/{} plaintexts ({:.2}% +/- {:.2}%)",
        report.recovered,
        report.queried,
        report.success_rate() * 100.0,
        report.confidence_95() * 100.0
    );
}
