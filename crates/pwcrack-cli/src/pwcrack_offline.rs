//! Offline phase CLI - generate, finalize and store rainbow tables
//!
//! Usage: pwcrack_offline [options]
//!
//! Options:
//!   --length <N>        Password length (default: 3)
//!   --chain-length <N>  Plaintexts per chain (default: 100)
//!   --tables <N>        Number of tables (default: 1)
//!   --alpha <F>         Maximality coefficient in (0, 1) (default: 0.952)
//!   --hash <NAME>       Hash primitive, sha1 or ntlm (default: sha1)
//!   --out-dir <PATH>    Output directory (default: .)
//!   --help, -h          Show help
//!
//! Example: pwcrack_offline --length 3 --tables 4 --out-dir tables

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use pwcrack_rainbow::app::generator::generate_table_parallel_with_progress;
use pwcrack_rainbow::constants::{
    DEFAULT_ALPHA, DEFAULT_CHAIN_LENGTH, DEFAULT_PASSWORD_LENGTH, DEFAULT_TABLE_COUNT,
};
use pwcrack_rainbow::infra::table_io::{save_table, table_file_name};
use pwcrack_rainbow::infra::table_sort::finalize_table;
use pwcrack_rainbow::{HashKind, TableParams};

struct Args {
    length: usize,
    chain_length: u32,
    tables: u32,
    alpha: f64,
    hash: HashKind,
    out_dir: PathBuf,
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
    eprintln!("  --out-dir <PATH>    Output directory (default: .)");
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
        out_dir: PathBuf::from("."),
    };

    let mut i = 1;
    while i < args.len() {
        let option = args[i].as_str();
        match option {
            "--help" | "-h" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            "--length" | "--chain-length" | "--tables" | "--alpha" | "--hash" | "--out-dir" => {
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
                    "--out-dir" => parsed.out_dir = PathBuf::from(value),
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
        "Generating {} table(s) of up to {} chains ({} plaintexts per chain, hash {})...",
        params.table_count(),
        params.chain_count(),
        params.chain_length(),
        args.hash
    );

    let start = Instant::now();

    for table_index in 0..params.table_count() {
        let table_start = Instant::now();

        let progress = |current: usize, total: usize| {
            print!("\r[table {}] {}/{} chains", table_index, current, total);
            io::stdout().flush().ok();
        };

        let mut table =
            match generate_table_parallel_with_progress(&params, &args.hash, table_index, progress)
            {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("\nError: {}", e);
                    std::process::exit(1);
                }
            };
        println!();

        let generated = table.len();
        finalize_table(&mut table);
        println!(
            "[table {}] {} chains generated, {} kept after deduplication ({:.2}s)",
            table_index,
            generated,
            table.len(),
            table_start.elapsed().as_secs_f64()
        );

        let path = args
            .out_dir
            .join(table_file_name(params.password_length(), table_index));
        if let Err(e) = save_table(&path, &table) {
            eprintln!("Error saving {}: {}", path.display(), e);
            std::process::exit(1);
        }
        println!("[table {}] saved to {}", table_index, path.display());
    }

    println!();
    println!("Done! Total time: {:.2} seconds", start.elapsed().as_secs_f64());
}
