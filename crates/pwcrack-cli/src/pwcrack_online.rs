//! Online phase CLI - recover passwords from digests
//!
//! Usage: pwcrack_online [options]
//! Then enter target digests as hex strings.
//!
//! Options:
//!   --length <N>        Password length of the tables (default: 3)
//!   --chain-length <N>  Plaintexts per chain (default: 100)
//!   --tables <N>        Number of tables to load (default: 1)
//!   --hash <NAME>       Hash primitive, sha1 or ntlm (default: sha1)
//!   --table-dir <PATH>  Directory holding the table files (default: .)
//!   --help, -h          Show help
//!
//! Example:
//!   pwcrack_online --length 3 --tables 4 --table-dir tables
//!   Enter a sha1 digest in hex (or 'q' to quit): 4f28c3b1...

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use pwcrack_rainbow::app::searcher::online_search;
use pwcrack_rainbow::constants::{
    DEFAULT_ALPHA, DEFAULT_CHAIN_LENGTH, DEFAULT_PASSWORD_LENGTH, DEFAULT_TABLE_COUNT,
};
use pwcrack_rainbow::infra::table_io::{load_table, table_file_name};
use pwcrack_rainbow::{Digest, HashKind, HashPrimitive, RainbowTable, TableParams};

struct Args {
    length: usize,
    chain_length: u32,
    tables: u32,
    hash: HashKind,
    table_dir: PathBuf,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --length <N>        Password length of the tables (default: {})", DEFAULT_PASSWORD_LENGTH);
    eprintln!("  --chain-length <N>  Plaintexts per chain (default: {})", DEFAULT_CHAIN_LENGTH);
    eprintln!("  --tables <N>        Number of tables to load (default: {})", DEFAULT_TABLE_COUNT);
    eprintln!("  --hash <NAME>       Hash primitive, sha1 or ntlm (default: sha1)");
    eprintln!("  --table-dir <PATH>  Directory holding the table files (default: .)");
    eprintln!("  --help, -h          Show this help message");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();

    let mut parsed = Args {
        length: DEFAULT_PASSWORD_LENGTH,
        chain_length: DEFAULT_CHAIN_LENGTH,
        tables: DEFAULT_TABLE_COUNT,
        hash: HashKind::Sha1,
        table_dir: PathBuf::from("."),
    };

    let mut i = 1;
    while i < args.len() {
        let option = args[i].as_str();
        match option {
            "--help" | "-h" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            "--length" | "--chain-length" | "--tables" | "--hash" | "--table-dir" => {
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
                    "--hash" => parsed.hash = value.parse().map_err(|_| invalid())?,
                    "--table-dir" => parsed.table_dir = PathBuf::from(value),
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

    let params = match TableParams::new(args.length, args.chain_length, args.tables, DEFAULT_ALPHA)
    {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Loading {} table(s) from {}...", args.tables, args.table_dir.display());
    let load_start = Instant::now();

    let mut tables: Vec<RainbowTable> = Vec::new();
    for table_index in 0..args.tables {
        let path = args
            .table_dir
            .join(table_file_name(args.length, table_index));
        match load_table(&path) {
            Ok(table) => tables.push(table),
            Err(e) => {
                eprintln!("Error loading {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    let total_chains: usize = tables.iter().map(|t| t.len()).sum();
    println!(
        "Loaded {} chains in {:.3} seconds",
        total_chains,
        load_start.elapsed().as_secs_f64()
    );

    loop {
        print!("\nEnter a {} digest in hex (or 'q' to quit): ", args.hash);
        io::stdout().flush().ok();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            eprintln!("Error reading input.");
            continue;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        let bytes = match hex::decode(input) {
            Ok(b) => b,
            Err(_) => {
                eprintln!("Error: not a valid hex string.");
                continue;
            }
        };
        if bytes.len() != args.hash.digest_len() {
            eprintln!(
                "Error: expected {} hex bytes for {}, got {}.",
                args.hash.digest_len(),
                args.hash,
                bytes.len()
            );
            continue;
        }

        let target = Digest::new(bytes);
        let start = Instant::now();
        let result = online_search(&target, &tables, &params, &args.hash);
        let elapsed = start.elapsed();

        match result {
            Some(password) => {
                println!("Password '{}' found for the given digest!", password)
            }
            None => println!("No password found for the given digest."),
        }
        println!("Search completed in {:.2} seconds.", elapsed.as_secs_f64());
    }
}
