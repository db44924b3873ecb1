use std::{
    env, fs,
    io::{self, Read},
    process,
    rc::Rc,
};

use tablebridge::runtime::{Bridge, BridgeConfig, HostValue, RawTable, Table, Value};

fn main() {
    let mut args: Vec<String> = env::args().collect();
    let trace = args.iter().any(|arg| arg == "--trace");
    if trace {
        args.retain(|arg| arg != "--trace");
    }
    init_tracing(trace);

    let config = match extract_max_depth(&mut args) {
        Some(config) => config,
        None => process::exit(2),
    };

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => print_help(),
        "show" | "list" | "keys" => {
            if args.len() < 3 {
                eprintln!("Usage: tablebridge {} <file.json|->", args[1]);
                process::exit(2);
            }
            let table = match load_table(&args[2], config) {
                Ok(table) => table,
                Err(message) => {
                    eprintln!("Error: {}", message);
                    process::exit(1);
                }
            };
            match args[1].as_str() {
                "show" => println!("{}", table),
                "list" => {
                    for value in table.as_list() {
                        println!("{}", value);
                    }
                }
                _ => {
                    if let Err(err) = print_keys(&table) {
                        eprintln!("Error: {}", err);
                        process::exit(1);
                    }
                }
            }
        }
        other => {
            eprintln!("Error: unknown command `{}`", other);
            print_help();
            process::exit(2);
        }
    }
}

fn print_help() {
    println!(
        "\
tablebridge

Usage:
  tablebridge show <file.json|->   Print the lifted table in traversal order
  tablebridge list <file.json|->   Print the positional (integer-keyed) view
  tablebridge keys <file.json|->   Walk the first-key/next-key protocol

Flags:
  --trace            Log conversions to stderr (or set RUST_LOG)
  --max-depth <n>    Deepest nesting accepted while lifting (default: 128,
                     env: TABLEBRIDGE_MAX_DEPTH)"
    );
}

fn init_tracing(trace: bool) {
    let default_filter = if trace { "tablebridge=trace" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn extract_max_depth(args: &mut Vec<String>) -> Option<BridgeConfig> {
    let mut config = BridgeConfig::from_env();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--max-depth" {
            if i + 1 >= args.len() {
                eprintln!("Usage: tablebridge <command> <file.json> --max-depth <n>");
                return None;
            }
            let value = args.remove(i + 1);
            args.remove(i);
            match value.parse::<usize>() {
                Ok(parsed) => config = config.with_max_depth(parsed),
                Err(_) => {
                    eprintln!("Error: --max-depth expects a non-negative integer.");
                    return None;
                }
            }
            continue;
        }
        i += 1;
    }
    Some(config)
}

fn load_table(path: &str, config: BridgeConfig) -> Result<Table, String> {
    let source = if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        buffer
    } else {
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path, e))?
    };
    let json: serde_json::Value =
        serde_json::from_str(&source).map_err(|e| format!("invalid JSON in {}: {}", path, e))?;

    let bridge = Bridge::new(config);
    match bridge.lift(HostValue::from(json)).map_err(|e| e.to_string())? {
        Value::Table(table) => Ok(Rc::unwrap_or_clone(table)),
        primitive => {
            // A bare primitive document lifts to itself; show it as a one-element sequence.
            Ok(std::iter::once(primitive).collect())
        }
    }
}

fn print_keys(table: &Table) -> Result<(), tablebridge::runtime::BridgeError> {
    let mut cursor = table.initial_key();
    while let Some(key) = cursor {
        println!("{}", key);
        cursor = table.successor_key(&key)?;
    }
    Ok(())
}
