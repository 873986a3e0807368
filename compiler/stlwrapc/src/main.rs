//! stlwrap CLI
//!
//! Generates Cython wrappers for C++ set and map instantiations.

use stlwrapc::commands::{gen_files, list_types, print_unit, GenOptions};

fn main() {
    stlwrapc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "gen" => {
            if args.len() < 3 {
                eprintln!("Usage: stlwrap gen <manifest.json> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  -o <base>     Artifact base name (default: from manifest)");
                eprintln!("  --strict      Type-check values on insertion");
                std::process::exit(1);
            }

            let mut options = GenOptions::default();
            let mut i = 3;
            while i < args.len() {
                match args[i].as_str() {
                    "-o" if i + 1 < args.len() => {
                        options.output = Some(args[i + 1].clone());
                        i += 2;
                    }
                    "--strict" => {
                        options.strict = true;
                        i += 1;
                    }
                    other => {
                        eprintln!("error: unknown option `{other}`");
                        std::process::exit(1);
                    }
                }
            }

            gen_files(&args[2], &options);
        }
        "print" => {
            if args.len() < 4 {
                eprintln!("Usage: stlwrap print <manifest.json> <implementation|interface|tests>");
                std::process::exit(1);
            }
            print_unit(&args[2], &args[3]);
        }
        "types" => list_types(),
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("stlwrap {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("stlwrap - Cython wrappers for C++ containers");
    println!();
    println!("Usage: stlwrap <command> [options]");
    println!();
    println!("Commands:");
    println!("  gen <manifest.json>            Write implementation, interface and tests");
    println!("  print <manifest.json> <unit>   Print one unit (implementation, interface, tests)");
    println!("  types                          List registered element types");
    println!("  help                           Show this help message");
    println!("  version                        Show version information");
    println!();
    println!("Gen options:");
    println!("  -o <base>     Artifact base name (default: from manifest)");
    println!("  --strict      Type-check values on insertion");
    println!();
    println!("Set RUST_LOG=debug to trace generation.");
}
