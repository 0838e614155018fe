//! BCON command-line driver.

use bconc::commands::{check_file, eval_file, lex_file, parse_options, CommandError};

fn main() {
    bconc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let handler: fn(&str, &bconc::commands::Options) -> Result<String, CommandError> =
        match command.as_str() {
            "eval" => eval_file,
            "check" => check_file,
            "lex" => lex_file,
            "help" | "--help" | "-h" => {
                print_usage();
                return;
            }
            "version" | "--version" | "-V" => {
                println!("bcon {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            _ => {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        };

    if args.len() < 3 {
        eprintln!("Usage: bcon {command} <file.bcon> [options]");
        std::process::exit(1);
    }

    let result = parse_options(&args[3..]).and_then(|options| handler(&args[2], &options));
    match result {
        Ok(output) => print!("{}", with_newline(output)),
        Err(err) => {
            eprint!("{}", with_newline(err.to_string()));
            std::process::exit(1);
        }
    }
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn print_usage() {
    println!("BCON configuration language");
    println!();
    println!("Usage: bcon <command> <file.bcon> [options]");
    println!();
    println!("Commands:");
    println!("  eval <file>          Evaluate a file and print the result as BCON");
    println!("  check <file>         Evaluate a file and report whether it is valid");
    println!("  lex <file>           Tokenize and display tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --path <dir>         Base directory for imports and file literals");
    println!("                       (default: the input file's directory)");
    println!("  --encoding <name>    Encoding of the input file (default: utf8)");
    println!("  --indent <n>         Spaces per level in eval output (default: 0)");
    println!();
    println!("Examples:");
    println!("  bcon eval app.bcon --indent 2");
    println!("  bcon check app.bcon --path ./conf");
    println!("  RUST_LOG=bcon_eval=debug bcon eval app.bcon");
}
