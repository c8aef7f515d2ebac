//! CLI tool that prints the syntax tree of a source file.

use std::fs;
use std::io::ErrorKind;
use std::process::ExitCode;

fn usage() -> ExitCode {
    eprintln!("Usage: decaf-parser [--tokens] <file>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --tokens  Print the token stream instead of the syntax tree");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  decaf-parser program.decaf");
    eprintln!("  decaf-parser --tokens program.decaf");
    ExitCode::from(2)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (show_tokens, path) = match args.as_slice() {
        [flag, path] if flag == "--tokens" => (true, path),
        [path] if path != "--help" && path != "-h" && !path.starts_with("--") => (false, path),
        _ => return usage(),
    };

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            eprintln!("Error: file '{path}' not found");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error: unable to read file '{path}': {e}");
            return ExitCode::FAILURE;
        }
    };

    let tokens = match decaf_parser::tokenize(&content) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("Lexical error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if show_tokens {
        for token in &tokens {
            println!("{token}");
        }
        return ExitCode::SUCCESS;
    }

    match decaf_parser::parse(&tokens) {
        Ok(tree) => {
            print!("{}", decaf_parser::format(&tree));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Parsing error: {e}");
            ExitCode::FAILURE
        }
    }
}
