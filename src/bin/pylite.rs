//! Command-line front end driver.
//!
//! Feeds a source file through the pipeline and prints the serialized
//! result, one stage per subcommand:
//!
//!   pylite tokens <path>   - token list as JSON
//!   pylite tree <path>     - parse tree as JSON
//!   pylite ast <path>      - AST as JSON
//!
//! Pass `-` as the path to read from stdin.

use clap::{Arg, Command};
use pylite::{Parser, Scanner};
use std::io::Read;

fn main() {
    let matches = Command::new("pylite")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Dump the token list, parse tree, or AST of a Python-like source file")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Scan the input and print its token list")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("tree")
                .about("Parse the input and print its parse tree")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("ast")
                .about("Parse the input and print its AST")
                .arg(path_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", sub)) => {
            let source = read_source(sub.get_one::<String>("path").unwrap());
            handle_tokens(&source);
        }
        Some(("tree", sub)) => {
            let source = read_source(sub.get_one::<String>("path").unwrap());
            handle_tree(&source);
        }
        Some(("ast", sub)) => {
            let source = read_source(sub.get_one::<String>("path").unwrap());
            handle_ast(&source);
        }
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the source file, or - for stdin")
        .required(true)
        .index(1)
}

fn read_source(path: &str) -> String {
    if path == "-" {
        let mut buffer = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
            eprintln!("Error reading stdin: {}", e);
            std::process::exit(1);
        }
        buffer
    } else {
        std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        })
    }
}

fn handle_tokens(source: &str) {
    let mut scanner = Scanner::new();
    match scanner.scan(source) {
        Ok(tokens) => {
            let dump: Vec<_> = tokens.iter().map(|t| t.repr()).collect();
            print_json(&serde_json::Value::Array(dump));
        }
        Err(e) => fail(e),
    }
}

fn handle_tree(source: &str) {
    let mut parser = Parser::new();
    match parser.to_parse_tree(source) {
        Ok(tree) => print_json(&tree.repr()),
        Err(e) => fail(e),
    }
}

fn handle_ast(source: &str) {
    let mut parser = Parser::new();
    match parser.to_ast(source) {
        Ok(ast) => print_json(&ast.repr()),
        Err(e) => fail(e),
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            std::process::exit(1);
        }
    }
}

fn fail(e: pylite::Error) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}
