use std::{env, fs::read_to_string, path::PathBuf, process::exit};

use cflat::{
    ast::ast::Statement, codegen::codegen::generate, errors::errors::Diagnostic,
    get_line_at_offset, lexer::lexer::tokenize, parser::parser::parse,
};
use inkwell::context::Context;

fn main() {
    let args: Vec<String> = env::args().collect();
    let dump_ast = args.iter().any(|arg| arg == "--dump-ast");
    let mut paths = args.iter().skip(1).filter(|arg| !arg.starts_with("--"));

    let Some(file_path) = paths.next() else {
        eprintln!("Usage: cflat <source-file> [output.ll] [--dump-ast]");
        exit(1);
    };
    let file_path = file_path.as_str();
    let output_path = paths
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("out.ll"));

    let file_name = if file_path.contains('/') {
        file_path.split('/').last().unwrap()
    } else {
        file_path
    };

    let source = read_to_string(file_path).expect("Failed to read file!");

    let tokens = match tokenize(source.clone(), Some(String::from(file_name))) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprintln!("Error: {}", error);
            exit(1);
        }
    };

    let (parser, root) = parse(tokens);

    for warning in parser.warnings() {
        display_diagnostic(&source, file_name, warning, "Warning");
    }

    let Some(root) = root else {
        for error in parser.errors() {
            display_diagnostic(&source, file_name, error, "Error");
        }
        exit(1);
    };

    if dump_ast {
        println!("{}", root.tree_gen(0));
    }

    let context = Context::create();
    let result = generate(root.as_ref(), &context, file_name);
    match result {
        Ok(gen) => {
            gen.module.print_to_file(&output_path).unwrap();
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            let offset = error.token().span.start.0;
            let (line, line_text, line_pos) = get_line_at_offset(&source, offset);
            eprintln!("-> {}:{}:{}", file_name, line, line_pos + 1);
            eprintln!("{} | {}", line, line_text.trim_end());
            exit(1);
        }
    }
}

fn display_diagnostic(source: &str, file_name: &str, diagnostic: &Diagnostic, severity: &str) {
    /*
        Error: Expected ';', but got "}"
        -> demo.cb
           |
        3  | int x = 5
           | --------^
    */

    let offset = diagnostic.token.span.start.0;
    let (line, line_text, line_pos) = get_line_at_offset(source, offset);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("{}: {}", severity, diagnostic.message);
    eprintln!("-> {}", file_name);
    eprintln!("{:>padding$}", "|");

    let trimmed = line_text.trim_start();
    let removed = line_text.len() - trimmed.len();
    eprintln!("{} | {}", line_string, trimmed.trim_end());

    let arrows = line_pos.saturating_sub(removed) + 1;
    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}
