use std::{env, io, process};

use lox_lang::lox;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut stdout = io::stdout();
    let mut lox = lox::new(&mut stdout);

    match args.len() {
        n if n > 2 => {
            eprintln!("Usage: lox [script]");
            process::exit(64);
        },
        2 => process::exit(lox.run_file(&args[1])),
        _ => lox.run_prompt(),
    };
}
