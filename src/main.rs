use std::io;
use std::process::ExitCode;

use rlox::Rlox;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.len() {
        0 => {
            let mut rlox = Rlox::new(Box::new(io::stdout()));
            if let Err(e) = rlox.run_prompt() {
                eprintln!("{e}");
                return ExitCode::from(74);
            }
            ExitCode::SUCCESS
        }
        1 => {
            let mut rlox = Rlox::new(Box::new(io::stdout()));
            if let Err(e) = rlox.run_file(&args[0]) {
                eprintln!("{e}");
                return ExitCode::from(74);
            }
            if rlox.had_error() {
                ExitCode::from(65)
            } else if rlox.had_runtime_error() {
                ExitCode::from(70)
            } else {
                ExitCode::SUCCESS
            }
        }
        _ => {
            eprintln!("Usage: rlox [script]");
            ExitCode::from(64)
        }
    }
}
