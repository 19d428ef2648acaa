pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use std::io::{self, Write};

use error::Reporter;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// Ties the scanner, parser, resolver, and interpreter together and
/// keeps one `Interpreter` alive across calls, so that top-level `var`
/// declarations made on one REPL line are visible on the next.
pub struct Rlox {
    interpreter: Interpreter,
    reporter: Reporter,
    next_id_seed: u64,
}

impl Rlox {
    pub fn new(output: Box<dyn Write>) -> Self {
        Rlox {
            interpreter: Interpreter::new(Default::default(), output),
            reporter: Reporter::new(),
            next_id_seed: 0,
        }
    }

    pub fn had_error(&self) -> bool {
        self.reporter.had_error()
    }

    pub fn had_runtime_error(&self) -> bool {
        self.reporter.had_runtime_error()
    }

    /// Scans, parses, resolves, and interprets `source`. Any diagnostics
    /// are written to standard error and reflected in `had_error`/
    /// `had_runtime_error`.
    pub fn run(&mut self, source: &str) {
        let tokens = Scanner::new(source).scan_tokens(&mut self.reporter);
        let mut parser = Parser::new(tokens, self.next_id_seed);
        let statements = parser.parse(&mut self.reporter);
        self.next_id_seed = parser.next_id_seed();

        if self.reporter.had_error() {
            return;
        }

        let locals = Resolver::new(&mut self.reporter).resolve(&statements);

        if self.reporter.had_error() {
            return;
        }

        self.interpreter.merge_locals(locals);
        self.interpreter.interpret(&statements, &mut self.reporter);
    }

    pub fn run_file(&mut self, path: &str) -> io::Result<()> {
        let source = std::fs::read_to_string(path)?;
        self.run(&source);
        Ok(())
    }

    pub fn run_prompt(&mut self) -> io::Result<()> {
        let history_path = home::home_dir().map(|home| home.join(".rlox_history"));

        let mut editor = rustyline::DefaultEditor::new()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.reporter.reset();
                    self.run(&line);
                }
                Err(rustyline::error::ReadlineError::Eof)
                | Err(rustyline::error::ReadlineError::Interrupted) => break,
                Err(e) => return Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }

        Ok(())
    }
}
