use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// A `Write` sink over a shared buffer, so a test can hand ownership of a
/// writer to `Rlox::new` while keeping a handle to read back what was
/// printed, mirroring the teacher's `rocks::new(&mut output)` style
/// without needing a borrow that outlives the `Rlox` value.
pub struct SharedBuffer(pub Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes `source` to a uniquely-named file under the OS temp directory
/// and returns its path. Only the `ERR` arm of the `tests!` macro needs a
/// real path, since it drives the compiled binary as a subprocess via
/// `assert_cmd` to observe the process exit code.
pub fn write_temp_source(name: &str, source: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("rlox-test-{name}-{}.lox", std::process::id()));
    std::fs::write(&path, source).expect("write temp source file");
    path
}

/// `tests! { name is OK "source"; "expected" "lines" }` runs `source`
/// in-process and asserts the captured stdout equals the expected lines
/// joined by newlines (with a trailing newline, matching `print`'s
/// behavior); no lines means no output at all.
///
/// `tests! { name is ERR "source"; "expected" "lines" }` runs `source`
/// through the compiled binary and asserts its stderr equals the
/// expected lines and that it exits with a failure status.
#[macro_export]
macro_rules! tests {
    ($name:ident is OK $source:expr; $($expected:expr)*) => {
        #[test]
        fn $name() {
            let buffer = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
            let mut rlox = rlox::Rlox::new(Box::new($crate::common::SharedBuffer(buffer.clone())));
            rlox.run($source);

            assert!(!rlox.had_error(), "unexpected static error for {:?}", $source);
            assert!(!rlox.had_runtime_error(), "unexpected runtime error for {:?}", $source);

            let mut expected_lines: Vec<&str> = vec![$($expected),*];
            let expected = match expected_lines.len() {
                0 => String::new(),
                _ => {
                    expected_lines.push("");
                    expected_lines.join("\n")
                }
            };

            let actual = String::from_utf8(buffer.borrow().clone()).expect("utf8 output");
            assert_eq!(expected, actual);
        }
    };

    ($name:ident is ERR $source:expr; $($expected:expr)+) => {
        #[test]
        fn $name() {
            use assert_cmd::Command;

            let path = $crate::common::write_temp_source(stringify!($name), $source);
            let expected = vec![$($expected),+].join("\n");

            Command::cargo_bin("rlox")
                .unwrap()
                .arg(&path)
                .assert()
                .stderr(format!("{expected}\n"))
                .failure();

            let _ = std::fs::remove_file(&path);
        }
    };
}
