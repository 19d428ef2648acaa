#[macro_use]
mod common;

tests! {
    string_literal_prints_itself is OK
    "print \"hello world\";";
    "hello world"
}

tests! {
    multiline_string_literal is OK
    "print \"line one\nline two\";";
    "line one"
    "line two"
}

tests! {
    unterminated_string_is_a_scan_error is ERR
    "print \"unterminated;";
    "[line 1] Error: Unterminated string."
    "[line 1] Error at end: Expect expression."
}
