#[macro_use]
mod common;

tests! {
    arithmetic_and_precedence is OK
    "print 1 + 2 * 3;";
    "7"
}

tests! {
    division_by_zero_yields_infinity is OK
    "print 1 / 0;";
    "inf"
}

tests! {
    negative_division_by_zero_yields_negative_infinity is OK
    "print -1 / 0;";
    "-inf"
}

tests! {
    zero_divided_by_zero_yields_nan is OK
    "print 0 / 0;";
    "NaN"
}

tests! {
    string_concatenation is OK
    "print \"foo\" + \"bar\";";
    "foobar"
}

tests! {
    equality_never_errors_across_types is OK
    "print 1 == \"1\"; print nil == false;";
    "false"
    "false"
}

tests! {
    adding_number_and_string_is_a_runtime_error is ERR
    "var a = \"1\" + 1;";
    "Operands must be two numbers or two strings."
    "[line 1]"
}

tests! {
    comparing_non_numbers_is_a_runtime_error is ERR
    "print \"a\" < 1;";
    "Operands must be numbers."
    "[line 1]"
}

tests! {
    negating_a_non_number_is_a_runtime_error is ERR
    "print -\"a\";";
    "Operand must be a number."
    "[line 1]"
}
