#[macro_use]
mod common;

tests! {
    nil_and_false_are_falsey is OK
    "if (!nil) print \"nil is falsey\"; if (!false) print \"false is falsey\";";
    "nil is falsey"
    "false is falsey"
}

tests! {
    zero_and_empty_string_are_truthy is OK
    "if (0) print \"zero is truthy\"; if (\"\") print \"empty string is truthy\";";
    "zero is truthy"
    "empty string is truthy"
}

tests! {
    or_short_circuits_and_returns_operand_value is OK
    "print nil or \"default\"; print 1 or 2;";
    "default"
    "1"
}

tests! {
    and_short_circuits_and_returns_operand_value is OK
    "print false and \"never\"; print 1 and 2;";
    "false"
    "2"
}
