#[macro_use]
mod common;

tests! {
    integral_doubles_print_without_trailing_zero is OK
    "print 3 + 0;";
    "3"
}

tests! {
    fractional_values_print_their_decimal is OK
    "print 1.5 + 1.5; print 3.25;";
    "3"
    "3.25"
}

tests! {
    large_number_prints_without_scientific_notation is OK
    "print 1000000;";
    "1000000"
}
