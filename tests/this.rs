#[macro_use]
mod common;

tests! {
    this_binds_to_the_instance_the_method_was_called_on is OK
    "class Egotist { speak() { print this; } } var e = Egotist(); e.speak();";
    "Egotist instance"
}

tests! {
    this_outside_a_class_is_a_resolution_error is ERR
    "print this;";
    "[line 1] Error at 'this': Can't use 'this' outside of a class."
}

tests! {
    nested_function_inside_method_closes_over_this is OK
    "class Thing { method() { fun helper() { print this; } helper(); } } Thing().method();";
    "Thing instance"
}
