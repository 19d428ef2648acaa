#[macro_use]
mod common;

tests! {
    blocks_introduce_their_own_scope is OK
    "var a = 1; { var a = 2; print a; } print a;";
    "2"
    "1"
}

tests! {
    reading_local_variable_in_its_own_initializer_is_a_resolution_error is ERR
    "{ var a = a; }";
    "[line 1] Error at 'a': Can't read local variable in its own initializer."
}

tests! {
    redeclaring_a_local_in_the_same_scope_is_a_resolution_error is ERR
    "{ var a = 1; var a = 2; }";
    "[line 1] Error at 'a': Already a variable with this name in this scope."
}

#[test]
fn two_hundred_fifty_five_arguments_is_accepted() {
    let params: Vec<String> = (0..255).map(|i| format!("a{i}")).collect();
    let args: Vec<String> = (0..255).map(|i| i.to_string()).collect();
    let source = format!(
        "fun f({}) {{ return a0 + a254; }} print f({});",
        params.join(", "),
        args.join(", ")
    );

    let buffer = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let mut rlox = rlox::Rlox::new(Box::new(common::SharedBuffer(buffer.clone())));
    rlox.run(&source);

    assert!(!rlox.had_error());
    assert!(!rlox.had_runtime_error());
    assert_eq!("254\n", String::from_utf8(buffer.borrow().clone()).unwrap());
}

#[test]
fn two_hundred_fifty_six_arguments_is_a_resolution_error() {
    let params: Vec<String> = (0..256).map(|i| format!("a{i}")).collect();
    let source = format!("fun f({}) {{}}", params.join(", "));

    let buffer = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let mut rlox = rlox::Rlox::new(Box::new(common::SharedBuffer(buffer.clone())));
    rlox.run(&source);

    assert!(rlox.had_error());
}

tests! {
    undefined_variable_is_a_runtime_error is ERR
    "print undefined_name;";
    "Undefined variable 'undefined_name'."
    "[line 1]"
}

tests! {
    invalid_assignment_target_is_a_resolution_error_but_parsing_continues is ERR
    "1 = 2; print \"still ran\";";
    "[line 1] Error at '=': Invalid assignment target."
}

tests! {
    clock_returns_a_number is OK
    "print clock() >= 0.0;";
    "true"
}

tests! {
    calling_a_non_callable_is_a_runtime_error is ERR
    "var x = 1; x();";
    "Can only call functions and classes."
    "[line 1]"
}
