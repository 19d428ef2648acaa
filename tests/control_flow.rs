#[macro_use]
mod common;

tests! {
    break_exits_the_enclosing_while_loop is OK
    "var i = 0; while (true) { i = i + 1; if (i == 3) break; } print i;";
    "3"
}

tests! {
    break_exits_a_desugared_for_loop is OK
    "for (var i = 0; i < 10; i = i + 1) { if (i == 2) break; print i; } print \"done\";";
    "0"
    "1"
    "done"
}

tests! {
    return_escapes_an_infinite_for_loop is OK
    "fun find() { for (;;) { return \"found\"; } } print find();";
    "found"
}

tests! {
    for_loop_desugars_all_three_clauses is OK
    "var out = \"\"; for (var i = 0; i < 3; i = i + 1) out = out + i; print out;";
    "012"
}

tests! {
    fibonacci_recursion is OK
    "fun fib(n) { if (n <= 1) return n; return fib(n - 1) + fib(n - 2); } print fib(10);";
    "55"
}

tests! {
    break_outside_a_loop_is_a_resolution_error is ERR
    "break;";
    "[line 1] Error at 'break': Can't break outside of a loop."
}

tests! {
    return_outside_a_function_is_a_resolution_error is ERR
    "return 1;";
    "[line 1] Error at 'return': Can't return from top-level code."
}

tests! {
    break_cannot_cross_a_function_boundary is ERR
    "var ran = false; while (true) { fun g() { break; } g(); ran = true; } print ran;";
    "[line 1] Error at 'break': Can't break outside of a loop."
}

