#[macro_use]
mod common;

tests! {
    counter_closure_tracks_state is OK
    "fun makeCounter() { var i = 0; fun count() { i = i + 1; return i; } return count; } \
     var counter = makeCounter(); print counter(); print counter(); print counter();";
    "1"
    "2"
    "3"
}

tests! {
    closures_share_the_same_captured_variable is OK
    "var f; var g; { var local = \"local\"; fun fn1() { print local; } fun fn2() { print local; } f = fn1; g = fn2; } f(); g();";
    "local"
    "local"
}

tests! {
    closure_over_shadowed_later_variable is OK
    "var a = \"global\"; { fun showA() { print a; } showA(); var a = \"block\"; showA(); }";
    "global"
    "global"
}
