#[macro_use]
mod common;

tests! {
    subclass_uses_inherited_method_when_not_overridden is OK
    "class Doughnut { cook() { print \"Fry until golden brown.\"; } } \
     class BostonCream < Doughnut {} BostonCream().cook();";
    "Fry until golden brown."
}

tests! {
    class_cannot_inherit_from_itself is ERR
    "class Oops < Oops {}";
    "[line 1] Error at 'Oops': A class can't inherit from itself."
}

tests! {
    inheriting_from_a_non_class_is_a_runtime_error is ERR
    "var NotAClass = \"I am not a class\"; class Subclass < NotAClass {}";
    "Superclass must be a class."
    "[line 1]"
}

tests! {
    inherited_init_is_used_when_subclass_has_none is OK
    "class A { init(x) { this.x = x; } } class B < A {} print B(5).x;";
    "5"
}
