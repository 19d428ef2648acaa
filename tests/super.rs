#[macro_use]
mod common;

tests! {
    super_calls_the_overridden_method is OK
    "class A { foo() { print \"A.foo\"; } } \
     class B < A { foo() { print \"B.foo\"; super.foo(); } } \
     B().foo();";
    "B.foo"
    "A.foo"
}

tests! {
    super_resolves_from_the_defining_class_not_the_call_site is OK
    "class A { method() { print \"A method\"; } } \
     class B < A { method() { print \"B method\"; } test() { super.method(); } } \
     class C < B {} \
     C().test();";
    "A method"
}

tests! {
    super_outside_a_class_is_a_resolution_error is ERR
    "super.foo();";
    "[line 1] Error at 'super': Can't use 'super' outside of a class."
}

tests! {
    super_in_a_class_with_no_superclass_is_a_resolution_error is ERR
    "class A { foo() { super.foo(); } }";
    "[line 1] Error at 'super': Can't use 'super' in a class with no superclass."
}
