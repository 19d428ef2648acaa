#[macro_use]
mod common;

tests! {
    field_is_created_on_first_assignment is OK
    "class Bagel {} var bagel = Bagel(); bagel.flavor = \"plain\"; print bagel.flavor;";
    "plain"
}

tests! {
    class_prints_its_bare_name is OK
    "class Bagel {} print Bagel;";
    "Bagel"
}

tests! {
    instance_prints_class_name_and_instance is OK
    "class Bagel {} print Bagel();";
    "Bagel instance"
}

tests! {
    methods_close_over_the_instance_they_were_bound_to is OK
    "class Cake { taste() { var adjective = \"delicious\"; print \"The \" + this.flavor + \" cake is \" + adjective + \"!\"; } } \
     var cake = Cake(); cake.flavor = \"German chocolate\"; cake.taste();";
    "The German chocolate cake is delicious!"
}

tests! {
    accessing_undefined_property_is_runtime_error is ERR
    "class Empty {} print Empty().nope;";
    "Undefined property 'nope'."
    "[line 1]"
}

tests! {
    calling_a_field_that_is_not_callable_is_runtime_error is ERR
    "class Box {} var b = Box(); b.x = \"not a function\"; b.x();";
    "Can only call functions and classes."
    "[line 1]"
}
