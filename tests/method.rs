#[macro_use]
mod common;

#[cfg(test)]
mod method {
    tests! {
        bound_method_remembers_its_instance in method is OK
        "alice"
    }

    tests! {
        methods_are_shared_but_binding_is_not in method is OK
        "a"
        "b"
    }

    tests! {
        method_arity in method is ERR(70)
        "Expected 1 arguments but got 2."
        "[line 3]"
    }

    tests! {
        returning_a_method_keeps_the_binding in method is OK
        "carol"
    }
}
