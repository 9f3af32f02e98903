#[macro_use]
mod common;

#[cfg(test)]
mod this {
    tests! {
        refers_to_the_receiver in this is OK
        "wide"
    }

    tests! {
        captured_by_closure_inside_method in this is OK
        "hidden"
    }

    tests! {
        outside_of_a_class in this is ERR(65)
        "[line 1] Error at 'this': Can't use 'this' outside of a class."
    }

    tests! {
        inside_a_plain_function in this is ERR(65)
        "[line 2] Error at 'this': Can't use 'this' outside of a class."
    }
}
