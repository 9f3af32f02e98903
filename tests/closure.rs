#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        counter in closure is OK
        "1"
        "2"
        "3"
    }

    tests! {
        independent_counters in closure is OK
        "1"
        "2"
        "1"
    }

    tests! {
        shared_environment in closure is OK
        "original"
        "updated"
    }

    tests! {
        close_over_parameter in closure is OK
        "param"
    }

    tests! {
        capture_is_lexical_not_dynamic in closure is OK
        "global"
        "global"
    }

    tests! {
        closure_outlives_the_defining_call in closure is OK
        "local"
    }

    tests! {
        nested_closures in closure is OK
        "a"
        "b"
        "c"
    }
}
