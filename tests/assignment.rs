#[macro_use]
mod common;

#[cfg(test)]
mod assignment {
    tests! {
        produces_the_assigned_value in assignment is OK
        "2"
        "2"
    }

    tests! {
        right_associative in assignment is OK
        "3"
        "3"
    }

    tests! {
        updates_enclosing_scope in assignment is OK
        "inner"
        "inner"
    }

    tests! {
        invalid_target in assignment is ERR(65)
        "[line 1] Error at '=': Invalid assignment target."
    }

    tests! {
        grouping_is_not_a_target in assignment is ERR(65)
        "[line 2] Error at '=': Invalid assignment target."
    }
}
