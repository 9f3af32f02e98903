#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        fib in function is OK
        "55"
    }

    tests! {
        parameters_bind_by_position in function is OK
        "1 then 2"
    }

    tests! {
        body_must_be_a_block in function is ERR(65)
        "[line 1] Error at '123': Expect '{' before function body."
    }

    tests! {
        empty_body_returns_nil in function is OK
        "nil"
    }

    tests! {
        print_function in function is OK
        "<fn sayHi>"
        "<native fn>"
    }

    tests! {
        nested_call_with_arguments in function is OK
        "hello world"
    }

    tests! {
        local_functions_recurse in function is OK
        "2"
        "1"
        "0"
    }

    tests! {
        too_few_arguments in function is ERR(70)
        "Expected 2 arguments but got 1."
        "[line 2]"
    }

    tests! {
        too_many_arguments in function is ERR(70)
        "Expected 0 arguments but got 2."
        "[line 2]"
    }

    tests! {
        call_non_callable in function is ERR(70)
        "Can only call functions and classes."
        "[line 1]"
    }
}
