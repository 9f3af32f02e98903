#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        literals in number is OK
        "123"
        "987654"
        "0"
        "-0"
        "123.456"
        "-0.001"
    }

    tests! {
        integral_results_have_no_decimal_point in number is OK
        "2"
        "2.5"
    }

    tests! {
        nan_equality in number is OK
        "false"
        "true"
    }

    tests! {
        leading_dot in number is ERR(65)
        "[line 1] Error at '.': Expect expression."
    }

    tests! {
        trailing_dot_is_a_property_access in number is ERR(65)
        "[line 1] Error at ';': Expect property name after '.'."
    }
}
