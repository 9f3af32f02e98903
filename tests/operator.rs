#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        precedence in operator is OK
        "7"
        "9"
        "8"
        "-4"
        "2.5"
        "true"
        "true"
        "false"
    }

    tests! {
        comparison in operator is OK
        "true"
        "false"
        "true"
        "true"
        "false"
        "true"
    }

    tests! {
        equality in operator is OK
        "true"
        "false"
        "false"
        "true"
        "false"
        "true"
        "false"
    }

    tests! {
        negate in operator is OK
        "-3"
        "3"
        "-3"
    }

    tests! {
        not in operator is OK
        "false"
        "true"
        "true"
        "false"
        "false"
    }

    tests! {
        add_number_to_string in operator is ERR(70)
        "Operands must be two numbers or two strings."
        "[line 1]"
    }

    tests! {
        subtract_string in operator is ERR(70)
        "Operands must be numbers."
        "[line 1]"
    }

    tests! {
        compare_strings in operator is ERR(70)
        "Operands must be numbers."
        "[line 1]"
    }

    tests! {
        negate_string in operator is ERR(70)
        "Operand must be a number."
        "[line 1]"
    }
}
