#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    tests! {
        or_returns_operand_values in logical_operator is OK
        "fallback"
        "first"
        "second"
    }

    tests! {
        and_returns_operand_values in logical_operator is OK
        "nil"
        "false"
        "2"
    }

    tests! {
        short_circuit in logical_operator is OK
        "left"
        "left"
        "right"
    }
}
