#[macro_use]
mod common;

#[cfg(test)]
mod _super {
    tests! {
        calls_the_superclass_method in super is OK
        "Fry until golden brown."
        "Pipe full of custard and coat with chocolate."
    }

    tests! {
        binds_this_to_the_subclass_instance in super is OK
        "B"
    }

    tests! {
        lookup_starts_above_the_declaring_class in super is OK
        "A method"
    }

    tests! {
        undefined_method in super is ERR(70)
        "Undefined property 'nope'."
        "[line 4]"
    }

    tests! {
        outside_of_a_class in super is ERR(65)
        "[line 1] Error at 'super': Can't use 'super' outside of a class."
    }

    tests! {
        without_a_superclass in super is ERR(65)
        "[line 2] Error at 'super': Can't use 'super' in a class with no superclass."
    }
}
