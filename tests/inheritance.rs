#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        inherit_methods in inheritance is OK
        "from A"
    }

    tests! {
        override_methods in inheritance is OK
        "from B"
    }

    tests! {
        inherited_initializer in inheritance is OK
        "3"
    }

    tests! {
        superclass_must_be_a_class in inheritance is ERR(70)
        "Superclass must be a class."
        "[line 2]"
    }

    tests! {
        function_is_not_a_superclass in inheritance is ERR(70)
        "Superclass must be a class."
        "[line 2]"
    }

    tests! {
        undefined_superclass in inheritance is ERR(70)
        "Undefined variable 'Missing'."
        "[line 1]"
    }

    tests! {
        inherit_from_itself in inheritance is ERR(65)
        "[line 1] Error at 'Foo': A class can't inherit from itself."
    }
}
