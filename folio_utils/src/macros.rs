/// Asserts that an expression matches a pattern, printing the value on failure.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only used by the predicate")]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    #[derive(Debug)]
    enum Outcome {
        Sent(u32),
        Skipped,
    }

    #[test]
    fn matches() {
        assert_matches!(Outcome::Sent(1), Outcome::Sent(_));
        assert_matches!(Outcome::Sent(2), Outcome::Sent(n) if *n == 2);
    }

    #[test]
    #[should_panic = "did not match pattern"]
    fn mismatch() {
        assert_matches!(Outcome::Skipped, Outcome::Sent(_));
    }
}
