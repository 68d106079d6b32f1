//! Shared harness for end-to-end program tests.
//!
//! `test_case!` declares one module per program with a test for each
//! expectation given:
//!
//! - `output`: what [`jam::execute`] prints
//! - `js`: what [`jam::transpile`] renders

#[macro_export]
macro_rules! test_case {
    (
        $name:ident,
        input: $input:expr,
        $(output: $output:expr,)?
        $(js: $js:expr,)?
    ) => {
        mod $name {
            #[allow(unused_imports)]
            use super::*;
            #[allow(unused_imports)]
            use pretty_assertions::assert_eq;

            $(
                #[test]
                fn output() {
                    assert_eq!(jam::execute($input), $output);
                }
            )?

            $(
                #[test]
                fn js() {
                    assert_eq!(jam::transpile($input).expect("transpile failed"), $js);
                }
            )?
        }
    };
}
