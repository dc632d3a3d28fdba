//! Test modules relocated from implementation files.

mod operators_tests;
