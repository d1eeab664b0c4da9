//! forest-util: seeded randomness for exercising `avl-forest`.
//!
//! [`Fuzzer`] wraps a reproducible xoshiro256** generator; [`ops`] turns it
//! into scripts of container operations that tests replay against both a
//! tree and a reference model.

pub mod fuzzer;
pub mod ops;

pub use fuzzer::Fuzzer;
pub use ops::{op_script, Op, ScriptOptions};
