#![allow(dead_code)]

pub mod factory;
pub mod shared_txn;
pub mod test_state;

pub use test_state::build_test_state;
