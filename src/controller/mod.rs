//! API Controller modules

pub mod statements;
