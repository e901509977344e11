//! CLI command implementations

pub mod foods;
pub mod lookup;
pub mod serve;
pub mod suggest;
