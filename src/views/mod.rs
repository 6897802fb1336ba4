pub mod benchmarks;
pub mod categories;
pub mod deploy;
pub mod rank;
