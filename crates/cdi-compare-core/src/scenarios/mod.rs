pub mod aggregator;
pub mod terms;
