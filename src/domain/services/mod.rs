pub mod performance_comparator;
pub mod stat_normalizer;
