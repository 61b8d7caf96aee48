pub mod demand;
pub mod identifiers;
pub mod impact_duration;
pub mod overall_rating;
pub mod percentage_change;
pub mod performance_score;
pub mod position;
pub mod position_scarcity;
pub mod stat_criteria;
pub mod thresholds;
