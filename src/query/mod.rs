pub mod aggregation;
pub mod condition;
pub mod pipeline;
pub mod predicates;

pub use aggregation::{DefectAggregates, SeverityCounter};
pub use condition::{CompiledCondition, QueryCondition, TimeRange};
pub use pipeline::{filter_and_aggregate, FilterOutcome};
