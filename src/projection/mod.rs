//! Projection engine for buyback, LP, and yield time series

mod engine;
mod schedule;
mod table;

pub use engine::{
    ProjectionEngine, ProjectionSettings, DEFAULT_HORIZON_MONTHS, DEFAULT_PROTOCOL_SHARE,
    DEFAULT_START_MONTH, WEEKS_PER_MONTH, WEEKS_PER_YEAR,
};
pub use schedule::{build_schedule, RevenueMode, SchedulePoint};
pub use table::{PeriodRow, ProjectionSummary, ProjectionTable};
