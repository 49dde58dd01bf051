// Team report module - roster discovery, scoring fan-out and report dispatch

mod coordinator;
pub mod format;
pub mod roster;

#[cfg(test)]
mod tests;

pub use coordinator::{plan_dispatch, CoordinatorTiming, Dispatch, TeamCoordinator};
pub use format::{classify_horse, format_line, ReportLine, ReportSide};
pub use roster::{discover_roster, partition_session_rosters, TeamRoster};
