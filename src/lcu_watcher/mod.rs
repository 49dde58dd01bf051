// LCU watcher module - game flow state machine and the workflows it drives

mod logging;
mod session;
mod types;
mod watcher;


pub use logging::{append_console, console_snapshot, copy_console_to_clipboard};
pub use session::{evaluate_champ_select, find_local_action, LocalAction};
pub use types::{GameFlowState, MonitorTiming, SessionState, WorkflowKind};
pub use watcher::GameFlowMonitor;
