// LCU module - access to the local client's REST API and event stream

mod api;
mod client;
pub mod events;
pub mod lockfile;
pub mod models;

pub use api::{ControlClient, EventStream, RawFrame};
pub use client::{LcuClient, LcuEventStream};
pub use lockfile::{read_lockfile_once, LcuCredentials};
pub use models::{
    ActionKind, ChampSelectAction, ChampSelectSession, GameSession, GAMEFLOW_PHASE_IN_PROGRESS,
};
