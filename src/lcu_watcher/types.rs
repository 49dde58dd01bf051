// Types for the game flow monitor

use serde::Serialize;
use std::sync::Mutex;

use crate::scoring::Summoner;
use crate::team_report::CoordinatorTiming;
use crate::utils::RetryPolicy;

/// What phase the live game is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GameFlowState {
    #[default]
    None,
    ChampSelect,
    ReadyCheck,
    InGame,
    Other,
}

impl GameFlowState {
    /// Map a gameflow phase string. Both spellings of champ select are seen in the wild.
    pub fn from_phase(phase: &str) -> Self {
        match phase {
            "ChampSelect" | "ChampionSelect" => Self::ChampSelect,
            "None" => Self::None,
            "InProgress" => Self::InGame,
            "ReadyCheck" => Self::ReadyCheck,
            _ => Self::Other,
        }
    }
}

/// Session state owned by one monitor and handed to its workflows.
#[derive(Debug, Default)]
pub struct SessionState {
    state: Mutex<GameFlowState>,
    summoner: Mutex<Option<Summoner>>,
}

impl SessionState {
    pub fn current_state(&self) -> GameFlowState {
        *self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Commit a new state and return the previous one.
    pub fn set_state(&self, next: GameFlowState) -> GameFlowState {
        let mut guard = self.state.lock().unwrap_or_else(|p| p.into_inner());
        std::mem::replace(&mut *guard, next)
    }

    pub fn current_summoner(&self) -> Option<Summoner> {
        self
            .summoner
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn set_summoner(&self, summoner: Option<Summoner>) {
        *self.summoner.lock().unwrap_or_else(|p| p.into_inner()) = summoner;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MonitorTiming {
    /// Local summoner confirmation after the stream opens
    pub identity_retry: RetryPolicy,
    pub coordinator: CoordinatorTiming,
}

impl Default for MonitorTiming {
    fn default() -> Self {
        Self {
            identity_retry: RetryPolicy::identity(),
            coordinator: CoordinatorTiming::default(),
        }
    }
}

/// Detached work spawned by a transition or a session update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    TeamReport,
    EnemyReport,
    AcceptReadyCheck,
    ChampSelectEvaluation,
}
