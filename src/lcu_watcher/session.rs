// Champ select session evaluation for auto pick and ban

use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::ProphetError;
use crate::lcu::{ActionKind, ChampSelectSession, ControlClient};

/// The local player's action currently waiting for input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalAction {
    pub action_id: i64,
    pub kind: ActionKind,
}

/// First in-progress pick or ban of the local cell, scanning groups then actions in order.
pub fn find_local_action(session: &ChampSelectSession) -> Option<LocalAction> {
    session
        .actions
        .iter()
        .flatten()
        .find(|a| {
            a.actor_cell_id == session.local_player_cell_id
                && a.is_in_progress
                && matches!(a.kind, ActionKind::Pick | ActionKind::Ban)
        })
        .map(|a| LocalAction {
            action_id: a.id,
            kind: a.kind,
        })
}

/// Configured champion for this kind of action. Zero means disabled.
pub fn configured_champion(kind: ActionKind, config: &ClientConfig) -> Option<i64> {
    let champion_id = match kind {
        ActionKind::Pick => config.auto_pick_champ_id,
        ActionKind::Ban => config.auto_ban_champ_id,
        ActionKind::Other => 0,
    };
    (champion_id > 0).then_some(champion_id)
}

/// Submit the configured pick or ban if the local player is up. Returns what was submitted.
pub async fn evaluate_champ_select(
    client: &dyn ControlClient,
    session: &ChampSelectSession,
    config: &ClientConfig,
) -> Result<Option<(i64, LocalAction)>, ProphetError> {
    let Some(action) = find_local_action(session) else {
        return Ok(None);
    };
    let Some(champion_id) = configured_champion(action.kind, config) else {
        debug!("No auto {} configured", action.kind.as_str());
        return Ok(None);
    };
    client
        .submit_champion_action(champion_id, action.action_id, action.kind)
        .await?;
    info!(
        "Auto {} champion {} on action {}",
        action.kind.as_str(),
        champion_id,
        action.action_id
    );
    Ok(Some((champion_id, action)))
}
