// Team and enemy scoring workflows and report dispatch

use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use super::format::{format_line, ReportLine, ReportSide};
use super::roster::{discover_roster, partition_session_rosters};
use crate::clipboard::ClipboardWriter;
use crate::config::AppConfig;
use crate::lcu::{ControlClient, GAMEFLOW_PHASE_IN_PROGRESS};
use crate::lcu_watcher::append_console;
use crate::scoring::{ScoreEngine, SummonerId, UserScoreResult};
use crate::utils::RetryPolicy;

#[derive(Debug, Clone, Copy)]
pub struct CoordinatorTiming {
    pub roster_poll_attempts: usize,
    pub roster_poll_interval: Duration,
    /// Gap between two individual chat messages
    pub chat_spacing: Duration,
    pub detail_retry: RetryPolicy,
}

impl Default for CoordinatorTiming {
    fn default() -> Self {
        Self {
            roster_poll_attempts: 3,
            roster_poll_interval: Duration::from_secs(1),
            chat_spacing: Duration::from_millis(1500),
            detail_retry: RetryPolicy::game_detail(),
        }
    }
}

/// Where a champ-select report goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Clipboard(String),
    Individual(Vec<String>),
    Merged(String),
    Nothing,
}

/// Decide the champ-select dispatch from the formatted lines and the configuration snapshot.
pub fn plan_dispatch(
    lines: &[ReportLine],
    config: &AppConfig,
    self_id: Option<SummonerId>,
) -> Dispatch {
    let client = &config.client;
    let muted_self =
        |line: &ReportLine| !client.should_send_self_horse && self_id == Some(line.summoner_id);

    if !client.auto_send_team_horse {
        let text = lines
            .iter()
            .filter(|l| !muted_self(l))
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        return if text.is_empty() {
            Dispatch::Nothing
        } else {
            Dispatch::Clipboard(text)
        };
    }

    // Merged messages carry every line
    if config.score.merge_msg {
        return if lines.is_empty() {
            Dispatch::Nothing
        } else {
            Dispatch::Merged(
                lines
                    .iter()
                    .map(|l| l.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        };
    }

    // Lines without a tier are announced
    let tier_announced = |line: &ReportLine| {
        line
            .horse_index
            .and_then(|i| client.choose_send_horse_msg.get(i).copied())
            .unwrap_or(true)
    };
    let announced: Vec<String> = lines
        .iter()
        .filter(|l| !muted_self(l) && tier_announced(l))
        .map(|l| l.text.clone())
        .collect();

    if announced.is_empty() {
        Dispatch::Nothing
    } else {
        Dispatch::Individual(announced)
    }
}

pub struct TeamCoordinator {
    client: Arc<dyn ControlClient>,
    clipboard: Arc<dyn ClipboardWriter>,
    config: Arc<AppConfig>,
    self_id: Option<SummonerId>,
    timing: CoordinatorTiming,
}

impl TeamCoordinator {
    pub fn new(
        client: Arc<dyn ControlClient>,
        clipboard: Arc<dyn ClipboardWriter>,
        config: Arc<AppConfig>,
        self_id: Option<SummonerId>,
    ) -> Self {
        Self {
            client,
            clipboard,
            config,
            self_id,
            timing: CoordinatorTiming::default(),
        }
    }

    pub fn with_timing(mut self, timing: CoordinatorTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Score every id concurrently. Failed players are left out; the rest keep roster order.
    pub async fn score_all(&self, ids: &[SummonerId]) -> Vec<UserScoreResult> {
        let engine = ScoreEngine::new(self.client.clone(), Arc::new(self.config.score.clone()))
            .with_detail_retry(self.timing.detail_retry);
        let results: Mutex<HashMap<SummonerId, UserScoreResult>> = Mutex::new(HashMap::new());

        join_all(ids.iter().map(|&id| {
            let engine = &engine;
            let results = &results;
            async move {
                match engine.score_for(id).await {
                    Ok(score) => {
                        if let Ok(mut map) = results.lock() {
                            map.insert(id, score);
                        }
                    }
                    Err(e) => error!("Failed to score summoner {}: {}", id, e),
                }
            }
        }))
        .await;

        let mut map = results.into_inner().unwrap_or_else(|p| p.into_inner());
        ids.iter().filter_map(|id| map.remove(id)).collect()
    }

    fn format_all(&self, side: ReportSide, results: &[UserScoreResult]) -> Vec<ReportLine> {
        results
            .iter()
            .map(|r| format_line(side, r, &self.config.score.horse, &self.config.client))
            .collect()
    }

    fn write_clipboard(&self, text: &str) {
        if let Err(e) = self.clipboard.write_text(text) {
            warn!("Failed to copy report: {}", e);
        }
    }

    /// Champ select: find the team, score it, then announce or copy the report.
    pub async fn champ_select_workflow(&self) {
        let deadline =
            Instant::now() + Duration::from_secs(self.config.client.choose_champ_send_msg_delay_sec);

        let Some(roster) = discover_roster(
            self.client.as_ref(),
            self.timing.roster_poll_attempts,
            self.timing.roster_poll_interval,
        )
        .await
        else {
            warn!("No champ select chat room found, skipping team report");
            return;
        };
        debug!("Team members: {:?}", roster.members);

        let results = self.score_all(&roster.members).await;
        let lines = self.format_all(ReportSide::Team, &results);
        for line in &lines {
            append_console(&line.text);
        }

        tokio::time::sleep_until(deadline).await;

        match plan_dispatch(&lines, &self.config, self.self_id) {
            Dispatch::Clipboard(text) => {
                self.write_clipboard(&text);
                append_console("Team report copied to clipboard");
            }
            Dispatch::Individual(messages) => {
                for (i, msg) in messages.iter().enumerate() {
                    if i > 0 {
                        tokio::time::sleep(self.timing.chat_spacing).await;
                    }
                    if let Err(e) = self
                        .client
                        .send_chat_message(msg, &roster.conversation_id)
                        .await
                    {
                        warn!("Failed to send team line: {}", e);
                    }
                }
            }
            Dispatch::Merged(text) => {
                if let Err(e) = self
                    .client
                    .send_chat_message(&text, &roster.conversation_id)
                    .await
                {
                    warn!("Failed to send team report: {}", e);
                }
            }
            Dispatch::Nothing => debug!("Nothing to dispatch for team report"),
        }
    }

    /// In game: score the opposing roster and copy the report. Never posted to chat.
    pub async fn enemy_workflow(&self) {
        let session = match self.client.current_game_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!("Failed to query game session: {}", e);
                return;
            }
        };
        if session.phase != GAMEFLOW_PHASE_IN_PROGRESS {
            debug!("Game session is in {}, not scouting", session.phase);
            return;
        }
        let Some(self_id) = self.self_id else {
            debug!("Local summoner unknown, not scouting");
            return;
        };
        let Some((_, enemies)) = partition_session_rosters(self_id, &session) else {
            debug!("Summoner {} is on neither roster", self_id);
            return;
        };
        if enemies.is_empty() {
            return;
        }
        debug!("Enemy members: {:?}", enemies);

        let results = self.score_all(&enemies).await;
        let lines = self.format_all(ReportSide::Enemy, &results);
        for line in &lines {
            append_console(&line.text);
        }
        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if !text.is_empty() {
            self.write_clipboard(&text);
            info!("Enemy report copied to clipboard ({} players)", lines.len());
        }
    }
}
