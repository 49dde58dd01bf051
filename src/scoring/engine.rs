use chrono::{DateTime, Duration as ChronoDuration, Utc};
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ScoreConfig;
use crate::error::ProphetError;
use crate::lcu::ControlClient;
use crate::utils::{retry_fixed, RetryPolicy};

use super::game_score::{calc_game_score, DEFAULT_SCORE};
use super::types::{GameRecord, Kda, SummonerId, UserScoreResult};

// History fetch, detail fan-out and recency-weighted aggregation

pub const HISTORY_LIMIT: usize = 20;
pub const MIN_GAME_DURATION_SEC: i64 = 900;
pub const CURRENT_WINDOW_HOURS: i64 = 5;
const CURRENT_WEIGHT: f64 = 0.8;
const OTHER_WEIGHT: f64 = 0.2;

/// Games that may influence a score: one of the four scored queues and at least 15 minutes long.
/// Input order is preserved.
pub fn filter_eligible(games: Vec<GameRecord>) -> Vec<GameRecord> {
    games
        .into_iter()
        .filter(|g| g.queue.is_scored() && g.duration_sec >= MIN_GAME_DURATION_SEC)
        .collect()
}

/// KDA of each listed game, oldest first. `games` comes most recent first.
pub fn recent_kda(summoner_id: SummonerId, games: &[GameRecord]) -> Vec<Kda> {
    games
        .iter()
        .rev()
        .filter_map(|g| {
            g.participant_for(summoner_id)
                .or_else(|| g.participants.first())
                .map(|p| p.kda())
        })
        .collect()
}

pub fn is_current(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - created_at <= ChronoDuration::hours(CURRENT_WINDOW_HOURS)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// `scored` holds `(game score, is current)`. An empty bucket borrows the overall average.
pub fn aggregate(scored: &[(f64, bool)]) -> f64 {
    let Some(overall) = mean(scored.iter().map(|(s, _)| *s)) else {
        return DEFAULT_SCORE;
    };
    let current = mean(scored.iter().filter(|(_, c)| *c).map(|(s, _)| *s)).unwrap_or(overall);
    let other = mean(scored.iter().filter(|(_, c)| !*c).map(|(s, _)| *s)).unwrap_or(overall);
    CURRENT_WEIGHT * current + OTHER_WEIGHT * other
}

pub struct ScoreEngine {
    client: Arc<dyn ControlClient>,
    config: Arc<ScoreConfig>,
    detail_retry: RetryPolicy,
}

impl ScoreEngine {
    pub fn new(client: Arc<dyn ControlClient>, config: Arc<ScoreConfig>) -> Self {
        Self {
            client,
            config,
            detail_retry: RetryPolicy::game_detail(),
        }
    }

    pub fn with_detail_retry(mut self, policy: RetryPolicy) -> Self {
        self.detail_retry = policy;
        self
    }

    /// Only an unresolvable identity is an error. History and detail failures degrade to the
    /// default score or a partial aggregate.
    pub async fn score_for(&self, summoner_id: SummonerId) -> Result<UserScoreResult, ProphetError> {
        self.score_at(summoner_id, Utc::now()).await
    }

    pub async fn score_at(
        &self,
        summoner_id: SummonerId,
        now: DateTime<Utc>,
    ) -> Result<UserScoreResult, ProphetError> {
        let summoner = self
            .client
            .summoner_by_id(summoner_id)
            .await
            .map_err(|e| {
                if e.is_lookup() {
                    e
                } else {
                    ProphetError::Lookup(e.to_string())
                }
            })?;

        let mut result = UserScoreResult {
            summoner_id,
            summoner_name: summoner.display_name,
            score: DEFAULT_SCORE,
            recent_kda: Vec::new(),
        };

        let history = match self
            .client
            .list_recent_games(summoner_id, 0, HISTORY_LIMIT)
            .await
        {
            Ok(games) => games,
            Err(e) => {
                warn!("Failed to list history for {}: {}", summoner_id, e);
                return Ok(result);
            }
        };

        let eligible = filter_eligible(history);
        result.recent_kda = recent_kda(summoner_id, &eligible);

        let details = join_all(eligible.iter().map(|g| self.fetch_detail(g.game_id))).await;

        let mut scored = Vec::with_capacity(details.len());
        for detail in details.into_iter().flatten() {
            match calc_game_score(summoner_id, &detail, &self.config) {
                Ok(breakdown) => {
                    debug!(
                        "game {} for {}: {:.2} [{}]",
                        detail.game_id,
                        summoner_id,
                        breakdown.value(),
                        breakdown.reasons_to_string()
                    );
                    scored.push((breakdown.value(), is_current(detail.created_at, now)));
                }
                Err(e) => debug!("Skipping game {}: {}", detail.game_id, e),
            }
        }

        result.score = aggregate(&scored);
        Ok(result)
    }

    async fn fetch_detail(&self, game_id: i64) -> Option<GameRecord> {
        match retry_fixed(self.detail_retry, || self.client.fetch_game_detail(game_id)).await {
            Ok(game) => Some(game),
            Err(e) => {
                warn!("Dropping game {} after failed detail fetch: {}", game_id, e);
                None
            }
        }
    }
}
