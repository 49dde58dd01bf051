// Application facade: monitor lifecycle, configuration and on-demand lookups

use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clipboard::ClipboardWriter;
use crate::config::{AppConfig, ConfigHandle};
use crate::error::{ProphetError, QueryError};
use crate::lcu::{read_lockfile_once, ControlClient, LcuClient};
use crate::lcu_watcher::{append_console, GameFlowMonitor, GameFlowState, MonitorTiming, SessionState};
use crate::scoring::{ScoreEngine, Summoner};
use crate::team_report::classify_horse;
use crate::team_report::format::recent_kda_text;

/// Wait between two connection attempts
pub const RECONNECT_COOLDOWN: Duration = Duration::from_secs(1);

/// Result of an on-demand lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorseQuery {
    pub name: String,
    pub score: f64,
    pub kda: String,
    pub horse: String,
}

pub struct Prophet {
    config: ConfigHandle,
    session: Arc<SessionState>,
    clipboard: Arc<dyn ClipboardWriter>,
    client: RwLock<Option<Arc<dyn ControlClient>>>,
    stop: CancellationToken,
    timing: MonitorTiming,
    cooldown: Duration,
}

impl Prophet {
    pub fn new(config: AppConfig, clipboard: Arc<dyn ClipboardWriter>) -> Self {
        Self {
            config: ConfigHandle::new(config),
            session: Arc::new(SessionState::default()),
            clipboard,
            client: RwLock::new(None),
            stop: CancellationToken::new(),
            timing: MonitorTiming::default(),
            cooldown: RECONNECT_COOLDOWN,
        }
    }

    pub fn with_timing(mut self, timing: MonitorTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn current_state(&self) -> GameFlowState {
        self.session.current_state()
    }

    pub fn current_summoner(&self) -> Option<Summoner> {
        self.session.current_summoner()
    }

    pub fn config(&self) -> Arc<AppConfig> {
        self.config.snapshot()
    }

    /// Replace the configuration. Running workflows keep their snapshot.
    pub fn update_config(&self, config: AppConfig) -> Result<(), ProphetError> {
        self.config.update(config)?;
        info!("Configuration updated");
        Ok(())
    }

    pub fn clipboard(&self) -> Arc<dyn ClipboardWriter> {
        self.clipboard.clone()
    }

    pub fn stop(&self) {
        self.stop.cancel();
    }

    pub fn attach_client(&self, client: Option<Arc<dyn ControlClient>>) {
        match self.client.write() {
            Ok(mut guard) => *guard = client,
            Err(poisoned) => *poisoned.into_inner() = client,
        }
    }

    fn client(&self) -> Option<Arc<dyn ControlClient>> {
        self.client
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Connect and monitor until `stop()`, reconnecting after every failed or ended cycle.
    pub async fn run_monitor(&self) {
        append_console("Prophet started, waiting for the League client");
        while !self.stop.is_cancelled() {
            match self.connect_once().await {
                Ok(()) => debug!("Monitor cycle stopped"),
                Err(e @ ProphetError::Connection(_)) => debug!("Monitor cycle failed: {}", e),
                Err(e) => warn!("Monitor cycle ended: {}", e),
            }
            self.session.set_summoner(None);
            self.attach_client(None);

            tokio::select! {
                _ = self.stop.cancelled() => break,
                _ = tokio::time::sleep(self.cooldown) => {}
            }
        }
        info!("Prophet stopped");
    }

    async fn connect_once(&self) -> Result<(), ProphetError> {
        let config = self.config.snapshot();
        let creds = read_lockfile_once(&config.league_paths).ok_or_else(|| {
            ProphetError::Connection("League client lockfile not found".to_string())
        })?;
        debug!("Using lockfile {}", creds.lockfile_path.display());
        let client: Arc<dyn ControlClient> = Arc::new(LcuClient::new(&creds)?);
        self.monitor_with(client).await
    }

    /// One monitor cycle over an already built client.
    pub async fn monitor_with(&self, client: Arc<dyn ControlClient>) -> Result<(), ProphetError> {
        self.attach_client(Some(client.clone()));
        let monitor = GameFlowMonitor::new(
            client,
            self.clipboard.clone(),
            self.config.clone(),
            self.session.clone(),
        )
        .with_timing(self.timing)
        .with_stop_token(self.stop.child_token());
        monitor.start().await
    }

    /// Score one player on demand. An empty name means the local player.
    pub async fn score_for(&self, name: Option<&str>) -> Result<HorseQuery, QueryError> {
        let client = self.client().ok_or(QueryError::System)?;
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let summoner = match name {
            None => self.session.current_summoner().ok_or(QueryError::System)?,
            Some(name) => client.resolve_identity(Some(name)).await.map_err(|e| {
                debug!("Lookup of {} failed: {}", name, e);
                QueryError::from(e)
            })?,
        };

        let config = self.config.snapshot();
        let engine = ScoreEngine::new(client, Arc::new(config.score.clone()))
            .with_detail_retry(self.timing.coordinator.detail_retry);
        let result = engine
            .score_for(summoner.summoner_id)
            .await
            .map_err(|e| {
                warn!("Scoring {} failed: {}", summoner.summoner_id, e);
                QueryError::System
            })?;

        let horse = classify_horse(result.score, &config.score.horse)
            .and_then(|i| config.client.horse_name_conf.get(i))
            .cloned()
            .unwrap_or_default();
        Ok(HorseQuery {
            name: summoner.display_name,
            score: result.score,
            kda: recent_kda_text(&result.recent_kda),
            horse,
        })
    }
}
