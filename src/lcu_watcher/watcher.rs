// Game flow monitor using the LCU WebSocket event stream

use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use super::logging::append_console;
use super::session::evaluate_champ_select;
use super::types::{GameFlowState, MonitorTiming, SessionState, WorkflowKind};
use crate::clipboard::ClipboardWriter;
use crate::config::{AppConfig, ConfigHandle};
use crate::error::ProphetError;
use crate::lcu::events::{parse_lcu_ws_event, CHAMP_SELECT_SESSION_URI, GAMEFLOW_PHASE_URI};
use crate::lcu::{ChampSelectSession, ControlClient, RawFrame};
use crate::team_report::TeamCoordinator;
use crate::utils::retry_fixed;

pub struct GameFlowMonitor {
    client: Arc<dyn ControlClient>,
    clipboard: Arc<dyn ClipboardWriter>,
    config: ConfigHandle,
    session: Arc<SessionState>,
    timing: MonitorTiming,
    tracker: TaskTracker,
    stop: CancellationToken,
}

impl GameFlowMonitor {
    pub fn new(
        client: Arc<dyn ControlClient>,
        clipboard: Arc<dyn ClipboardWriter>,
        config: ConfigHandle,
        session: Arc<SessionState>,
    ) -> Self {
        Self {
            client,
            clipboard,
            config,
            session,
            timing: MonitorTiming::default(),
            tracker: TaskTracker::new(),
            stop: CancellationToken::new(),
        }
    }

    pub fn with_timing(mut self, timing: MonitorTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_stop_token(mut self, stop: CancellationToken) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_token(&self) -> CancellationToken {
        self.stop.clone()
    }

    pub fn current_state(&self) -> GameFlowState {
        self.session.current_state()
    }

    /// Wait until every workflow spawned so far has finished.
    pub async fn wait_for_workflows(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Open the stream, confirm the local summoner, then read events until the stream fails,
    /// ends, or the stop token fires. Only a stop returns `Ok`.
    pub async fn start(&self) -> Result<(), ProphetError> {
        let mut stream = self.client.open_event_stream().await.map_err(|e| {
            if matches!(e, ProphetError::Connection(_)) {
                e
            } else {
                ProphetError::Connection(e.to_string())
            }
        })?;

        let summoner = match retry_fixed(self.timing.identity_retry, || {
            self.client.resolve_identity(None)
        })
        .await
        {
            Ok(summoner) => summoner,
            Err(e) => {
                stream.close().await;
                return Err(ProphetError::Connection(format!(
                    "Failed to confirm local summoner: {}",
                    e
                )));
            }
        };
        info!(
            "Connected as {} ({})",
            summoner.display_name, summoner.summoner_id
        );
        append_console(&format!("Connected as {}", summoner.display_name));
        self.session.set_summoner(Some(summoner));

        loop {
            let frame = tokio::select! {
                _ = self.stop.cancelled() => break,
                frame = stream.next_frame() => frame,
            };
            match frame {
                Some(Ok(RawFrame::Text(text))) => self.handle_text_frame(&text),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => return Err(ProphetError::Stream("Event stream closed".to_string())),
            }
        }

        stream.close().await;
        info!("Game flow monitor stopped");
        Ok(())
    }

    /// Route one text frame. Anything that is not a recognised event is dropped.
    pub fn handle_text_frame(&self, text: &str) {
        let Some(event) = parse_lcu_ws_event(text) else {
            return;
        };
        match event.uri.as_str() {
            GAMEFLOW_PHASE_URI => {
                if let Some(phase) = event.data.as_str() {
                    self.on_game_flow_update(phase);
                }
            }
            CHAMP_SELECT_SESSION_URI => {
                match serde_json::from_value::<ChampSelectSession>(event.data) {
                    Ok(session) => self.on_champ_select_session(session),
                    Err(e) => debug!("Ignoring champ select {} event: {}", event.event_type, e),
                }
            }
            _ => {}
        }
    }

    pub fn on_game_flow_update(&self, phase: &str) -> GameFlowState {
        let next = GameFlowState::from_phase(phase);
        let previous = self.session.set_state(next);
        info!("Phase event: {:?} -> {:?} ({})", previous, next, phase);

        let config = self.config.snapshot();
        match next {
            GameFlowState::ChampSelect => {
                append_console("Entered champion select, scoring the team");
                let coordinator = self.coordinator(config);
                self.spawn(WorkflowKind::TeamReport, async move {
                    coordinator.champ_select_workflow().await;
                });
            }
            GameFlowState::InGame => {
                let coordinator = self.coordinator(config);
                self.spawn(WorkflowKind::EnemyReport, async move {
                    coordinator.enemy_workflow().await;
                });
            }
            GameFlowState::ReadyCheck if config.client.auto_accept_game => {
                let client = self.client.clone();
                self.spawn(WorkflowKind::AcceptReadyCheck, async move {
                    if let Err(e) = client.accept_ready_check().await {
                        warn!("Failed to accept ready check: {}", e);
                    }
                });
            }
            _ => {}
        }
        next
    }

    pub fn on_champ_select_session(&self, session: ChampSelectSession) {
        let client = self.client.clone();
        let config = self.config.snapshot();
        self.spawn(WorkflowKind::ChampSelectEvaluation, async move {
            if let Err(e) = evaluate_champ_select(client.as_ref(), &session, &config.client).await {
                warn!("Failed to submit champ select action: {}", e);
            }
        });
    }

    fn coordinator(&self, config: Arc<AppConfig>) -> TeamCoordinator {
        let self_id = self.session.current_summoner().map(|s| s.summoner_id);
        TeamCoordinator::new(self.client.clone(), self.clipboard.clone(), config, self_id)
            .with_timing(self.timing.coordinator)
    }

    fn spawn<F>(&self, kind: WorkflowKind, workflow: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        debug!("Spawning {:?}", kind);
        self.tracker.spawn(workflow);
    }
}
