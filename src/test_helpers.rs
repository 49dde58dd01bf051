// Test helpers and mock collaborators shared by the component tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::clipboard::ClipboardWriter;
use crate::error::ProphetError;
use crate::lcu::{ActionKind, ControlClient, EventStream, GameSession, RawFrame};
use crate::scoring::{
    GameRecord, ParticipantIdentity, ParticipantStats, QueueKind, Summoner, SummonerId,
};

/// Side effects recorded by `MockLcu`, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    AcceptReadyCheck,
    ChampionAction {
        champion_id: i64,
        action_id: i64,
        kind: ActionKind,
    },
    Chat {
        text: String,
        conversation_id: String,
    },
    ConversationMembers,
    GameDetail(i64),
}

/// In-memory control plane
#[derive(Default)]
pub struct MockLcu {
    summoners: HashMap<SummonerId, Summoner>,
    local: Option<SummonerId>,
    identity_failures: AtomicUsize,
    histories: HashMap<SummonerId, Vec<GameRecord>>,
    failing_histories: HashSet<SummonerId>,
    details: HashMap<i64, GameRecord>,
    conversation: Option<String>,
    members: Vec<SummonerId>,
    session: Option<GameSession>,
    frames: Mutex<Option<Vec<Result<RawFrame, ProphetError>>>>,
    hold_stream_open: bool,
    calls: Mutex<Vec<MockCall>>,
}

impl MockLcu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_summoner(mut self, summoner_id: SummonerId, name: &str) -> Self {
        self.summoners.insert(
            summoner_id,
            Summoner {
                summoner_id,
                display_name: name.to_string(),
            },
        );
        self
    }

    pub fn with_local(mut self, summoner_id: SummonerId) -> Self {
        self.local = Some(summoner_id);
        self
    }

    /// The next `count` local identity lookups fail before one succeeds.
    pub fn with_identity_failures(self, count: usize) -> Self {
        self.identity_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn with_history(mut self, summoner_id: SummonerId, games: Vec<GameRecord>) -> Self {
        self.histories.insert(summoner_id, games);
        self
    }

    pub fn with_failing_history(mut self, summoner_id: SummonerId) -> Self {
        self.failing_histories.insert(summoner_id);
        self
    }

    /// Games without a registered detail fail every detail fetch.
    pub fn with_detail(mut self, game: GameRecord) -> Self {
        self.details.insert(game.game_id, game);
        self
    }

    pub fn with_conversation(mut self, conversation_id: &str, members: Vec<SummonerId>) -> Self {
        self.conversation = Some(conversation_id.to_string());
        self.members = members;
        self
    }

    pub fn with_session(mut self, session: GameSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Frames served by the next `open_event_stream`. Without a script the open fails.
    pub fn with_frames(self, frames: Vec<Result<RawFrame, ProphetError>>) -> Self {
        *self.frames.lock().unwrap() = Some(frames);
        self
    }

    /// Keep the stream pending once the scripted frames run out instead of ending it.
    pub fn holding_stream_open(mut self) -> Self {
        self.hold_stream_open = true;
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn chat_messages(&self) -> Vec<String> {
        self
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Chat { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn count_calls(&self, pred: impl Fn(&MockCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ControlClient for MockLcu {
    async fn resolve_identity(&self, name: Option<&str>) -> Result<Summoner, ProphetError> {
        match name {
            None => {
                let remaining = self.identity_failures.load(Ordering::SeqCst);
                if remaining > 0 {
                    self.identity_failures.store(remaining - 1, Ordering::SeqCst);
                    return Err(ProphetError::Request("client still starting".to_string()));
                }
                self
                    .local
                    .and_then(|id| self.summoners.get(&id).cloned())
                    .ok_or_else(|| ProphetError::Lookup("no local summoner".to_string()))
            }
            Some(name) => self
                .summoners
                .values()
                .find(|s| s.display_name == name)
                .cloned()
                .ok_or_else(|| ProphetError::Lookup(format!("no summoner named {}", name))),
        }
    }

    async fn summoner_by_id(&self, summoner_id: SummonerId) -> Result<Summoner, ProphetError> {
        self
            .summoners
            .get(&summoner_id)
            .cloned()
            .ok_or_else(|| ProphetError::Lookup(format!("summoner {}", summoner_id)))
    }

    async fn list_recent_games(
        &self,
        summoner_id: SummonerId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<GameRecord>, ProphetError> {
        if self.failing_histories.contains(&summoner_id) {
            return Err(ProphetError::Request("history unavailable".to_string()));
        }
        Ok(
            self
                .histories
                .get(&summoner_id)
                .map(|games| games.iter().skip(offset).take(limit).cloned().collect())
                .unwrap_or_default(),
        )
    }

    async fn fetch_game_detail(&self, game_id: i64) -> Result<GameRecord, ProphetError> {
        self.record(MockCall::GameDetail(game_id));
        self
            .details
            .get(&game_id)
            .cloned()
            .ok_or_else(|| ProphetError::Request(format!("game {} unavailable", game_id)))
    }

    async fn current_conversation_id(&self) -> Result<String, ProphetError> {
        self
            .conversation
            .clone()
            .ok_or_else(|| ProphetError::Request("no conversation".to_string()))
    }

    async fn list_conversation_members(
        &self,
        _conversation_id: &str,
    ) -> Result<Vec<SummonerId>, ProphetError> {
        self.record(MockCall::ConversationMembers);
        Ok(self.members.clone())
    }

    async fn send_chat_message(&self, text: &str, conversation_id: &str) -> Result<(), ProphetError> {
        self.record(MockCall::Chat {
            text: text.to_string(),
            conversation_id: conversation_id.to_string(),
        });
        Ok(())
    }

    async fn accept_ready_check(&self) -> Result<(), ProphetError> {
        self.record(MockCall::AcceptReadyCheck);
        Ok(())
    }

    async fn submit_champion_action(
        &self,
        champion_id: i64,
        action_id: i64,
        kind: ActionKind,
    ) -> Result<(), ProphetError> {
        self.record(MockCall::ChampionAction {
            champion_id,
            action_id,
            kind,
        });
        Ok(())
    }

    async fn current_game_session(&self) -> Result<GameSession, ProphetError> {
        self
            .session
            .clone()
            .ok_or_else(|| ProphetError::Request("no session".to_string()))
    }

    async fn open_event_stream(&self) -> Result<Box<dyn EventStream>, ProphetError> {
        let frames = self
            .frames
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| ProphetError::Connection("handshake refused".to_string()))?;
        Ok(Box::new(MockEventStream {
            frames: frames.into(),
            hold_open: self.hold_stream_open,
        }))
    }
}

pub struct MockEventStream {
    frames: VecDeque<Result<RawFrame, ProphetError>>,
    hold_open: bool,
}

#[async_trait]
impl EventStream for MockEventStream {
    async fn next_frame(&mut self) -> Option<Result<RawFrame, ProphetError>> {
        match self.frames.pop_front() {
            Some(frame) => Some(frame),
            None if self.hold_open => std::future::pending().await,
            None => None,
        }
    }

    async fn close(&mut self) {}
}

#[derive(Default)]
pub struct MockClipboard {
    writes: Mutex<Vec<String>>,
}

impl MockClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl ClipboardWriter for MockClipboard {
    fn write_text(&self, text: &str) -> Result<(), ProphetError> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Stats line for one participant
pub fn stats(team_id: i64, kills: i64, deaths: i64, assists: i64) -> ParticipantStats {
    ParticipantStats {
        team_id,
        kills,
        deaths,
        assists,
        ..Default::default()
    }
}

/// Full game record: participant ids are assigned in order, each mapped to its summoner.
pub fn detail_game(
    game_id: i64,
    created_at: DateTime<Utc>,
    players: Vec<(SummonerId, ParticipantStats)>,
) -> GameRecord {
    let mut participants = Vec::with_capacity(players.len());
    let mut identities = Vec::with_capacity(players.len());
    for (index, (summoner_id, mut p)) in players.into_iter().enumerate() {
        let participant_id = index as i64 + 1;
        p.participant_id = participant_id;
        participants.push(p);
        identities.push(ParticipantIdentity {
            participant_id,
            summoner_id,
        });
    }
    GameRecord {
        game_id,
        queue: QueueKind::RankedSolo,
        duration_sec: 1800,
        created_at,
        participants,
        identities,
    }
}

/// History listing entry: only the summoner's own participant is present.
pub fn history_game(
    game_id: i64,
    queue_id: i64,
    duration_sec: i64,
    summoner_id: SummonerId,
    kda: (i64, i64, i64),
) -> GameRecord {
    let mut game = detail_game(game_id, Utc::now(), vec![(summoner_id, stats(100, kda.0, kda.1, kda.2))]);
    game.queue = QueueKind::from_queue_id(queue_id);
    game.duration_sec = duration_sec;
    game
}

/// Ten-player detail where `summoner_id` sits on team 100 with the given stats
/// and every other player has an even, unremarkable line.
pub fn even_game(
    game_id: i64,
    created_at: DateTime<Utc>,
    summoner_id: SummonerId,
    own: ParticipantStats,
) -> GameRecord {
    let mut players = vec![(summoner_id, own)];
    for i in 1..5 {
        players.push((9000 + i, stats(100, 3, 3, 3)));
    }
    for i in 5..10 {
        players.push((9000 + i, stats(200, 3, 3, 3)));
    }
    detail_game(game_id, created_at, players)
}
