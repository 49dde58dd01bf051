// Contract of the local client control plane consumed by the monitor and scoring

use async_trait::async_trait;

use super::models::{ActionKind, GameSession};
use crate::error::ProphetError;
use crate::scoring::{GameRecord, Summoner, SummonerId};

/// One raw frame read from the event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFrame {
    Text(String),
    Binary(Vec<u8>),
    /// Ping/pong/close and anything else that carries no event.
    Control,
}

#[async_trait]
pub trait EventStream: Send {
    /// `None` once the stream has ended.
    async fn next_frame(&mut self) -> Option<Result<RawFrame, ProphetError>>;
    async fn close(&mut self);
}

#[async_trait]
pub trait ControlClient: Send + Sync {
    /// `None` resolves the locally authenticated player.
    async fn resolve_identity(&self, name: Option<&str>) -> Result<Summoner, ProphetError>;
    async fn summoner_by_id(&self, summoner_id: SummonerId) -> Result<Summoner, ProphetError>;
    /// Unfiltered history, most recent first.
    async fn list_recent_games(
        &self,
        summoner_id: SummonerId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<GameRecord>, ProphetError>;
    async fn fetch_game_detail(&self, game_id: i64) -> Result<GameRecord, ProphetError>;
    async fn current_conversation_id(&self) -> Result<String, ProphetError>;
    async fn list_conversation_members(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<SummonerId>, ProphetError>;
    async fn send_chat_message(&self, text: &str, conversation_id: &str) -> Result<(), ProphetError>;
    async fn accept_ready_check(&self) -> Result<(), ProphetError>;
    async fn submit_champion_action(
        &self,
        champion_id: i64,
        action_id: i64,
        kind: ActionKind,
    ) -> Result<(), ProphetError>;
    async fn current_game_session(&self) -> Result<GameSession, ProphetError>;
    async fn open_event_stream(&self) -> Result<Box<dyn EventStream>, ProphetError>;
}
