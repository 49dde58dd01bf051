// reqwest + tokio-tungstenite implementation of the control plane

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine};
use futures_util::{SinkExt, StreamExt};
use native_tls::TlsConnector;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{Connector, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use super::api::{ControlClient, EventStream, RawFrame};
use super::events::SUBSCRIBE_JSON_API_EVENTS;
use super::lockfile::LcuCredentials;
use super::models::{
    joined_room_members, ActionKind, ConversationDto, ConversationMsgDto, GameDto, GameSession,
    GameflowSessionDto, MatchListDto, SummonerDto, CONVERSATION_TYPE_CHAMP_SELECT,
};
use crate::error::ProphetError;
use crate::scoring::{GameRecord, Summoner, SummonerId};

pub struct LcuClient {
    http: reqwest::Client,
    port: u16,
    auth_header: String,
}

impl LcuClient {
    pub fn new(creds: &LcuCredentials) -> Result<Self, ProphetError> {
        // The LCU serves a self-signed certificate on localhost
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| ProphetError::Connection(format!("Failed to create HTTP client: {}", e)))?;
        let auth = general_purpose::STANDARD.encode(format!("riot:{}", creds.token));
        Ok(Self {
            http,
            port: creds.port,
            auth_header: format!("Basic {}", auth),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("https://127.0.0.1:{}{}", self.port, path)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, ProphetError> {
        let mut req = self
            .http
            .request(method.clone(), self.url(path))
            .header("Authorization", &self.auth_header);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await?;
        if !response.status().is_success() {
            return Err(ProphetError::Request(format!(
                "{} {} returned {}",
                method,
                path,
                response.status()
            )));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProphetError> {
        let response = self.request(Method::GET, path, None).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, NON_ALPHANUMERIC).to_string()
}

#[async_trait]
impl ControlClient for LcuClient {
    async fn resolve_identity(&self, name: Option<&str>) -> Result<Summoner, ProphetError> {
        let path = match name {
            None => "/lol-summoner/v1/current-summoner".to_string(),
            Some(name) => format!("/lol-summoner/v1/summoners?name={}", encode(name)),
        };
        let dto: SummonerDto = self
            .get_json(&path)
            .await
            .map_err(|e| ProphetError::Lookup(e.to_string()))?;
        if dto.summoner_id <= 0 {
            return Err(ProphetError::Lookup(format!("No summoner behind {}", path)));
        }
        Ok(dto.into())
    }

    async fn summoner_by_id(&self, summoner_id: SummonerId) -> Result<Summoner, ProphetError> {
        let dto: SummonerDto = self
            .get_json(&format!("/lol-summoner/v1/summoners/{}", summoner_id))
            .await
            .map_err(|e| ProphetError::Lookup(format!("summoner {}: {}", summoner_id, e)))?;
        Ok(dto.into())
    }

    async fn list_recent_games(
        &self,
        summoner_id: SummonerId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<GameRecord>, ProphetError> {
        let path = format!(
            "/lol-match-history/v3/matchlist/account/{}?begIndex={}&endIndex={}",
            summoner_id,
            offset,
            offset + limit
        );
        let list: MatchListDto = self.get_json(&path).await?;
        Ok(list.games.games.into_iter().map(GameRecord::from).collect())
    }

    async fn fetch_game_detail(&self, game_id: i64) -> Result<GameRecord, ProphetError> {
        let dto: GameDto = self
            .get_json(&format!("/lol-match-history/v1/games/{}", game_id))
            .await?;
        Ok(dto.into())
    }

    async fn current_conversation_id(&self) -> Result<String, ProphetError> {
        let conversations: Vec<ConversationDto> = self.get_json("/lol-chat/v1/conversations").await?;
        conversations
            .into_iter()
            .find(|c| c.kind == CONVERSATION_TYPE_CHAMP_SELECT)
            .map(|c| c.id)
            .ok_or_else(|| ProphetError::Request("No champion select conversation open".to_string()))
    }

    async fn list_conversation_members(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<SummonerId>, ProphetError> {
        let messages: Vec<ConversationMsgDto> = self
            .get_json(&format!(
                "/lol-chat/v1/conversations/{}/messages",
                encode(conversation_id)
            ))
            .await?;
        Ok(joined_room_members(&messages))
    }

    async fn send_chat_message(&self, text: &str, conversation_id: &str) -> Result<(), ProphetError> {
        let payload = serde_json::json!({
                "body": text,
                "type": "chat"
        });
        self
            .request(
                Method::POST,
                &format!("/lol-chat/v1/conversations/{}/messages", encode(conversation_id)),
                Some(payload),
            )
            .await?;
        Ok(())
    }

    async fn accept_ready_check(&self) -> Result<(), ProphetError> {
        self
            .request(Method::POST, "/lol-matchmaking/v1/ready-check/accept", None)
            .await?;
        Ok(())
    }

    async fn submit_champion_action(
        &self,
        champion_id: i64,
        action_id: i64,
        kind: ActionKind,
    ) -> Result<(), ProphetError> {
        let payload = serde_json::json!({
                "championId": champion_id,
                "type": kind.as_str(),
                "completed": true
        });
        self
            .request(
                Method::PATCH,
                &format!("/lol-champ-select/v1/session/actions/{}", action_id),
                Some(payload),
            )
            .await?;
        Ok(())
    }

    async fn current_game_session(&self) -> Result<GameSession, ProphetError> {
        let dto: GameflowSessionDto = self.get_json("/lol-gameflow/v1/session").await?;
        Ok(dto.into())
    }

    async fn open_event_stream(&self) -> Result<Box<dyn EventStream>, ProphetError> {
        let ws_url = format!("wss://127.0.0.1:{}/", self.port);
        let tls = TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| ProphetError::Connection(format!("Failed to build TLS connector: {}", e)))?;

        let mut request = ws_url
            .as_str()
            .into_client_request()
            .map_err(|e| ProphetError::Connection(format!("Invalid URL {}: {}", ws_url, e)))?;
        let auth_value = self
            .auth_header
            .parse()
            .map_err(|_| ProphetError::Connection("Invalid authorization header".to_string()))?;
        let protocol = "wamp"
            .parse()
            .map_err(|_| ProphetError::Connection("Invalid protocol header".to_string()))?;
        request.headers_mut().insert("Authorization", auth_value);
        request.headers_mut().insert("Sec-WebSocket-Protocol", protocol);

        debug!("Connecting to LCU WebSocket at {}", ws_url);
        let (mut socket, _response) = tokio_tungstenite::connect_async_tls_with_config(
            request,
            None,
            false,
            Some(Connector::NativeTls(tls)),
        )
        .await
        .map_err(|e| ProphetError::Connection(format!("WebSocket connect failed: {}", e)))?;

        // Subscribe to all JSON API events
        socket
            .send(Message::Text(SUBSCRIBE_JSON_API_EVENTS.into()))
            .await
            .map_err(|e| ProphetError::Connection(format!("Subscribe failed: {}", e)))?;

        Ok(Box::new(LcuEventStream { socket }))
    }
}

pub struct LcuEventStream {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl EventStream for LcuEventStream {
    async fn next_frame(&mut self) -> Option<Result<RawFrame, ProphetError>> {
        let msg = self.socket.next().await?;
        Some(match msg {
            Ok(Message::Text(text)) => Ok(RawFrame::Text(text.to_string())),
            Ok(Message::Binary(bytes)) => Ok(RawFrame::Binary(bytes.to_vec())),
            Ok(_) => Ok(RawFrame::Control),
            Err(e) => Err(e.into()),
        })
    }

    async fn close(&mut self) {
        if let Err(e) = self.socket.close(None).await {
            warn!("Failed to close LCU WebSocket cleanly: {}", e);
        }
    }
}
