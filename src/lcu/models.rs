// Wire models of the local client API and their conversion into scoring records

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::scoring::{GameRecord, ParticipantIdentity, ParticipantStats, QueueKind, Summoner};

pub const CONVERSATION_TYPE_CHAMP_SELECT: &str = "championSelect";
pub const CONVERSATION_MSG_TYPE_SYSTEM: &str = "system";
pub const JOINED_ROOM_MSG: &str = "joined_room";
pub const GAMEFLOW_PHASE_IN_PROGRESS: &str = "InProgress";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    #[serde(default)]
    pub summoner_id: i64,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
}

impl From<SummonerDto> for Summoner {
    fn from(dto: SummonerDto) -> Self {
        // Newer clients leave displayName empty and expose gameName#tagLine instead
        let display_name = if !dto.display_name.is_empty() {
            dto.display_name
        } else if !dto.game_name.is_empty() && !dto.tag_line.is_empty() {
            format!("{}#{}", dto.game_name, dto.tag_line)
        } else if !dto.game_name.is_empty() {
            dto.game_name
        } else {
            format!("User{}", dto.summoner_id)
        };
        Summoner {
            summoner_id: dto.summoner_id,
            display_name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchListDto {
    #[serde(default)]
    pub games: MatchListGamesDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchListGamesDto {
    #[serde(default)]
    pub games: Vec<GameDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    pub game_id: i64,
    #[serde(default)]
    pub game_creation: i64,
    #[serde(default)]
    pub game_creation_date: Option<String>,
    #[serde(default)]
    pub game_duration: i64,
    #[serde(default)]
    pub queue_id: i64,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
    #[serde(default)]
    pub participant_identities: Vec<ParticipantIdentityDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    #[serde(default)]
    pub participant_id: i64,
    #[serde(default)]
    pub team_id: i64,
    #[serde(default)]
    pub stats: StatsDto,
    #[serde(default)]
    pub timeline: TimelineDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsDto {
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub total_damage_dealt_to_champions: i64,
    pub gold_earned: i64,
    pub vision_score: i64,
    pub total_minions_killed: i64,
    pub first_blood_kill: bool,
    pub first_blood_assist: bool,
    pub penta_kills: i64,
    pub quadra_kills: i64,
    pub triple_kills: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimelineDto {
    pub lane: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantIdentityDto {
    #[serde(default)]
    pub participant_id: i64,
    #[serde(default)]
    pub player: PlayerDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerDto {
    pub summoner_id: i64,
}

impl GameDto {
    fn created_at(&self) -> DateTime<Utc> {
        self
            .game_creation_date
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| DateTime::from_timestamp_millis(self.game_creation))
            .unwrap_or_default()
    }
}

impl From<GameDto> for GameRecord {
    fn from(dto: GameDto) -> Self {
        let created_at = dto.created_at();
        GameRecord {
            game_id: dto.game_id,
            queue: QueueKind::from_queue_id(dto.queue_id),
            duration_sec: dto.game_duration,
            created_at,
            participants: dto
                .participants
                .into_iter()
                .map(|p| ParticipantStats {
                    participant_id: p.participant_id,
                    team_id: p.team_id,
                    kills: p.stats.kills,
                    deaths: p.stats.deaths,
                    assists: p.stats.assists,
                    damage_to_champions: p.stats.total_damage_dealt_to_champions,
                    gold_earned: p.stats.gold_earned,
                    vision_score: p.stats.vision_score,
                    minions_killed: p.stats.total_minions_killed,
                    first_blood_kill: p.stats.first_blood_kill,
                    first_blood_assist: p.stats.first_blood_assist,
                    penta_kills: p.stats.penta_kills,
                    quadra_kills: p.stats.quadra_kills,
                    triple_kills: p.stats.triple_kills,
                    lane: p.timeline.lane,
                    role: p.timeline.role,
                })
                .collect(),
            identities: dto
                .participant_identities
                .into_iter()
                .map(|i| ParticipantIdentity {
                    participant_id: i.participant_id,
                    summoner_id: i.player.summoner_id,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationDto {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMsgDto {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub from_summoner_id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Summoner ids of everyone who joined the room, in join order, without repeats.
pub fn joined_room_members(messages: &[ConversationMsgDto]) -> Vec<i64> {
    let mut ids: Vec<i64> = Vec::with_capacity(5);
    for msg in messages {
        if msg.kind == CONVERSATION_MSG_TYPE_SYSTEM
            && msg.body == JOINED_ROOM_MSG
            && !ids.contains(&msg.from_summoner_id)
        {
            ids.push(msg.from_summoner_id);
        }
    }
    ids
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameflowSessionDto {
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub game_data: GameDataDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameDataDto {
    pub team_one: Vec<TeamMemberDto>,
    pub team_two: Vec<TeamMemberDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMemberDto {
    pub summoner_id: i64,
}

/// Live game session as reported by the gameflow endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub phase: String,
    pub team_one: Vec<i64>,
    pub team_two: Vec<i64>,
}

impl From<GameflowSessionDto> for GameSession {
    fn from(dto: GameflowSessionDto) -> Self {
        GameSession {
            phase: dto.phase,
            team_one: dto.game_data.team_one.iter().map(|m| m.summoner_id).collect(),
            team_two: dto.game_data.team_two.iter().map(|m| m.summoner_id).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Pick,
    Ban,
    #[serde(other)]
    Other,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pick => "pick",
            Self::Ban => "ban",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampSelectAction {
    #[serde(default)]
    pub actor_cell_id: i64,
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "type", default = "default_action_kind")]
    pub kind: ActionKind,
    #[serde(default)]
    pub is_in_progress: bool,
}

fn default_action_kind() -> ActionKind {
    ActionKind::Other
}

/// Snapshot of a champ-select session update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampSelectSession {
    #[serde(default)]
    pub local_player_cell_id: i64,
    #[serde(default)]
    pub actions: Vec<Vec<ChampSelectAction>>,
}
