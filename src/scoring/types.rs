use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

// Data structures for match history and scores

pub type SummonerId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summoner {
    pub summoner_id: SummonerId,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueKind {
    Normal,
    RankedSolo,
    Aram,
    RankedFlex,
    Other(i64),
}

pub const NORMAL_QUEUE_ID: i64 = 430;
pub const RANKED_SOLO_QUEUE_ID: i64 = 420;
pub const ARAM_QUEUE_ID: i64 = 450;
pub const RANKED_FLEX_QUEUE_ID: i64 = 440;

impl QueueKind {
    pub fn from_queue_id(queue_id: i64) -> Self {
        match queue_id {
            NORMAL_QUEUE_ID => Self::Normal,
            RANKED_SOLO_QUEUE_ID => Self::RankedSolo,
            ARAM_QUEUE_ID => Self::Aram,
            RANKED_FLEX_QUEUE_ID => Self::RankedFlex,
            other => Self::Other(other),
        }
    }

    /// Only these four queues count towards a score.
    pub fn is_scored(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantStats {
    pub participant_id: i64,
    pub team_id: i64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub damage_to_champions: i64,
    pub gold_earned: i64,
    pub vision_score: i64,
    pub minions_killed: i64,
    pub first_blood_kill: bool,
    pub first_blood_assist: bool,
    pub penta_kills: i64,
    pub quadra_kills: i64,
    pub triple_kills: i64,
    pub lane: String,
    pub role: String,
}

pub const LANE_BOTTOM: &str = "BOTTOM";
pub const ROLE_SUPPORT: &str = "DUO_SUPPORT";

impl ParticipantStats {
    pub fn is_bottom_support(&self) -> bool {
        self.lane == LANE_BOTTOM && self.role == ROLE_SUPPORT
    }

    pub fn kda(&self) -> Kda {
        Kda {
            kills: self.kills,
            deaths: self.deaths,
            assists: self.assists,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantIdentity {
    pub participant_id: i64,
    pub summoner_id: SummonerId,
}

/// One game from a summoner's history. History listings carry only the summoner's own
/// participant; detail fetches carry all ten plus their identities.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub game_id: i64,
    pub queue: QueueKind,
    pub duration_sec: i64,
    pub created_at: DateTime<Utc>,
    pub participants: Vec<ParticipantStats>,
    pub identities: Vec<ParticipantIdentity>,
}

impl GameRecord {
    pub fn participant_for(&self, summoner_id: SummonerId) -> Option<&ParticipantStats> {
        let identity = self
            .identities
            .iter()
            .find(|i| i.summoner_id == summoner_id)?;
        self.participants
            .iter()
            .find(|p| p.participant_id == identity.participant_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kda {
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
}

impl fmt::Display for Kda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.kills, self.deaths, self.assists)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreReason {
    FirstBloodKill,
    FirstBloodAssist,
    PentaKills,
    QuadraKills,
    TripleKills,
    JoinTeamRateRank,
    GoldEarnedRank,
    HurtRank,
    Money2HurtRateRank,
    VisionScoreRank,
    MinionsKilled,
    KillRate,
    HurtRate,
    AssistRate,
    KdaAdjust,
}

impl ScoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstBloodKill => "first blood kill",
            Self::FirstBloodAssist => "first blood assist",
            Self::PentaKills => "penta kill",
            Self::QuadraKills => "quadra kill",
            Self::TripleKills => "triple kill",
            Self::JoinTeamRateRank => "kill participation rank",
            Self::GoldEarnedRank => "gold rank",
            Self::HurtRank => "damage rank",
            Self::Money2HurtRateRank => "damage per gold rank",
            Self::VisionScoreRank => "vision rank",
            Self::MinionsKilled => "cs per minute",
            Self::KillRate => "kill share",
            Self::HurtRate => "damage share",
            Self::AssistRate => "assist share",
            Self::KdaAdjust => "kda adjust",
        }
    }
}

/// Per-game score: a base plus an ordered list of reasoned adjustments.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    base: f64,
    adjustments: Vec<(f64, ScoreReason)>,
}

impl ScoreBreakdown {
    pub fn new(base: f64) -> Self {
        Self {
            base,
            adjustments: Vec::new(),
        }
    }

    pub fn add(&mut self, amount: f64, reason: ScoreReason) {
        self.adjustments.push((amount, reason));
    }

    pub fn value(&self) -> f64 {
        self.base + self.adjustments.iter().map(|(amount, _)| amount).sum::<f64>()
    }

    pub fn adjustments(&self) -> &[(f64, ScoreReason)] {
        &self.adjustments
    }

    pub fn has_reason(&self, reason: ScoreReason) -> bool {
        self.adjustments.iter().any(|(_, r)| *r == reason)
    }

    pub fn reasons_to_string(&self) -> String {
        self.adjustments
            .iter()
            .map(|(amount, reason)| format!("{}{:+.2}", reason.as_str(), amount))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserScoreResult {
    pub summoner_id: SummonerId,
    pub summoner_name: String,
    pub score: f64,
    /// Oldest first.
    pub recent_kda: Vec<Kda>,
}
