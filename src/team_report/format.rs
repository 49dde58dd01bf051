// Horse tier classification and report lines

use crate::config::{ClientConfig, HorseScoreConf};
use crate::scoring::{Kda, UserScoreResult};

/// Number of KDA triples shown per line
pub const REPORT_KDA_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSide {
    Team,
    Enemy,
}

impl ReportSide {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Team => "Team",
            Self::Enemy => "Enemy",
        }
    }
}

/// Index of the first tier whose threshold the score meets. Tiers are listed highest first.
pub fn classify_horse(score: f64, tiers: &[HorseScoreConf]) -> Option<usize> {
    tiers.iter().position(|t| score >= t.score)
}

/// Up to the last five triples, still oldest first.
pub fn recent_kda_text(kda: &[Kda]) -> String {
    let start = kda.len().saturating_sub(REPORT_KDA_COUNT);
    kda[start..]
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One formatted result together with what the dispatch policy needs to filter it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub summoner_id: i64,
    pub horse_index: Option<usize>,
    pub text: String,
}

pub fn format_line(
    side: ReportSide,
    result: &UserScoreResult,
    tiers: &[HorseScoreConf],
    client: &ClientConfig,
) -> ReportLine {
    let horse_index = classify_horse(result.score, tiers);
    let horse = horse_index
        .and_then(|i| client.horse_name_conf.get(i))
        .map(String::as_str)
        .unwrap_or("");
    ReportLine {
        summoner_id: result.summoner_id,
        horse_index,
        text: format!(
            "{} {}: {} score: {:.1}  recent KDA: {}",
            side.prefix(),
            horse,
            result.summoner_name,
            result.score,
            recent_kda_text(&result.recent_kda)
        ),
    }
}
