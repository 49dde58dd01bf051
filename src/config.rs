use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::ProphetError;

// Configuration model and loading

pub const CONFIG_PATH_ENV: &str = "PROPHET_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directories searched for the client lockfile.
    #[serde(default = "default_league_paths")]
    pub league_paths: Vec<String>,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub score: ScoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            league_paths: default_league_paths(),
            client: ClientConfig::default(),
            score: ScoreConfig::default(),
        }
    }
}

fn default_league_paths() -> Vec<String> {
    vec![
        "C:\\Riot Games\\League of Legends".to_string(),
        "C:\\Program Files\\Riot Games\\League of Legends".to_string(),
        "C:\\Program Files (x86)\\Riot Games\\League of Legends".to_string(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub auto_accept_game: bool,
    /// Champion to lock in automatically; 0 disables auto pick.
    #[serde(default)]
    pub auto_pick_champ_id: i64,
    /// Champion to ban automatically; 0 disables auto ban.
    #[serde(default)]
    pub auto_ban_champ_id: i64,
    #[serde(default)]
    pub auto_send_team_horse: bool,
    #[serde(default = "default_true")]
    pub should_send_self_horse: bool,
    #[serde(default = "default_horse_names")]
    pub horse_name_conf: Vec<String>,
    #[serde(default = "default_announce_flags")]
    pub choose_send_horse_msg: Vec<bool>,
    #[serde(default)]
    pub choose_champ_send_msg_delay_sec: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auto_accept_game: false,
            auto_pick_champ_id: 0,
            auto_ban_champ_id: 0,
            auto_send_team_horse: false,
            should_send_self_horse: true,
            horse_name_conf: default_horse_names(),
            choose_send_horse_msg: default_announce_flags(),
            choose_champ_send_msg_delay_sec: 0,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_horse_names() -> Vec<String> {
    ["top-tier", "carry", "upper-tier", "mid-tier", "lower-tier", "bottom-tier"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_announce_flags() -> Vec<bool> {
    vec![true; 6]
}

/// Threshold of one horse tier. Tiers are listed from the highest score down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HorseScoreConf {
    pub score: f64,
}

/// One share tier: applies when the player's share of the team total exceeds `limit`.
/// `score_conf` holds `(kills_threshold, bonus)` pairs scanned in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateItemConf {
    pub limit: f64,
    pub score_conf: Vec<(f64, f64)>,
}

/// Weight table for every scoring heuristic. Treated as an immutable snapshot per computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoreConfig {
    pub merge_msg: bool,
    pub horse: Vec<HorseScoreConf>,
    /// [kill, assist]
    pub first_blood: [f64; 2],
    pub penta_kills: f64,
    pub quadra_kills: f64,
    pub triple_kills: f64,
    /// [rank 1 bonus, rank 2 bonus, rank 4 penalty, rank 5 penalty]
    pub join_team_rate_rank: [f64; 4],
    pub gold_earned_rank: [f64; 4],
    pub hurt_rank: [f64; 2],
    pub money2hurt_rate_rank: [f64; 2],
    pub vision_score_rank: [f64; 2],
    /// `(minions per minute, bonus)`, highest threshold first.
    pub minions_killed: Vec<(f64, f64)>,
    pub kill_rate: Vec<RateItemConf>,
    pub hurt_rate: Vec<RateItemConf>,
    pub assist_rate: Vec<RateItemConf>,
    pub adjust_kda: [f64; 2],
}

impl Default for ScoreConfig {
    fn default() -> Self {
        let rate = |limit: f64, pairs: &[(f64, f64)]| RateItemConf {
            limit,
            score_conf: pairs.to_vec(),
        };
        Self {
            merge_msg: false,
            horse: [180.0, 150.0, 125.0, 105.0, 95.0, 0.0001]
                .iter()
                .map(|&score| HorseScoreConf { score })
                .collect(),
            first_blood: [10.0, 5.0],
            penta_kills: 20.0,
            quadra_kills: 10.0,
            triple_kills: 5.0,
            join_team_rate_rank: [10.0, 5.0, 5.0, 10.0],
            gold_earned_rank: [10.0, 5.0, 5.0, 10.0],
            hurt_rank: [10.0, 5.0],
            money2hurt_rate_rank: [10.0, 5.0],
            vision_score_rank: [10.0, 5.0],
            minions_killed: vec![(10.0, 20.0), (9.0, 10.0), (8.0, 5.0)],
            kill_rate: vec![
                rate(0.5, &[(15.0, 40.0), (10.0, 20.0), (5.0, 10.0)]),
                rate(0.4, &[(15.0, 20.0), (10.0, 10.0), (5.0, 5.0)]),
            ],
            hurt_rate: vec![
                rate(0.4, &[(15.0, 40.0), (10.0, 20.0), (5.0, 10.0)]),
                rate(0.3, &[(15.0, 20.0), (10.0, 10.0), (5.0, 5.0)]),
            ],
            assist_rate: vec![
                rate(0.5, &[(20.0, 30.0), (18.0, 25.0), (15.0, 20.0), (10.0, 10.0), (5.0, 5.0)]),
                rate(0.4, &[(20.0, 15.0), (15.0, 10.0), (10.0, 5.0), (5.0, 3.0)]),
            ],
            adjust_kda: [2.0, 5.0],
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ProphetError> {
        let tiers = self.score.horse.len();
        if self.client.horse_name_conf.len() != tiers {
            return Err(ProphetError::Config(format!(
                "horse_name_conf has {} entries but {} horse tiers are configured",
                self.client.horse_name_conf.len(),
                tiers
            )));
        }
        if self.client.choose_send_horse_msg.len() != tiers {
            return Err(ProphetError::Config(format!(
                "choose_send_horse_msg has {} entries but {} horse tiers are configured",
                self.client.choose_send_horse_msg.len(),
                tiers
            )));
        }
        if self.score.adjust_kda[1] == 0.0 {
            return Err(ProphetError::Config("adjust_kda[1] must not be zero".to_string()));
        }
        Ok(())
    }

    /// Load from `PROPHET_CONFIG` or `./config/config.json`. A missing file yields defaults.
    pub fn load() -> Result<Self, ProphetError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".").join("config").join("config.json"));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ProphetError> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ProphetError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| ProphetError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }
}

/// Shared, replaceable configuration. Readers take a snapshot and keep it for a whole workflow.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Arc<AppConfig>>>,
}

impl ConfigHandle {
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    pub fn snapshot(&self) -> Arc<AppConfig> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update(&self, config: AppConfig) -> Result<(), ProphetError> {
        config.validate()?;
        let mut guard = self
            .inner
            .write()
            .map_err(|e| ProphetError::Config(format!("Lock error: {}", e)))?;
        *guard = Arc::new(config);
        Ok(())
    }
}
