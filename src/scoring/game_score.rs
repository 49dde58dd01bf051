use crate::config::{RateItemConf, ScoreConfig};
use crate::error::ProphetError;

use super::types::{GameRecord, ParticipantStats, ScoreBreakdown, ScoreReason, SummonerId};

// Per-game scoring heuristics

pub const DEFAULT_SCORE: f64 = 100.0;

/// 1 + number of teammates strictly ahead of `subject`. Independent of input order.
pub fn rank_of<T: PartialOrd + Copy>(subject: T, team: impl IntoIterator<Item = T>) -> usize {
    1 + team.into_iter().filter(|v| *v > subject).count()
}

fn ratio(numerator: i64, denominator: i64) -> f64 {
    numerator as f64 / denominator as f64
}

/// First outer tier whose limit the share exceeds and whose inner kill threshold matches wins.
/// Every tier gates on the player's kill count, not on the metric being shared.
fn apply_rate_tiers(
    score: &mut ScoreBreakdown,
    share: f64,
    kills: i64,
    tiers: &[RateItemConf],
    reason: ScoreReason,
) {
    for tier in tiers {
        if share <= tier.limit {
            continue;
        }
        if let Some((_, bonus)) = tier
            .score_conf
            .iter()
            .find(|(threshold, _)| kills as f64 > *threshold)
        {
            score.add(*bonus, reason);
            return;
        }
    }
}

/// Score one game for `summoner_id` against their own team. Fails when the summoner or their
/// team cannot be located in the game record.
pub fn calc_game_score(
    summoner_id: SummonerId,
    game: &GameRecord,
    cfg: &ScoreConfig,
) -> Result<ScoreBreakdown, ProphetError> {
    let user = game.participant_for(summoner_id).ok_or_else(|| {
        ProphetError::Decode(format!(
            "summoner {} not found in game {}",
            summoner_id, game.game_id
        ))
    })?;
    let team: Vec<&ParticipantStats> = game
        .participants
        .iter()
        .filter(|p| p.team_id == user.team_id)
        .collect();

    let total_kill: i64 = team.iter().map(|p| p.kills).sum();
    let total_assist: i64 = team.iter().map(|p| p.assists).sum();
    let total_hurt: i64 = team.iter().map(|p| p.damage_to_champions).sum();
    let total_money: i64 = team.iter().map(|p| p.gold_earned).sum();

    let mut score = ScoreBreakdown::new(DEFAULT_SCORE);

    if user.first_blood_kill {
        score.add(cfg.first_blood[0], ScoreReason::FirstBloodKill);
    } else if user.first_blood_assist {
        score.add(cfg.first_blood[1], ScoreReason::FirstBloodAssist);
    }

    if user.penta_kills > 0 {
        score.add(cfg.penta_kills, ScoreReason::PentaKills);
    } else if user.quadra_kills > 0 {
        score.add(cfg.quadra_kills, ScoreReason::QuadraKills);
    } else if user.triple_kills > 0 {
        score.add(cfg.triple_kills, ScoreReason::TripleKills);
    }

    // Kill participation
    if total_kill > 0 {
        let rate_of = |p: &ParticipantStats| ratio(p.assists + p.kills, total_kill);
        let rank = rank_of(rate_of(user), team.iter().map(|p| rate_of(*p)));
        let table = &cfg.join_team_rate_rank;
        match rank {
            1 => score.add(table[0], ScoreReason::JoinTeamRateRank),
            2 => score.add(table[1], ScoreReason::JoinTeamRateRank),
            4 => score.add(-table[2], ScoreReason::JoinTeamRateRank),
            5 => score.add(-table[3], ScoreReason::JoinTeamRateRank),
            _ => {}
        }
    }

    // Gold, supports are not penalised for being poor
    if total_money > 0 {
        let rank = rank_of(user.gold_earned, team.iter().map(|p| p.gold_earned));
        let table = &cfg.gold_earned_rank;
        let support = user.is_bottom_support();
        match rank {
            1 => score.add(table[0], ScoreReason::GoldEarnedRank),
            2 => score.add(table[1], ScoreReason::GoldEarnedRank),
            4 if !support => score.add(-table[2], ScoreReason::GoldEarnedRank),
            5 if !support => score.add(-table[3], ScoreReason::GoldEarnedRank),
            _ => {}
        }
    }

    if total_hurt > 0 {
        let rank = rank_of(user.damage_to_champions, team.iter().map(|p| p.damage_to_champions));
        match rank {
            1 => score.add(cfg.hurt_rank[0], ScoreReason::HurtRank),
            2 => score.add(cfg.hurt_rank[1], ScoreReason::HurtRank),
            _ => {}
        }
    }

    // Damage per gold
    if total_money > 0 && total_hurt > 0 {
        let rate_of = |p: &ParticipantStats| ratio(p.damage_to_champions, p.gold_earned);
        let rank = rank_of(rate_of(user), team.iter().map(|p| rate_of(*p)));
        match rank {
            1 => score.add(cfg.money2hurt_rate_rank[0], ScoreReason::Money2HurtRateRank),
            2 => score.add(cfg.money2hurt_rate_rank[1], ScoreReason::Money2HurtRateRank),
            _ => {}
        }
    }

    {
        let rank = rank_of(user.vision_score, team.iter().map(|p| p.vision_score));
        match rank {
            1 => score.add(cfg.vision_score_rank[0], ScoreReason::VisionScoreRank),
            2 => score.add(cfg.vision_score_rank[1], ScoreReason::VisionScoreRank),
            _ => {}
        }
    }

    // Whole minions per whole minute, against whole thresholds
    let minutes = game.duration_sec / 60;
    if minutes > 0 {
        let per_minute = user.minions_killed / minutes;
        if let Some((_, bonus)) = cfg
            .minions_killed
            .iter()
            .find(|(threshold, _)| per_minute >= threshold.trunc() as i64)
        {
            score.add(*bonus, ScoreReason::MinionsKilled);
        }
    }

    if total_kill > 0 {
        let share = ratio(user.kills, total_kill);
        apply_rate_tiers(&mut score, share, user.kills, &cfg.kill_rate, ScoreReason::KillRate);
    }
    if total_hurt > 0 {
        let share = ratio(user.damage_to_champions, total_hurt);
        apply_rate_tiers(&mut score, share, user.kills, &cfg.hurt_rate, ScoreReason::HurtRate);
    }
    if total_assist > 0 {
        let share = ratio(user.assists, total_assist);
        apply_rate_tiers(&mut score, share, user.kills, &cfg.assist_rate, ScoreReason::AssistRate);
    }

    let join_rate = if total_kill > 0 {
        ratio(user.assists + user.kills, total_kill)
    } else {
        1.0
    };
    let deaths = user.deaths.max(1);
    let adjust = (ratio(user.kills + user.assists, deaths) - cfg.adjust_kda[0]
        + (user.kills - user.deaths) as f64 / cfg.adjust_kda[1])
        * join_rate;
    score.add(adjust, ScoreReason::KdaAdjust);

    Ok(score)
}
