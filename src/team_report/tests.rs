// Tests for the team and enemy report workflows

use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::clipboard::ClipboardWriter;
use crate::config::AppConfig;
use crate::lcu::{ControlClient, GameSession};
use crate::test_helpers::*;
use crate::utils::RetryPolicy;

fn line(summoner_id: i64, horse_index: Option<usize>) -> ReportLine {
    ReportLine {
        summoner_id,
        horse_index,
        text: format!("line {}", summoner_id),
    }
}

fn instant_timing() -> CoordinatorTiming {
    CoordinatorTiming {
        roster_poll_attempts: 1,
        roster_poll_interval: Duration::ZERO,
        chat_spacing: Duration::ZERO,
        detail_retry: RetryPolicy::new(5, Duration::ZERO),
    }
}

fn coordinator(
    lcu: &Arc<MockLcu>,
    clipboard: &Arc<MockClipboard>,
    config: AppConfig,
    self_id: Option<i64>,
) -> TeamCoordinator {
    let client: Arc<dyn ControlClient> = lcu.clone();
    let clipboard: Arc<dyn ClipboardWriter> = clipboard.clone();
    TeamCoordinator::new(client, clipboard, Arc::new(config), self_id).with_timing(instant_timing())
}

fn auto_send_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.client.auto_send_team_horse = true;
    config
}

#[test]
fn clipboard_mode_omits_self_when_muted() {
    let mut config = AppConfig::default();
    config.client.should_send_self_horse = false;
    let lines = [line(1, Some(0)), line(2, Some(3)), line(3, None)];
    assert_eq!(
        plan_dispatch(&lines, &config, Some(1)),
        Dispatch::Clipboard("line 2\nline 3".to_string())
    );

    config.client.should_send_self_horse = true;
    assert_eq!(
        plan_dispatch(&lines, &config, Some(1)),
        Dispatch::Clipboard("line 1\nline 2\nline 3".to_string())
    );
}

#[test]
fn auto_send_skips_unannounced_tiers() {
    let mut config = auto_send_config();
    config.client.choose_send_horse_msg[4] = false;
    let lines = [line(1, Some(0)), line(2, Some(4)), line(3, None)];
    assert_eq!(
        plan_dispatch(&lines, &config, None),
        Dispatch::Individual(vec!["line 1".to_string(), "line 3".to_string()])
    );
}

#[test]
fn merge_mode_sends_every_line_in_one_message() {
    let mut config = auto_send_config();
    config.score.merge_msg = true;
    config.client.should_send_self_horse = false;
    config.client.choose_send_horse_msg[1] = false;
    let lines = [line(1, Some(0)), line(2, Some(1)), line(3, Some(2))];
    assert_eq!(
        plan_dispatch(&lines, &config, Some(3)),
        Dispatch::Merged("line 1\nline 2\nline 3".to_string())
    );
    assert_eq!(plan_dispatch(&[], &config, Some(3)), Dispatch::Nothing);
}

#[test]
fn nothing_left_means_nothing_sent() {
    let mut config = auto_send_config();
    config.client.choose_send_horse_msg = vec![false; 6];
    assert_eq!(
        plan_dispatch(&[line(1, Some(2))], &config, None),
        Dispatch::Nothing
    );
    assert_eq!(
        plan_dispatch(&[], &AppConfig::default(), None),
        Dispatch::Nothing
    );
}

/// Scenario: three teammates in the room, one of them cannot be resolved.
/// Expected: the other two are announced individually, in roster order.
#[tokio::test]
async fn champ_select_announces_resolved_teammates() {
    let lcu = Arc::new(
        MockLcu::new()
            .with_summoner(1, "Garen Enjoyer")
            .with_summoner(2, "Lux Bot")
            .with_conversation("room-1", vec![1, 2, 3]),
    );
    let clipboard = Arc::new(MockClipboard::default());
    coordinator(&lcu, &clipboard, auto_send_config(), Some(1))
        .champ_select_workflow()
        .await;

    let chats: Vec<MockCall> = lcu
        .calls()
        .into_iter()
        .filter(|c| matches!(c, MockCall::Chat { .. }))
        .collect();
    assert_eq!(chats.len(), 2);
    assert_eq!(
        chats[0],
        MockCall::Chat {
            text: "Team lower-tier: Garen Enjoyer score: 100.0  recent KDA: ".to_string(),
            conversation_id: "room-1".to_string(),
        }
    );
    assert!(lcu.chat_messages()[1].contains("Lux Bot"));
    assert!(clipboard.writes().is_empty());
}

#[tokio::test]
async fn champ_select_without_auto_send_copies_report() {
    let lcu = Arc::new(
        MockLcu::new()
            .with_summoner(1, "Garen Enjoyer")
            .with_summoner(2, "Lux Bot")
            .with_conversation("room-1", vec![1, 2]),
    );
    let clipboard = Arc::new(MockClipboard::default());
    coordinator(&lcu, &clipboard, AppConfig::default(), Some(1))
        .champ_select_workflow()
        .await;

    assert!(lcu.chat_messages().is_empty());
    let writes = clipboard.writes();
    assert_eq!(writes.len(), 1);
    let report: Vec<&str> = writes[0].lines().collect();
    assert_eq!(report.len(), 2);
    assert!(report[0].contains("Garen Enjoyer"));
    assert!(report[1].contains("Lux Bot"));
}

#[tokio::test]
async fn champ_select_without_room_does_nothing() {
    let lcu = Arc::new(MockLcu::new().with_summoner(1, "Solo"));
    let clipboard = Arc::new(MockClipboard::default());
    coordinator(&lcu, &clipboard, auto_send_config(), Some(1))
        .champ_select_workflow()
        .await;
    assert!(lcu.chat_messages().is_empty());
    assert!(clipboard.writes().is_empty());
}

/// Scenario: one teammate's only game never returns its details.
/// Expected: the workflow still completes and reports every teammate.
#[tokio::test]
async fn failed_detail_does_not_block_the_report() {
    let lcu = Arc::new(
        MockLcu::new()
            .with_summoner(1, "Unlucky")
            .with_summoner(2, "Fine")
            .with_history(1, vec![history_game(50, 420, 1800, 1, (2, 2, 2))])
            .with_conversation("room-1", vec![1, 2]),
    );
    let clipboard = Arc::new(MockClipboard::default());
    coordinator(&lcu, &clipboard, auto_send_config(), None)
        .champ_select_workflow()
        .await;

    let messages = lcu.chat_messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("Unlucky"));
    assert!(messages[0].ends_with("2/2/2"));
    assert_eq!(lcu.count_calls(|c| *c == MockCall::GameDetail(50)), 5);
}

fn in_game(phase: &str) -> GameSession {
    GameSession {
        phase: phase.to_string(),
        team_one: vec![1, 2],
        team_two: vec![3, 4],
    }
}

#[tokio::test]
async fn enemy_report_goes_to_clipboard_only() {
    let lcu = Arc::new(
        MockLcu::new()
            .with_summoner(1, "Red Top")
            .with_summoner(2, "Red Jungle")
            .with_summoner(3, "Me")
            .with_session(in_game("InProgress")),
    );
    let clipboard = Arc::new(MockClipboard::default());
    coordinator(&lcu, &clipboard, auto_send_config(), Some(3))
        .enemy_workflow()
        .await;

    assert!(lcu.chat_messages().is_empty());
    let writes = clipboard.writes();
    assert_eq!(writes.len(), 1);
    let report: Vec<&str> = writes[0].lines().collect();
    assert_eq!(
        report,
        vec![
            "Enemy lower-tier: Red Top score: 100.0  recent KDA: ",
            "Enemy lower-tier: Red Jungle score: 100.0  recent KDA: ",
        ]
    );
}

#[tokio::test]
async fn enemy_report_needs_live_game_and_identity() {
    let lcu = Arc::new(
        MockLcu::new()
            .with_summoner(1, "Red Top")
            .with_session(in_game("ChampSelect")),
    );
    let clipboard = Arc::new(MockClipboard::default());
    coordinator(&lcu, &clipboard, AppConfig::default(), Some(3))
        .enemy_workflow()
        .await;
    assert!(clipboard.writes().is_empty());

    let lcu = Arc::new(
        MockLcu::new()
            .with_summoner(1, "Red Top")
            .with_session(in_game("InProgress")),
    );
    coordinator(&lcu, &clipboard, AppConfig::default(), None)
        .enemy_workflow()
        .await;
    coordinator(&lcu, &clipboard, AppConfig::default(), Some(99))
        .enemy_workflow()
        .await;
    assert!(clipboard.writes().is_empty());
}
