// Team discovery from the champ-select chat room and the live game session

use std::time::Duration;
use tracing::debug;

use crate::error::ProphetError;
use crate::lcu::{ControlClient, GameSession};
use crate::scoring::SummonerId;

pub const TEAM_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRoster {
    pub conversation_id: String,
    pub members: Vec<SummonerId>,
}

pub async fn get_team_users(client: &dyn ControlClient) -> Result<TeamRoster, ProphetError> {
    let conversation_id = client.current_conversation_id().await?;
    let members = client.list_conversation_members(&conversation_id).await?;
    Ok(TeamRoster {
        conversation_id,
        members,
    })
}

/// Poll the chat room `attempts` times, `interval` before each poll. Every attempt runs even
/// once a full team has joined; the last successful poll wins.
pub async fn discover_roster(
    client: &dyn ControlClient,
    attempts: usize,
    interval: Duration,
) -> Option<TeamRoster> {
    let mut roster = None;
    for attempt in 1..=attempts {
        tokio::time::sleep(interval).await;
        match get_team_users(client).await {
            Ok(found) => {
                if found.members.len() != TEAM_SIZE {
                    debug!(
                        "Roster poll {}/{}: {} of {} members joined",
                        attempt,
                        attempts,
                        found.members.len(),
                        TEAM_SIZE
                    );
                }
                roster = Some(found);
            }
            Err(e) => debug!("Roster poll {}/{} failed: {}", attempt, attempts, e),
        }
    }
    roster
}

/// Split the session rosters into `(own team, opposing team)` for `self_id`.
/// `None` when the player is on neither roster. Non-positive ids (bots) are left out.
pub fn partition_session_rosters(
    self_id: SummonerId,
    session: &GameSession,
) -> Option<(Vec<SummonerId>, Vec<SummonerId>)> {
    let humans = |ids: &[SummonerId]| ids.iter().copied().filter(|id| *id > 0).collect::<Vec<_>>();
    if session.team_one.contains(&self_id) {
        Some((humans(&session.team_one), humans(&session.team_two)))
    } else if session.team_two.contains(&self_id) {
        Some((humans(&session.team_two), humans(&session.team_one)))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockCall, MockLcu};

    fn session(team_one: Vec<i64>, team_two: Vec<i64>) -> GameSession {
        GameSession {
            phase: "InProgress".to_string(),
            team_one,
            team_two,
        }
    }

    #[test]
    fn partition_finds_own_side() {
        let s = session(vec![1, 2, 3], vec![4, 5, 6]);
        assert_eq!(
            partition_session_rosters(5, &s),
            Some((vec![4, 5, 6], vec![1, 2, 3]))
        );
        assert_eq!(
            partition_session_rosters(1, &s),
            Some((vec![1, 2, 3], vec![4, 5, 6]))
        );
    }

    #[test]
    fn partition_rejects_spectator_and_skips_bots() {
        let s = session(vec![1, 2], vec![0, -1, 7]);
        assert_eq!(partition_session_rosters(99, &s), None);
        assert_eq!(partition_session_rosters(1, &s), Some((vec![1, 2], vec![7])));
    }

    /// Scenario: all five members are already in the room on the first poll.
    /// Expected: discovery still spends the full attempt budget.
    #[tokio::test]
    async fn discovery_polls_the_full_budget() {
        let lcu = MockLcu::new().with_conversation("room-1", vec![1, 2, 3, 4, 5]);
        let roster = discover_roster(&lcu, 3, Duration::ZERO).await.unwrap();
        assert_eq!(roster.conversation_id, "room-1");
        assert_eq!(roster.members.len(), TEAM_SIZE);
        assert_eq!(lcu.count_calls(|c| *c == MockCall::ConversationMembers), 3);
    }

    #[tokio::test]
    async fn discovery_without_room_yields_nothing() {
        let lcu = MockLcu::new();
        assert!(discover_roster(&lcu, 3, Duration::ZERO).await.is_none());
    }
}
