//! Activity log reads. Writes happen inline in the services that own the
//! actions; the log itself is append-only.

use crate::{
    dao::models::{ActivityAction, ActivityFilter},
    dto::activity::{ActivityQuery, ActivitySummary},
    error::ServiceError,
    state::SharedState,
};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;
/// CSV export reads the newest entries up to this many rows.
const EXPORT_LIMIT: i64 = 500;

/// Every action kind, for parsing the query-string filter.
const ALL_ACTIONS: [ActivityAction; 23] = [
    ActivityAction::Seated,
    ActivityAction::Called,
    ActivityAction::Removed,
    ActivityAction::CheckIn,
    ActivityAction::CheckOut,
    ActivityAction::Points,
    ActivityAction::FlushSpade,
    ActivityAction::FlushHeart,
    ActivityAction::FlushDiamond,
    ActivityAction::FlushClub,
    ActivityAction::FlushWinner,
    ActivityAction::FlushReset,
    ActivityAction::HighHand,
    ActivityAction::SplashPot,
    ActivityAction::OrderStart,
    ActivityAction::OrderDone,
    ActivityAction::TableOpen,
    ActivityAction::TableClose,
    ActivityAction::TournamentRegister,
    ActivityAction::WaitlistJoin,
    ActivityAction::PlayerLogin,
    ActivityAction::PlayerRegister,
    ActivityAction::StaffLogin,
];

fn parse_action(value: &str) -> Option<ActivityAction> {
    ALL_ACTIONS
        .iter()
        .copied()
        .find(|action| action.as_str() == value)
}

fn build_filter(query: ActivityQuery) -> ActivityFilter {
    let action = query
        .action_type
        .as_deref()
        .filter(|value| *value != "all")
        .and_then(parse_action);
    let staff_name = query.staff.filter(|value| value != "all");
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT);

    ActivityFilter {
        action,
        staff_name,
        limit,
    }
}

/// Newest entries, filtered by action kind and staff name.
pub async fn query(
    state: &SharedState,
    query: ActivityQuery,
) -> Result<Vec<ActivitySummary>, ServiceError> {
    let store = state.require_store().await?;
    let entries = store.list_activity(build_filter(query)).await?;
    Ok(entries.into_iter().map(Into::into).collect())
}

/// Newest entries rendered as a CSV attachment body.
pub async fn export_csv(state: &SharedState) -> Result<String, ServiceError> {
    let store = state.require_store().await?;
    let entries = store
        .list_activity(ActivityFilter {
            action: None,
            staff_name: None,
            limit: EXPORT_LIMIT,
        })
        .await?;

    let mut csv = String::from("Timestamp,Action,Player,Staff,Table,Details\n");
    for entry in entries {
        let summary: ActivitySummary = entry.into();
        let table = summary
            .table_number
            .map(|number| number.to_string())
            .unwrap_or_default();
        csv.push_str(&format!(
            "{},{},{},{},{},\"{}\"\n",
            summary.created_at,
            summary.action.as_str(),
            summary.player_name.unwrap_or_default(),
            summary.staff_name,
            table,
            summary.details.unwrap_or_default().replace('"', "\"\""),
        ));
    }

    Ok(csv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_actions() {
        assert_eq!(parse_action("seated"), Some(ActivityAction::Seated));
        assert_eq!(
            parse_action("flush_winner"),
            Some(ActivityAction::FlushWinner)
        );
        assert_eq!(parse_action("bogus"), None);
    }

    #[test]
    fn filter_defaults_and_caps() {
        let filter = build_filter(ActivityQuery::default());
        assert_eq!(filter.limit, DEFAULT_LIMIT);
        assert!(filter.action.is_none());

        let filter = build_filter(ActivityQuery {
            limit: Some(10_000),
            action_type: Some("all".into()),
            staff: Some("all".into()),
        });
        assert_eq!(filter.limit, MAX_LIMIT);
        assert!(filter.action.is_none());
        assert!(filter.staff_name.is_none());
    }
}
