use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::{ActivityAction, ActivityEntity},
    dto::format_system_time,
};

/// Query string for the activity log listing.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ActivityQuery {
    /// Defaults to 50, capped at 500.
    pub limit: Option<i64>,
    /// Restrict to one action kind; `all` (or absence) means everything.
    pub action_type: Option<String>,
    /// Restrict to one staff display name.
    pub staff: Option<String>,
}

/// Audit entry projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivitySummary {
    pub id: Uuid,
    pub action: ActivityAction,
    pub player_name: Option<String>,
    pub staff_name: String,
    pub table_number: Option<u32>,
    pub details: Option<String>,
    pub created_at: String,
}

impl From<ActivityEntity> for ActivitySummary {
    fn from(entry: ActivityEntity) -> Self {
        Self {
            id: entry.id,
            action: entry.action,
            player_name: entry.player_name,
            staff_name: entry.staff_name,
            table_number: entry.table_number,
            details: entry.details,
            created_at: format_system_time(entry.created_at),
        }
    }
}
