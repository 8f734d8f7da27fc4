use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::usage_logs;

/// One prompt a user sent to the data generator. The frontend lists these as
/// chat sessions.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = usage_logs)]
pub struct UsageLog {
    pub id: Uuid,
    pub user_id: i32,
    pub prompt: String,
    pub timestamp: DateTime<Utc>,
    pub is_archived: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = usage_logs)]
pub struct NewUsageLog {
    pub id: Uuid,
    pub user_id: i32,
    pub prompt: String,
}

impl NewUsageLog {
    pub fn new(user_id: i32, prompt: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            prompt: prompt.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageLogOut {
    pub id: Uuid,
    pub prompt: String,
    pub timestamp: DateTime<Utc>,
    pub is_archived: bool,
}

impl From<UsageLog> for UsageLogOut {
    fn from(log: UsageLog) -> Self {
        UsageLogOut {
            id: log.id,
            prompt: log.prompt,
            timestamp: log.timestamp,
            is_archived: log.is_archived,
        }
    }
}
