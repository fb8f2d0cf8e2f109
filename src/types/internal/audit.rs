use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::internal::AuditError;

/// Identifier of an audit record
///
/// The nil UUID marks an identifier the caller left unset; the recorder
/// replaces it with a fresh one before the record is queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(RecordId)
    }
}

/// Kind of operation an audit record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Insert,
    Update,
    Delete,
    List,
    Get,
}

impl Action {
    /// Convert Action to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
            Self::Get => "get",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert" => Ok(Self::Insert),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "list" => Ok(Self::List),
            "get" => Ok(Self::Get),
            other => Err(AuditError::UnknownAction(other.to_string())),
        }
    }
}

/// One audited fact
///
/// Records are handed to the recorder by value and never mutated afterwards.
/// `created_at` is the time the event happened, not when it was queued or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub request_id: String,
    pub action: Action,
    pub created_at: DateTime<Utc>,
    pub data: serde_json::Value,
    pub origin_ip: String,
    pub resource_id: i64,
    pub resource_type: String,
    pub user_id: i64,
}

impl Record {
    /// Create a record for `action` stamped with the current time and no context
    pub fn new(action: Action) -> Self {
        Self {
            id: RecordId::default(),
            request_id: String::new(),
            action,
            created_at: Utc::now(),
            data: serde_json::Value::Null,
            origin_ip: String::new(),
            resource_id: 0,
            resource_type: String::new(),
            user_id: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_round_trips_through_storage_string() {
        for action in [Action::Insert, Action::Update, Action::Delete, Action::List, Action::Get] {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = "upsert".parse::<Action>();
        assert!(matches!(result, Err(AuditError::UnknownAction(a)) if a == "upsert"));
    }

    #[test]
    fn test_default_record_id_is_unset() {
        assert!(RecordId::default().is_unset());
        assert!(!RecordId::new().is_unset());
    }

    #[test]
    fn test_new_record_has_unset_id() {
        let record = Record::new(Action::Insert);
        assert!(record.id.is_unset());
        assert_eq!(record.action, Action::Insert);
    }
}
