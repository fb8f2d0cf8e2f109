use std::fmt;

use crate::errors::internal::AuditError;

/// Sortable audit record columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderField {
    #[default]
    CreatedAt,
    Action,
    UserId,
    ResourceType,
}

impl OrderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Action => "action",
            Self::UserId => "user_id",
            Self::ResourceType => "resource_type",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(Self::CreatedAt),
            "action" => Some(Self::Action),
            "user_id" => Some(Self::UserId),
            "resource_type" => Some(Self::ResourceType),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sort criteria for listing audit records
///
/// Defaults to newest first (`created_at DESC`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderBy {
    pub field: OrderField,
    pub direction: Direction,
}

impl OrderBy {
    pub fn new(field: OrderField, direction: Direction) -> Self {
        Self { field, direction }
    }

    /// Parse an order string of the form `field` or `field,DIRECTION`
    ///
    /// An empty string yields the default order. A field without a direction
    /// sorts ascending.
    pub fn parse(order_by: &str) -> Result<Self, AuditError> {
        if order_by.trim().is_empty() {
            return Ok(Self::default());
        }

        let parts: Vec<&str> = order_by.split(',').map(str::trim).collect();

        let field = OrderField::from_name(parts[0])
            .ok_or_else(|| AuditError::UnknownOrder(parts[0].to_string()))?;

        match parts.as_slice() {
            [_] => Ok(Self::new(field, Direction::Asc)),
            [_, "ASC"] => Ok(Self::new(field, Direction::Asc)),
            [_, "DESC"] => Ok(Self::new(field, Direction::Desc)),
            [_, other] => Err(AuditError::UnknownDirection(other.to_string())),
            _ => Err(AuditError::UnknownOrder(order_by.to_string())),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.as_str(), self.direction.as_str())
    }
}
