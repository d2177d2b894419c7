//! Shared vocabulary types for inventory state.
//!
//! The item master and tag record tables store status values as text. These
//! enums give the reconciliation and aggregation logic a typed view of that
//! vocabulary while passing through any value outside it untouched.

use std::fmt;

/// Authoritative status of an item in the item master.
///
/// The item master drives every tag-record correction; statuses outside the
/// fixed vocabulary are carried through as [`ItemStatus::Other`] and never
/// trigger a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    ReadyToRent,
    OnRent,
    Delivered,
    Sold,
    Other(String),
}

impl ItemStatus {
    pub const READY_TO_RENT: &'static str = "Ready to Rent";
    pub const ON_RENT: &'static str = "On Rent";
    pub const DELIVERED: &'static str = "Delivered";
    pub const SOLD: &'static str = "Sold";

    /// Parse a raw status value. Total: unknown values become `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::READY_TO_RENT => ItemStatus::ReadyToRent,
            Self::ON_RENT => ItemStatus::OnRent,
            Self::DELIVERED => ItemStatus::Delivered,
            Self::SOLD => ItemStatus::Sold,
            other => ItemStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ItemStatus::ReadyToRent => Self::READY_TO_RENT,
            ItemStatus::OnRent => Self::ON_RENT,
            ItemStatus::Delivered => Self::DELIVERED,
            ItemStatus::Sold => Self::SOLD,
            ItemStatus::Other(raw) => raw,
        }
    }

    /// An item is on contract while it is rented out or delivered to a customer.
    pub fn is_on_contract(&self) -> bool {
        matches!(self, ItemStatus::OnRent | ItemStatus::Delivered)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational status of a tag record.
///
/// `active` and `out/used` participate in reconciliation; `sold` is terminal
/// and only ever set by the lifecycle mutation. Anything else passes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagStatus {
    Active,
    OutUsed,
    Sold,
    Other(String),
}

impl TagStatus {
    pub const ACTIVE: &'static str = "active";
    pub const OUT_USED: &'static str = "out/used";
    pub const SOLD: &'static str = "sold";

    /// Parse a raw status value. Total: unknown values become `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::ACTIVE => TagStatus::Active,
            Self::OUT_USED => TagStatus::OutUsed,
            Self::SOLD => TagStatus::Sold,
            other => TagStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TagStatus::Active => Self::ACTIVE,
            TagStatus::OutUsed => Self::OUT_USED,
            TagStatus::Sold => Self::SOLD,
            TagStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for TagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag record classification that gates the resale lifecycle mutation.
pub const ITEM_TYPE_RESALE: &str = "resale";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_status_round_trips_through_parse() {
        for raw in ["Ready to Rent", "On Rent", "Delivered", "Sold", "Missing"] {
            assert_eq!(ItemStatus::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn on_contract_covers_exactly_rented_and_delivered() {
        assert!(ItemStatus::OnRent.is_on_contract());
        assert!(ItemStatus::Delivered.is_on_contract());
        assert!(!ItemStatus::ReadyToRent.is_on_contract());
        assert!(!ItemStatus::Sold.is_on_contract());
        assert!(!ItemStatus::Other("Repair".into()).is_on_contract());
    }

    #[test]
    fn tag_status_preserves_unknown_values() {
        assert_eq!(TagStatus::parse("staged"), TagStatus::Other("staged".into()));
        assert_eq!(TagStatus::parse("staged").as_str(), "staged");
        assert_eq!(TagStatus::parse("out/used"), TagStatus::OutUsed);
    }
}
