use serde::{Deserialize, Serialize};

use crate::db::DatabaseError;

/// How far ahead of the dose time a reminder fires.
///
/// The set is fixed; arbitrary offsets are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadTime {
    TenMinutes,
    ThirtyMinutes,
    OneHour,
}

impl LeadTime {
    pub const ALL: [LeadTime; 3] = [
        LeadTime::TenMinutes,
        LeadTime::ThirtyMinutes,
        LeadTime::OneHour,
    ];

    pub fn minutes(self) -> i64 {
        match self {
            Self::TenMinutes => 10,
            Self::ThirtyMinutes => 30,
            Self::OneHour => 60,
        }
    }

    /// Inverse of [`LeadTime::minutes`], used when loading stored reminders.
    pub fn from_minutes(minutes: i64) -> Result<Self, DatabaseError> {
        match minutes {
            10 => Ok(Self::TenMinutes),
            30 => Ok(Self::ThirtyMinutes),
            60 => Ok(Self::OneHour),
            _ => Err(DatabaseError::InvalidEnum {
                field: "lead_minutes".into(),
                value: minutes.to_string(),
            }),
        }
    }

    /// Display label for the reminder picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::TenMinutes => "10 min before",
            Self::ThirtyMinutes => "30 min before",
            Self::OneHour => "1 hour before",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_roundtrip() {
        for lead in LeadTime::ALL {
            assert_eq!(LeadTime::from_minutes(lead.minutes()).unwrap(), lead);
        }
    }

    #[test]
    fn labels_name_the_offset() {
        assert_eq!(LeadTime::TenMinutes.label(), "10 min before");
        assert_eq!(LeadTime::OneHour.label(), "1 hour before");
    }

    #[test]
    fn unknown_minutes_rejected() {
        let err = LeadTime::from_minutes(45).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
    }
}
