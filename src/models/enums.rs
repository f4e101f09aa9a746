use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Role {
    Doctor => "doctor",
    Patient => "patient",
    Pharmacy => "pharmacy",
    Admin => "admin",
});

str_enum!(ReminderTiming {
    Morning => "morning",
    Afternoon => "afternoon",
    Evening => "evening",
    Night => "night",
});

str_enum!(ReminderStatus {
    Pending => "pending",
    Taken => "taken",
    Missed => "missed",
});

impl ReminderStatus {
    /// Taken and missed are terminal; only pending can transition.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReminderStatus::Pending)
    }
}

str_enum!(Frequency {
    OnceDaily => "once_daily",
    TwiceDaily => "twice_daily",
});

str_enum!(AlertPriority {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

str_enum!(AlertKind {
    MissedDoses => "missed_doses",
    AdherenceRate => "adherence_rate",
    HeartRateCriticalLow => "heart_rate_critical_low",
    HeartRateLow => "heart_rate_low",
    HeartRateHigh => "heart_rate_high",
    HeartRateCriticalHigh => "heart_rate_critical_high",
    OxygenCriticalLow => "oxygen_critical_low",
    OxygenLow => "oxygen_low",
});

str_enum!(VitalsSource {
    Manual => "manual",
    FitnessSync => "fitness_sync",
});
