use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

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

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Sex {
    Male => "Male",
    Female => "Female",
    Other => "Other",
});

str_enum!(ExposureLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(CoughFrequency {
    Rare => "rare",
    Occasional => "occasional",
    Frequent => "frequent",
});

str_enum!(DiseaseSlot {
    BloodPressure => "bloodPressure",
    Diabetes => "diabetes",
    HeartDisease => "heartDisease",
    Respiratory => "respiratory",
});

impl ExposureLevel {
    /// Position in the low → high scale.
    pub fn ordinal(self) -> i8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl CoughFrequency {
    /// Position in the rare → frequent scale.
    pub fn ordinal(self) -> i8 {
        match self {
            Self::Rare => 0,
            Self::Occasional => 1,
            Self::Frequent => 2,
        }
    }
}
