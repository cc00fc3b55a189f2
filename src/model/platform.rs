use serde::{Deserialize, Serialize};

/// The normalized booking channel of a reservation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Airbnb,
    Vrbo,
    /// The host's own use, including friends staying for free.
    Owner,
    /// A direct or unlisted booking. Also the fallback for anything unrecognized.
    #[default]
    Offline,
}

serde_plain::derive_display_from_serialize!(Platform);
serde_plain::derive_fromstr_from_deserialize!(Platform);

impl Platform {
    /// All platforms, in display order.
    pub const ALL: [Platform; 4] = [
        Platform::Airbnb,
        Platform::Vrbo,
        Platform::Owner,
        Platform::Offline,
    ];
}
