use crate::model::Platform;

/// Raw platform labels seen in the sheets, matched exactly after trimming.
static PLATFORMS: phf::Map<&'static str, Platform> = phf::phf_map! {
    "airbnb" => Platform::Airbnb,
    "AirBnB" => Platform::Airbnb,
    "Airbnb" => Platform::Airbnb,
    "vrbo" => Platform::Vrbo,
    "VRBO" => Platform::Vrbo,
    "homeaway" => Platform::Vrbo,
    "HomeAway" => Platform::Vrbo,
    "self" => Platform::Owner,
    "Self" => Platform::Owner,
    "friend" => Platform::Owner,
    "Friend" => Platform::Owner,
    "offline" => Platform::Offline,
    "Offline" => Platform::Offline,
};

/// Maps a raw platform label to a `Platform`. Missing and unrecognized labels are
/// `Platform::Offline`.
pub fn normalize_platform(raw: Option<&str>) -> Platform {
    raw.and_then(|s| PLATFORMS.get(s.trim()))
        .copied()
        .unwrap_or(Platform::Offline)
}
