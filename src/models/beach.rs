use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A cardinal position, used both for the direction a beach faces and for
/// classifying swell and wind angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoPosition {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

impl GeoPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoPosition::North => "N",
            GeoPosition::East => "E",
            GeoPosition::South => "S",
            GeoPosition::West => "W",
        }
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeoPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "N" | "NORTH" => Ok(GeoPosition::North),
            "E" | "EAST" => Ok(GeoPosition::East),
            "S" | "SOUTH" => Ok(GeoPosition::South),
            "W" | "WEST" => Ok(GeoPosition::West),
            other => Err(format!("unknown position '{other}', expected one of N, E, S, W")),
        }
    }
}

/// A registered surf location.
///
/// Stored as a plain JSON array on disk:
/// ```json
/// [
///   { "name": "Manly", "lat": -33.792726, "lng": 151.289824, "position": "E", "user": "some-id" }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beach {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub position: GeoPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl Beach {
    /// Checks the fields a registered beach must have: a non-empty name, a
    /// latitude in `[-90, 90]` and a longitude in `[-180, 180]`.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("Beach name must not be empty");
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            bail!("Beach '{}' has latitude {} outside [-90, 90]", self.name, self.lat);
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            bail!("Beach '{}' has longitude {} outside [-180, 180]", self.name, self.lng);
        }
        Ok(())
    }
}

/// Loads the beach registry from a JSON file at `path`.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed, or if any beach is invalid
/// (see [`Beach::validate`]).
pub fn load_beaches(path: &str) -> Result<Vec<Beach>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read beaches from '{path}'"))?;
    let beaches: Vec<Beach> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse beaches in '{path}'"))?;
    for beach in &beaches {
        beach
            .validate()
            .with_context(|| format!("Invalid beach in '{path}'"))?;
    }
    Ok(beaches)
}

/// Validates `beach` and appends it to the registry at `path`, creating the
/// file if it does not exist yet. Returns the new number of beaches.
pub fn add_beach(path: &str, beach: Beach) -> Result<usize> {
    beach.validate()?;

    let mut beaches = if Path::new(path).exists() {
        load_beaches(path)?
    } else {
        Vec::new()
    };
    beaches.push(beach);

    let json = serde_json::to_string_pretty(&beaches)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write beaches to '{path}'"))?;
    Ok(beaches.len())
}

/// Keeps only the beaches owned by `user`, preserving their order.
pub fn beaches_for_user(beaches: Vec<Beach>, user: &str) -> Vec<Beach> {
    beaches
        .into_iter()
        .filter(|b| b.user.as_deref() == Some(user))
        .collect()
}
