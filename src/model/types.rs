//! Record types

use std::fmt;

use serde::Serialize;

/// Selects which record kind a search projects its results to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordKind {
    /// Celestial objects (`NEO`)
    #[serde(rename = "NEO")]
    Object,
    /// Approach events (`Path`)
    #[serde(rename = "Path")]
    Path,
}

impl RecordKind {
    /// Returns the external name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Object => "NEO",
            RecordKind::Path => "Path",
        }
    }

    /// Resolves an external kind name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "NEO" => Some(RecordKind::Object),
            "Path" => Some(RecordKind::Path),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single close approach of a near-Earth object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitPath {
    /// Name of the owning object (lookup key into the catalog)
    neo_name: String,
    /// ISO calendar date, `YYYY-MM-DD`
    close_approach_date: String,
    /// Miss distance in kilometers
    miss_distance_kilometers: f64,
    /// Zero-based load-order row, unique within a catalog
    row: usize,
}

impl OrbitPath {
    /// Creates a new orbit path
    pub fn new(
        neo_name: impl Into<String>,
        close_approach_date: impl Into<String>,
        miss_distance_kilometers: f64,
        row: usize,
    ) -> Self {
        Self {
            neo_name: neo_name.into(),
            close_approach_date: close_approach_date.into(),
            miss_distance_kilometers,
            row,
        }
    }

    pub fn neo_name(&self) -> &str {
        &self.neo_name
    }

    pub fn close_approach_date(&self) -> &str {
        &self.close_approach_date
    }

    pub fn miss_distance_kilometers(&self) -> f64 {
        self.miss_distance_kilometers
    }

    /// Returns the record identity of this path
    pub fn row(&self) -> usize {
        self.row
    }
}

impl fmt::Display for OrbitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OrbitPath name:{} miss_distance_km:{} orbit_date:{}",
            self.neo_name, self.miss_distance_kilometers, self.close_approach_date
        )
    }
}

/// A near-Earth object and every close approach recorded for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearEarthObject {
    id: String,
    name: String,
    is_potentially_hazardous_asteroid: bool,
    diameter_min_km: f64,
    diameter_max_km: f64,
    /// Approaches in load order
    orbits: Vec<OrbitPath>,
}

impl NearEarthObject {
    /// Creates an object with no recorded approaches
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        is_potentially_hazardous_asteroid: bool,
        diameter_min_km: f64,
        diameter_max_km: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_potentially_hazardous_asteroid,
            diameter_min_km,
            diameter_max_km,
            orbits: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_potentially_hazardous_asteroid(&self) -> bool {
        self.is_potentially_hazardous_asteroid
    }

    pub fn diameter_min_km(&self) -> f64 {
        self.diameter_min_km
    }

    pub fn diameter_max_km(&self) -> f64 {
        self.diameter_max_km
    }

    /// Returns the approaches of this object in load order
    pub fn orbits(&self) -> &[OrbitPath] {
        &self.orbits
    }

    /// Appends an approach. Only the catalog loader calls this.
    pub(crate) fn update_orbits(&mut self, orbit: OrbitPath) {
        debug_assert_eq!(orbit.neo_name(), self.name);
        self.orbits.push(orbit);
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dates: Vec<&str> = self
            .orbits
            .iter()
            .map(|o| o.close_approach_date())
            .collect();
        write!(
            f,
            "NearEarthObject id:{} name:{} orbit_dates:{:?}",
            self.id, self.name, dates
        )
    }
}
