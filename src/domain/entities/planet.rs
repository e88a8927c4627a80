use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanetId(pub i64);

impl From<i64> for PlanetId {
    fn from(value: i64) -> Self {
        PlanetId(value)
    }
}

impl From<PlanetId> for i64 {
    fn from(value: PlanetId) -> Self {
        value.0
    }
}

/// One catalog row. Every measurement is nullable on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub disc_method: Option<String>,
    #[serde(default)]
    pub disc_year: Option<i32>,
    #[serde(default)]
    pub orbperd: Option<f64>,
    #[serde(default)]
    pub rade: Option<f64>,
    #[serde(default)]
    pub masse: Option<f64>,
    #[serde(default)]
    pub st_teff: Option<f64>,
    #[serde(default)]
    pub st_rad: Option<f64>,
    #[serde(default)]
    pub st_mass: Option<f64>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Planet {
    pub fn planet_id(&self) -> PlanetId {
        PlanetId(self.id)
    }

    pub fn measurement(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::DiscYear => self.disc_year.map(f64::from),
            Dimension::OrbitalPeriod => self.orbperd,
            Dimension::Radius => self.rade,
            Dimension::Mass => self.masse,
            Dimension::StarTemperature => self.st_teff,
            Dimension::StarRadius => self.st_rad,
            Dimension::StarMass => self.st_mass,
        }
    }
}

/// Numeric dimensions a record can be filtered and sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    DiscYear,
    OrbitalPeriod,
    Radius,
    Mass,
    StarTemperature,
    StarRadius,
    StarMass,
}

pub struct DimensionSpec {
    pub dimension: Dimension,
    pub wire: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub decimals: usize,
    pub integral: bool,
}

pub static DIMENSIONS: [DimensionSpec; 7] = [
    DimensionSpec {
        dimension: Dimension::DiscYear,
        wire: "disc_year",
        label: "Discovered",
        unit: "",
        decimals: 0,
        integral: true,
    },
    DimensionSpec {
        dimension: Dimension::OrbitalPeriod,
        wire: "orbperd",
        label: "Orbital period",
        unit: "days",
        decimals: 2,
        integral: false,
    },
    DimensionSpec {
        dimension: Dimension::Radius,
        wire: "rade",
        label: "Radius",
        unit: "R⊕",
        decimals: 2,
        integral: false,
    },
    DimensionSpec {
        dimension: Dimension::Mass,
        wire: "masse",
        label: "Mass",
        unit: "M⊕",
        decimals: 2,
        integral: false,
    },
    DimensionSpec {
        dimension: Dimension::StarTemperature,
        wire: "st_teff",
        label: "Star Teff",
        unit: "K",
        decimals: 0,
        integral: false,
    },
    DimensionSpec {
        dimension: Dimension::StarRadius,
        wire: "st_rad",
        label: "Star radius",
        unit: "R☉",
        decimals: 2,
        integral: false,
    },
    DimensionSpec {
        dimension: Dimension::StarMass,
        wire: "st_mass",
        label: "Star mass",
        unit: "M☉",
        decimals: 2,
        integral: false,
    },
];

impl Dimension {
    pub fn all() -> impl Iterator<Item = Dimension> {
        DIMENSIONS.iter().map(|spec| spec.dimension)
    }

    // DIMENSIONS is declared in variant order.
    pub fn spec(self) -> &'static DimensionSpec {
        &DIMENSIONS[self as usize]
    }

    pub fn wire(self) -> &'static str {
        self.spec().wire
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub avg: Option<f64>,
    #[serde(default)]
    pub median: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetStats {
    pub count: u64,
    #[serde(default)]
    pub orbperd: MetricSummary,
    #[serde(default)]
    pub rade: MetricSummary,
    #[serde(default)]
    pub masse: MetricSummary,
    #[serde(default)]
    pub st_teff: MetricSummary,
    #[serde(default)]
    pub st_rad: MetricSummary,
    #[serde(default)]
    pub st_mass: MetricSummary,
}

impl PlanetStats {
    pub fn summary(&self, dimension: Dimension) -> Option<&MetricSummary> {
        match dimension {
            Dimension::DiscYear => None,
            Dimension::OrbitalPeriod => Some(&self.orbperd),
            Dimension::Radius => Some(&self.rade),
            Dimension::Mass => Some(&self.masse),
            Dimension::StarTemperature => Some(&self.st_teff),
            Dimension::StarRadius => Some(&self.st_rad),
            Dimension::StarMass => Some(&self.st_mass),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCount {
    pub disc_method: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub disc_year: i32,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetCount {
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Hist,
    Year,
    Method,
}

impl ChartKind {
    pub fn as_wire(self) -> &'static str {
        match self {
            ChartKind::Hist => "hist",
            ChartKind::Year => "year",
            ChartKind::Method => "method",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    #[serde(default)]
    pub points: Vec<SeriesPoint>,
}

/// Payload of `GET /vis/discovery`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryChart {
    pub chart: ChartKind,
    #[serde(default)]
    pub bins: Vec<HistogramBin>,
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
    #[serde(default)]
    pub series: Vec<ChartSeries>,
}

impl DiscoveryChart {
    pub fn is_empty(&self) -> bool {
        self.bins.iter().all(|bin| bin.count == 0)
            && self.series.iter().all(|series| series.points.is_empty())
    }
}

pub const CHART_MIN_BINS: u32 = 5;
pub const CHART_MAX_BINS: u32 = 200;
pub const CHART_MAX_SIGMA: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub bins: u32,
    pub sigma: f64,
}

impl Default for ChartRequest {
    fn default() -> Self {
        Self {
            kind: ChartKind::Hist,
            bins: 30,
            sigma: 3.0,
        }
    }
}

impl ChartRequest {
    pub fn new(kind: ChartKind, bins: u32, sigma: f64) -> Self {
        let sigma = if sigma.is_finite() {
            sigma.clamp(0.0, CHART_MAX_SIGMA)
        } else {
            0.0
        };
        Self {
            kind,
            bins: bins.clamp(CHART_MIN_BINS, CHART_MAX_BINS),
            sigma,
        }
    }
}
