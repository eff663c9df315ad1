//! Risk classification: turn a UV index value into a category, display
//! color, and protection recommendation.

use serde::{Deserialize, Serialize};

/// WHO-style UV risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
            RiskCategory::VeryHigh => "Very High",
            RiskCategory::Extreme => "Extreme",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display color token associated with a risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskColor {
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
}

impl RiskColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskColor::Green => "green",
            RiskColor::Yellow => "yellow",
            RiskColor::Orange => "orange",
            RiskColor::Red => "red",
            RiskColor::Purple => "purple",
        }
    }
}

impl std::fmt::Display for RiskColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the classification table. `upper_bound` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskBand {
    pub upper_bound: f64,
    pub category: RiskCategory,
    pub color: RiskColor,
    pub recommendation: &'static str,
}

/// Ordered, ascending classification table. Built once at startup and
/// passed by reference; never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskTable {
    bands: [RiskBand; 5],
}

impl Default for RiskTable {
    fn default() -> Self {
        Self {
            bands: [
                RiskBand {
                    upper_bound: 3.0,
                    category: RiskCategory::Low,
                    color: RiskColor::Green,
                    recommendation: "Wear sunglasses on bright days. If you burn easily, \
                                     cover up and use sunscreen.",
                },
                RiskBand {
                    upper_bound: 6.0,
                    category: RiskCategory::Moderate,
                    color: RiskColor::Yellow,
                    recommendation: "Take precautions - cover up, wear a hat, sunglasses, \
                                     and sunscreen. Seek shade during midday hours.",
                },
                RiskBand {
                    upper_bound: 8.0,
                    category: RiskCategory::High,
                    color: RiskColor::Orange,
                    recommendation: "Protection required - UV damages skin and can cause \
                                     sunburn. Reduce time in the sun between 11am-4pm.",
                },
                RiskBand {
                    upper_bound: 11.0,
                    category: RiskCategory::VeryHigh,
                    color: RiskColor::Red,
                    recommendation: "Extra protection needed - unprotected skin will be \
                                     damaged and can burn quickly. Avoid the sun between \
                                     11am-4pm.",
                },
                RiskBand {
                    upper_bound: f64::INFINITY,
                    category: RiskCategory::Extreme,
                    color: RiskColor::Purple,
                    recommendation: "Take all precautions - unprotected skin can burn in \
                                     minutes. Avoid the sun between 11am-4pm, wear a hat, \
                                     sunglasses and sunscreen.",
                },
            ],
        }
    }
}

impl RiskTable {
    /// Classify a UV index value. First band whose upper bound exceeds the
    /// value wins, so boundary values land in the higher band.
    ///
    /// Total for every finite non-negative input. A non-finite input is a
    /// programmer error and is mapped to the unbounded top band.
    pub fn classify(&self, uv_index: f64) -> &RiskBand {
        self.bands
            .iter()
            .find(|band| uv_index < band.upper_bound)
            .unwrap_or(&self.bands[4])
    }

    pub fn bands(&self) -> &[RiskBand] {
        &self.bands
    }
}
