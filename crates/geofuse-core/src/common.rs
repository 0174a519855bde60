// crates/geofuse-core/src/common.rs

//! Small shared types with no better home.

use serde::{Deserialize, Serialize};

/// Per-kind feature counts for a loaded store.
///
/// # Examples
///
/// ```
/// use geofuse_core::FeatureStats;
///
/// let stats = FeatureStats {
///     health_centers: 7,
///     roads: 5,
///     checkpoints: 4,
///     border_crossings: 3,
///     unknown: 0,
/// };
/// assert_eq!(stats.total(), 19);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStats {
    pub health_centers: usize,
    pub roads: usize,
    pub checkpoints: usize,
    pub border_crossings: usize,
    pub unknown: usize,
}

impl FeatureStats {
    /// Total number of features across all kinds.
    pub fn total(&self) -> usize {
        self.health_centers + self.roads + self.checkpoints + self.border_crossings + self.unknown
    }
}
