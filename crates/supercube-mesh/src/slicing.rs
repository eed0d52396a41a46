use crate::constants::MIN_SLICES;
use crate::error::BuildError;

/// Target spacing for extra vertex rows/columns on a face.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Slicing {
    pub enabled: bool,
    /// World units between slices.
    pub distance: f32,
}

impl Default for Slicing {
    fn default() -> Self {
        Self {
            enabled: false,
            distance: 1.0,
        }
    }
}

impl Slicing {
    pub const fn every(distance: f32) -> Self {
        Self {
            enabled: true,
            distance,
        }
    }

    /// Vertex count along an edge of length `extent`: `max(2, floor(extent / distance) + 1)`.
    /// Saturates at `usize::MAX` for huge ratios.
    #[inline]
    pub fn count(&self, extent: f32) -> usize {
        if !self.enabled {
            return MIN_SLICES;
        }
        let steps = (extent / self.distance).clamp(0.0, usize::MAX as f32) as usize;
        steps.saturating_add(1).max(MIN_SLICES)
    }

    pub(crate) fn validate(&self) -> Result<(), BuildError> {
        if self.enabled && !(self.distance.is_finite() && self.distance > 0.0) {
            return Err(BuildError::InvalidSliceDistance(self.distance));
        }
        Ok(())
    }
}
