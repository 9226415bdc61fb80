//! Configuration for SVG output

use serde::Deserialize;

use crate::units::Unit;

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Rescale the drawing from intrinsic pixels to a physical unit
    pub physical: bool,

    /// Target unit of the rescale; defaults to the unit the drawing declares,
    /// or inches when it declares none
    pub unit: Option<Unit>,

    /// Maximum number of decimals in rewritten numbers
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            physical: false,
            unit: None,
            precision: 6,
        }
    }
}

impl OutputConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is rescaled to physical units
    pub fn with_physical(mut self, physical: bool) -> Self {
        self.physical = physical;
        self
    }

    /// Set the physical unit to rescale to
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Set the number of decimals kept in rewritten numbers
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}
