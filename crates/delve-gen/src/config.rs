use crate::error::GenError;

/// Parameters of the cellular automaton.
///
/// Generation runs `mutate_fill_iterations` iterations of the
/// mutate-and-fill rule followed by `mutate_only_iterations` iterations of
/// the plain mutation rule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CaveConfig {
    pub width: i32,
    pub height: i32,
    /// Percentage (0–100) of interior cells seeded as filled.
    pub density: i32,
    pub mutate_fill_iterations: usize,
    pub mutate_only_iterations: usize,
    /// Radius of the window scanned for sparse areas during mutate-and-fill
    /// iterations.
    pub fill_radius: i32,
    /// A cell is filled when its 3×3 window holds at least this many filled
    /// cells.
    pub wall_threshold: i32,
    /// During mutate-and-fill iterations, a cell is also filled when its
    /// fill window holds at most this many filled cells.
    pub fill_threshold: i32,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            density: 40,
            mutate_fill_iterations: 5,
            mutate_only_iterations: 2,
            fill_radius: 2,
            wall_threshold: 5,
            fill_threshold: 2,
        }
    }
}

impl CaveConfig {
    pub fn iterations(&self) -> usize {
        self.mutate_fill_iterations + self.mutate_only_iterations
    }

    /// Reject configurations the generator cannot run with.
    pub fn validate(&self) -> Result<(), GenError> {
        if !(0..=100).contains(&self.density) {
            return Err(GenError::InvalidDensity(self.density));
        }
        if self.width < 3 || self.height < 3 {
            return Err(GenError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.fill_radius < 1 {
            return Err(GenError::InvalidRadius(self.fill_radius));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(CaveConfig::default().validate(), Ok(()));
        assert_eq!(CaveConfig::default().iterations(), 7);
    }

    #[test]
    fn density_bounds_are_inclusive() {
        for density in [0, 100] {
            let c = CaveConfig {
                density,
                ..CaveConfig::default()
            };
            assert!(c.validate().is_ok());
        }
        for density in [-1, 101] {
            let c = CaveConfig {
                density,
                ..CaveConfig::default()
            };
            assert_eq!(c.validate(), Err(GenError::InvalidDensity(density)));
        }
    }

    #[test]
    fn size_and_radius_are_checked() {
        let c = CaveConfig {
            width: 2,
            ..CaveConfig::default()
        };
        assert!(matches!(c.validate(), Err(GenError::InvalidSize { width: 2, .. })));
        let c = CaveConfig {
            fill_radius: 0,
            ..CaveConfig::default()
        };
        assert_eq!(c.validate(), Err(GenError::InvalidRadius(0)));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let c: CaveConfig = serde_json::from_str(r#"{"width":32,"density":55}"#).unwrap();
        assert_eq!(c.width, 32);
        assert_eq!(c.density, 55);
        assert_eq!(c.height, 64);
        assert_eq!(c.wall_threshold, 5);
    }
}
