// tree archetype: the immutable parameter record consumed by the builder
// external tools (UI, presets) own and populate it; the core only validates and reads

use std::error::Error;
use std::fmt;

use crate::config;

/// Closed range `[min, max]` a random draw is taken from.
/// Degenerate intervals (`min == max`) are valid and always yield `min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

impl From<(f32, f32)> for Interval {
    fn from((min, max): (f32, f32)) -> Self {
        Self { min, max }
    }
}

/// The four interval pairs governing one branch class.
/// Rotation and bending are in degrees, scales are dimensionless factors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchProfile {
    pub height_scale: Interval,
    pub width_scale: Interval,
    pub rotation: Interval,
    pub bending: Interval,
}

impl BranchProfile {
    // (label, interval) pairs, validated as a group
    pub fn intervals(&self) -> [(&'static str, Interval); 4] {
        [
            ("height scale", self.height_scale),
            ("width scale", self.width_scale),
            ("rotation", self.rotation),
            ("bending", self.bending),
        ]
    }
}

// generation parameters for a whole tree
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeArchetype {
    pub loop_count: i32,
    pub sides: i32,
    pub trunk_height: f32,
    pub trunk_width: f32,
    pub main: BranchProfile,
    pub secondary: BranchProfile,
}

impl Default for TreeArchetype {
    fn default() -> Self {
        Self {
            loop_count: config::LOOP_COUNT,
            sides: config::SIDES,
            trunk_height: config::TRUNK_HEIGHT,
            trunk_width: config::TRUNK_WIDTH,
            main: BranchProfile {
                height_scale: config::MAIN_HEIGHT_SCALE.into(),
                width_scale: config::MAIN_WIDTH_SCALE.into(),
                rotation: config::MAIN_ROTATION.into(),
                bending: config::MAIN_BENDING.into(),
            },
            secondary: BranchProfile {
                height_scale: config::SECONDARY_HEIGHT_SCALE.into(),
                width_scale: config::SECONDARY_WIDTH_SCALE.into(),
                rotation: config::SECONDARY_ROTATION.into(),
                bending: config::SECONDARY_BENDING.into(),
            },
        }
    }
}

impl TreeArchetype {
    /// Checks every field the generator relies on, before any buffer is allocated.
    ///
    /// # Returns
    /// `Ok(())` for a usable archetype, otherwise the first violation found.
    pub fn validate(&self) -> Result<(), ArchetypeError> {
        if self.loop_count < 0 {
            return Err(ArchetypeError::NegativeLoopCount(self.loop_count));
        }
        if self.sides < 3 {
            return Err(ArchetypeError::TooFewSides(self.sides));
        }
        if self.trunk_height <= 0.0 || self.trunk_width <= 0.0 {
            return Err(ArchetypeError::NonPositiveTrunk {
                height: self.trunk_height,
                width: self.trunk_width,
            });
        }
        for (class, profile) in [("main", &self.main), ("secondary", &self.secondary)] {
            for (label, interval) in profile.intervals() {
                if !interval.is_ordered() {
                    return Err(ArchetypeError::InvertedInterval {
                        class,
                        label,
                        min: interval.min,
                        max: interval.max,
                    });
                }
            }
        }
        Ok(())
    }
}

// configuration errors; generation never starts once one of these is reported
#[derive(Clone, Debug, PartialEq)]
pub enum ArchetypeError {
    NegativeLoopCount(i32),
    TooFewSides(i32),
    NonPositiveTrunk { height: f32, width: f32 },
    InvertedInterval {
        class: &'static str,
        label: &'static str,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for ArchetypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLoopCount(n) => {
                write!(f, "loop count must be >= 0, got {}", n)
            }
            Self::TooFewSides(n) => {
                write!(f, "ring cross-section needs at least 3 sides, got {}", n)
            }
            Self::NonPositiveTrunk { height, width } => {
                write!(f, "trunk height and width must be positive, got {}x{}", height, width)
            }
            Self::InvertedInterval { class, label, min, max } => {
                write!(f, "{} branch {} interval is inverted: [{}, {}]", class, label, min, max)
            }
        }
    }
}

impl Error for ArchetypeError {}
