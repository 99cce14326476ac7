use crate::fixed::Fixed64;

/// Identifier of the sentinel material returned for unknown lookups.
pub const UNKNOWN_MATERIAL: &str = "unknown";

/// A material definition in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub identifier: String,
    pub durability: u32,
    pub mining_speed: Fixed64,
    pub attack: Fixed64,
}

impl Material {
    pub fn new(
        identifier: impl Into<String>,
        durability: u32,
        mining_speed: Fixed64,
        attack: Fixed64,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            durability,
            mining_speed,
            attack,
        }
    }

    /// The sentinel material. Has no stats.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_MATERIAL, 0, Fixed64::ZERO, Fixed64::ZERO)
    }

    pub fn is_unknown(&self) -> bool {
        self.identifier == UNKNOWN_MATERIAL
    }
}
