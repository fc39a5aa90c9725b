// placement/tier.rs

/// Discrete difficulty presentation, keyed by how many times the control has dodged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DifficultyTier {
    Calm,
    Wary,
    Elusive,
}

/// Escalation thresholds (inclusive lower bounds)
const WARY_AT: u32 = 4;
const ELUSIVE_AT: u32 = 7;

/// How a tier is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub scale: f32,
    pub opacity: f32,
    /// Multiplier on HSV saturation (1.0 = untouched)
    pub saturation: f32,
    /// Blur radius in logical pixels
    pub blur: f32,
}

impl DifficultyTier {
    pub fn for_count(count: u32) -> Self {
        if count >= ELUSIVE_AT {
            DifficultyTier::Elusive
        } else if count >= WARY_AT {
            DifficultyTier::Wary
        } else {
            DifficultyTier::Calm
        }
    }

    pub fn presentation(self) -> Presentation {
        match self {
            DifficultyTier::Calm => Presentation {
                scale: 1.0,
                opacity: 1.0,
                saturation: 1.0,
                blur: 0.0,
            },
            DifficultyTier::Wary => Presentation {
                scale: 0.92,
                opacity: 0.82,
                saturation: 0.95,
                blur: 0.0,
            },
            DifficultyTier::Elusive => Presentation {
                scale: 0.84,
                opacity: 0.64,
                saturation: 0.9,
                blur: 0.2,
            },
        }
    }
}
