//! Free/Pro tier switch
//!
//! This is a local toggle for demonstrating the upgrade flow, not an
//! entitlement check.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    Free,
    Pro,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Free => "Free",
            Tier::Pro => "Pro",
        }
    }
}

/// Features only available in the Pro tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProFeature {
    Particles,
    DepthOfField,
    MotionBlur,
    Export4k,
    VideoExport,
}

impl ProFeature {
    pub const ALL: [ProFeature; 5] = [
        ProFeature::Particles,
        ProFeature::DepthOfField,
        ProFeature::MotionBlur,
        ProFeature::Export4k,
        ProFeature::VideoExport,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProFeature::Particles => "Particle Effects",
            ProFeature::DepthOfField => "Depth of Field",
            ProFeature::MotionBlur => "Motion Blur",
            ProFeature::Export4k => "4K Export",
            ProFeature::VideoExport => "Animation Export (Video)",
        }
    }
}

/// Current tier of the session
#[derive(Debug, Clone, Copy, Default)]
pub struct TierGate {
    tier: Tier,
}

impl TierGate {
    pub fn new(tier: Tier) -> Self {
        Self { tier }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn is_pro(&self) -> bool {
        self.tier == Tier::Pro
    }

    pub fn set_tier(&mut self, tier: Tier) {
        if self.tier != tier {
            tracing::info!("Switched to {} tier", tier.name());
        }
        self.tier = tier;
    }

    pub fn toggle(&mut self) {
        let next = match self.tier {
            Tier::Free => Tier::Pro,
            Tier::Pro => Tier::Free,
        };
        self.set_tier(next);
    }

    pub fn is_entitled(&self, _feature: ProFeature) -> bool {
        self.is_pro()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_tier_has_no_pro_features() {
        let gate = TierGate::default();
        for feature in ProFeature::ALL {
            assert!(!gate.is_entitled(feature));
        }
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut gate = TierGate::default();
        gate.toggle();
        assert!(gate.is_entitled(ProFeature::VideoExport));
        gate.toggle();
        assert_eq!(gate.tier(), Tier::Free);
    }
}
