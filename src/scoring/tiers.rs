use serde::Serialize;

/// Display band of a points total.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Unranked,
    Novice,
    Developing,
    Solid,
    Strong,
    Outstanding,
}

/// Which thresholds a total is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierScale {
    SingleEvent,
    Decathlon,
    Heptathlon,
}

impl TierScale {
    /// Lower bounds (exclusive) from `Outstanding` down to `Novice`.
    fn thresholds(self) -> [u64; 5] {
        match self {
            TierScale::SingleEvent => [700, 600, 500, 400, 300],
            TierScale::Decathlon => [7000, 6000, 5000, 4000, 3000],
            TierScale::Heptathlon => [4900, 4200, 3500, 2800, 2100],
        }
    }
}

impl Tier {
    pub fn for_points(points: u64, scale: TierScale) -> Self {
        const ORDER: [Tier; 5] = [
            Tier::Outstanding,
            Tier::Strong,
            Tier::Solid,
            Tier::Developing,
            Tier::Novice,
        ];
        scale
            .thresholds()
            .iter()
            .zip(ORDER)
            .find(|(threshold, _)| points > **threshold)
            .map(|(_, tier)| tier)
            .unwrap_or(Tier::Unranked)
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Outstanding => "outstanding",
            Tier::Strong => "strong",
            Tier::Solid => "solid",
            Tier::Developing => "developing",
            Tier::Novice => "novice",
            Tier::Unranked => "unranked",
        }
    }
}
