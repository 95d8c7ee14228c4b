use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ledger blocks that make up one activity day.
pub const BLOCKS_PER_DAY: u64 = 144;

/// Default base points for a plain contract interaction, admin adjustable.
pub const DEFAULT_ACTIVITY_POINT_BASE: u64 = 50;
/// Extra points per unit of impact score on a contract interaction.
pub const IMPACT_SCORE_WEIGHT: u64 = 10;
pub const CONTRACT_DEPLOYMENT_BASE: u64 = 500;
pub const CONNECT_USAGE_BASE: u64 = 25;
pub const LIBRARY_USE_BASE: u64 = 100;
/// Flat bonus paid to a referrer, never tier or streak scaled.
pub const REFERRAL_BONUS: u64 = 100;

pub const SILVER_THRESHOLD: u64 = 1_000;
pub const GOLD_THRESHOLD: u64 = 5_000;
pub const PLATINUM_THRESHOLD: u64 = 20_000;
/// Diamond cutoff above Platinum, overridable at instantiation.
pub const DEFAULT_DIAMOND_THRESHOLD: u64 = 50_000;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl Tier {
    pub fn of(total_points: u64, diamond_threshold: u64) -> Self {
        if total_points >= diamond_threshold {
            Tier::Diamond
        } else if total_points >= PLATINUM_THRESHOLD {
            Tier::Platinum
        } else if total_points >= GOLD_THRESHOLD {
            Tier::Gold
        } else if total_points >= SILVER_THRESHOLD {
            Tier::Silver
        } else {
            Tier::Bronze
        }
    }

    /// Point multiplier scaled by 100, so Bronze pays out the base unchanged.
    pub fn multiplier(&self) -> u64 {
        match self {
            Tier::Bronze => 100,
            Tier::Silver => 120,
            Tier::Gold => 150,
            Tier::Platinum | Tier::Diamond => 200,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    ContractInteraction,
    ContractDeployment,
    ConnectUsage,
    LibraryUse,
    Referral,
    GithubContribution,
}

impl ActivityKind {
    pub fn base_points(&self) -> u64 {
        match self {
            ActivityKind::ContractInteraction => DEFAULT_ACTIVITY_POINT_BASE,
            ActivityKind::ContractDeployment => CONTRACT_DEPLOYMENT_BASE,
            ActivityKind::ConnectUsage => CONNECT_USAGE_BASE,
            ActivityKind::LibraryUse => LIBRARY_USE_BASE,
            ActivityKind::Referral => REFERRAL_BONUS,
            // github contributions carry an oracle supplied raw amount
            ActivityKind::GithubContribution => 0,
        }
    }

    /// Flat kinds are paid out as-is, bypassing tier and streak scaling.
    pub fn is_flat(&self) -> bool {
        matches!(
            self,
            ActivityKind::Referral | ActivityKind::GithubContribution
        )
    }
}

/// Multiplier for a streak of consecutive activity days. The streak value is
/// the one in force before the current activity is recorded, so the 2x rate
/// first pays out on the 8th consecutive day.
pub fn streak_multiplier(streak_days: u32) -> u64 {
    if streak_days >= 30 {
        3
    } else if streak_days >= 7 {
        2
    } else {
        1
    }
}

/// Points awarded for a single activity. Integer arithmetic throughout, the
/// tier multiplier is applied at 1/100 scale and truncates.
pub fn calculate_points(
    kind: ActivityKind,
    base_override: Option<u64>,
    impact_score: u64,
    tier: Tier,
    streak_days: u32,
) -> u64 {
    let mut base = base_override.unwrap_or_else(|| kind.base_points());
    if kind == ActivityKind::ContractInteraction {
        base += impact_score * IMPACT_SCORE_WEIGHT;
    }
    if kind.is_flat() {
        return base;
    }
    base * tier.multiplier() / 100 * streak_multiplier(streak_days)
}
