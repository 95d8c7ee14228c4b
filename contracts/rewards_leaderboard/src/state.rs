use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct ContractInfo {
    pub admin: Addr,
    pub activity_point_base: u64,
    pub paused: bool,
    pub decay_policy: DecayPolicy,
    /// Blocks without activity before a streak decay call takes effect.
    pub decay_cooldown: u64,
    pub diamond_threshold: u64,
}

/// How a stale streak is reduced once the decay cooldown has elapsed.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum DecayPolicy {
    Reset,
    Halve,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug, Default)]
pub struct UserStats {
    pub total_points: u64,
    pub contract_impact_points: u64,
    pub library_usage_points: u64,
    pub github_contrib_points: u64,
    pub referral_points: u64,
    pub claimed_points: u64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug, Default)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_activity_time: u64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct Achievement {
    pub unlocked_at: u64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct ClaimHistoryEntry {
    pub amount: u64,
    pub claimed_at: u64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug, Default)]
pub struct GlobalStats {
    pub total_points_distributed: u64,
    /// Largest single point grant ever observed, not a user total.
    pub top_score: u64,
    pub total_users: u64,
}

pub const CONTRACT_INFO: Item<ContractInfo> = Item::new("contract_info");
pub const GLOBAL_STATS: Item<GlobalStats> = Item::new("global_stats");

/// Created lazily on a user's first credited activity, never deleted.
pub const USER_STATS: Map<&Addr, UserStats> = Map::new("user_stats");
pub const STREAKS: Map<&Addr, StreakState> = Map::new("streaks");
/// Presence of an entry means the achievement is unlocked.
pub const ACHIEVEMENTS: Map<(&Addr, u8), Achievement> = Map::new("achievements");
/// referred user -> referrer, immutable once written
pub const REFERRERS: Map<&Addr, Addr> = Map::new("referrers");
pub const CLAIMABLE: Map<&Addr, u64> = Map::new("claimable");
pub const CLAIM_COUNT: Map<&Addr, u64> = Map::new("claim_count");
pub const CLAIM_HISTORY: Map<(&Addr, u64), ClaimHistoryEntry> = Map::new("claim_history");
/// Block of the last effective decay per user, guards repeated decay calls.
pub const LAST_DECAY: Map<&Addr, u64> = Map::new("last_decay");
