use cosmwasm_schema::QueryResponses;
use cosmwasm_std::Addr;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::points::{ActivityKind, Tier};
use crate::state::{
    Achievement, ClaimHistoryEntry, ContractInfo, DecayPolicy, GlobalStats, StreakState, UserStats,
};

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct InstantiateMsg {
    pub admin: Option<Addr>,
    pub activity_point_base: Option<u64>,
    pub decay_policy: Option<DecayPolicy>,
    pub decay_cooldown: Option<u64>,
    pub diamond_threshold: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Record a contract interaction for a user, scaled by impact score.
    LogContractActivity { user: Addr, impact_score: u64 },
    /// Record a contract deployment for a user.
    LogContractDeployment { user: Addr },
    /// Record usage of an sdk library for a user.
    LogLibraryUsage { user: Addr, library: String },
    /// Oracle supplied contribution points, admin only.
    LogGithubContribution { user: Addr, points: u64 },
    /// Register a referral and pay the referrer a flat bonus, admin only.
    LogReferral { new_user: Addr, referrer: Addr },
    /// Reduce a stale streak once the cooldown has elapsed, no-op otherwise.
    ApplyDecay { user: Addr },
    /// Escrow claimable rewards for a user, admin only.
    AddClaimableRewards { user: Addr, amount: u64 },
    /// Drain the caller's claimable balance into their point total.
    ClaimRewards {},
    SetActivityPointBase { base: u64 },
    SetPaused { paused: bool },
    UpdateContractInfo(UpdateContractInfoMsg),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct UpdateContractInfoMsg {
    pub admin: Option<Addr>,
    pub decay_policy: Option<DecayPolicy>,
    pub decay_cooldown: Option<u64>,
    pub diamond_threshold: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug, QueryResponses)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    #[returns(ContractInfo)]
    GetContractInfo {},
    /// None until the user's first credited activity.
    #[returns(Option<UserStats>)]
    GetUserStats { user: Addr },
    #[returns(StreakState)]
    GetUserStreak { user: Addr },
    #[returns(Tier)]
    GetUserTier { user: Addr },
    #[returns(u64)]
    GetTierMultiplier { tier: Tier },
    #[returns(bool)]
    HasAchievement { user: Addr, id: u8 },
    #[returns(Option<Achievement>)]
    GetAchievement { user: Addr, id: u8 },
    #[returns(u64)]
    GetClaimableRewards { user: Addr },
    #[returns(Option<ClaimHistoryEntry>)]
    GetClaimHistory { user: Addr, index: u64 },
    #[returns(GlobalStats)]
    GetGlobalStats {},
    #[returns(RankResponse)]
    GetUserRank { user: Addr },
    /// Pure preview of the award formula, mirrors what a write would pay.
    #[returns(u64)]
    CalculatePoints {
        kind: ActivityKind,
        base_override: Option<u64>,
        impact_score: Option<u64>,
        tier: Tier,
        streak_days: u32,
    },
    #[returns(Vec<LeaderboardEntry>)]
    Leaderboard {
        offset: Option<Addr>,
        limit: Option<u32>,
        order: Option<u8>,
    },
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct RankResponse {
    /// User total as a percentage of the top single grant ever observed.
    pub percentile: u64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct LeaderboardEntry {
    pub user: Addr,
    pub stats: UserStats,
    pub tier: Tier,
}
