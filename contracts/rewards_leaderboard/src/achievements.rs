use cosmwasm_std::{Addr, StdResult, Storage};

use crate::state::{Achievement, UserStats, ACHIEVEMENTS};

/// Deployed or interacted with an impactful contract.
pub const SMART_ARCHITECT: u8 = 1;
/// Deep integration of the connect and transactions libraries.
pub const CONNECT_MASTER: u8 = 2;
/// Contributed to public repositories.
pub const OSS_CONTRIBUTOR: u8 = 3;
/// Legacy builder with a consistent leaderboard presence.
pub const STACKMART_OG: u8 = 4;

pub const ALL_ACHIEVEMENTS: [u8; 4] = [SMART_ARCHITECT, CONNECT_MASTER, OSS_CONTRIBUTOR, STACKMART_OG];

const CONNECT_MASTER_THRESHOLD: u64 = 50;
const STACKMART_OG_THRESHOLD: u64 = 10_000;

pub fn is_satisfied(id: u8, stats: &UserStats) -> bool {
    match id {
        SMART_ARCHITECT => stats.contract_impact_points > 0,
        CONNECT_MASTER => stats.library_usage_points >= CONNECT_MASTER_THRESHOLD,
        OSS_CONTRIBUTOR => stats.github_contrib_points > 0,
        STACKMART_OG => stats.total_points >= STACKMART_OG_THRESHOLD,
        _ => false,
    }
}

/// Unlock every achievement whose predicate now holds and was not unlocked
/// before. Already unlocked entries are left untouched, so re-evaluation is
/// a no-op. Returns the ids unlocked by this call.
pub fn evaluate(
    storage: &mut dyn Storage,
    user: &Addr,
    stats: &UserStats,
    now: u64,
) -> StdResult<Vec<u8>> {
    let mut unlocked = vec![];
    for id in ALL_ACHIEVEMENTS {
        if is_satisfied(id, stats) && !ACHIEVEMENTS.has(storage, (user, id)) {
            ACHIEVEMENTS.save(storage, (user, id), &Achievement { unlocked_at: now })?;
            unlocked.push(id);
        }
    }
    Ok(unlocked)
}
