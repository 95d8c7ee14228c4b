use crate::points::BLOCKS_PER_DAY;
use crate::state::{DecayPolicy, StreakState};

/// Default decay cooldown of two activity days. A streak is only reducible
/// once it has already been broken by inactivity.
pub const DEFAULT_DECAY_COOLDOWN: u64 = 2 * BLOCKS_PER_DAY;

/// Advance a user's streak for one qualifying activity at block `now`.
/// Same-day repeats leave the streak unchanged, exactly one elapsed day
/// extends it, any longer gap resets it to 1. `last_activity_time` is
/// refreshed on every call.
pub fn advance(streak: &mut StreakState, now: u64) {
    if streak.last_activity_time == 0 && streak.current_streak == 0 {
        streak.current_streak = 1;
    } else {
        let delta_days = now.saturating_sub(streak.last_activity_time) / BLOCKS_PER_DAY;
        match delta_days {
            0 => {}
            1 => streak.current_streak += 1,
            _ => streak.current_streak = 1,
        }
    }
    streak.longest_streak = streak.longest_streak.max(streak.current_streak);
    streak.last_activity_time = now;
}

/// Streak value after one effective decay under the given policy.
pub fn decayed(current_streak: u32, policy: DecayPolicy) -> u32 {
    match policy {
        DecayPolicy::Reset => 0,
        DecayPolicy::Halve => current_streak / 2,
    }
}
