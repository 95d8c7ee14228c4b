#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;

use cosmwasm_std::{
    attr, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdResult, Storage,
};
use cw_storage_plus::Bound;

use crate::achievements;
use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, InstantiateMsg, LeaderboardEntry, QueryMsg, RankResponse, UpdateContractInfoMsg,
};
use crate::points::{
    calculate_points, ActivityKind, Tier, CONNECT_USAGE_BASE, DEFAULT_ACTIVITY_POINT_BASE,
    DEFAULT_DIAMOND_THRESHOLD, REFERRAL_BONUS,
};
use crate::state::{
    ClaimHistoryEntry, ContractInfo, DecayPolicy, GlobalStats, StreakState, UserStats,
    ACHIEVEMENTS, CLAIMABLE, CLAIM_COUNT, CLAIM_HISTORY, CONTRACT_INFO, GLOBAL_STATS, LAST_DECAY,
    REFERRERS, STREAKS, USER_STATS,
};
use crate::streak::{self, DEFAULT_DECAY_COOLDOWN};

// settings for pagination
const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

/// Point category a grant is credited to.
#[derive(Clone, Copy, PartialEq)]
enum Category {
    ContractImpact,
    LibraryUsage,
    GithubContrib,
    Referral,
    Claimed,
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    let contract_info = ContractInfo {
        admin: msg.admin.unwrap_or(info.sender),
        activity_point_base: msg
            .activity_point_base
            .unwrap_or(DEFAULT_ACTIVITY_POINT_BASE),
        paused: false,
        decay_policy: msg.decay_policy.unwrap_or(DecayPolicy::Halve),
        decay_cooldown: msg.decay_cooldown.unwrap_or(DEFAULT_DECAY_COOLDOWN),
        diamond_threshold: msg.diamond_threshold.unwrap_or(DEFAULT_DIAMOND_THRESHOLD),
    };
    CONTRACT_INFO.save(deps.storage, &contract_info)?;
    GLOBAL_STATS.save(deps.storage, &GlobalStats::default())?;
    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::LogContractActivity { user, impact_score } => {
            log_contract_activity(deps, env, user, impact_score)
        }
        ExecuteMsg::LogContractDeployment { user } => log_contract_deployment(deps, env, user),
        ExecuteMsg::LogLibraryUsage { user, library } => {
            log_library_usage(deps, env, user, library)
        }
        ExecuteMsg::LogGithubContribution { user, points } => {
            log_github_contribution(deps, env, info, user, points)
        }
        ExecuteMsg::LogReferral { new_user, referrer } => {
            log_referral(deps, env, info, new_user, referrer)
        }
        ExecuteMsg::ApplyDecay { user } => apply_decay(deps, env, user),
        ExecuteMsg::AddClaimableRewards { user, amount } => {
            add_claimable_rewards(deps, info, user, amount)
        }
        ExecuteMsg::ClaimRewards {} => claim_rewards(deps, env, info),
        ExecuteMsg::SetActivityPointBase { base } => set_activity_point_base(deps, info, base),
        ExecuteMsg::SetPaused { paused } => set_paused(deps, info, paused),
        ExecuteMsg::UpdateContractInfo(msg) => update_contract_info(deps, info, msg),
    }
}

fn assert_admin(contract_info: &ContractInfo, sender: &Addr) -> Result<(), ContractError> {
    if sender.ne(&contract_info.admin) {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

fn assert_not_paused(contract_info: &ContractInfo) -> Result<(), ContractError> {
    if contract_info.paused {
        return Err(ContractError::Paused {});
    }
    Ok(())
}

/// Credit a point grant to one category of a user's stats and fold it into
/// the global aggregates in the same message. Creates the stats record on
/// first touch and re-evaluates achievements afterwards. Returns the updated
/// stats and the achievement ids unlocked by this grant.
fn credit_points(
    storage: &mut dyn Storage,
    user: &Addr,
    category: Category,
    amount: u64,
    now: u64,
) -> StdResult<(UserStats, Vec<u8>)> {
    let existing = USER_STATS.may_load(storage, user)?;
    let first_touch = existing.is_none();
    let mut stats = existing.unwrap_or_default();

    match category {
        Category::ContractImpact => stats.contract_impact_points += amount,
        Category::LibraryUsage => stats.library_usage_points += amount,
        Category::GithubContrib => stats.github_contrib_points += amount,
        Category::Referral => stats.referral_points += amount,
        Category::Claimed => stats.claimed_points += amount,
    }
    stats.total_points += amount;
    USER_STATS.save(storage, user, &stats)?;

    let mut global = GLOBAL_STATS.load(storage)?;
    global.total_points_distributed += amount;
    global.top_score = global.top_score.max(amount);
    if first_touch {
        global.total_users += 1;
    }
    GLOBAL_STATS.save(storage, &global)?;

    let unlocked = achievements::evaluate(storage, user, &stats, now)?;
    Ok((stats, unlocked))
}

/// Award a tier and streak scaled activity grant. The multipliers use the
/// stats and streak in force before this activity, then the streak advances
/// and the grant is credited.
fn grant_activity(
    storage: &mut dyn Storage,
    contract_info: &ContractInfo,
    user: &Addr,
    kind: ActivityKind,
    base_override: Option<u64>,
    impact_score: u64,
    category: Category,
    now: u64,
) -> StdResult<u64> {
    let stats = USER_STATS.may_load(storage, user)?.unwrap_or_default();
    let tier = Tier::of(stats.total_points, contract_info.diamond_threshold);
    let mut streak = STREAKS.may_load(storage, user)?.unwrap_or_default();

    let points = calculate_points(
        kind,
        base_override,
        impact_score,
        tier,
        streak.current_streak,
    );

    streak::advance(&mut streak, now);
    STREAKS.save(storage, user, &streak)?;
    credit_points(storage, user, category, points, now)?;
    Ok(points)
}

pub fn log_contract_activity(
    deps: DepsMut,
    env: Env,
    user: Addr,
    impact_score: u64,
) -> Result<Response, ContractError> {
    let contract_info = CONTRACT_INFO.load(deps.storage)?;
    assert_not_paused(&contract_info)?;

    let points = grant_activity(
        deps.storage,
        &contract_info,
        &user,
        ActivityKind::ContractInteraction,
        Some(contract_info.activity_point_base),
        impact_score,
        Category::ContractImpact,
        env.block.height,
    )?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "log_contract_activity"),
        attr("user", user),
        attr("points", points.to_string()),
    ]))
}

pub fn log_contract_deployment(
    deps: DepsMut,
    env: Env,
    user: Addr,
) -> Result<Response, ContractError> {
    let contract_info = CONTRACT_INFO.load(deps.storage)?;
    assert_not_paused(&contract_info)?;

    let points = grant_activity(
        deps.storage,
        &contract_info,
        &user,
        ActivityKind::ContractDeployment,
        None,
        0,
        Category::ContractImpact,
        env.block.height,
    )?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "log_contract_deployment"),
        attr("user", user),
        attr("points", points.to_string()),
    ]))
}

pub fn log_library_usage(
    deps: DepsMut,
    env: Env,
    user: Addr,
    library: String,
) -> Result<Response, ContractError> {
    let contract_info = CONTRACT_INFO.load(deps.storage)?;
    assert_not_paused(&contract_info)?;

    // sdk library logs pay out at the connect usage rate
    let points = grant_activity(
        deps.storage,
        &contract_info,
        &user,
        ActivityKind::ConnectUsage,
        Some(CONNECT_USAGE_BASE),
        0,
        Category::LibraryUsage,
        env.block.height,
    )?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "log_library_usage"),
        attr("user", user),
        attr("library", library),
        attr("points", points.to_string()),
    ]))
}

pub fn log_github_contribution(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    user: Addr,
    points: u64,
) -> Result<Response, ContractError> {
    let contract_info = CONTRACT_INFO.load(deps.storage)?;
    assert_admin(&contract_info, &info.sender)?;
    assert_not_paused(&contract_info)?;

    let points = grant_activity(
        deps.storage,
        &contract_info,
        &user,
        ActivityKind::GithubContribution,
        Some(points),
        0,
        Category::GithubContrib,
        env.block.height,
    )?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "log_github_contribution"),
        attr("user", user),
        attr("points", points.to_string()),
    ]))
}

pub fn log_referral(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_user: Addr,
    referrer: Addr,
) -> Result<Response, ContractError> {
    let contract_info = CONTRACT_INFO.load(deps.storage)?;
    assert_admin(&contract_info, &info.sender)?;
    assert_not_paused(&contract_info)?;

    if new_user.eq(&referrer) {
        return Err(ContractError::InvalidPoints {
            reason: "cannot refer yourself".to_string(),
        });
    }
    // first referral wins, no overwrite
    if REFERRERS.has(deps.storage, &new_user) {
        return Err(ContractError::InvalidPoints {
            reason: "user already referred".to_string(),
        });
    }
    REFERRERS.save(deps.storage, &new_user, &referrer)?;

    // flat bonus, never tier or streak scaled, does not touch the streak
    credit_points(
        deps.storage,
        &referrer,
        Category::Referral,
        REFERRAL_BONUS,
        env.block.height,
    )?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "log_referral"),
        attr("new_user", new_user),
        attr("referrer", referrer),
        attr("points", REFERRAL_BONUS.to_string()),
    ]))
}

pub fn apply_decay(deps: DepsMut, env: Env, user: Addr) -> Result<Response, ContractError> {
    let contract_info = CONTRACT_INFO.load(deps.storage)?;
    let now = env.block.height;

    let mut decayed = false;
    if let Some(mut streak) = STREAKS.may_load(deps.storage, &user)? {
        let last_decay = LAST_DECAY.may_load(deps.storage, &user)?.unwrap_or(0);
        let idle = now.saturating_sub(streak.last_activity_time);
        let since_decay = now.saturating_sub(last_decay);
        if streak.current_streak > 0
            && idle >= contract_info.decay_cooldown
            && since_decay >= contract_info.decay_cooldown
        {
            streak.current_streak =
                streak::decayed(streak.current_streak, contract_info.decay_policy);
            STREAKS.save(deps.storage, &user, &streak)?;
            LAST_DECAY.save(deps.storage, &user, &now)?;
            decayed = true;
        }
    }

    // a skipped decay is still a success
    Ok(Response::new().add_attributes(vec![
        attr("action", "apply_decay"),
        attr("user", user),
        attr("decayed", decayed.to_string()),
    ]))
}

pub fn add_claimable_rewards(
    deps: DepsMut,
    info: MessageInfo,
    user: Addr,
    amount: u64,
) -> Result<Response, ContractError> {
    let contract_info = CONTRACT_INFO.load(deps.storage)?;
    assert_admin(&contract_info, &info.sender)?;
    assert_not_paused(&contract_info)?;

    let balance = CLAIMABLE.may_load(deps.storage, &user)?.unwrap_or(0);
    CLAIMABLE.save(deps.storage, &user, &(balance + amount))?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "add_claimable_rewards"),
        attr("user", user),
        attr("amount", amount.to_string()),
    ]))
}

pub fn claim_rewards(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let contract_info = CONTRACT_INFO.load(deps.storage)?;
    assert_not_paused(&contract_info)?;

    let caller = info.sender;
    let amount = CLAIMABLE.may_load(deps.storage, &caller)?.unwrap_or(0);
    // a drained balance and a never credited one fail the same way
    if amount == 0 {
        return Err(ContractError::InvalidPoints {
            reason: "nothing to claim".to_string(),
        });
    }

    let now = env.block.height;
    CLAIMABLE.save(deps.storage, &caller, &0)?;
    credit_points(deps.storage, &caller, Category::Claimed, amount, now)?;

    let index = CLAIM_COUNT.may_load(deps.storage, &caller)?.unwrap_or(0);
    CLAIM_HISTORY.save(
        deps.storage,
        (&caller, index),
        &ClaimHistoryEntry {
            amount,
            claimed_at: now,
        },
    )?;
    CLAIM_COUNT.save(deps.storage, &caller, &(index + 1))?;

    Ok(Response::new()
        .add_attributes(vec![
            attr("action", "claim_rewards"),
            attr("user", caller),
            attr("amount", amount.to_string()),
        ])
        .set_data(to_json_binary(&amount)?))
}

pub fn set_activity_point_base(
    deps: DepsMut,
    info: MessageInfo,
    base: u64,
) -> Result<Response, ContractError> {
    let mut contract_info = CONTRACT_INFO.load(deps.storage)?;
    assert_admin(&contract_info, &info.sender)?;

    // takes effect for subsequent grants only
    contract_info.activity_point_base = base;
    CONTRACT_INFO.save(deps.storage, &contract_info)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "set_activity_point_base"),
        attr("base", base.to_string()),
    ]))
}

pub fn set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    let mut contract_info = CONTRACT_INFO.load(deps.storage)?;
    assert_admin(&contract_info, &info.sender)?;

    contract_info.paused = paused;
    CONTRACT_INFO.save(deps.storage, &contract_info)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "set_paused"),
        attr("paused", paused.to_string()),
    ]))
}

pub fn update_contract_info(
    deps: DepsMut,
    info: MessageInfo,
    msg: UpdateContractInfoMsg,
) -> Result<Response, ContractError> {
    let new_contract_info = CONTRACT_INFO.update(deps.storage, |mut contract_info| {
        // Unauthorized
        if info.sender.ne(&contract_info.admin) {
            return Err(ContractError::Unauthorized {});
        }
        if let Some(admin) = msg.admin {
            contract_info.admin = admin;
        }
        if let Some(decay_policy) = msg.decay_policy {
            contract_info.decay_policy = decay_policy;
        }
        if let Some(decay_cooldown) = msg.decay_cooldown {
            contract_info.decay_cooldown = decay_cooldown;
        }
        if let Some(diamond_threshold) = msg.diamond_threshold {
            contract_info.diamond_threshold = diamond_threshold;
        }
        Ok(contract_info)
    })?;

    Ok(Response::new()
        .add_attributes(vec![attr("action", "update_contract_info")])
        .set_data(to_json_binary(&new_contract_info)?))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetContractInfo {} => to_json_binary(&CONTRACT_INFO.load(deps.storage)?),
        QueryMsg::GetUserStats { user } => {
            to_json_binary(&USER_STATS.may_load(deps.storage, &user)?)
        }
        QueryMsg::GetUserStreak { user } => to_json_binary(
            &STREAKS
                .may_load(deps.storage, &user)?
                .unwrap_or_else(StreakState::default),
        ),
        QueryMsg::GetUserTier { user } => to_json_binary(&query_user_tier(deps, &user)?),
        QueryMsg::GetTierMultiplier { tier } => to_json_binary(&tier.multiplier()),
        QueryMsg::HasAchievement { user, id } => {
            to_json_binary(&ACHIEVEMENTS.has(deps.storage, (&user, id)))
        }
        QueryMsg::GetAchievement { user, id } => {
            to_json_binary(&ACHIEVEMENTS.may_load(deps.storage, (&user, id))?)
        }
        QueryMsg::GetClaimableRewards { user } => {
            to_json_binary(&CLAIMABLE.may_load(deps.storage, &user)?.unwrap_or(0))
        }
        QueryMsg::GetClaimHistory { user, index } => {
            to_json_binary(&CLAIM_HISTORY.may_load(deps.storage, (&user, index))?)
        }
        QueryMsg::GetGlobalStats {} => to_json_binary(&GLOBAL_STATS.load(deps.storage)?),
        QueryMsg::GetUserRank { user } => to_json_binary(&query_user_rank(deps, &user)?),
        QueryMsg::CalculatePoints {
            kind,
            base_override,
            impact_score,
            tier,
            streak_days,
        } => to_json_binary(&calculate_points(
            kind,
            base_override,
            impact_score.unwrap_or(0),
            tier,
            streak_days,
        )),
        QueryMsg::Leaderboard {
            offset,
            limit,
            order,
        } => to_json_binary(&query_leaderboard(deps, offset, limit, order)?),
    }
}

fn query_user_tier(deps: Deps, user: &Addr) -> StdResult<Tier> {
    let contract_info = CONTRACT_INFO.load(deps.storage)?;
    let total = USER_STATS
        .may_load(deps.storage, user)?
        .map(|stats| stats.total_points)
        .unwrap_or(0);
    Ok(Tier::of(total, contract_info.diamond_threshold))
}

fn query_user_rank(deps: Deps, user: &Addr) -> StdResult<RankResponse> {
    let global = GLOBAL_STATS.load(deps.storage)?;
    let total = USER_STATS
        .may_load(deps.storage, user)?
        .map(|stats| stats.total_points)
        .unwrap_or(0);
    let percentile = if global.top_score == 0 {
        0
    } else {
        total * 100 / global.top_score
    };
    Ok(RankResponse { percentile })
}

fn query_leaderboard(
    deps: Deps,
    offset: Option<Addr>,
    limit: Option<u32>,
    order: Option<u8>,
) -> StdResult<Vec<LeaderboardEntry>> {
    let contract_info = CONTRACT_INFO.load(deps.storage)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let mut min: Option<Bound<&Addr>> = None;
    let mut max: Option<Bound<&Addr>> = None;
    let mut order_enum = Order::Ascending;
    if let Some(num) = order {
        if num == 2 {
            order_enum = Order::Descending;
        }
    }

    // if there is offset, assign to min or max
    let offset = offset.as_ref();
    match order_enum {
        Order::Ascending => min = offset.map(Bound::exclusive),
        Order::Descending => max = offset.map(Bound::exclusive),
    }

    USER_STATS
        .range(deps.storage, min, max, order_enum)
        .take(limit)
        .map(|kv_item| {
            kv_item.map(|(user, stats)| {
                let tier = Tier::of(stats.total_points, contract_info.diamond_threshold);
                LeaderboardEntry { user, stats, tier }
            })
        })
        .collect()
}
