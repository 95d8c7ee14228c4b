use cosmwasm_std::Addr;
use cw_multi_test::{App, ContractWrapper, Executor};

use rewards_leaderboard::contract::{execute, instantiate, query};
use rewards_leaderboard::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, RankResponse};
use rewards_leaderboard::points::BLOCKS_PER_DAY;
use rewards_leaderboard::state::{GlobalStats, StreakState, UserStats};

const ADMIN: &str = "admin";
const BUILDER: &str = "builder";

fn instantiate_rewards(app: &mut App) -> Addr {
    let code_id = app.store_code(Box::new(ContractWrapper::new(execute, instantiate, query)));
    app.instantiate_contract(
        code_id,
        Addr::unchecked(ADMIN),
        &InstantiateMsg {
            admin: Some(Addr::unchecked(ADMIN)),
            activity_point_base: None,
            decay_policy: None,
            decay_cooldown: None,
            diamond_threshold: None,
        },
        &[],
        "rewards_leaderboard",
        None,
    )
    .unwrap()
}

#[test]
fn week_of_activity_then_claim() {
    let mut app = App::default();
    let contract = instantiate_rewards(&mut app);

    // one interaction per day for seven days, then one more on day eight
    for _ in 0..7 {
        app.execute_contract(
            Addr::unchecked(ADMIN),
            contract.clone(),
            &ExecuteMsg::LogContractActivity {
                user: Addr::unchecked(BUILDER),
                impact_score: 0,
            },
            &[],
        )
        .unwrap();
        app.update_block(|block| {
            block.height += BLOCKS_PER_DAY + 1;
            block.time = block.time.plus_seconds(86_400);
        });
    }
    app.execute_contract(
        Addr::unchecked(ADMIN),
        contract.clone(),
        &ExecuteMsg::LogContractActivity {
            user: Addr::unchecked(BUILDER),
            impact_score: 0,
        },
        &[],
    )
    .unwrap();

    let stats: Option<UserStats> = app
        .wrap()
        .query_wasm_smart(
            contract.clone(),
            &QueryMsg::GetUserStats {
                user: Addr::unchecked(BUILDER),
            },
        )
        .unwrap();
    let stats = stats.unwrap();
    assert_eq!(stats.total_points, 450);

    let streak: StreakState = app
        .wrap()
        .query_wasm_smart(
            contract.clone(),
            &QueryMsg::GetUserStreak {
                user: Addr::unchecked(BUILDER),
            },
        )
        .unwrap();
    assert_eq!(streak.current_streak, 8);

    // escrowed rewards are merged into the total on claim
    app.execute_contract(
        Addr::unchecked(ADMIN),
        contract.clone(),
        &ExecuteMsg::AddClaimableRewards {
            user: Addr::unchecked(BUILDER),
            amount: 550,
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        Addr::unchecked(BUILDER),
        contract.clone(),
        &ExecuteMsg::ClaimRewards {},
        &[],
    )
    .unwrap();

    let stats: Option<UserStats> = app
        .wrap()
        .query_wasm_smart(
            contract.clone(),
            &QueryMsg::GetUserStats {
                user: Addr::unchecked(BUILDER),
            },
        )
        .unwrap();
    assert_eq!(stats.unwrap().total_points, 1_000);

    let global: GlobalStats = app
        .wrap()
        .query_wasm_smart(contract.clone(), &QueryMsg::GetGlobalStats {})
        .unwrap();
    assert_eq!(global.total_points_distributed, 1_000);
    assert_eq!(global.top_score, 550);
    assert_eq!(global.total_users, 1);

    let rank: RankResponse = app
        .wrap()
        .query_wasm_smart(
            contract,
            &QueryMsg::GetUserRank {
                user: Addr::unchecked(BUILDER),
            },
        )
        .unwrap();
    // 1000 * 100 / 550
    assert_eq!(rank.percentile, 181);
}

#[test]
fn unauthorized_writes_leave_no_trace() {
    let mut app = App::default();
    let contract = instantiate_rewards(&mut app);

    let attempts = vec![
        ExecuteMsg::LogGithubContribution {
            user: Addr::unchecked(BUILDER),
            points: 100,
        },
        ExecuteMsg::LogReferral {
            new_user: Addr::unchecked("friend"),
            referrer: Addr::unchecked(BUILDER),
        },
        ExecuteMsg::AddClaimableRewards {
            user: Addr::unchecked(BUILDER),
            amount: 100,
        },
        ExecuteMsg::SetActivityPointBase { base: 9_999 },
        ExecuteMsg::SetPaused { paused: true },
    ];
    for msg in attempts {
        app.execute_contract(Addr::unchecked(BUILDER), contract.clone(), &msg, &[])
            .unwrap_err();
    }

    let global: GlobalStats = app
        .wrap()
        .query_wasm_smart(contract.clone(), &QueryMsg::GetGlobalStats {})
        .unwrap();
    assert_eq!(global, GlobalStats::default());

    let stats: Option<UserStats> = app
        .wrap()
        .query_wasm_smart(
            contract,
            &QueryMsg::GetUserStats {
                user: Addr::unchecked(BUILDER),
            },
        )
        .unwrap();
    assert_eq!(stats, None);
}
