use anchor_lang::prelude::*;
use crate::error::ErrorCode;
use crate::state::{Exchange, ExchangeAccount, Staking, StakingRound};

/// Rotate staking rounds lazily against the clock slot. Runs at the top of
/// every operation that touches debt shares or rewards.
pub fn adjust_staking_rounds(state: &mut Exchange, slot: u64) -> Result<()> {
    if state.staking.round_length == 0 {
        return Ok(());
    }
    while slot >= state.staking.next_round.start {
        let finished = state.staking.current_round;
        let current = state.staking.next_round;
        let next_start = current
            .start
            .checked_add(state.staking.round_length as u64)
            .ok_or(ErrorCode::Overflow)?;
        state.staking.finished_round = finished;
        state.staking.current_round = current;
        state.staking.next_round = StakingRound {
            start: next_start,
            amount: state.staking.amount_per_round,
            all_points: state.debt_shares,
        };
    }
    Ok(())
}

/// Roll a user's staking points forward to the current round.
pub fn adjust_staking_account(account: &mut ExchangeAccount, staking: &Staking) {
    if account.user_staking.last_update >= staking.current_round.start {
        return;
    }
    if account.user_staking.last_update < staking.finished_round.start {
        // missed at least two rotations: next-round points carried all the way
        account.user_staking.finished_round_points = account.user_staking.next_round_points;
        account.user_staking.current_round_points = account.user_staking.next_round_points;
    } else {
        account.user_staking.finished_round_points = account.user_staking.current_round_points;
        account.user_staking.current_round_points = account.user_staking.next_round_points;
    }
    account.user_staking.last_update = staking.current_round.start;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::decimal::Decimal;

    fn state_with_staking(round_length: u32, amount_per_round: u64) -> Exchange {
        Exchange {
            admin: Pubkey::default(),
            bump: 0,
            halted: false,
            registry: Pubkey::default(),
            debt_shares: 0,
            health_factor: Decimal::from_bps(10_000),
            debt_interest_rate: Decimal::new(0, 18),
            accumulated_debt_interest: Decimal::new(0, 6),
            last_debt_adjustment: 0,
            fee: Decimal::from_bps(30),
            swap_tax_ratio: Decimal::from_bps(0),
            swap_tax_reserve: Decimal::new(0, 6),
            liquidation_rate: Decimal::from_bps(2_000),
            penalty_to_liquidator: Decimal::from_bps(500),
            penalty_to_exchange: Decimal::from_bps(500),
            liquidation_buffer: 0,
            max_delay: 0,
            staking: Staking {
                fund_account: Pubkey::default(),
                round_length,
                amount_per_round,
                finished_round: StakingRound::default(),
                current_round: StakingRound {
                    start: 0,
                    amount: 0,
                    all_points: 0,
                },
                next_round: StakingRound {
                    start: round_length as u64,
                    amount: amount_per_round,
                    all_points: 0,
                },
            },
            _reserved: [0u8; 64],
        }
    }

    #[test]
    fn test_rounds_rotate_once() {
        let mut state = state_with_staking(100, 50);
        state.debt_shares = 7;
        adjust_staking_rounds(&mut state, 100).unwrap();
        assert_eq!(state.staking.current_round.start, 100);
        assert_eq!(state.staking.next_round.start, 200);
        assert_eq!(state.staking.next_round.all_points, 7);
    }

    #[test]
    fn test_rounds_catch_up_after_gap() {
        let mut state = state_with_staking(100, 50);
        adjust_staking_rounds(&mut state, 450).unwrap();
        // rotated until the next round is in the future
        assert!(state.staking.next_round.start > 450);
        assert_eq!(state.staking.next_round.start, 500);
        assert_eq!(state.staking.current_round.start, 400);
    }

    #[test]
    fn test_rounds_noop_before_boundary() {
        let mut state = state_with_staking(100, 50);
        let snapshot = state.staking;
        adjust_staking_rounds(&mut state, 99).unwrap();
        assert_eq!(state.staking, snapshot);
    }

    fn account_with_points(next: u64, current: u64, last_update: u64) -> ExchangeAccount {
        let mut account = ExchangeAccount {
            owner: Pubkey::default(),
            bump: 0,
            debt_shares: 0,
            liquidation_deadline: u64::MAX,
            user_staking: Default::default(),
            head: 0,
            collaterals: [Default::default(); 32],
        };
        account.user_staking.next_round_points = next;
        account.user_staking.current_round_points = current;
        account.user_staking.last_update = last_update;
        account
    }

    #[test]
    fn test_account_points_roll_forward() {
        let staking = state_with_staking(100, 50).staking;
        // one rotation behind: current_round.start == 0, already up to date
        let mut account = account_with_points(10, 5, 0);
        adjust_staking_account(&mut account, &staking);
        assert_eq!(account.user_staking.current_round_points, 5);

        let mut rotated = state_with_staking(100, 50);
        adjust_staking_rounds(&mut rotated, 100).unwrap();
        let mut account = account_with_points(10, 5, 0);
        adjust_staking_account(&mut account, &rotated.staking);
        assert_eq!(account.user_staking.finished_round_points, 5);
        assert_eq!(account.user_staking.current_round_points, 10);
        assert_eq!(account.user_staking.last_update, 100);
    }

    #[test]
    fn test_account_points_after_long_gap() {
        let mut rotated = state_with_staking(100, 50);
        adjust_staking_rounds(&mut rotated, 300).unwrap();
        // last touched before the finished round started
        let mut account = account_with_points(10, 5, 0);
        adjust_staking_account(&mut account, &rotated.staking);
        assert_eq!(account.user_staking.finished_round_points, 10);
        assert_eq!(account.user_staking.current_round_points, 10);
    }
}
