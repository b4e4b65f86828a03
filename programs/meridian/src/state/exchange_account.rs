use anchor_lang::prelude::*;
use crate::constants::MAX_COLLATERAL_ENTRIES;
use crate::error::ErrorCode;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct UserStaking {
    pub amount_to_claim: u64,
    pub finished_round_points: u64,
    pub current_round_points: u64,
    pub next_round_points: u64,
    pub last_update: u64, // slot of last round adjustment
}

impl UserStaking {
    pub const SIZE: usize = 8 * 5;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct CollateralEntry {
    pub amount: u64, // raw token units
    pub collateral_address: Pubkey,
    pub index: u8, // into registry collaterals
}

impl CollateralEntry {
    pub const SIZE: usize = 8 + 32 + 1;
}

/// Per-user ledger: debt shares plus deposited collaterals (fixed capacity 32).
#[account]
pub struct ExchangeAccount {
    pub owner: Pubkey,
    pub bump: u8,
    pub debt_shares: u64,
    pub liquidation_deadline: u64, // slot; u64::MAX while healthy
    pub user_staking: UserStaking,
    pub head: u8,
    pub collaterals: [CollateralEntry; 32],
}

impl ExchangeAccount {
    pub const LEN: usize = 8 // discriminator
        + 32  // owner
        + 1   // bump
        + 8   // debt_shares
        + 8   // liquidation_deadline
        + UserStaking::SIZE
        + 1   // head
        + CollateralEntry::SIZE * 32;

    pub fn append(&mut self, entry: CollateralEntry) -> Result<()> {
        require!(
            (self.head as usize) < MAX_COLLATERAL_ENTRIES,
            ErrorCode::CollateralEntryLimit
        );
        self.collaterals[self.head as usize] = entry;
        self.head += 1;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) {
        self.collaterals[index] = self.collaterals[(self.head - 1) as usize];
        self.collaterals[(self.head - 1) as usize] = CollateralEntry::default();
        self.head -= 1;
    }

    pub fn entries(&self) -> &[CollateralEntry] {
        &self.collaterals[..self.head as usize]
    }

    pub fn entry_position(&self, collateral_address: &Pubkey) -> Option<usize> {
        self.collaterals[..self.head as usize]
            .iter()
            .position(|x| x.collateral_address.eq(collateral_address))
    }

    /// Balance of one collateral, used for the swap fee discount.
    pub fn collateral_balance(&self, collateral_address: &Pubkey) -> u64 {
        self.entry_position(collateral_address)
            .map(|i| self.collaterals[i].amount)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_remove() {
        let mut account = ExchangeAccount {
            owner: Pubkey::default(),
            bump: 0,
            debt_shares: 0,
            liquidation_deadline: u64::MAX,
            user_staking: UserStaking::default(),
            head: 0,
            collaterals: [CollateralEntry::default(); 32],
        };
        account
            .append(CollateralEntry {
                index: 1,
                ..Default::default()
            })
            .unwrap();
        account
            .append(CollateralEntry {
                index: 2,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(account.head, 2);
        assert_eq!(account.collaterals[0].index, 1);
        assert_eq!(account.collaterals[1].index, 2);

        account.remove(0);
        assert_eq!(account.head, 1);
        assert_eq!(account.collaterals[0].index, 2);

        account
            .append(CollateralEntry {
                index: 3,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(account.head, 2);
        assert_eq!(account.collaterals[1].index, 3);
    }

    #[test]
    fn test_append_capacity() {
        let mut account = ExchangeAccount {
            owner: Pubkey::default(),
            bump: 0,
            debt_shares: 0,
            liquidation_deadline: u64::MAX,
            user_staking: UserStaking::default(),
            head: 0,
            collaterals: [CollateralEntry::default(); 32],
        };
        for _ in 0..MAX_COLLATERAL_ENTRIES {
            account.append(CollateralEntry::default()).unwrap();
        }
        assert!(account.append(CollateralEntry::default()).is_err());
    }

    #[test]
    fn test_collateral_balance() {
        let address = Pubkey::new_unique();
        let mut account = ExchangeAccount {
            owner: Pubkey::default(),
            bump: 0,
            debt_shares: 0,
            liquidation_deadline: u64::MAX,
            user_staking: UserStaking::default(),
            head: 0,
            collaterals: [CollateralEntry::default(); 32],
        };
        assert_eq!(account.collateral_balance(&address), 0);
        account
            .append(CollateralEntry {
                amount: 500,
                collateral_address: address,
                index: 0,
            })
            .unwrap();
        assert_eq!(account.collateral_balance(&address), 500);
    }
}
