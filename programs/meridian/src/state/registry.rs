use anchor_lang::prelude::*;
use crate::constants::MAX_ASSETS;
use crate::error::ErrorCode;
use crate::math::decimal::Decimal;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceStatus {
    Unknown,
    Trading,
    Halted,
    Auction,
}

impl From<PriceStatus> for u8 {
    fn from(status: PriceStatus) -> u8 {
        match status {
            PriceStatus::Unknown => 0,
            PriceStatus::Trading => 1,
            PriceStatus::Halted => 2,
            PriceStatus::Auction => 3,
        }
    }
}

/// One price-bearing asset. Backs at most one collateral and/or one synthetic
/// (those reference it by index). Never deleted, only marked via status.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Asset {
    pub feed_address: Pubkey,
    pub price: Decimal,
    pub confidence: Decimal,
    pub last_update: i64,
    pub twap: Decimal,
    pub twac: Decimal,
    pub status: u8,
    pub oracle_type: u8,
}

impl Asset {
    pub const SIZE: usize = 32 + Decimal::SIZE * 4 + 8 + 1 + 1;

    /// Economic operations must never price against a stale feed.
    pub fn assert_fresh(&self, max_delay: u32, now: i64) -> Result<()> {
        if now.saturating_sub(self.last_update) > max_delay as i64 {
            return Err(ErrorCode::OutdatedOracle.into());
        }
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Collateral {
    pub asset_index: u8,
    pub collateral_address: Pubkey,
    pub reserve_address: Pubkey,
    pub liquidation_fund: Pubkey,
    pub reserve_balance: Decimal, // scale = token decimals
    pub collateral_ratio: Decimal, // fraction <= 1
    pub max_collateral: Decimal,
}

impl Collateral {
    pub const SIZE: usize = 1 + 32 * 3 + Decimal::SIZE * 3;

    pub fn decimals(&self) -> u8 {
        self.reserve_balance.scale
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Synthetic {
    pub asset_index: u8,
    pub asset_address: Pubkey,
    pub supply: Decimal,
    pub max_supply: Decimal,
    pub borrowed_supply: Decimal, // minted through vaults
    pub swapline_supply: Decimal, // minted through swaplines
    pub settlement_slot: u64,
}

impl Synthetic {
    pub const SIZE: usize = 1 + 32 + Decimal::SIZE * 4 + 8;

    /// Supply owed by the shared debt pool (excludes vault and swapline mints).
    pub fn pool_supply(&self) -> Result<Decimal> {
        self.supply
            .sub(self.borrowed_supply)?
            .sub(self.swapline_supply)
    }

    /// Single gate for supply changes, enforcing the max supply invariant.
    pub fn set_supply(&mut self, new_supply: Decimal) -> Result<()> {
        if new_supply.gt(self.max_supply)? {
            return Err(ErrorCode::MaxSupply.into());
        }
        self.supply = new_supply;
        Ok(())
    }
}

/// Arena of assets, collaterals and synthetics with explicit heads.
/// Slot 0 is reserved: the USD asset/synthetic and the main collateral.
#[account]
pub struct AssetRegistry {
    pub head_assets: u8,
    pub head_collaterals: u8,
    pub head_synthetics: u8,
    pub assets: [Asset; 255],
    pub collaterals: [Collateral; 255],
    pub synthetics: [Synthetic; 255],
}

impl Default for AssetRegistry {
    fn default() -> AssetRegistry {
        AssetRegistry {
            head_assets: 0,
            head_collaterals: 0,
            head_synthetics: 0,
            assets: [Asset::default(); 255],
            collaterals: [Collateral::default(); 255],
            synthetics: [Synthetic::default(); 255],
        }
    }
}

impl AssetRegistry {
    pub const LEN: usize = 8 // discriminator
        + 3 // heads
        + Asset::SIZE * 255
        + Collateral::SIZE * 255
        + Synthetic::SIZE * 255;

    pub fn append_asset(&mut self, new_asset: Asset) -> Result<u8> {
        let index = self.head_assets;
        require!((index as usize) < MAX_ASSETS, ErrorCode::RegistryCapacity);
        self.assets[index as usize] = new_asset;
        self.head_assets += 1;
        Ok(index)
    }

    pub fn append_collateral(&mut self, new_collateral: Collateral) -> Result<u8> {
        let index = self.head_collaterals;
        require!((index as usize) < MAX_ASSETS, ErrorCode::RegistryCapacity);
        self.collaterals[index as usize] = new_collateral;
        self.head_collaterals += 1;
        Ok(index)
    }

    pub fn append_synthetic(&mut self, new_synthetic: Synthetic) -> Result<u8> {
        let index = self.head_synthetics;
        require!((index as usize) < MAX_ASSETS, ErrorCode::RegistryCapacity);
        self.synthetics[index as usize] = new_synthetic;
        self.head_synthetics += 1;
        Ok(index)
    }

    /// Swap-remove a settled synthetic. The USD synthetic (index 0) stays.
    pub fn remove_synthetic(&mut self, index: usize) -> Result<()> {
        require!(index > 0, ErrorCode::UsdSettlement);
        require!(index < self.head_synthetics as usize, ErrorCode::NoAssetFound);
        let last = (self.head_synthetics - 1) as usize;
        self.synthetics[index] = self.synthetics[last];
        self.synthetics[last] = Synthetic::default();
        self.head_synthetics -= 1;
        Ok(())
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets[..self.head_assets as usize]
    }

    pub fn collaterals(&self) -> &[Collateral] {
        &self.collaterals[..self.head_collaterals as usize]
    }

    pub fn synthetics(&self) -> &[Synthetic] {
        &self.synthetics[..self.head_synthetics as usize]
    }

    pub fn asset_by_feed_mut(&mut self, feed_address: &Pubkey) -> Option<&mut Asset> {
        self.assets[..self.head_assets as usize]
            .iter_mut()
            .find(|x| x.feed_address.eq(feed_address))
    }

    pub fn asset_index_by_feed(&self, feed_address: &Pubkey) -> Option<usize> {
        self.assets[..self.head_assets as usize]
            .iter()
            .position(|x| x.feed_address.eq(feed_address))
    }

    pub fn collateral_position_by_reserve(&self, reserve_address: &Pubkey) -> Option<usize> {
        self.collaterals[..self.head_collaterals as usize]
            .iter()
            .position(|x| x.reserve_address.eq(reserve_address))
    }

    pub fn collateral_position_by_address(&self, collateral_address: &Pubkey) -> Option<usize> {
        self.collaterals[..self.head_collaterals as usize]
            .iter()
            .position(|x| x.collateral_address.eq(collateral_address))
    }

    pub fn synthetic_position_by_address(&self, asset_address: &Pubkey) -> Option<usize> {
        self.synthetics[..self.head_synthetics as usize]
            .iter()
            .position(|x| x.asset_address.eq(asset_address))
    }

    /// Debt-valuing operations price every synthetic; all of those prices must
    /// be fresh before any value is computed.
    pub fn assert_synthetic_prices_fresh(&self, max_delay: u32, now: i64) -> Result<()> {
        for synthetic in self.synthetics() {
            self.assets[synthetic.asset_index as usize].assert_fresh(max_delay, now)?;
        }
        Ok(())
    }

    /// Freshness for every collateral price backing a user's deposits.
    pub fn assert_collateral_prices_fresh(
        &self,
        account: &crate::state::ExchangeAccount,
        max_delay: u32,
        now: i64,
    ) -> Result<()> {
        for entry in account.entries() {
            let collateral = &self.collaterals[entry.index as usize];
            self.assets[collateral.asset_index as usize].assert_fresh(max_delay, now)?;
        }
        Ok(())
    }

    pub fn split_borrow(
        &mut self,
    ) -> (
        &mut [Asset; 255],
        &mut [Collateral; 255],
        &mut [Synthetic; 255],
    ) {
        (
            &mut self.assets,
            &mut self.collaterals,
            &mut self.synthetics,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appending() {
        let mut registry = AssetRegistry::default();
        assert_eq!(registry.head_assets, 0);
        assert_eq!(registry.head_collaterals, 0);
        assert_eq!(registry.head_synthetics, 0);

        registry
            .append_asset(Asset {
                price: Decimal::from_price(2),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(registry.assets[0].price.val, 2);
        assert_eq!(registry.head_assets, 1);

        registry
            .append_collateral(Collateral {
                asset_index: 2,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(registry.collaterals[0].asset_index, 2);
        assert_eq!(registry.head_collaterals, 1);

        registry
            .append_synthetic(Synthetic {
                asset_index: 3,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(registry.synthetics[0].asset_index, 3);
        assert_eq!(registry.head_synthetics, 1);
    }

    #[test]
    fn test_append_full_fails() {
        let mut registry = AssetRegistry::default();
        for _ in 0..MAX_ASSETS {
            registry.append_asset(Asset::default()).unwrap();
        }
        assert!(registry.append_asset(Asset::default()).is_err());
    }

    #[test]
    fn test_remove_synthetic() {
        let mut registry = AssetRegistry::default();
        registry
            .append_synthetic(Synthetic {
                asset_index: 0,
                ..Default::default()
            })
            .unwrap();
        registry
            .append_synthetic(Synthetic {
                asset_index: 1,
                ..Default::default()
            })
            .unwrap();
        registry
            .append_synthetic(Synthetic {
                asset_index: 2,
                ..Default::default()
            })
            .unwrap();

        // index 0 is the USD synthetic and cannot be removed
        assert!(registry.remove_synthetic(0).is_err());

        registry.remove_synthetic(1).unwrap();
        assert_eq!(registry.head_synthetics, 2);
        // last entry swapped into the hole
        assert_eq!(registry.synthetics[1].asset_index, 2);
    }

    #[test]
    fn test_set_supply_enforces_max() {
        let mut synthetic = Synthetic {
            max_supply: Decimal::new(1_000, 6),
            supply: Decimal::new(0, 6),
            ..Default::default()
        };
        synthetic.set_supply(Decimal::new(1_000, 6)).unwrap();
        assert!(synthetic.set_supply(Decimal::new(1_001, 6)).is_err());
        assert_eq!(synthetic.supply.val, 1_000);
    }

    #[test]
    fn test_pool_supply_excludes_vault_and_swapline() {
        let synthetic = Synthetic {
            supply: Decimal::new(1_000, 6),
            borrowed_supply: Decimal::new(300, 6),
            swapline_supply: Decimal::new(200, 6),
            ..Default::default()
        };
        assert_eq!(synthetic.pool_supply().unwrap().val, 500);
    }

    #[test]
    fn test_assert_fresh() {
        let asset = Asset {
            last_update: 1_000,
            ..Default::default()
        };
        assert!(asset.assert_fresh(10, 1_005).is_ok());
        assert!(asset.assert_fresh(10, 1_011).is_err());
        // USD asset sentinel never goes stale
        let usd = Asset {
            last_update: i64::MAX,
            ..Default::default()
        };
        assert!(usd.assert_fresh(0, i64::MAX - 1).is_ok());
    }
}
