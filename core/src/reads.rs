//! Contract reads and the post-confirmation refresher.
//!
//! The [`ContractSnapshot`] mirrors on-chain values; it is only ever
//! overwritten by fresh reads, never adjusted locally.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;

use crate::abi::{function_name, IRevenueDistributor, IERC20};
use crate::action::ReadRequest;
use crate::amount::format_units;
use crate::config::ContractConfig;
use crate::error::{TxError, TxResult};
use crate::wallet::WalletClient;

/// Last known on-chain values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractSnapshot {
    pub total_supply: U256,
    /// Zero means "not loaded / unbounded".
    pub max_supply: U256,
    pub usdc_token: Option<Address>,
    /// Token whose claimable balance is followed.
    pub claim_token_id: Option<U256>,
    pub claimable: Option<U256>,
    /// Allowance granted by the connected account to the distributor.
    pub allowance: Option<U256>,
}

impl ContractSnapshot {
    /// `"3 / 100"`, or `"3 / —"` while max supply is unknown.
    pub fn supply_label(&self) -> String {
        if self.max_supply.is_zero() {
            format!("{} / —", self.total_supply)
        } else {
            format!("{} / {}", self.total_supply, self.max_supply)
        }
    }

    pub fn is_sold_out(&self) -> bool {
        !self.max_supply.is_zero() && self.total_supply >= self.max_supply
    }

    /// Id the next mint will receive.
    pub fn next_token_id(&self) -> U256 {
        self.total_supply.saturating_add(U256::from(1))
    }

    /// Claimable balance formatted as `"12.5 USDC"`.
    pub fn claimable_label(&self, decimals: u8) -> Option<String> {
        self.claimable.map(|v| format!("{} USDC", format_units(v, decimals)))
    }
}

/// Typed reads against the configured contracts.
pub struct ContractReader<'a, W> {
    config: &'a ContractConfig,
    wallet: &'a W,
}

impl<'a, W: WalletClient> ContractReader<'a, W> {
    pub fn new(config: &'a ContractConfig, wallet: &'a W) -> Self {
        Self { config, wallet }
    }

    async fn read<C: SolCall>(&self, to: Address, call: C) -> TxResult<C::Return> {
        let request = ReadRequest {
            to,
            function: function_name::<C>(),
            calldata: Bytes::from(call.abi_encode()),
        };
        let raw = self.wallet.call(&request).await?;
        C::abi_decode_returns(&raw, true).map_err(|e| {
            TxError::NetworkError(format!("malformed {} result: {}", request.function, e))
        })
    }

    pub async fn usdc_token(&self) -> TxResult<Address> {
        let ret = self
            .read(self.config.distributor_address, IRevenueDistributor::usdcTokenCall {})
            .await?;
        Ok(ret._0)
    }

    pub async fn total_supply(&self) -> TxResult<U256> {
        let ret = self
            .read(self.config.distributor_address, IRevenueDistributor::totalSupplyCall {})
            .await?;
        Ok(ret._0)
    }

    pub async fn max_supply(&self) -> TxResult<U256> {
        let ret = self
            .read(self.config.distributor_address, IRevenueDistributor::maxSupplyCall {})
            .await?;
        Ok(ret._0)
    }

    pub async fn claimable(&self, token_id: U256) -> TxResult<U256> {
        let ret = self
            .read(
                self.config.distributor_address,
                IRevenueDistributor::getClaimableRevenueCall { tokenId: token_id },
            )
            .await?;
        Ok(ret._0)
    }

    /// Allowance `owner` has granted the distributor on `token`.
    pub async fn allowance(&self, token: Address, owner: Address) -> TxResult<U256> {
        let ret = self
            .read(
                token,
                IERC20::allowanceCall {
                    owner,
                    spender: self.config.distributor_address,
                },
            )
            .await?;
        Ok(ret._0)
    }

    /// Initial load. Failed reads are logged and left at their defaults.
    pub async fn snapshot(&self, claim_token_id: Option<U256>) -> ContractSnapshot {
        let mut snap = ContractSnapshot {
            claim_token_id,
            ..ContractSnapshot::default()
        };

        let (usdc, total, max) =
            futures::join!(self.usdc_token(), self.total_supply(), self.max_supply());

        snap.usdc_token = keep_or_log("usdcToken", usdc);
        snap.total_supply = keep_or_log("totalSupply", total).unwrap_or_default();
        snap.max_supply = keep_or_log("maxSupply", max).unwrap_or_default();

        if let Some(token_id) = claim_token_id {
            snap.claimable = keep_or_log("getClaimableRevenue", self.claimable(token_id).await);
        }

        if let (Some(token), Some(owner)) = (snap.usdc_token, self.wallet.account()) {
            snap.allowance = keep_or_log("allowance", self.allowance(token, owner).await);
        }

        snap
    }

    /// Re-read total supply and (if a token is followed) claimable revenue,
    /// each exactly once. Safe to call repeatedly.
    pub async fn refresh_after_confirmation(&self, snapshot: &mut ContractSnapshot) -> RefreshReport {
        let mut report = RefreshReport::default();

        let claim_id = snapshot.claim_token_id;
        let claim = async move {
            match claim_id {
                Some(id) => Some(self.claimable(id).await),
                None => None,
            }
        };
        let (total, claimable) = futures::join!(self.total_supply(), claim);

        report.total_supply = true;
        if let Some(total) = keep_or_log("totalSupply", total) {
            snapshot.total_supply = total;
        }

        if let Some(result) = claimable {
            report.claimable = true;
            if let Some(value) = keep_or_log("getClaimableRevenue", result) {
                snapshot.claimable = Some(value);
            }
        }

        log::debug!("Refreshed after confirmation: {:?}", report);
        report
    }
}

/// Which queries a refresh issued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub total_supply: bool,
    pub claimable: bool,
}

fn keep_or_log<T>(function: &str, result: TxResult<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Read {} failed: {}", function, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::mock::MockWallet;

    fn scripted() -> MockWallet {
        MockWallet::connected()
            .with_read("usdcToken", Address::with_last_byte(0xcc))
            .with_read("totalSupply", U256::from(3u64))
            .with_read("maxSupply", U256::from(100u64))
            .with_read("getClaimableRevenue", U256::from(12_500_000u64))
            .with_read("allowance", U256::from(5_000_000u64))
    }

    #[tokio::test]
    async fn test_snapshot_loads_everything() {
        let wallet = scripted();
        let config = ContractConfig::default();
        let snap = ContractReader::new(&config, &wallet)
            .snapshot(Some(U256::from(1u64)))
            .await;

        assert_eq!(snap.total_supply, U256::from(3u64));
        assert_eq!(snap.supply_label(), "3 / 100");
        assert_eq!(snap.usdc_token, Some(Address::with_last_byte(0xcc)));
        assert_eq!(snap.claimable_label(6).as_deref(), Some("12.5 USDC"));
        assert_eq!(snap.allowance, Some(U256::from(5_000_000u64)));
        assert!(!snap.is_sold_out());
    }

    #[tokio::test]
    async fn test_snapshot_tolerates_failed_reads() {
        let wallet = MockWallet::disconnected()
            .with_read("totalSupply", U256::from(7u64))
            .with_read_error("maxSupply", TxError::NetworkError("timeout".into()));
        let config = ContractConfig::default();
        let snap = ContractReader::new(&config, &wallet).snapshot(None).await;

        assert_eq!(snap.total_supply, U256::from(7u64));
        assert_eq!(snap.supply_label(), "7 / —");
        assert_eq!(snap.usdc_token, None);
        assert_eq!(snap.allowance, None);
        assert_eq!(wallet.reads_of("getClaimableRevenue"), 0);
    }

    #[tokio::test]
    async fn test_refresh_issues_each_read_once() {
        let wallet = scripted();
        let config = ContractConfig::default();
        let mut snap = ContractSnapshot {
            claim_token_id: Some(U256::from(2u64)),
            ..Default::default()
        };

        let report = ContractReader::new(&config, &wallet)
            .refresh_after_confirmation(&mut snap)
            .await;

        assert_eq!(report, RefreshReport { total_supply: true, claimable: true });
        assert_eq!(wallet.reads_of("totalSupply"), 1);
        assert_eq!(wallet.reads_of("getClaimableRevenue"), 1);
        assert_eq!(wallet.read_log.borrow().len(), 2);
        assert_eq!(snap.total_supply, U256::from(3u64));
        assert_eq!(snap.claimable, Some(U256::from(12_500_000u64)));
    }

    #[tokio::test]
    async fn test_refresh_keeps_old_value_on_error() {
        let wallet = MockWallet::connected()
            .with_read_error("totalSupply", TxError::NetworkError("down".into()));
        let config = ContractConfig::default();
        let mut snap = ContractSnapshot {
            total_supply: U256::from(9u64),
            ..Default::default()
        };

        let report = ContractReader::new(&config, &wallet)
            .refresh_after_confirmation(&mut snap)
            .await;
        assert!(report.total_supply);
        assert!(!report.claimable);
        assert_eq!(snap.total_supply, U256::from(9u64));
    }

    #[test]
    fn test_sold_out_and_next_id() {
        let snap = ContractSnapshot {
            total_supply: U256::from(100u64),
            max_supply: U256::from(100u64),
            ..Default::default()
        };
        assert!(snap.is_sold_out());
        assert_eq!(snap.next_token_id(), U256::from(101u64));
    }
}
