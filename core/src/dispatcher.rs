//! Action dispatcher: intent → validated write → tracked lifecycle.
//!
//! [`ActionDispatcher::prepare`] is pure: it validates input against the
//! current snapshot and encodes exactly one [`WriteRequest`].
//! [`ActionDispatcher::dispatch`] drives a [`StatusTracker`] through the whole
//! lifecycle and refreshes dependent reads on success.

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolCall;

use crate::abi::{AbiManifest, IRevenueDistributor, IERC20};
use crate::action::{ActionKind, TxIntent, TxReceipt, WriteRequest};
use crate::amount::{parse_token_id, parse_units};
use crate::config::ContractConfig;
use crate::error::{DispatchError, DispatchResult, TrackerError, TxError};
use crate::reads::{ContractReader, ContractSnapshot};
use crate::tracker::StatusTracker;
use crate::wallet::WalletClient;

/// Turns user intents into contract writes for one wallet.
pub struct ActionDispatcher<W> {
    config: ContractConfig,
    wallet: W,
    manifest: AbiManifest,
}

impl<W: WalletClient> ActionDispatcher<W> {
    /// Dispatcher using the bundled distributor ABI.
    pub fn new(config: ContractConfig, wallet: W) -> Self {
        Self {
            config,
            wallet,
            manifest: AbiManifest::bundled(),
        }
    }

    /// Replace the ABI manifest used for presence checks.
    pub fn with_manifest(mut self, manifest: AbiManifest) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn manifest(&self) -> &AbiManifest {
        &self.manifest
    }

    pub fn reader(&self) -> ContractReader<'_, W> {
        ContractReader::new(&self.config, &self.wallet)
    }

    /// Fail when the distributor ABI lacks the function `kind` calls.
    pub fn check_interface(&self, kind: ActionKind) -> DispatchResult<()> {
        if kind.targets_distributor() && !self.manifest.has_function(kind.function()) {
            return Err(DispatchError::StaleInterface { function: kind.function() });
        }
        Ok(())
    }

    /// Validate `intent` and encode its single write request.
    pub fn prepare(&self, intent: &TxIntent, snapshot: &ContractSnapshot) -> DispatchResult<WriteRequest> {
        let kind = intent.kind;
        self.check_interface(kind)?;

        let (to, calldata) = match kind {
            ActionKind::Mint => {
                if snapshot.is_sold_out() {
                    return Err(DispatchError::SupplyExhausted { max: snapshot.max_supply });
                }
                let call = IRevenueDistributor::mintCall {
                    tokenUri: self.config.token_uri(snapshot.next_token_id()),
                };
                (self.config.distributor_address, call.abi_encode())
            }

            ActionKind::ApproveToken => {
                let amount = parse_units(&intent.input, self.config.token_decimals)?;
                if self.wallet.account().is_none() {
                    return Err(DispatchError::WalletNotConnected);
                }
                let token = snapshot.usdc_token.ok_or(DispatchError::TokenAddressUnknown)?;
                let call = IERC20::approveCall {
                    spender: self.config.distributor_address,
                    amount,
                };
                (token, call.abi_encode())
            }

            ActionKind::DepositRevenue => {
                let amount = parse_units(&intent.input, self.config.token_decimals)?;
                let allowance = snapshot.allowance.unwrap_or(U256::ZERO);
                if allowance < amount {
                    return Err(DispatchError::ApprovalRequired { required: amount, allowance });
                }
                let call = IRevenueDistributor::depositRevenueCall { amount };
                (self.config.distributor_address, call.abi_encode())
            }

            ActionKind::ClaimRevenue => {
                let token_id = parse_token_id(&intent.input)
                    .ok_or_else(|| DispatchError::InvalidTokenId(intent.input.trim().to_string()))?;
                let call = IRevenueDistributor::claimRevenueCall { tokenId: token_id };
                (self.config.distributor_address, call.abi_encode())
            }
        };

        Ok(WriteRequest {
            to,
            function: kind.function(),
            calldata: Bytes::from(calldata),
            gas_limit: kind.gas_limit(),
        })
    }

    /// Run one intent through the full lifecycle.
    ///
    /// `on_change` observes every tracker transition. Validation failures leave
    /// the tracker `idle` and issue no write. Wallet and confirmation failures
    /// end in `error`. On `success` the snapshot is refreshed once.
    pub async fn dispatch<F>(
        &self,
        tracker: &mut StatusTracker,
        intent: TxIntent,
        snapshot: &mut ContractSnapshot,
        mut on_change: F,
    ) -> DispatchResult<TxReceipt>
    where
        F: FnMut(&StatusTracker),
    {
        if tracker.reset().is_err() {
            return Err(DispatchError::Busy);
        }
        on_change(tracker);

        let kind = intent.kind;
        if kind == ActionKind::DepositRevenue {
            // Input errors never reach the network
            if let Err(e) = parse_units(&intent.input, self.config.token_decimals) {
                log::warn!("{} blocked before dispatch: {}", kind, e);
                return Err(e.into());
            }
            self.check_interface(kind)?;
            self.refresh_allowance(snapshot).await?;
        }

        let request = match self.prepare(&intent, snapshot) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("{} blocked before dispatch: {}", kind, e);
                return Err(e);
            }
        };

        // reset() succeeded, so the tracker is idle
        tracker.begin(kind).map_err(|_| DispatchError::Busy)?;
        on_change(tracker);
        log::info!("{} dispatched to {} (gas {})", kind, request.to, request.gas_limit);

        let hash = match self.wallet.send_transaction(&request).await {
            Ok(hash) => hash,
            Err(e) => {
                log::error!("{} rejected by wallet: {}", kind, e);
                track(kind, tracker.fail(e.clone()));
                on_change(tracker);
                return Err(DispatchError::Transaction(e));
            }
        };

        track(kind, tracker.submitted(hash));
        on_change(tracker);
        log::info!("{} submitted: {}", kind, hash);

        let receipt = match self.wallet.wait_for_receipt(hash).await {
            Ok(receipt) => receipt,
            Err(e) => {
                log::error!("{} confirmation failed: {}", kind, e);
                track(kind, tracker.fail(e.clone()));
                on_change(tracker);
                return Err(DispatchError::Transaction(e));
            }
        };

        track(kind, tracker.confirmed(receipt.clone()));
        on_change(tracker);

        if !receipt.success {
            log::error!("{} reverted in block {:?}", kind, receipt.block_number);
            return Err(DispatchError::Transaction(TxError::ContractReverted { reason: None }));
        }

        log::info!("{} confirmed in block {:?}", kind, receipt.block_number);
        self.reader().refresh_after_confirmation(snapshot).await;
        Ok(receipt)
    }

    /// Re-read the connected account's allowance before a deposit.
    async fn refresh_allowance(&self, snapshot: &mut ContractSnapshot) -> DispatchResult<()> {
        let owner = self.wallet.account().ok_or(DispatchError::WalletNotConnected)?;
        let reader = self.reader();

        let token = match snapshot.usdc_token {
            Some(token) => token,
            None => {
                let token = reader.usdc_token().await.map_err(DispatchError::Read)?;
                snapshot.usdc_token = Some(token);
                token
            }
        };

        let allowance = reader.allowance(token, owner).await.map_err(DispatchError::Read)?;
        snapshot.allowance = Some(allowance);
        Ok(())
    }
}

/// Surface a tracker transition that `begin` should have made legal.
fn track(kind: ActionKind, step: Result<(), TrackerError>) -> bool {
    match step {
        Ok(()) => true,
        Err(e) => {
            log::error!("{} tracker out of sync: {}", kind, e);
            debug_assert!(false, "illegal tracker transition: {}", e);
            false
        }
    }
}
