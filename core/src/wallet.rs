//! The wallet/chain boundary.
//!
//! Everything that talks to a provider goes through [`WalletClient`]. Raw
//! provider failures are classified into [`TxError`] inside the implementation,
//! so callers only ever see tagged variants.

use alloy_primitives::{Address, Bytes, TxHash};

use crate::action::{ReadRequest, TxReceipt, WriteRequest};
use crate::error::TxResult;

/// An account-bearing connection to an EVM chain.
///
/// Futures are not required to be `Send`: the browser implementation runs on
/// the single-threaded WASM event loop.
#[allow(async_fn_in_trait)]
pub trait WalletClient {
    /// Connected signing account, if any.
    fn account(&self) -> Option<Address>;

    /// Execute a view call and return the raw ABI-encoded result.
    async fn call(&self, request: &ReadRequest) -> TxResult<Bytes>;

    /// Ask the wallet to sign and broadcast a write.
    ///
    /// Resolves once the wallet hands back a transaction hash.
    async fn send_transaction(&self, request: &WriteRequest) -> TxResult<TxHash>;

    /// Resolve once with the terminal receipt of `hash`.
    ///
    /// Dropping the future stops watching; it never cancels the transaction.
    async fn wait_for_receipt(&self, hash: TxHash) -> TxResult<TxReceipt>;
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted in-memory wallet for lifecycle tests.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use alloy_primitives::{Address, Bytes, TxHash, B256};
    use alloy_sol_types::SolValue;

    use super::WalletClient;
    use crate::action::{ReadRequest, TxReceipt, WriteRequest};
    use crate::error::{TxError, TxResult};

    pub struct MockWallet {
        account: Option<Address>,
        reads: HashMap<&'static str, TxResult<Bytes>>,
        send_result: TxResult<TxHash>,
        receipt_result: Option<TxResult<TxReceipt>>,
        pub read_log: RefCell<Vec<&'static str>>,
        pub writes: RefCell<Vec<WriteRequest>>,
        pub receipt_waits: RefCell<u32>,
    }

    impl MockWallet {
        pub fn connected() -> Self {
            Self {
                account: Some(Address::with_last_byte(0x11)),
                reads: HashMap::new(),
                send_result: Ok(B256::with_last_byte(0x77)),
                receipt_result: None,
                read_log: RefCell::new(Vec::new()),
                writes: RefCell::new(Vec::new()),
                receipt_waits: RefCell::new(0),
            }
        }

        pub fn disconnected() -> Self {
            Self { account: None, ..Self::connected() }
        }

        pub fn with_read<T: SolValue>(mut self, function: &'static str, value: T) -> Self {
            self.reads.insert(function, Ok(Bytes::from(value.abi_encode())));
            self
        }

        pub fn with_read_error(mut self, function: &'static str, error: TxError) -> Self {
            self.reads.insert(function, Err(error));
            self
        }

        pub fn with_send_error(mut self, error: TxError) -> Self {
            self.send_result = Err(error);
            self
        }

        pub fn with_receipt(mut self, result: TxResult<TxReceipt>) -> Self {
            self.receipt_result = Some(result);
            self
        }

        pub fn reads_of(&self, function: &str) -> usize {
            self.read_log.borrow().iter().filter(|f| **f == function).count()
        }

        pub fn write_count(&self) -> usize {
            self.writes.borrow().len()
        }
    }

    impl WalletClient for MockWallet {
        fn account(&self) -> Option<Address> {
            self.account
        }

        async fn call(&self, request: &ReadRequest) -> TxResult<Bytes> {
            self.read_log.borrow_mut().push(request.function);
            self.reads
                .get(request.function)
                .cloned()
                .unwrap_or_else(|| Err(TxError::NetworkError(format!("no script for {}", request.function))))
        }

        async fn send_transaction(&self, request: &WriteRequest) -> TxResult<TxHash> {
            self.writes.borrow_mut().push(request.clone());
            self.send_result.clone()
        }

        async fn wait_for_receipt(&self, hash: TxHash) -> TxResult<TxReceipt> {
            *self.receipt_waits.borrow_mut() += 1;
            self.receipt_result.clone().unwrap_or(Ok(TxReceipt {
                hash,
                block_number: Some(1),
                gas_used: Some(21_000),
                success: true,
            }))
        }
    }
}
