use alloy::{
    eips::BlockId,
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, TxKind},
    providers::Provider,
    rpc::types::{TransactionInput, TransactionRequest},
};
use async_trait::async_trait;
use tracing::debug;

use super::{
    credentials::UnlockedSigner,
    registrar_error::{NetworkError, RegistrarError},
};

/// Connection to a node, as seen by the registrar code.
#[async_trait]
pub trait Network: Send + Sync {
    async fn chain_id(&self) -> Result<u64, NetworkError>;

    /// Read-only `eth_call` evaluated against `block`.
    async fn call(&self, tx: TransactionRequest, block: BlockId) -> Result<Bytes, NetworkError>;

    /// Signs `tx` with `signer` and broadcasts it.
    async fn submit(
        &self,
        tx: TransactionRequest,
        signer: &UnlockedSigner,
    ) -> Result<TxHash, RegistrarError>;
}

pub(crate) fn call_request(to: Address, input: Vec<u8>) -> TransactionRequest {
    TransactionRequest {
        to: Some(TxKind::Call(to)),
        input: TransactionInput::new(input.into()),
        ..Default::default()
    }
}

#[derive(Debug, Clone)]
pub struct AlloyNetwork<P> {
    provider: P,
}

impl<P: Provider> AlloyNetwork<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P> Network for AlloyNetwork<P>
where
    P: Provider + Send + Sync + 'static,
{
    async fn chain_id(&self) -> Result<u64, NetworkError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn call(&self, tx: TransactionRequest, block: BlockId) -> Result<Bytes, NetworkError> {
        Ok(self.provider.call(tx).block(block).await?)
    }

    async fn submit(
        &self,
        mut tx: TransactionRequest,
        signer: &UnlockedSigner,
    ) -> Result<TxHash, RegistrarError> {
        let from = tx.from.unwrap_or(signer.address());
        let nonce = self
            .provider
            .get_transaction_count(from)
            .pending()
            .await
            .map_err(|e| RegistrarError::Submission(e.into()))?;
        tx.nonce = Some(nonce);

        if tx.gas.is_none() {
            let gas = self
                .provider
                .estimate_gas(tx.clone())
                .await
                .map_err(|e| RegistrarError::Submission(e.into()))?;
            tx.gas = Some(gas);
        }
        debug!(%from, nonce, gas = ?tx.gas, "Signing transaction");

        let envelope = tx
            .build(signer.wallet())
            .await
            .map_err(RegistrarError::signing)?;

        let pending = self
            .provider
            .send_tx_envelope(envelope)
            .await
            .map_err(|e| RegistrarError::Submission(e.into()))?;
        let tx_hash = *pending.tx_hash();
        debug!(%tx_hash, "Transaction submitted");

        Ok(tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use alloy::{
        primitives::{B256, U64},
        providers::{ProviderBuilder, RootProvider, mock::Asserter},
        sol_types::SolCall,
    };

    use super::*;
    use crate::{
        models::{
            credentials::{Credentials, PrivateKeyWallet},
            reverse_registrar::IReverseRegistrar,
        },
        test_utils::{DEV_ACCOUNT, DEV_KEY, REVERSE_REGISTRAR},
    };

    fn mocked_network() -> (AlloyNetwork<RootProvider>, Asserter) {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        (AlloyNetwork::new(provider), asserter)
    }

    fn signer() -> UnlockedSigner {
        let wallet = PrivateKeyWallet::new(DEV_KEY);
        Credentials::new(1, &wallet, DEV_ACCOUNT, "").unlock().unwrap()
    }

    fn set_name_request(chain_id: u64) -> TransactionRequest {
        let input = IReverseRegistrar::setNameCall {
            name: "alice.eth".to_string(),
        }
        .abi_encode();
        let mut tx = call_request(REVERSE_REGISTRAR, input);
        tx.from = Some(DEV_ACCOUNT);
        tx.gas_price = Some(2_000_000_000);
        tx.chain_id = Some(chain_id);
        tx
    }

    #[tokio::test]
    async fn test_submit_fills_nonce_and_gas() -> eyre::Result<()> {
        let (network, asserter) = mocked_network();
        let tx_hash = B256::repeat_byte(0x42);
        asserter.push_success(&U64::from(7));
        asserter.push_success(&U64::from(0x5208));
        asserter.push_success(&tx_hash);

        let submitted = network.submit(set_name_request(1), &signer()).await?;
        assert_eq!(submitted, tx_hash);
        // nonce, estimate and raw send, nothing else
        assert!(asserter.pop_response().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_keeps_given_gas_limit() -> eyre::Result<()> {
        let (network, asserter) = mocked_network();
        let tx_hash = B256::repeat_byte(0x43);
        asserter.push_success(&U64::from(0));
        asserter.push_success(&tx_hash);

        let mut tx = set_name_request(1);
        tx.gas = Some(60_000);
        assert_eq!(network.submit(tx, &signer()).await?, tx_hash);
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_nonce_failure() {
        let (network, asserter) = mocked_network();
        asserter.push_failure_msg("header not found");

        let err = network
            .submit(set_name_request(1), &signer())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrarError::Submission(_)));
        assert!(err.to_string().contains("header not found"));
    }

    #[tokio::test]
    async fn test_submit_estimate_failure() {
        let (network, asserter) = mocked_network();
        asserter.push_success(&U64::from(7));
        asserter.push_failure_msg("execution reverted");

        let err = network
            .submit(set_name_request(1), &signer())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrarError::Submission(_)));
        assert!(err.to_string().contains("execution reverted"));
        // the transaction was never sent
        assert!(asserter.pop_response().is_none());
    }

    #[tokio::test]
    async fn test_submit_chain_mismatch_is_signing_error() {
        let (network, asserter) = mocked_network();
        asserter.push_success(&U64::from(7));
        asserter.push_success(&U64::from(0x5208));

        let err = network
            .submit(set_name_request(5), &signer())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrarError::Signing { .. }));
    }

    #[tokio::test]
    async fn test_chain_id() -> eyre::Result<()> {
        let (network, asserter) = mocked_network();
        asserter.push_success(&U64::from(31337));
        assert_eq!(network.chain_id().await?, 31337);

        asserter.push_failure_msg("connection refused");
        let err = network.chain_id().await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        Ok(())
    }
}
