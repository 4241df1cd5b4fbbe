use alloy::{
    primitives::{Address, TxHash},
    sol,
    sol_types::{SolCall, SolValue},
};
use async_trait::async_trait;
use tracing::debug;

use super::{
    network::{Network, call_request},
    registrar_error::RegistrarError,
    registry::{EnsRegistry, Registry, RegistryLookup},
    session::{CallOpts, TransactOpts},
};
use crate::misc::ens_utils::reverse_node;

sol! {
    interface IReverseRegistrar {
        function setName(string name) external returns (bytes32);
        function node(address addr) external pure returns (bytes32);
        function defaultResolver() external view returns (address);
    }

    interface INameResolver {
        function name(bytes32 node) external view returns (string);
    }
}

/// Operations of a bound reverse registrar.
#[async_trait]
pub trait ReverseRegistrar: Send + Sync {
    fn address(&self) -> Address;

    /// Submits `setName(name)` from `opts.sender()`. Every call is a new transaction.
    async fn set_name(&self, opts: &TransactOpts, name: &str) -> Result<TxHash, RegistrarError>;

    /// Name currently set for `addr`, if any.
    async fn name_of(&self, opts: &CallOpts, addr: Address)
    -> Result<Option<String>, RegistrarError>;
}

/// Reverse registrar located through an ENS registry.
#[derive(Debug, Clone)]
pub struct ReverseRegistrarContract<N> {
    address: Address,
    registry: Address,
    chain_id: u64,
    network: N,
}

impl<N: Network + Clone> ReverseRegistrarContract<N> {
    pub fn new(address: Address, registry: Address, chain_id: u64, network: N) -> Self {
        Self {
            address,
            registry,
            chain_id,
            network,
        }
    }

    pub fn registry(&self) -> Address {
        self.registry
    }

    /// Chain the registrar was located on.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub async fn default_resolver(&self, opts: &CallOpts) -> Result<Option<Address>, RegistrarError> {
        let input = IReverseRegistrar::defaultResolverCall {}.abi_encode();
        let output = self
            .network
            .call(call_request(self.address, input), opts.block)
            .await
            .map_err(RegistrarError::Call)?;
        Ok(match RegistryLookup::from(Address::abi_decode(&output)?) {
            RegistryLookup::Found(resolver) => Some(resolver),
            RegistryLookup::NotFound => None,
        })
    }
}

#[async_trait]
impl<N: Network + Clone> ReverseRegistrar for ReverseRegistrarContract<N> {
    fn address(&self) -> Address {
        self.address
    }

    async fn set_name(&self, opts: &TransactOpts, name: &str) -> Result<TxHash, RegistrarError> {
        let input = IReverseRegistrar::setNameCall {
            name: name.to_string(),
        }
        .abi_encode();

        let mut tx = call_request(self.address, input);
        tx.from = Some(opts.sender());
        tx.gas_price = Some(opts.gas_price());
        tx.chain_id = Some(opts.chain_id());

        debug!(registrar = %self.address, from = %opts.sender(), name, "Submitting setName");
        self.network.submit(tx, opts.signer()).await
    }

    async fn name_of(
        &self,
        opts: &CallOpts,
        addr: Address,
    ) -> Result<Option<String>, RegistrarError> {
        let node = reverse_node(&addr);
        let registry = EnsRegistry::new(self.registry, self.network.clone());
        let resolver = match RegistryLookup::from(registry.resolver(node, opts.block).await?) {
            RegistryLookup::Found(resolver) => resolver,
            RegistryLookup::NotFound => return Ok(None),
        };

        let input = INameResolver::nameCall { node }.abi_encode();
        let output = self
            .network
            .call(call_request(resolver, input), opts.block)
            .await
            .map_err(RegistrarError::Call)?;
        let name = String::abi_decode(&output)?;

        Ok((!name.is_empty()).then_some(name))
    }
}
