use std::collections::HashMap;

use alloy::{
    eips::BlockId,
    primitives::{Address, B256},
    sol,
    sol_types::{SolCall, SolValue},
};
use async_trait::async_trait;

use super::{
    network::{Network, call_request},
    registrar_error::RegistrarError,
};
use crate::misc::ens_utils::ENS_REGISTRY;

sol! {
    interface IENSRegistry {
        function owner(bytes32 node) external view returns (address);
        function resolver(bytes32 node) external view returns (address);
    }
}

/// Answer of an owner lookup. The zero address never leaves this type as a
/// plausible contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryLookup {
    Found(Address),
    NotFound,
}

impl From<Address> for RegistryLookup {
    fn from(address: Address) -> Self {
        if address.is_zero() {
            Self::NotFound
        } else {
            Self::Found(address)
        }
    }
}

/// Read access to the root name registry.
#[async_trait]
pub trait Registry: Send + Sync {
    fn address(&self) -> Address;

    async fn owner(&self, node: B256, block: BlockId) -> Result<Address, RegistrarError>;

    async fn resolver(&self, node: B256, block: BlockId) -> Result<Address, RegistrarError>;
}

/// Produces the registry handle for a connected network.
pub trait RegistryResolver<N> {
    type Registry: Registry;

    fn registry(&self, network: &N, chain_id: u64) -> Result<Self::Registry, RegistrarError>;
}

#[derive(Debug, Clone)]
pub struct EnsRegistry<N> {
    address: Address,
    network: N,
}

impl<N: Network> EnsRegistry<N> {
    pub fn new(address: Address, network: N) -> Self {
        Self { address, network }
    }

    async fn read_address(
        &self,
        input: Vec<u8>,
        block: BlockId,
    ) -> Result<Address, RegistrarError> {
        let output = self
            .network
            .call(call_request(self.address, input), block)
            .await
            .map_err(RegistrarError::RegistryRead)?;
        Ok(Address::abi_decode(&output)?)
    }
}

#[async_trait]
impl<N: Network> Registry for EnsRegistry<N> {
    fn address(&self) -> Address {
        self.address
    }

    async fn owner(&self, node: B256, block: BlockId) -> Result<Address, RegistrarError> {
        self.read_address(IENSRegistry::ownerCall { node }.abi_encode(), block)
            .await
    }

    async fn resolver(&self, node: B256, block: BlockId) -> Result<Address, RegistrarError> {
        self.read_address(IENSRegistry::resolverCall { node }.abi_encode(), block)
            .await
    }
}

/// Resolves the canonical ENS registry, with optional per-chain overrides for
/// networks that run their own deployment.
#[derive(Debug, Clone, Default)]
pub struct EnsRegistryResolver {
    overrides: HashMap<u64, Address>,
}

impl EnsRegistryResolver {
    pub fn with_override(mut self, chain_id: u64, registry: Address) -> Self {
        self.overrides.insert(chain_id, registry);
        self
    }

    pub fn registry_address(&self, chain_id: u64) -> Address {
        self.overrides
            .get(&chain_id)
            .copied()
            .unwrap_or(ENS_REGISTRY)
    }
}

impl<N: Network + Clone> RegistryResolver<N> for EnsRegistryResolver {
    type Registry = EnsRegistry<N>;

    fn registry(&self, network: &N, chain_id: u64) -> Result<Self::Registry, RegistrarError> {
        Ok(EnsRegistry::new(
            self.registry_address(chain_id),
            network.clone(),
        ))
    }
}
