use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use alloy::{
    eips::BlockId,
    primitives::{Address, B256, Bytes, TxHash, address, keccak256},
    rpc::types::TransactionRequest,
    sol_types::{SolCall, SolValue},
};
use async_trait::async_trait;

use crate::models::{
    credentials::UnlockedSigner,
    network::Network,
    registrar_error::{NetworkError, RegistrarError},
    registry::IENSRegistry,
    reverse_registrar::{INameResolver, IReverseRegistrar},
};

// anvil account #0
pub const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const DEV_ACCOUNT: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

pub const REVERSE_REGISTRAR: Address = address!("0xabcd00000000000000000000000000000000abcd");

#[derive(Debug, Clone, Copy)]
enum ChainIdReply {
    Ok(u64),
    Fail,
    Hang,
}

#[derive(Debug)]
struct FakeState {
    chain_id: ChainIdReply,
    chain_id_requests: usize,
    owners: HashMap<(Address, B256), Address>,
    resolvers: HashMap<(Address, B256), Address>,
    names: HashMap<(Address, B256), String>,
    default_resolvers: HashMap<Address, Address>,
    fail_calls: bool,
    reject_submissions: bool,
    calls: Vec<(Address, Bytes, BlockId)>,
    submissions: Vec<TransactionRequest>,
}

/// In-memory chain that answers the registry, registrar and resolver calls
/// used by this crate and records everything it receives.
#[derive(Debug, Clone)]
pub struct FakeNetwork {
    state: Arc<Mutex<FakeState>>,
}

impl FakeNetwork {
    pub fn new(chain_id: u64) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                chain_id: ChainIdReply::Ok(chain_id),
                chain_id_requests: 0,
                owners: HashMap::new(),
                resolvers: HashMap::new(),
                names: HashMap::new(),
                default_resolvers: HashMap::new(),
                fail_calls: false,
                reject_submissions: false,
                calls: Vec::new(),
                submissions: Vec::new(),
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn fail_chain_id(&self) {
        self.state().chain_id = ChainIdReply::Fail;
    }

    pub fn hang_chain_id(&self) {
        self.state().chain_id = ChainIdReply::Hang;
    }

    pub fn fail_calls(&self) {
        self.state().fail_calls = true;
    }

    pub fn reject_submissions(&self) {
        self.state().reject_submissions = true;
    }

    pub fn set_owner(&self, registry: Address, node: B256, owner: Address) {
        self.state().owners.insert((registry, node), owner);
    }

    pub fn set_resolver(&self, registry: Address, node: B256, resolver: Address) {
        self.state().resolvers.insert((registry, node), resolver);
    }

    pub fn set_name(&self, resolver: Address, node: B256, name: &str) {
        self.state().names.insert((resolver, node), name.to_string());
    }

    pub fn set_default_resolver(&self, registrar: Address, resolver: Address) {
        self.state().default_resolvers.insert(registrar, resolver);
    }

    pub fn chain_id_requests(&self) -> usize {
        self.state().chain_id_requests
    }

    pub fn calls(&self) -> Vec<(Address, Bytes, BlockId)> {
        self.state().calls.clone()
    }

    pub fn submissions(&self) -> Vec<TransactionRequest> {
        self.state().submissions.clone()
    }
}

fn target(tx: &TransactionRequest) -> Address {
    tx.to
        .and_then(|kind| kind.to().copied())
        .unwrap_or_default()
}

fn input(tx: &TransactionRequest) -> Bytes {
    tx.input.input().cloned().unwrap_or_default()
}

#[async_trait]
impl Network for FakeNetwork {
    async fn chain_id(&self) -> Result<u64, NetworkError> {
        let reply = {
            let mut state = self.state();
            state.chain_id_requests += 1;
            state.chain_id
        };
        match reply {
            ChainIdReply::Ok(chain_id) => Ok(chain_id),
            ChainIdReply::Fail => Err(NetworkError::new("connection refused")),
            ChainIdReply::Hang => std::future::pending().await,
        }
    }

    async fn call(&self, tx: TransactionRequest, block: BlockId) -> Result<Bytes, NetworkError> {
        let to = target(&tx);
        let data = input(&tx);
        let mut state = self.state();
        state.calls.push((to, data.clone(), block));

        if state.fail_calls {
            return Err(NetworkError::new("upstream timed out"));
        }
        if data.len() < 4 {
            return Err(NetworkError::new("execution reverted"));
        }

        let selector: [u8; 4] = data[..4].try_into().unwrap();
        let output = if selector == IENSRegistry::ownerCall::SELECTOR {
            let call = IENSRegistry::ownerCall::abi_decode(&data).unwrap();
            let owner = state.owners.get(&(to, call.node)).copied();
            owner.unwrap_or_default().abi_encode()
        } else if selector == IENSRegistry::resolverCall::SELECTOR {
            let call = IENSRegistry::resolverCall::abi_decode(&data).unwrap();
            let resolver = state.resolvers.get(&(to, call.node)).copied();
            resolver.unwrap_or_default().abi_encode()
        } else if selector == INameResolver::nameCall::SELECTOR {
            let call = INameResolver::nameCall::abi_decode(&data).unwrap();
            let name = state.names.get(&(to, call.node)).cloned();
            name.unwrap_or_default().abi_encode()
        } else if selector == IReverseRegistrar::defaultResolverCall::SELECTOR {
            let resolver = state.default_resolvers.get(&to).copied();
            resolver.unwrap_or_default().abi_encode()
        } else {
            return Err(NetworkError::new("execution reverted"));
        };
        Ok(output.into())
    }

    async fn submit(
        &self,
        tx: TransactionRequest,
        signer: &UnlockedSigner,
    ) -> Result<TxHash, RegistrarError> {
        let mut state = self.state();
        if tx.from != Some(signer.address()) {
            return Err(RegistrarError::Signing {
                reason: "sender does not match signer".to_string(),
            });
        }
        if state.reject_submissions {
            return Err(RegistrarError::Submission(NetworkError::new(
                "insufficient funds for gas * price + value",
            )));
        }
        state.submissions.push(tx);
        let nonce = state.submissions.len() as u64;
        Ok(keccak256(nonce.to_be_bytes()))
    }
}
