use std::time::Duration;

use alloy::{
    eips::BlockId,
    primitives::{Address, TxHash},
};
use tokio::time::timeout;
use tracing::debug;

use super::ens_utils::{ENS_REVERSE_REGISTRAR_DOMAIN, namehash};
use crate::models::{
    credentials::{Credentials, Wallet},
    network::Network,
    registrar_error::RegistrarError,
    registry::{EnsRegistryResolver, Registry, RegistryLookup, RegistryResolver},
    reverse_registrar::{ReverseRegistrar, ReverseRegistrarContract},
    session::{CallOpts, Session},
};

pub const CONNECTIVITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Finds the reverse registrar through the canonical ENS registry.
pub async fn locate_registrar<N>(network: &N) -> Result<ReverseRegistrarContract<N>, RegistrarError>
where
    N: Network + Clone,
{
    locate_registrar_with(network, &EnsRegistryResolver::default()).await
}

/// Finds the reverse registrar through the registry produced by `resolver`.
///
/// The chain id is requested first and bounded by [`CONNECTIVITY_TIMEOUT`];
/// nothing else is read if the node does not answer. A registry that has no
/// owner for `addr.reverse` yields [`RegistrarError::RegistrarNotFound`].
pub async fn locate_registrar_with<N, R>(
    network: &N,
    resolver: &R,
) -> Result<ReverseRegistrarContract<N>, RegistrarError>
where
    N: Network + Clone,
    R: RegistryResolver<N>,
{
    let chain_id = match timeout(CONNECTIVITY_TIMEOUT, network.chain_id()).await {
        Ok(Ok(chain_id)) => chain_id,
        Ok(Err(e)) => return Err(RegistrarError::Connectivity(e)),
        Err(_) => {
            return Err(RegistrarError::ConnectivityTimeout {
                timeout: CONNECTIVITY_TIMEOUT,
            });
        }
    };

    let registry = resolver.registry(network, chain_id)?;
    debug!(chain_id, registry = %registry.address(), "Resolving reverse registrar");

    let node = namehash(ENS_REVERSE_REGISTRAR_DOMAIN);
    let owner = registry.owner(node, BlockId::latest()).await?;

    match RegistryLookup::from(owner) {
        RegistryLookup::Found(address) => {
            debug!(%address, "Reverse registrar found");
            Ok(ReverseRegistrarContract::new(
                address,
                registry.address(),
                chain_id,
                network.clone(),
            ))
        }
        RegistryLookup::NotFound => Err(RegistrarError::RegistrarNotFound { chain_id }),
    }
}

/// Unlocks the account and returns a session bound to `registrar`.
///
/// `chain_id` must be the chain `registrar` was located on. The key is
/// decrypted here, so a bad passphrase fails now and not on the first
/// [`set_name`]. `gas_price` is used as given.
pub fn build_session<W, R>(
    chain_id: u64,
    wallet: &W,
    account: Address,
    passphrase: &str,
    registrar: R,
    gas_price: u128,
) -> Result<Session<R>, RegistrarError>
where
    W: Wallet + ?Sized,
    R: ReverseRegistrar,
{
    let signer = Credentials::new(chain_id, wallet, account, passphrase).unlock()?;
    Ok(Session::new(registrar, signer, gas_price))
}

/// Sets the reverse name of the session account. Each call submits a new
/// transaction.
pub async fn set_name<R: ReverseRegistrar>(
    session: &Session<R>,
    name: &str,
) -> Result<TxHash, RegistrarError> {
    session.set_name(name).await
}

pub async fn reverse_name<R: ReverseRegistrar>(
    registrar: &R,
    call_opts: &CallOpts,
    address: Address,
) -> Result<Option<String>, RegistrarError> {
    registrar.name_of(call_opts, address).await
}
