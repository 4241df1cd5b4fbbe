use std::fmt;

use alloy::{
    eips::BlockId,
    primitives::{Address, TxHash},
};

use super::{
    credentials::UnlockedSigner, registrar_error::RegistrarError,
    reverse_registrar::ReverseRegistrar,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOpts {
    pub block: BlockId,
}

impl CallOpts {
    /// Reads include transactions that are not yet mined.
    pub fn pending() -> Self {
        Self {
            block: BlockId::pending(),
        }
    }
}

#[derive(Clone)]
pub struct TransactOpts {
    from: Address,
    chain_id: u64,
    signer: UnlockedSigner,
    gas_price: u128,
}

impl TransactOpts {
    pub fn new(signer: UnlockedSigner, gas_price: u128) -> Self {
        Self {
            from: signer.address(),
            chain_id: signer.chain_id(),
            signer,
            gas_price,
        }
    }

    pub fn sender(&self) -> Address {
        self.from
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn signer(&self) -> &UnlockedSigner {
        &self.signer
    }

    /// Wei per gas, passed to the node unchanged.
    pub fn gas_price(&self) -> u128 {
        self.gas_price
    }
}

impl fmt::Debug for TransactOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactOpts")
            .field("from", &self.from)
            .field("chain_id", &self.chain_id)
            .field("gas_price", &self.gas_price)
            .finish_non_exhaustive()
    }
}

/// Registrar binding plus the options every call through it uses. Fields
/// cannot be changed after construction; clones are independent values.
#[derive(Debug, Clone)]
pub struct Session<R> {
    registrar: R,
    call_opts: CallOpts,
    transact_opts: TransactOpts,
}

impl<R: ReverseRegistrar> Session<R> {
    pub fn new(registrar: R, signer: UnlockedSigner, gas_price: u128) -> Self {
        Self {
            registrar,
            call_opts: CallOpts::pending(),
            transact_opts: TransactOpts::new(signer, gas_price),
        }
    }

    pub fn registrar(&self) -> &R {
        &self.registrar
    }

    pub fn call_opts(&self) -> &CallOpts {
        &self.call_opts
    }

    pub fn transact_opts(&self) -> &TransactOpts {
        &self.transact_opts
    }

    pub async fn set_name(&self, name: &str) -> Result<TxHash, RegistrarError> {
        self.registrar.set_name(&self.transact_opts, name).await
    }

    pub async fn name_of(&self, addr: Address) -> Result<Option<String>, RegistrarError> {
        self.registrar.name_of(&self.call_opts, addr).await
    }
}
