//! Two-stage signing material.
//!
//! [`Credentials`] are cheap to construct and never fail. Turning them into an
//! [`UnlockedSigner`] decrypts the key, so a wrong passphrase or a wallet that
//! does not hold the requested account is reported by [`Credentials::unlock`]
//! rather than on the first transaction.

use std::{fmt, path::PathBuf};

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    signers::{
        Signer,
        local::{LocalSignerError, PrivateKeySigner},
    },
};

use super::registrar_error::RegistrarError;

/// Source of private keys.
pub trait Wallet {
    fn signer(&self, account: Address, passphrase: &str)
    -> Result<PrivateKeySigner, RegistrarError>;
}

/// Encrypted JSON (web3 secret storage) keystore file.
#[derive(Debug, Clone)]
pub struct KeystoreWallet {
    path: PathBuf,
}

impl KeystoreWallet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Wallet for KeystoreWallet {
    fn signer(
        &self,
        account: Address,
        passphrase: &str,
    ) -> Result<PrivateKeySigner, RegistrarError> {
        let signer = PrivateKeySigner::decrypt_keystore(&self.path, passphrase).map_err(|e| {
            RegistrarError::signing(format!(
                "cannot unlock keystore '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        ensure_account(signer, account)
    }
}

/// Raw hex private key. The passphrase is ignored.
#[derive(Clone)]
pub struct PrivateKeyWallet {
    key: String,
}

impl PrivateKeyWallet {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl fmt::Debug for PrivateKeyWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyWallet").finish_non_exhaustive()
    }
}

impl Wallet for PrivateKeyWallet {
    fn signer(
        &self,
        account: Address,
        _passphrase: &str,
    ) -> Result<PrivateKeySigner, RegistrarError> {
        let signer = self.key.parse().map_err(|e: LocalSignerError| {
            RegistrarError::signing(format!(
                "invalid private key (length: {}): {}",
                self.key.len(),
                e
            ))
        })?;
        ensure_account(signer, account)
    }
}

fn ensure_account(
    signer: PrivateKeySigner,
    account: Address,
) -> Result<PrivateKeySigner, RegistrarError> {
    if signer.address() != account {
        return Err(RegistrarError::signing(format!(
            "wallet holds {} but {} was requested",
            signer.address(),
            account
        )));
    }
    Ok(signer)
}

/// Account, wallet and passphrase for one chain. Nothing is decrypted yet.
pub struct Credentials<'a, W: ?Sized> {
    chain_id: u64,
    wallet: &'a W,
    account: Address,
    passphrase: String,
}

impl<'a, W: Wallet + ?Sized> Credentials<'a, W> {
    pub fn new(
        chain_id: u64,
        wallet: &'a W,
        account: Address,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            wallet,
            account,
            passphrase: passphrase.into(),
        }
    }

    pub fn unlock(&self) -> Result<UnlockedSigner, RegistrarError> {
        let mut signer = self.wallet.signer(self.account, &self.passphrase)?;
        signer.set_chain_id(Some(self.chain_id));
        Ok(UnlockedSigner {
            address: self.account,
            chain_id: self.chain_id,
            wallet: EthereumWallet::from(signer),
        })
    }
}

impl<W: ?Sized> fmt::Debug for Credentials<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("chain_id", &self.chain_id)
            .field("account", &self.account)
            .field("passphrase", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Signer proven to hold the key of `address`.
#[derive(Clone)]
pub struct UnlockedSigner {
    address: Address,
    chain_id: u64,
    wallet: EthereumWallet,
}

impl UnlockedSigner {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn wallet(&self) -> &EthereumWallet {
        &self.wallet
    }
}

impl fmt::Debug for UnlockedSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnlockedSigner")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}
