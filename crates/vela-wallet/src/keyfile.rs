//! Password-encrypted keyfile codec.
//!
//! A keyfile is a versioned JSON envelope carrying the mnemonic phrase
//! encrypted with AES-256-CBC under a PBKDF2-HMAC-SHA256 key. Reading and
//! writing the document to durable storage is the caller's job; this
//! module only produces and consumes the value.
//!
//! Every export draws fresh random salt, IV, and document id — reusing
//! salt or IV across exports is a correctness violation. Import collapses
//! every failure mode (bad padding, garbled plaintext, checksum mismatch,
//! malformed fields) into one undifferentiated error so the document does
//! not act as a password oracle.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::BTreeMap;
use zeroize::{Zeroize, Zeroizing};

use vela_core::ChainType;

use crate::error::WalletError;
use crate::mnemonic;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Current keyfile format version.
pub const KEYFILE_VERSION: u32 = 1;

/// Salt length in bytes.
const SALT_LEN: usize = 32;

/// AES-CBC IV length in bytes.
const IV_LEN: usize = 16;

/// Document id length in bytes (hex-encoded in the envelope).
const ID_LEN: usize = 16;

/// PBKDF2 iteration count for newly exported documents.
const KDF_ITERATIONS: u32 = 100_000;

/// Derived key length in bytes (AES-256).
const KEY_LEN: usize = 32;

const CIPHER_NAME: &str = "aes-256-cbc";
const KDF_NAME: &str = "pbkdf2";

/// One derived account recorded in the envelope (no private material).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyfileAccount {
    pub address: String,
    pub derivation_path: String,
    pub index: u32,
}

/// Cipher block of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoParams {
    pub cipher: String,
    /// Hex-encoded ciphertext of the UTF-8 phrase.
    pub ciphertext: String,
    pub cipherparams: CipherParams,
    pub kdf: String,
    pub kdfparams: KdfParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherParams {
    /// Hex-encoded IV.
    pub iv: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Hex-encoded salt.
    pub salt: String,
    pub iterations: u32,
}

/// The versioned keyfile envelope. Immutable once written; re-export
/// always produces a new id/salt/IV/ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyfileDocument {
    pub version: u32,
    pub id: String,
    pub crypto: CryptoParams,
    /// Per-chain derived accounts, supplied by the caller.
    #[serde(default)]
    pub accounts: BTreeMap<ChainType, Vec<KeyfileAccount>>,
    /// Unix milliseconds.
    pub created_at: i64,
    /// Unix milliseconds.
    pub updated_at: i64,
}

impl KeyfileDocument {
    /// Serialize the document to its on-disk JSON form.
    pub fn to_json(&self) -> Result<String, WalletError> {
        serde_json::to_string_pretty(self).map_err(|e| WalletError::Serialization(e.to_string()))
    }

    /// Parse a document from its on-disk JSON form.
    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        serde_json::from_str(json).map_err(|e| WalletError::Serialization(e.to_string()))
    }
}

/// Encrypt a mnemonic phrase into a fresh keyfile document.
pub fn export(
    phrase: &str,
    password: &str,
    accounts: BTreeMap<ChainType, Vec<KeyfileAccount>>,
) -> KeyfileDocument {
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    let mut id = [0u8; ID_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    rand::rngs::OsRng.fill_bytes(&mut iv);
    rand::rngs::OsRng.fill_bytes(&mut id);

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, KDF_ITERATIONS, &mut key);

    let ciphertext =
        Aes256CbcEnc::new((&key).into(), (&iv).into()).encrypt_padded_vec_mut::<Pkcs7>(phrase.as_bytes());
    key.zeroize();

    let now = chrono::Utc::now().timestamp_millis();
    KeyfileDocument {
        version: KEYFILE_VERSION,
        id: hex::encode(id),
        crypto: CryptoParams {
            cipher: CIPHER_NAME.to_string(),
            ciphertext: hex::encode(ciphertext),
            cipherparams: CipherParams { iv: hex::encode(iv) },
            kdf: KDF_NAME.to_string(),
            kdfparams: KdfParams {
                salt: hex::encode(salt),
                iterations: KDF_ITERATIONS,
            },
        },
        accounts,
        created_at: now,
        updated_at: now,
    }
}

/// Decrypt a keyfile document back into its mnemonic phrase.
///
/// Re-derives the key from the document's stored salt and iteration
/// count, decrypts, and re-validates the phrase checksum. Any failure
/// returns [`WalletError::InvalidPasswordOrCorruptKeyfile`].
pub fn import(document: &KeyfileDocument, password: &str) -> Result<Zeroizing<String>, WalletError> {
    let salt = hex::decode(&document.crypto.kdfparams.salt)
        .map_err(|_| WalletError::InvalidPasswordOrCorruptKeyfile)?;
    let iv: [u8; IV_LEN] = hex::decode(&document.crypto.cipherparams.iv)
        .ok()
        .and_then(|v| v.try_into().ok())
        .ok_or(WalletError::InvalidPasswordOrCorruptKeyfile)?;
    let ciphertext = hex::decode(&document.crypto.ciphertext)
        .map_err(|_| WalletError::InvalidPasswordOrCorruptKeyfile)?;
    if ciphertext.is_empty() || ciphertext.len() % 16 != 0 {
        return Err(WalletError::InvalidPasswordOrCorruptKeyfile);
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        &salt,
        document.crypto.kdfparams.iterations,
        &mut key,
    );
    let decrypted =
        Aes256CbcDec::new((&key).into(), (&iv).into()).decrypt_padded_vec_mut::<Pkcs7>(&ciphertext);
    key.zeroize();

    let plaintext = decrypted.map_err(|_| WalletError::InvalidPasswordOrCorruptKeyfile)?;
    let phrase = match String::from_utf8(plaintext) {
        Ok(s) => Zeroizing::new(s),
        Err(e) => {
            let mut bytes = e.into_bytes();
            bytes.zeroize();
            return Err(WalletError::InvalidPasswordOrCorruptKeyfile);
        }
    };

    if !mnemonic::validate(&phrase) {
        return Err(WalletError::InvalidPasswordOrCorruptKeyfile);
    }
    Ok(phrase)
}
