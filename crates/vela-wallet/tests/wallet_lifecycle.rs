//! End-to-end wallet lifecycle: generate, derive across chains, export,
//! clear, import, and re-derive to the same keys.

use std::collections::BTreeMap;

use vela_core::ChainType;
use vela_wallet::{KeyfileAccount, Strength, WalletError, WalletSession};

#[test]
fn full_lifecycle_roundtrip() {
    let mut session = WalletSession::new();
    let phrase = session.generate_new(Strength::Bits256);
    assert_eq!(phrase.split_whitespace().count(), 24);

    // Derive one account per chain and record the slots for the keyfile.
    let mut originals = Vec::new();
    let mut accounts = BTreeMap::new();
    for chain in ChainType::ALL {
        let pair = session.derive_account(chain, 0).unwrap();
        accounts.insert(
            chain,
            vec![KeyfileAccount {
                address: pair.public_key_hex(),
                derivation_path: pair.derivation_path.clone(),
                index: pair.account_index,
            }],
        );
        originals.push(pair);
    }

    let document = session
        .export_keyfile_with_accounts("correct horse battery staple", accounts)
        .unwrap();

    // The envelope survives its on-disk JSON form.
    let json = document.to_json().unwrap();
    let document = vela_wallet::KeyfileDocument::from_json(&json).unwrap();
    assert_eq!(document.accounts.len(), ChainType::ALL.len());

    // Teardown scrubs the session.
    session.clear();
    assert!(session.current_mnemonic().is_none());
    assert_eq!(
        session.derive_account(ChainType::Eth, 0).unwrap_err(),
        WalletError::NotInitialized
    );

    // Import recovers the exact phrase and the exact key material.
    let mut restored = WalletSession::new();
    restored
        .import_keyfile(&document, "correct horse battery staple")
        .unwrap();
    assert_eq!(restored.current_mnemonic(), Some(phrase.as_str()));

    for original in &originals {
        let again = restored
            .derive_account(original.chain, original.account_index)
            .unwrap();
        assert_eq!(again.public_key, original.public_key);
        assert_eq!(
            again.private_key.as_bytes(),
            original.private_key.as_bytes()
        );
        assert_eq!(again.derivation_path, original.derivation_path);
    }
}

#[test]
fn import_with_wrong_password_leaves_session_empty() {
    let mut session = WalletSession::new();
    session.generate_new(Strength::Bits128);
    let document = session.export_keyfile("right").unwrap();

    let mut other = WalletSession::new();
    assert_eq!(
        other.import_keyfile(&document, "wrong").unwrap_err(),
        WalletError::InvalidPasswordOrCorruptKeyfile
    );
    assert!(!other.is_initialized());
}
