use alloy_primitives::{B256, U256};
use alloy_rlp::{Decodable, Encodable, Header};

use crate::encoding::rlp::wrap_list;
use crate::types::AccountState;

/// RLP-encode an account as the state trie stores it:
/// `[nonce, balance, storageRoot, codeHash]`.
pub fn encode_account(account: &AccountState) -> Vec<u8> {
    let mut payload = Vec::with_capacity(80);
    account.nonce.encode(&mut payload);
    account.balance.encode(&mut payload);
    account.storage_root.encode(&mut payload);
    account.code_hash.encode(&mut payload);
    wrap_list(&payload)
}

/// Decode an account leaf value. Strict: the list must hold exactly the four
/// canonical fields with nothing trailing.
pub fn decode_account(data: &[u8]) -> Result<AccountState, alloy_rlp::Error> {
    let mut buf = data;
    let header = Header::decode(&mut buf)?;
    if !header.list {
        return Err(alloy_rlp::Error::UnexpectedString);
    }
    if buf.len() != header.payload_length {
        return Err(alloy_rlp::Error::UnexpectedLength);
    }

    let account = AccountState {
        nonce: u64::decode(&mut buf)?,
        balance: U256::decode(&mut buf)?,
        storage_root: B256::decode(&mut buf)?,
        code_hash: B256::decode(&mut buf)?,
    };
    if !buf.is_empty() {
        return Err(alloy_rlp::Error::Custom("account list has more than 4 items"));
    }
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;
    use hex_literal::hex;

    /// Leaf value of account 0x01d5b501c1fc0121e1411970fb79c322737025c2 taken
    /// from a real `eth_getProof` response.
    const LEAF: [u8; 70] = hex!(
        "f8440180a0209f60372065d53cb2b7d98ffbb1c6c3dcb60c2a30317619da189ccb2c6bad55a0a633dd6234bb961a983a1a1e6d22088dfbbd623dede31449808b7b1eda575b7e"
    );

    fn leaf_account() -> AccountState {
        AccountState {
            nonce: 1,
            balance: U256::ZERO,
            storage_root: b256!("209f60372065d53cb2b7d98ffbb1c6c3dcb60c2a30317619da189ccb2c6bad55"),
            code_hash: b256!("a633dd6234bb961a983a1a1e6d22088dfbbd623dede31449808b7b1eda575b7e"),
        }
    }

    #[test]
    fn test_encode_account_matches_state_trie_leaf() {
        assert_eq!(encode_account(&leaf_account()), LEAF.to_vec());
    }

    #[test]
    fn test_decode_account() {
        assert_eq!(decode_account(&LEAF).unwrap(), leaf_account());
    }

    #[test]
    fn test_encode_eoa_with_large_balance() {
        let eoa = AccountState {
            nonce: 0,
            balance: U256::from(1_000_000_000_000_000_000u64),
            storage_root: AccountState::EMPTY_STORAGE_ROOT,
            code_hash: AccountState::EMPTY_CODE_HASH,
        };
        let encoded = encode_account(&eoa);
        // nonce 0 -> 0x80, 1 ether -> 0x88 0de0b6b3a7640000
        assert_eq!(&encoded[2..12], &hex!("80880de0b6b3a7640000")[..]);
        assert_eq!(decode_account(&encoded).unwrap(), eoa);
    }

    #[test]
    fn test_decode_account_rejects_extra_items() {
        let mut payload = LEAF[2..].to_vec();
        payload.push(0x01);
        assert!(decode_account(&wrap_list(&payload)).is_err());
        assert!(decode_account(&LEAF[..40]).is_err());
    }
}
