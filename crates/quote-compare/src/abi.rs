use num_bigint::BigUint;
use tiny_keccak::{Hasher, Keccak};

use crate::error::AbiError;

/// Size of one ABI head word.
pub const WORD: usize = 32;

/// A single static ABI argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Address([u8; 20]),
    /// Unsigned integer of the given bit width (`uint24`, `uint160`, `uint256`).
    Uint(BigUint, usize),
}

impl Arg {
    pub fn uint256(value: BigUint) -> Self {
        Arg::Uint(value, 256)
    }

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), AbiError> {
        let mut word = [0u8; WORD];
        match self {
            Arg::Address(addr) => word[12..].copy_from_slice(addr),
            Arg::Uint(value, bits) => {
                if value.bits() > *bits as u64 {
                    return Err(AbiError::OutOfRange(format!(
                        "{value} does not fit in uint{bits}"
                    )));
                }
                let bytes = value.to_bytes_be();
                word[WORD - bytes.len()..].copy_from_slice(&bytes);
            }
        }
        out.extend_from_slice(&word);
        Ok(())
    }
}

/// Compute the 4-byte selector from a canonical function signature.
pub fn selector_from_signature(canonical: &str) -> [u8; 4] {
    let mut hasher = Keccak::v256();
    hasher.update(canonical.as_bytes());
    let mut hash = [0u8; 32];
    hasher.finalize(&mut hash);
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Parse a `0x`-prefixed (or bare) 20-byte hex address.
pub fn parse_address(address: &str) -> Result<[u8; 20], AbiError> {
    let trimmed = address.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let bytes = hex::decode(digits)
        .map_err(|e| AbiError::InvalidAddress(format!("{address}: {e}")))?;
    <[u8; 20]>::try_from(bytes.as_slice()).map_err(|_| {
        AbiError::InvalidAddress(format!("{address}: expected 20 bytes, got {}", bytes.len()))
    })
}

/// Build calldata: selector followed by the head-encoded static arguments.
pub fn encode_call(signature: &str, args: &[Arg]) -> Result<Vec<u8>, AbiError> {
    let mut calldata = Vec::with_capacity(4 + args.len() * WORD);
    calldata.extend_from_slice(&selector_from_signature(signature));
    for arg in args {
        arg.encode_into(&mut calldata)?;
    }
    Ok(calldata)
}

fn first_word(data: &[u8]) -> Result<&[u8], AbiError> {
    if data.len() < WORD {
        return Err(AbiError::ReturnTooShort {
            expected: WORD,
            actual: data.len(),
        });
    }
    Ok(&data[..WORD])
}

/// Decode the first return word as a `uint256`.
pub fn decode_uint(data: &[u8]) -> Result<BigUint, AbiError> {
    Ok(BigUint::from_bytes_be(first_word(data)?))
}

/// Decode the first return word as a `bool`; anything but 0 or 1 is rejected.
pub fn decode_bool(data: &[u8]) -> Result<bool, AbiError> {
    let word = first_word(data)?;
    if word[..WORD - 1].iter().any(|&b| b != 0) || word[WORD - 1] > 1 {
        return Err(AbiError::OutOfRange(format!(
            "not a bool: 0x{}",
            hex::encode(word)
        )));
    }
    Ok(word[WORD - 1] == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_computation() {
        // transfer(address,uint256) selector = 0xa9059cbb
        assert_eq!(
            hex::encode(selector_from_signature("transfer(address,uint256)")),
            "a9059cbb"
        );
    }

    #[test]
    fn test_parse_address() {
        let addr = parse_address("0xdAC17F958D2ee523a2206206994597C13D831ec7").unwrap();
        assert_eq!(hex::encode(addr), "dac17f958d2ee523a2206206994597c13d831ec7");
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("0xzz17f958d2ee523a2206206994597c13d831ec7").is_err());
    }

    #[test]
    fn test_encode_call_layout() {
        let mut addr = [0u8; 20];
        addr[19] = 1;
        let calldata = encode_call(
            "transfer(address,uint256)",
            &[Arg::Address(addr), Arg::uint256(BigUint::from(1000u32))],
        )
        .unwrap();

        assert_eq!(calldata.len(), 4 + 2 * WORD);
        assert_eq!(hex::encode(&calldata[..4]), "a9059cbb");
        assert_eq!(calldata[4 + 31], 1);
        assert_eq!(calldata[4 + WORD + 30], 0x03);
        assert_eq!(calldata[4 + WORD + 31], 0xe8);
    }

    #[test]
    fn test_encode_rejects_narrow_overflow() {
        let result = encode_call("f(uint24)", &[Arg::Uint(BigUint::from(1u32 << 24), 24)]);
        assert!(matches!(result, Err(AbiError::OutOfRange(_))));
    }

    #[test]
    fn test_decode_uint() {
        let mut word = [0u8; WORD];
        word[30] = 0x03;
        word[31] = 0xe8;
        assert_eq!(decode_uint(&word).unwrap(), BigUint::from(1000u32));
        assert!(matches!(
            decode_uint(&word[..16]),
            Err(AbiError::ReturnTooShort { expected: 32, actual: 16 })
        ));
    }

    #[test]
    fn test_decode_bool() {
        let mut word = [0u8; WORD];
        assert!(!decode_bool(&word).unwrap());
        word[31] = 1;
        assert!(decode_bool(&word).unwrap());
        word[31] = 2;
        assert!(decode_bool(&word).is_err());
        assert!(decode_bool(&[]).is_err());
    }
}
