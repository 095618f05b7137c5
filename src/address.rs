use std::fmt;
use std::str::FromStr;

use ethers_core::types::Address;
use ethers_core::utils::to_checksum;

use crate::error::ProbeError;

/// True when `raw`, once trimmed, is `0x` followed by exactly 40 hex digits.
pub fn is_address(raw: &str) -> bool {
    let t = raw.trim();
    match t.strip_prefix("0x") {
        Some(body) => body.len() == 40 && body.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// A user-supplied address: the trimmed text as typed plus its parsed bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeAddress {
    text: String,
    address: Address,
}

impl ProbeAddress {
    pub fn parse(raw: &str) -> Result<Self, ProbeError> {
        let t = raw.trim();
        if !is_address(t) {
            return Err(ProbeError::InvalidAddress(t.to_string()));
        }
        let address =
            Address::from_str(t).map_err(|_| ProbeError::InvalidAddress(t.to_string()))?;
        Ok(Self {
            text: t.to_string(),
            address,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

impl fmt::Display for ProbeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// EIP-55 rendering used for wallet-provided accounts.
pub fn checksummed(address: &Address) -> String {
    to_checksum(address, None)
}
