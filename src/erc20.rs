use ethers_core::abi::{decode, encode, ParamType, Token};
use ethers_core::types::{Address, Bytes, U256};
use ethers_core::utils::id;
use tracing::debug;

use crate::error::ProbeError;
use crate::rpc::ChainReader;

pub const NAME_SIG: &str = "name()";
pub const SYMBOL_SIG: &str = "symbol()";
pub const DECIMALS_SIG: &str = "decimals()";
pub const BALANCE_OF_SIG: &str = "balanceOf(address)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Raw balance, scaled by 10^decimals.
    pub balance: U256,
}

/// Selector followed by the ABI-encoded arguments.
pub fn calldata(signature: &str, args: &[Token]) -> Bytes {
    let mut data = id(signature).to_vec();
    data.extend(encode(args));
    Bytes::from(data)
}

/// Read-only handle on a token contract.
pub struct Erc20<'a, R: ChainReader + ?Sized> {
    reader: &'a R,
    token: Address,
}

impl<'a, R: ChainReader + ?Sized> Erc20<'a, R> {
    pub fn new(reader: &'a R, token: Address) -> Self {
        Self { reader, token }
    }

    async fn read(&self, signature: &str, args: &[Token], output: ParamType) -> Result<Token, ProbeError> {
        let raw = self.reader.call(self.token, calldata(signature, args)).await?;
        debug!(token = ?self.token, signature, len = raw.len(), "erc20 read");
        let mut tokens = decode(&[output], &raw)
            .map_err(|e| ProbeError::network(format!("{} returned undecodable data: {}", signature, e)))?;
        tokens
            .pop()
            .ok_or_else(|| ProbeError::network(format!("{} returned nothing", signature)))
    }

    pub async fn name(&self) -> Result<String, ProbeError> {
        self.read(NAME_SIG, &[], ParamType::String)
            .await?
            .into_string()
            .ok_or_else(|| ProbeError::network("name() did not return a string"))
    }

    pub async fn symbol(&self) -> Result<String, ProbeError> {
        self.read(SYMBOL_SIG, &[], ParamType::String)
            .await?
            .into_string()
            .ok_or_else(|| ProbeError::network("symbol() did not return a string"))
    }

    pub async fn decimals(&self) -> Result<u8, ProbeError> {
        let v = self
            .read(DECIMALS_SIG, &[], ParamType::Uint(8))
            .await?
            .into_uint()
            .ok_or_else(|| ProbeError::network("decimals() did not return an integer"))?;
        if v > U256::from(u8::MAX) {
            return Err(ProbeError::network(format!("decimals() out of range: {}", v)));
        }
        Ok(v.low_u32() as u8)
    }

    pub async fn balance_of(&self, owner: Address) -> Result<U256, ProbeError> {
        self.read(BALANCE_OF_SIG, &[Token::Address(owner)], ParamType::Uint(256))
            .await?
            .into_uint()
            .ok_or_else(|| ProbeError::network("balanceOf() did not return an integer"))
    }

    /// All four reads in flight at once; the first failure fails the group.
    pub async fn metadata(&self, owner: Address) -> Result<TokenMetadata, ProbeError> {
        let (name, symbol, decimals, balance) = futures::try_join!(
            self.name(),
            self.symbol(),
            self.decimals(),
            self.balance_of(owner)
        )?;
        Ok(TokenMetadata {
            name,
            symbol,
            decimals,
            balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::hex;

    #[test]
    fn selectors_match_the_standard() {
        assert_eq!(hex::encode(id(NAME_SIG)), "06fdde03");
        assert_eq!(hex::encode(id(SYMBOL_SIG)), "95d89b41");
        assert_eq!(hex::encode(id(DECIMALS_SIG)), "313ce567");
        assert_eq!(hex::encode(id(BALANCE_OF_SIG)), "70a08231");
    }

    #[test]
    fn balance_of_calldata_pads_owner() {
        let owner: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
        let data = calldata(BALANCE_OF_SIG, &[Token::Address(owner)]);
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[..4], &[0x70, 0xa0, 0x82, 0x31]);
        assert!(data[4..35].iter().all(|b| *b == 0));
        assert_eq!(data[35], 0xaa);
    }

    #[test]
    fn no_arg_calldata_is_selector_only() {
        assert_eq!(calldata(DECIMALS_SIG, &[]).len(), 4);
    }
}
