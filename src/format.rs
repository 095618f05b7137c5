use ethers_core::types::U256;

/// Fixed-point rendering used for token balances: the fractional part is
/// always zero-padded to `decimals` digits.
pub fn format_token_amount(raw: U256, decimals: u8) -> String {
    // 10^78 and above overflow U256, but any U256 is below them anyway.
    let (whole, frac) = match U256::from(10u8).checked_pow(U256::from(decimals)) {
        Some(denom) => (raw / denom, raw % denom),
        None => (U256::zero(), raw),
    };
    format!(
        "{}.{:0>width$}",
        whole,
        frac.to_string(),
        width = decimals as usize
    )
}

/// Native balance in ETH with trailing fractional zeros removed.
pub fn format_ether(wei: U256) -> String {
    let padded = format_token_amount(wei, 18);
    let trimmed = padded.trim_end_matches('0');
    trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_amount_pads_fraction() {
        assert_eq!(format_token_amount(U256::from(1_234_567u64), 4), "123.4567");
        assert_eq!(format_token_amount(U256::from(5u64), 6), "0.000005");
        assert_eq!(format_token_amount(U256::from(1_000_000u64), 6), "1.000000");
    }

    #[test]
    fn zero_decimals_renders_zero_fraction() {
        assert_eq!(format_token_amount(U256::from(42u64), 0), "42.0");
    }

    #[test]
    fn large_decimals_do_not_overflow() {
        assert_eq!(format_token_amount(U256::MAX, 77).len(), 79);
        let tiny = format_token_amount(U256::from(5u64), 200);
        assert_eq!(tiny.len(), 202);
        assert!(tiny.starts_with("0.000") && tiny.ends_with('5'));
        assert_eq!(format_token_amount(U256::zero(), 18), "0.000000000000000000");
    }

    #[test]
    fn ether_trims_zeros() {
        let one = U256::exp10(18);
        assert_eq!(format_ether(one), "1");
        assert_eq!(format_ether(one * 3 / 2), "1.5");
        assert_eq!(format_ether(U256::zero()), "0");
        assert_eq!(format_ether(U256::from(1u64)), "0.000000000000000001");
    }
}
