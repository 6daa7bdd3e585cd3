//! Ether amounts as integer wei.

use crate::error::AmountError;

/// Amount in wei.
pub type Wei = u128;

/// Decimal places between wei and ether.
pub const ETHER_DECIMALS: u32 = 18;
const WEI_PER_ETHER: Wei = 10u128.pow(ETHER_DECIMALS);

/// Format wei as a decimal ether string with no trailing zeros.
///
/// `10^16` formats as `"0.01"`, `10^18` as `"1"`.
pub fn format_ether(wei: Wei) -> String {
    let whole = wei / WEI_PER_ETHER;
    let frac = wei % WEI_PER_ETHER;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0width$}", frac, width = ETHER_DECIMALS as usize);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Parse a decimal ether string into wei.
pub fn parse_ether(text: &str) -> Result<Wei, AmountError> {
    let text = text.trim();
    if text.is_empty() || text == "." {
        return Err(AmountError::Empty);
    }
    if let Some(c) = text.chars().find(|c| !c.is_ascii_digit() && *c != '.') {
        return Err(AmountError::InvalidChar(c));
    }

    let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
    if frac.contains('.') {
        return Err(AmountError::InvalidChar('.'));
    }
    if frac.len() > ETHER_DECIMALS as usize {
        return Err(AmountError::TooPrecise);
    }

    let whole: Wei = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::Overflow)?
    };
    let frac: Wei = if frac.is_empty() {
        0
    } else {
        let scale = 10u128.pow(ETHER_DECIMALS - frac.len() as u32);
        frac.parse::<Wei>().map_err(|_| AmountError::Overflow)? * scale
    };

    whole
        .checked_mul(WEI_PER_ETHER)
        .and_then(|w| w.checked_add(frac))
        .ok_or(AmountError::Overflow)
}

/// Edition price plus platform fee, the value attached to `mintEdition`.
pub fn total_cost(price: Wei, fee: Wei) -> Result<Wei, AmountError> {
    price.checked_add(fee).ok_or(AmountError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_trims_trailing_zeros() {
        assert_eq!(format_ether(0), "0");
        assert_eq!(format_ether(WEI_PER_ETHER), "1");
        assert_eq!(format_ether(10u128.pow(16)), "0.01");
        assert_eq!(format_ether(1), "0.000000000000000001");
        assert_eq!(format_ether(1_500_000_000_000_000_000), "1.5");
    }

    #[test]
    fn parse_handles_common_forms() {
        assert_eq!(parse_ether("0.01"), Ok(10u128.pow(16)));
        assert_eq!(parse_ether("1"), Ok(WEI_PER_ETHER));
        assert_eq!(parse_ether(" 2.5 "), Ok(2_500_000_000_000_000_000));
        assert_eq!(parse_ether(".5"), Ok(500_000_000_000_000_000));
        assert_eq!(parse_ether("3."), Ok(3 * WEI_PER_ETHER));
        assert_eq!(parse_ether("0.000000000000000001"), Ok(1));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(parse_ether(""), Err(AmountError::Empty));
        assert_eq!(parse_ether("."), Err(AmountError::Empty));
        assert_eq!(parse_ether("-1"), Err(AmountError::InvalidChar('-')));
        assert_eq!(parse_ether("1e18"), Err(AmountError::InvalidChar('e')));
        assert_eq!(parse_ether("1.2.3"), Err(AmountError::InvalidChar('.')));
        assert_eq!(parse_ether("0.0000000000000000001"), Err(AmountError::TooPrecise));
        assert_eq!(
            parse_ether("999999999999999999999999999999"),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn format_parse_agree() {
        for wei in [0, 1, 10u128.pow(15), 123_456_789_000_000_000_000, u128::MAX] {
            assert_eq!(parse_ether(&format_ether(wei)), Ok(wei));
        }
    }

    #[test]
    fn total_cost_is_checked() {
        assert_eq!(total_cost(5, 7), Ok(12));
        assert_eq!(total_cost(u128::MAX, 1), Err(AmountError::Overflow));
    }
}
