//! Fixed-Point Amount Conversion
//!
//! Converts between decimal text typed by the user and the integer
//! fixed-point amounts contracts take as arguments.
//!
//! Parsing is exact. Digits beyond the scale are rounded half-up on the
//! first dropped digit. Formatting follows `formatUnits`: trailing
//! fractional zeros are trimmed, but at least one fractional digit is kept
//! (`1_000_000_000_000_000_000` wei renders as `"1.0"`).

use crate::constants::token;
use crate::errors::{AmountErrorReason, FundMeError, FundMeResult};
use crate::types::{DecimalAmount, FixedPointAmount};
use crate::Vec;

/// Scale of a fixed-point token amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPointFormat {
    decimals: u8,
    scale: u128,
}

impl FixedPointFormat {
    /// 18 decimals, the native scale of ETH and most ERC-20 tokens
    pub const ETHER: FixedPointFormat = FixedPointFormat {
        decimals: token::DECIMALS,
        scale: token::ONE,
    };

    /// Format with `decimals` fractional digits.
    ///
    /// Fails above [`token::MAX_DECIMALS`], where `10^decimals` no longer
    /// fits in `u128`.
    pub fn new(decimals: u8) -> FundMeResult<Self> {
        let scale = pow10(decimals).ok_or(FundMeError::UnsupportedDecimals {
            decimals,
            maximum: token::MAX_DECIMALS,
        })?;
        Ok(Self { decimals, scale })
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Base units per whole token
    pub fn scale(&self) -> u128 {
        self.scale
    }

    /// Strictly parse decimal text into base units.
    ///
    /// Accepts surrounding whitespace, an optional sign, `1`, `1.5`, `.5`,
    /// `5.` and an exponent (`2.5e3`). Negative non-zero values are
    /// rejected, as are values beyond `u128`.
    pub fn parse(&self, input: &str) -> FundMeResult<FixedPointAmount> {
        let number = DecimalNumber::parse(input).map_err(|reason| FundMeError::InvalidAmount {
            input: input.into(),
            reason,
        })?;

        if number.negative && !number.is_zero() {
            return Err(FundMeError::InvalidAmount {
                input: input.into(),
                reason: AmountErrorReason::Negative,
            });
        }

        number
            .scale_to(self.decimals)
            .map(FixedPointAmount::new)
            .ok_or_else(|| FundMeError::Overflow {
                input: input.into(),
                decimals: self.decimals,
            })
    }

    /// Parse, degrading any invalid input to zero.
    pub fn parse_or_zero(&self, input: &str) -> FixedPointAmount {
        match self.parse(input) {
            Ok(amount) => amount,
            Err(err) => {
                tracing::debug!(code = err.code(), %err, "amount degraded to zero");
                FixedPointAmount::zero()
            }
        }
    }

    /// Render base units as decimal text.
    pub fn format(&self, amount: FixedPointAmount) -> DecimalAmount {
        let whole = amount.value() / self.scale;
        let fraction = amount.value() % self.scale;

        let mut text = alloc::format!("{}.", whole);
        if fraction == 0 {
            text.push('0');
        } else {
            let digits = alloc::format!("{:0width$}", fraction, width = self.decimals as usize);
            text.push_str(digits.trim_end_matches('0'));
        }
        DecimalAmount::from(text)
    }
}

impl Default for FixedPointFormat {
    fn default() -> Self {
        Self::ETHER
    }
}

/// Decimal text converted to 18-decimal base units; invalid input is zero.
pub fn to_fixed_point(input: &str) -> FixedPointAmount {
    FixedPointFormat::ETHER.parse_or_zero(input)
}

/// 18-decimal base units rendered for display.
pub fn to_decimal(amount: FixedPointAmount) -> DecimalAmount {
    FixedPointFormat::ETHER.format(amount)
}

/// Strict parse at an arbitrary scale
pub fn parse_units(input: &str, decimals: u8) -> FundMeResult<FixedPointAmount> {
    FixedPointFormat::new(decimals)?.parse(input)
}

/// Format at an arbitrary scale
pub fn format_units(amount: FixedPointAmount, decimals: u8) -> FundMeResult<DecimalAmount> {
    Ok(FixedPointFormat::new(decimals)?.format(amount))
}

/// `10^exponent`, or `None` past `u128`
pub fn pow10(exponent: u8) -> Option<u128> {
    10u128.checked_pow(exponent as u32)
}

// ============ Parsing ============

/// Syntactic pieces of a decimal literal
struct DecimalNumber<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: i32,
}

impl<'a> DecimalNumber<'a> {
    fn parse(input: &'a str) -> Result<Self, AmountErrorReason> {
        let text = input.trim();
        if text.is_empty() {
            return Err(AmountErrorReason::Empty);
        }

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => {
                let exponent = unsigned[pos + 1..]
                    .parse::<i32>()
                    .map_err(|_| AmountErrorReason::NotANumber)?;
                (&unsigned[..pos], exponent)
            }
            None => (unsigned, 0),
        };

        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        if integer.is_empty() && fraction.is_empty() {
            return Err(AmountErrorReason::NotANumber);
        }
        if !is_digits(integer) || !is_digits(fraction) {
            return Err(AmountErrorReason::NotANumber);
        }

        Ok(Self {
            negative,
            integer,
            fraction,
            exponent,
        })
    }

    fn is_zero(&self) -> bool {
        self.integer.bytes().chain(self.fraction.bytes()).all(|b| b == b'0')
    }

    /// Value times `10^decimals`, rounded half-up; `None` on overflow.
    fn scale_to(&self, decimals: u8) -> Option<u128> {
        let digits: Vec<u8> = self
            .integer
            .bytes()
            .chain(self.fraction.bytes())
            .map(|b| b - b'0')
            .skip_while(|d| *d == 0)
            .collect();

        if digits.is_empty() {
            return Some(0);
        }

        let shift = decimals as i64 + self.exponent as i64 - self.fraction.len() as i64;

        if shift >= 0 {
            // A non-zero mantissa times 10^39 never fits
            if shift > token::MAX_DECIMALS as i64 {
                return None;
            }
            let mut value = accumulate(&digits)?;
            for _ in 0..shift {
                value = value.checked_mul(10)?;
            }
            return Some(value);
        }

        let dropped = shift.unsigned_abs();
        if dropped > digits.len() as u64 {
            return Some(0);
        }
        let keep = digits.len() - dropped as usize;
        let value = accumulate(&digits[..keep])?;
        if digits[keep] >= 5 {
            value.checked_add(1)
        } else {
            Some(value)
        }
    }
}

fn is_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

fn accumulate(digits: &[u8]) -> Option<u128> {
    digits
        .iter()
        .try_fold(0u128, |acc, d| acc.checked_mul(10)?.checked_add(*d as u128))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ETH: u128 = 1_000_000_000_000_000_000;

    fn wei(value: u128) -> FixedPointAmount {
        FixedPointAmount::new(value)
    }

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(to_fixed_point("2.5"), wei(2_500_000_000_000_000_000));
        assert_eq!(to_fixed_point("1"), wei(ONE_ETH));
        assert_eq!(to_fixed_point(".5"), wei(ONE_ETH / 2));
        assert_eq!(to_fixed_point("5."), wei(5 * ONE_ETH));
        assert_eq!(to_fixed_point("  0.25 "), wei(ONE_ETH / 4));
        assert_eq!(to_fixed_point("+3"), wei(3 * ONE_ETH));
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(to_fixed_point("1e3"), wei(1_000 * ONE_ETH));
        assert_eq!(to_fixed_point("2.5E-1"), wei(ONE_ETH / 4));
        assert_eq!(to_fixed_point("1e-18"), wei(1));
    }

    #[test]
    fn test_smallest_unit() {
        assert_eq!(to_fixed_point("0.000000000000000001"), wei(1));
    }

    #[test]
    fn test_round_half_up_past_scale() {
        assert_eq!(to_fixed_point("0.0000000000000000005"), wei(1));
        assert_eq!(to_fixed_point("0.0000000000000000004"), wei(0));
        assert_eq!(to_fixed_point("1.0000000000000000015"), wei(ONE_ETH + 2));
        assert_eq!(to_fixed_point("1.00000000000000000149"), wei(ONE_ETH + 1));
    }

    #[test]
    fn test_degrade_to_zero() {
        assert_eq!(to_fixed_point("0"), FixedPointAmount::zero());
        assert_eq!(to_fixed_point(""), FixedPointAmount::zero());
        assert_eq!(to_fixed_point("   "), FixedPointAmount::zero());
        assert_eq!(to_fixed_point("abc"), FixedPointAmount::zero());
        assert_eq!(to_fixed_point("-1"), FixedPointAmount::zero());
        assert_eq!(to_fixed_point("1.2.3"), FixedPointAmount::zero());
        assert_eq!(to_fixed_point("."), FixedPointAmount::zero());
        assert_eq!(to_fixed_point("1e"), FixedPointAmount::zero());
        assert_eq!(to_fixed_point("0x10"), FixedPointAmount::zero());
        assert_eq!(to_fixed_point("1e40"), FixedPointAmount::zero());
    }

    #[test]
    fn test_strict_parse_reasons() {
        let format = FixedPointFormat::ETHER;

        assert_eq!(
            format.parse(""),
            Err(FundMeError::InvalidAmount {
                input: "".into(),
                reason: AmountErrorReason::Empty,
            })
        );
        assert_eq!(
            format.parse("abc"),
            Err(FundMeError::InvalidAmount {
                input: "abc".into(),
                reason: AmountErrorReason::NotANumber,
            })
        );
        assert_eq!(
            format.parse("-2"),
            Err(FundMeError::InvalidAmount {
                input: "-2".into(),
                reason: AmountErrorReason::Negative,
            })
        );
        assert_eq!(
            format.parse("1e40"),
            Err(FundMeError::Overflow {
                input: "1e40".into(),
                decimals: 18,
            })
        );
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(FixedPointFormat::ETHER.parse("-0"), Ok(FixedPointAmount::zero()));
        assert_eq!(FixedPointFormat::ETHER.parse("-0.000"), Ok(FixedPointAmount::zero()));
    }

    #[test]
    fn test_largest_amount_fits() {
        // u128::MAX = 340282366920938463463.374607431768211455 ETH
        let max = "340282366920938463463.374607431768211455";
        assert_eq!(FixedPointFormat::ETHER.parse(max), Ok(FixedPointAmount::MAX));
        assert!(FixedPointFormat::ETHER
            .parse("340282366920938463463.374607431768211456")
            .is_err());
        assert_eq!(to_decimal(FixedPointAmount::MAX), max);
    }

    #[test]
    fn test_format_trims_trailing_zeros() {
        assert_eq!(to_decimal(wei(ONE_ETH)), "1.0");
        assert_eq!(to_decimal(wei(0)), "0.0");
        assert_eq!(to_decimal(wei(2_500_000_000_000_000_000)), "2.5");
        assert_eq!(to_decimal(wei(1)), "0.000000000000000001");
        assert_eq!(to_decimal(wei(10 * ONE_ETH + ONE_ETH / 100)), "10.01");
    }

    #[test]
    fn test_round_trip_canonical_strings() {
        for text in [
            "0.0",
            "1.0",
            "2.5",
            "0.1",
            "123456.789",
            "0.000000000000000001",
            "99.999999999999999999",
        ] {
            assert_eq!(to_decimal(to_fixed_point(text)), text, "round trip of {text}");
        }
    }

    #[test]
    fn test_non_canonical_input_maps_to_canonical() {
        assert_eq!(to_decimal(to_fixed_point("1")), "1.0");
        assert_eq!(to_decimal(to_fixed_point("01.50")), "1.5");
        assert_eq!(to_decimal(to_fixed_point("1e2")), "100.0");
    }

    #[test]
    fn test_other_scales() {
        assert_eq!(parse_units("1.5", 6), Ok(wei(1_500_000)));
        assert_eq!(format_units(wei(1_500_000), 6).unwrap(), "1.5");
        assert_eq!(parse_units("7", 0), Ok(wei(7)));
        assert_eq!(format_units(wei(7), 0).unwrap(), "7.0");
        assert_eq!(parse_units("0.5", 0), Ok(wei(1)));
    }

    #[test]
    fn test_unsupported_decimals() {
        assert!(FixedPointFormat::new(38).is_ok());
        assert_eq!(
            FixedPointFormat::new(39),
            Err(FundMeError::UnsupportedDecimals {
                decimals: 39,
                maximum: 38,
            })
        );
    }
}
