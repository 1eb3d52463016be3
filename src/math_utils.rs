//! Numeric helpers shared across the hint catalog: signed/unsigned
//! reinterpretation of field elements, integer square roots, and the
//! `safe_div`/`div_mod` primitives used by the modular-arithmetic hints.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::types::errors::math_errors::MathError;
use crate::types::felt::Felt252;

/// Reinterprets `value` as a signed integer: values in `[PRIME/2, PRIME)`
/// map to their negative representative.
pub fn as_signed_bigint(value: &Felt252, prime: &BigInt) -> BigInt {
    let unsigned = felt_to_bigint(value);
    let half = prime / 2;
    if unsigned > half {
        unsigned - prime
    } else {
        unsigned
    }
}

pub fn felt_to_bigint(value: &Felt252) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &value.to_bytes_be())
}

pub fn bigint_to_felt(value: &BigInt) -> Felt252 {
    let (sign, bytes) = value.to_bytes_be();
    let felt = Felt252::from_bytes_be_slice(&bytes);
    if sign == Sign::Minus {
        -felt
    } else {
        felt
    }
}

/// Smallest `w` such that `value < 2^w`.
pub fn bit_length(value: &Felt252) -> u32 {
    felt_to_bigint(value).bits() as u32
}

/// Floor-division quotient and remainder of two field elements, each
/// interpreted as their canonical unsigned representative.
pub fn unsigned_div_rem(value: &Felt252, div: &Felt252) -> Result<(Felt252, Felt252), MathError> {
    if div.is_zero() {
        return Err(MathError::DividedByZero);
    }
    let value = felt_to_bigint(value);
    let div = felt_to_bigint(div);
    let (q, r) = value.div_mod_floor(&div);
    Ok((bigint_to_felt(&q), bigint_to_felt(&r)))
}

/// `value` interpreted as signed (bounded by `bound`) divided by the
/// positive `div`, with `0 < div <= PRIME / bound`.
pub fn signed_div_rem(
    value: &Felt252,
    div: &Felt252,
    bound: &Felt252,
    prime: &BigInt,
) -> Result<(Felt252, Felt252), MathError> {
    if div.is_zero() || div.is_negative_repr(prime) {
        return Err(MathError::DivOutOfRange(Box::new(*div), Box::new(*bound)));
    }
    let div_big = felt_to_bigint(div);
    let max_div = prime / felt_to_bigint(bound).max(BigInt::one());
    if div_big > max_div {
        return Err(MathError::DivOutOfRange(Box::new(*div), Box::new(*bound)));
    }
    let signed_value = as_signed_bigint(value, prime);
    let (q, r) = signed_value.div_mod_floor(&div_big);
    Ok((bigint_to_felt(&q), bigint_to_felt(&r)))
}

/// `n / d` if `d != 0` and `d | n`, else `MathError::SafeDivFailBigInt`.
pub fn safe_div(n: &BigInt, d: &BigInt) -> Result<BigInt, MathError> {
    if d.is_zero() {
        return Err(MathError::DividedByZero);
    }
    let (q, r) = n.div_mod_floor(d);
    if r.is_zero() {
        Ok(q)
    } else {
        Err(MathError::SafeDivFailBigInt(
            Box::new(n.clone()),
            Box::new(d.clone()),
        ))
    }
}

/// `div_mod(a, b, p) = a * b^-1 mod p`, via the extended Euclidean algorithm.
pub fn div_mod(a: &BigInt, b: &BigInt, p: &BigInt) -> Result<BigInt, MathError> {
    let b_inv = mod_inverse(b, p).ok_or_else(|| MathError::SafeDivFailBigInt(Box::new(b.clone()), Box::new(p.clone())))?;
    Ok((a * b_inv).mod_floor(p))
}

fn mod_inverse(value: &BigInt, modulus: &BigInt) -> Option<BigInt> {
    let (mut old_r, mut r) = (value.mod_floor(modulus), modulus.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    while !r.is_zero() {
        let quotient = &old_r / &r;
        let tmp_r = &old_r - &quotient * &r;
        old_r = core::mem::replace(&mut r, tmp_r);
        let tmp_s = &old_s - &quotient * &s;
        old_s = core::mem::replace(&mut s, tmp_s);
    }
    if old_r != BigInt::one() {
        return None;
    }
    Some(old_s.mod_floor(modulus))
}

/// Integer square root via Newton's method (used by `uint384_sqrt`).
pub fn isqrt(value: &BigInt) -> Result<BigInt, MathError> {
    if value.is_negative() {
        return Err(MathError::ExpectedPositive(alloc::string::String::from(
            "isqrt input must be non-negative",
        )));
    }
    Ok(value.sqrt())
}

trait NegativeRepr {
    fn is_negative_repr(&self, prime: &BigInt) -> bool;
}

impl NegativeRepr for Felt252 {
    fn is_negative_repr(&self, prime: &BigInt) -> bool {
        as_signed_bigint(self, prime).is_negative()
    }
}

use alloc::boxed::Box;

#[cfg(test)]
mod tests {
    use super::*;

    fn prime() -> BigInt {
        BigInt::parse_bytes(
            b"3618502788666131213697322783095070105623107215331596699973092056135872020481",
            10,
        )
        .unwrap()
    }

    #[test]
    fn unsigned_div_rem_basic() {
        let (q, r) = unsigned_div_rem(&Felt252::from(10), &Felt252::from(3)).unwrap();
        assert_eq!(q, Felt252::from(3));
        assert_eq!(r, Felt252::from(1));
    }

    #[test]
    fn unsigned_div_rem_by_zero_errors() {
        assert_eq!(
            unsigned_div_rem(&Felt252::from(10), &Felt252::from(0)),
            Err(MathError::DividedByZero)
        );
    }

    #[test]
    fn safe_div_exact() {
        assert_eq!(
            safe_div(&BigInt::from(10), &BigInt::from(5)).unwrap(),
            BigInt::from(2)
        );
    }

    #[test]
    fn safe_div_fail_on_remainder() {
        assert!(safe_div(&BigInt::from(10), &BigInt::from(3)).is_err());
    }

    #[test]
    fn signed_bigint_roundtrip_small_value() {
        let p = prime();
        let value = Felt252::from(5);
        assert_eq!(as_signed_bigint(&value, &p), BigInt::from(5));
    }

    #[test]
    fn div_mod_inverts() {
        let p = prime();
        let a = BigInt::from(10);
        let b = BigInt::from(3);
        let result = div_mod(&a, &b, &p).unwrap();
        assert_eq!((result * &b).mod_floor(&p), a.mod_floor(&p));
    }
}
