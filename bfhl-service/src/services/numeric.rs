//! Pure number helpers behind the `fibonacci`, `prime`, `lcm` and `hcf`
//! operations.

use thiserror::Error;

/// Largest `n` for which every Fibonacci term fits in a `u64`
/// (F(93) = 12200160415121876738).
pub const MAX_FIBONACCI_TERMS: u64 = 94;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    #[error("input list is empty")]
    EmptyInput,

    #[error("result does not fit in 64 bits")]
    Overflow,
}

/// The first `n` Fibonacci numbers, starting at 0, 1.
pub fn fibonacci(n: u64) -> Result<Vec<u64>, NumericError> {
    if n > MAX_FIBONACCI_TERMS {
        return Err(NumericError::Overflow);
    }

    let n = n as usize;
    let mut sequence: Vec<u64> = Vec::with_capacity(n);
    for i in 0..n {
        let term = if i < 2 {
            i as u64
        } else {
            sequence[i - 1]
                .checked_add(sequence[i - 2])
                .ok_or(NumericError::Overflow)?
        };
        sequence.push(term);
    }
    Ok(sequence)
}

/// Trial division by 2, then odd divisors up to √v. Values below 2 are never
/// prime.
///
/// Worst case is about 1.5×10⁹ divisions near `i64::MAX`; callers on the
/// async runtime go through `spawn_blocking`.
pub fn is_prime(v: i64) -> bool {
    if v < 2 {
        return false;
    }
    let v = v as u64;
    if v % 2 == 0 {
        return v == 2;
    }
    let mut i = 3u64;
    while i <= v / i {
        if v % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `lcm(0, x)` is 0.
pub fn lcm(a: u64, b: u64) -> Result<u64, NumericError> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    (a / gcd(a, b))
        .checked_mul(b)
        .ok_or(NumericError::Overflow)
}

/// Keep the primes of `values`, preserving order and duplicates.
pub fn filter_primes(values: &[i64]) -> Vec<i64> {
    values.iter().copied().filter(|v| is_prime(*v)).collect()
}

/// Left-fold LCM over absolute values.
pub fn lcm_of(values: &[i64]) -> Result<u64, NumericError> {
    let (first, rest) = values.split_first().ok_or(NumericError::EmptyInput)?;
    rest.iter()
        .try_fold(first.unsigned_abs(), |acc, v| lcm(acc, v.unsigned_abs()))
}

/// Left-fold GCD over absolute values.
pub fn hcf_of(values: &[i64]) -> Result<u64, NumericError> {
    let (first, rest) = values.split_first().ok_or(NumericError::EmptyInput)?;
    Ok(rest
        .iter()
        .fold(first.unsigned_abs(), |acc, v| gcd(acc, v.unsigned_abs())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fibonacci_small_cases() {
        assert_eq!(fibonacci(0).unwrap(), Vec::<u64>::new());
        assert_eq!(fibonacci(1).unwrap(), vec![0]);
        assert_eq!(fibonacci(2).unwrap(), vec![0, 1]);
        assert_eq!(fibonacci(5).unwrap(), vec![0, 1, 1, 2, 3]);
        assert_eq!(fibonacci(10).unwrap(), vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
    }

    #[test]
    fn fibonacci_recurrence_holds_for_every_length() {
        for n in 0..=MAX_FIBONACCI_TERMS {
            let seq = fibonacci(n).unwrap();
            assert_eq!(seq.len() as u64, n);
            if n >= 1 {
                assert_eq!(seq[0], 0);
            }
            if n >= 2 {
                assert_eq!(seq[1], 1);
            }
            for w in seq.windows(3) {
                assert_eq!(w[2], w[0] + w[1]);
            }
        }
    }

    #[test]
    fn fibonacci_largest_term_and_limit() {
        let seq = fibonacci(MAX_FIBONACCI_TERMS).unwrap();
        assert_eq!(*seq.last().unwrap(), 12_200_160_415_121_876_738);
        assert_eq!(
            fibonacci(MAX_FIBONACCI_TERMS + 1),
            Err(NumericError::Overflow)
        );
    }

    fn naive_is_prime(v: i64) -> bool {
        v >= 2 && (2..v).all(|d| v % d != 0)
    }

    #[test]
    fn is_prime_matches_naive_definition() {
        for v in -50..2_000 {
            assert_eq!(is_prime(v), naive_is_prime(v), "value {}", v);
        }
    }

    #[test]
    fn is_prime_handles_large_values() {
        assert!(is_prime(1_000_000_007));
        assert!(!is_prime(1_000_000_007 * 3));
        assert!(!is_prime(i64::MIN));
        assert!(is_prime(2));
        assert!(!is_prime(4));
        assert!(!is_prime(i64::MAX - 1));
        assert!(!is_prime(1_000_003 * 1_000_003));
        assert!(is_prime(2_147_483_647));
    }

    #[test]
    fn filter_primes_keeps_order_and_duplicates() {
        assert_eq!(
            filter_primes(&[10, 7, 2, 7, -7, 0, 1, 9, 13]),
            vec![7, 2, 7, 13]
        );
        assert!(filter_primes(&[]).is_empty());
    }

    #[test]
    fn gcd_and_lcm_pairs() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(lcm(4, 6).unwrap(), 12);
        assert_eq!(lcm(0, 6).unwrap(), 0);
    }

    #[test]
    fn list_reductions() {
        assert_eq!(lcm_of(&[4, 6]).unwrap(), 12);
        assert_eq!(lcm_of(&[2, 3, 4, 5]).unwrap(), 60);
        assert_eq!(lcm_of(&[7]).unwrap(), 7);
        assert_eq!(hcf_of(&[12, 18]).unwrap(), 6);
        assert_eq!(hcf_of(&[24, 36, 60]).unwrap(), 12);
        assert_eq!(hcf_of(&[-12, 18]).unwrap(), 6);
        assert_eq!(hcf_of(&[0, 0]).unwrap(), 0);
    }

    #[test]
    fn empty_lists_fail() {
        assert_eq!(lcm_of(&[]), Err(NumericError::EmptyInput));
        assert_eq!(hcf_of(&[]), Err(NumericError::EmptyInput));
    }

    #[test]
    fn lcm_overflow_is_reported() {
        assert_eq!(
            lcm_of(&[i64::MAX, i64::MAX - 1, 3]),
            Err(NumericError::Overflow)
        );
    }
}
