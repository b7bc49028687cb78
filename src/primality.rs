//! Trial-division primality testing

/// Divisor bound used by trial division
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrialDivision {
    /// Test every divisor in [2, n)
    Exhaustive,
    /// Test 2 and odd divisors up to floor(sqrt(n))
    #[default]
    SquareRoot,
}

impl TrialDivision {
    /// Returns true iff `n` is prime under this divisor bound.
    ///
    /// Both bounds accept exactly the same set of integers; they differ only in cost.
    pub fn is_prime(self, n: i64) -> bool {
        match self {
            TrialDivision::Exhaustive => is_prime_exhaustive(n),
            TrialDivision::SquareRoot => is_prime(n),
        }
    }
}

impl std::fmt::Display for TrialDivision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrialDivision::Exhaustive => write!(f, "exhaustive"),
            TrialDivision::SquareRoot => write!(f, "square-root"),
        }
    }
}

/// Decide primality by trial division, stopping at the square root.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let mut d: i64 = 3;
    // checked_mul: d * d can exceed i64::MAX when n is close to it
    while d.checked_mul(d).is_some_and(|sq| sq <= n) {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Decide primality by testing every divisor in [2, n).
///
/// Quadratic over a scan; kept as the reference the bounded test is checked against.
pub fn is_prime_exhaustive(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    (2..n).all(|d| n % d != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_small_values() {
        let primes = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31];
        for n in 0..32 {
            assert_eq!(is_prime(n), primes.contains(&n), "is_prime({})", n);
            assert_eq!(
                is_prime_exhaustive(n),
                primes.contains(&n),
                "is_prime_exhaustive({})",
                n
            );
        }
    }

    #[test]
    fn test_non_positive_and_one() {
        for n in [i64::MIN, -7, -2, -1, 0, 1] {
            assert!(!is_prime(n));
            assert!(!is_prime_exhaustive(n));
        }
    }

    #[test]
    fn test_perfect_squares_of_primes() {
        // The bound must include the square root itself
        for p in [3i64, 5, 7, 11, 97, 1009] {
            assert!(!is_prime(p * p), "{} is composite", p * p);
        }
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        // 2^61 - 1 is a Mersenne prime
        assert!(is_prime(2_305_843_009_213_693_951));
        assert!(!is_prime(i64::MAX));
        assert!(!is_prime(i64::MAX - 1));
    }

    #[test]
    fn test_bounds_agree_on_grid() {
        for n in -10..5_000 {
            assert_eq!(
                TrialDivision::SquareRoot.is_prime(n),
                TrialDivision::Exhaustive.is_prime(n),
                "bounds disagree at {}",
                n
            );
        }
    }

    #[test]
    fn test_bounds_agree_on_random_samples() {
        let mut rng = rand::rng();
        for _ in 0..500 {
            let n = rng.random_range(5_000..200_000i64);
            assert_eq!(is_prime(n), is_prime_exhaustive(n), "bounds disagree at {}", n);
        }
    }

    #[test]
    fn test_trial_division_display() {
        assert_eq!(TrialDivision::default().to_string(), "square-root");
        assert_eq!(TrialDivision::Exhaustive.to_string(), "exhaustive");
    }
}
