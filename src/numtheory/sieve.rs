// src/numtheory/sieve.rs
//
// Sieve of Eratosthenes, bounded by a Rosser-Schoenfeld-style estimate of
// the n-th prime so that `primes_below(prime_bound_for_count(n))` always
// contains at least `n` primes.

/// Upper bound guaranteed to contain at least `n` primes, for `n >= 6`
/// (Rosser's theorem: `p_n < n (ln n + ln ln n)` for `n >= 6`). Small `n`
/// are handled with a generous fixed bound instead of the asymptotic
/// formula, which is not meaningful for tiny inputs.
pub fn prime_bound_for_count(n: usize) -> u64 {
    if n == 0 {
        return 2;
    }
    if n < 6 {
        return 15;
    }
    let nf = n as f64;
    let ln_n = nf.ln();
    let ln_ln_n = ln_n.ln();
    let bound = nf * (ln_n + ln_ln_n);
    (bound.ceil() as u64) + 10
}

/// All primes `p < limit`, in increasing order.
pub fn sieve_of_eratosthenes(limit: u64) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }
    let limit = limit as usize;
    let mut is_composite = vec![false; limit];
    let mut primes = Vec::new();

    for candidate in 2..limit {
        if is_composite[candidate] {
            continue;
        }
        primes.push(candidate as u64);
        let mut multiple = candidate * candidate;
        while multiple < limit {
            is_composite[multiple] = true;
            multiple += candidate;
        }
    }
    primes
}

/// The first `n` primes.
pub fn primes_below(n: usize) -> Vec<u64> {
    let bound = prime_bound_for_count(n);
    let mut primes = sieve_of_eratosthenes(bound);
    primes.truncate(n);
    primes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sieve_matches_known_small_primes() {
        assert_eq!(sieve_of_eratosthenes(30), vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn sieve_excludes_limit_itself() {
        let primes = sieve_of_eratosthenes(11);
        assert!(!primes.contains(&11));
    }

    #[test]
    fn prime_bound_holds_for_range_of_counts() {
        for n in [1, 5, 6, 10, 50, 500, 5000] {
            let bound = prime_bound_for_count(n);
            let primes = sieve_of_eratosthenes(bound);
            assert!(
                primes.len() >= n,
                "n={} bound={} only produced {} primes",
                n,
                bound,
                primes.len()
            );
        }
    }

    #[test]
    fn primes_below_returns_exact_count() {
        let primes = primes_below(25);
        assert_eq!(primes.len(), 25);
        assert_eq!(primes[0], 2);
        assert_eq!(*primes.last().unwrap(), 97);
    }
}
