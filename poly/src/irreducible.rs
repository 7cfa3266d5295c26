use ffe_field::PrimeField64;
use ffe_util::prime_divisors_u64;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use tracing::{debug, instrument};

use crate::Polynomial;

impl<F: PrimeField64> Polynomial<F> {
    /// Rabin's irreducibility test over the prime field `F`.
    ///
    /// A polynomial `f` of degree `n` is irreducible iff `x^(p^n) = x mod f` and
    /// `gcd(x^(p^(n/q)) - x, f) = 1` for every prime `q | n`. Constants (including zero) are not
    /// irreducible; every linear polynomial is.
    pub fn is_irreducible(&self) -> bool {
        let n = match self.degree() {
            None | Some(0) => return false,
            Some(1) => return true,
            Some(d) => d,
        };
        let f = self.make_monic();
        let x = Self::x();
        let prime_divisors = prime_divisors_u64(n as u64);

        // h = x^(p^i) mod f
        let mut h = x.clone();
        for i in 1..=n {
            h = h.pow_mod(F::ORDER_U64, &f);
            let probes_here = prime_divisors
                .iter()
                .any(|&q| i as u64 * q == n as u64);
            if probes_here && !(&h - &x).gcd(&f).is_one() {
                return false;
            }
        }
        h == x
    }

    /// Samples random monic polynomials of the given degree until one is irreducible.
    ///
    /// About one in `degree` monic polynomials is irreducible, so the expected number of draws is
    /// small. The loop is unbounded; use [`Self::try_random_irreducible`] to cap it.
    ///
    /// # Panics
    /// Panics if `degree == 0`.
    pub fn random_irreducible<R: Rng + ?Sized>(rng: &mut R, degree: usize) -> Self
    where
        StandardUniform: Distribution<F>,
    {
        loop {
            if let Some(f) = Self::try_random_irreducible(rng, degree, usize::MAX) {
                return f;
            }
        }
    }

    /// Like [`Self::random_irreducible`], but gives up with `None` after `max_draws` candidates.
    ///
    /// # Panics
    /// Panics if `degree == 0`.
    #[instrument(level = "debug", skip(rng))]
    pub fn try_random_irreducible<R: Rng + ?Sized>(
        rng: &mut R,
        degree: usize,
        max_draws: usize,
    ) -> Option<Self>
    where
        StandardUniform: Distribution<F>,
    {
        assert!(degree > 0, "irreducible polynomials have positive degree");
        for draws in 1..=max_draws {
            let candidate = Self::random_monic(rng, degree);
            if candidate.is_irreducible() {
                debug!(draws, "found irreducible modulus");
                return Some(candidate);
            }
        }
        None
    }
}
