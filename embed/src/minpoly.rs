use ffe_field::Field;
use ffe_poly::Polynomial;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use tracing::{debug, instrument, trace};

use crate::projection::project_powers;
use crate::recurrence::minpoly_seq;
use crate::transposed::transposed_mulmod;
use crate::{DualVector, EmbedError, EmbedResult, ExtensionContext, ProbeConfig};

/// The minimal polynomial of `f` over the prime field, i.e. of multiplication by `f` acting on
/// the extension.
///
/// Each round projects the powers of `f` onto a random functional twisted by the part of the
/// minimal polynomial found so far (`tau = g(f)`), and multiplies `g` by the generator of the
/// resulting sequence. The loop stops once `deg g = m` or `g(f) = 0`.
///
/// The zero element returns the zero polynomial. Otherwise the result is monic and its degree
/// divides `m`.
#[instrument(level = "debug", skip_all, fields(degree = ctx.degree()))]
pub fn minpoly<F, R>(
    f: &Polynomial<F>,
    ctx: &ExtensionContext<F>,
    rng: &mut R,
    config: &ProbeConfig,
) -> EmbedResult<Polynomial<F>>
where
    F: Field,
    R: Rng + ?Sized,
    StandardUniform: Distribution<F>,
{
    ctx.check_reduced(f)?;
    if f.is_zero() {
        return Ok(Polynomial::zero());
    }

    let m = ctx.degree();
    let (modulus, rev_inv) = (ctx.modulus(), ctx.rev_inv());
    let mut g = Polynomial::one();
    let mut tau = Polynomial::one();

    for attempt in 1..=config.max_attempts {
        let functional = DualVector::random(rng, m);
        let twisted = transposed_mulmod(functional.coords(), &tau, modulus, rev_inv);

        let l = m - g.num_coeffs() + 1;
        let seq = project_powers(&twisted, 2 * l, f, modulus, rev_inv);
        let factor = minpoly_seq(&seq, l);
        g *= &factor;
        trace!(attempt, found = g.num_coeffs() - 1, "minpoly round");

        if g.num_coeffs() == m + 1 {
            return Ok(g);
        }
        tau = ctx.mul(&tau, &ctx.compose(&factor, f));
        if tau.is_zero() {
            debug!(
                attempt,
                degree = g.num_coeffs() - 1,
                "element lies in a proper subfield"
            );
            return Ok(g);
        }
    }

    Err(EmbedError::DidNotConverge {
        attempts: config.max_attempts,
    })
}
