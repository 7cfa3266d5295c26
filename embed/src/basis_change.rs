//! Moving elements between an extension and one of its subfields.
//!
//! Let `K = k[z] / (Q)` have degree `d` and `L = k[x] / (P)` have degree `m = r d`, and let
//! `g in L` be a root of `Q`. The direct change sends `b(z)` to `b(g)`. The inverse change
//! recovers `b` from `a = b(g)` through the trace pairing: the values `Tr_L(a g^i)` are the dual
//! coordinates of `r b` in `K`, so after correcting by an element of relative trace one they can
//! be turned back into monomial coordinates.

use ffe_field::{Field, PrimeField64};
use ffe_poly::Polynomial;
use tracing::{debug, instrument};

use crate::dual::{dual_to_monomial_precomp, monomial_to_dual};
use crate::projection::project_powers;
use crate::{DualVector, EmbedError, EmbedResult, ExtensionContext};

/// `a(g) mod P`, the image of an element of the subfield under the embedding sending its
/// generator to `g`.
///
/// `g` must be reduced in `ctx`; `a` may be any polynomial.
pub fn change_basis_direct<F: Field>(
    a: &Polynomial<F>,
    g: &Polynomial<F>,
    ctx: &ExtensionContext<F>,
) -> EmbedResult<Polynomial<F>> {
    ctx.check_reduced(g)?;
    Ok(ctx.compose(a, g))
}

/// Inverse of [`change_basis_direct`]: given `a` in `ctx_from` lying in the image of `ctx_to`,
/// returns `b` in `ctx_to` with `b(g) = a`.
///
/// `g` is the image of the generator of `ctx_to`. For `a` outside the image the result is the
/// preimage of the relative trace of `a` times the correction element.
///
/// When the degree ratio is divisible by the characteristic and no element of relative trace one
/// is found, the result is the zero element.
#[instrument(level = "debug", skip_all, fields(from = ctx_from.degree(), to = ctx_to.degree()))]
pub fn change_basis_inverse<F: PrimeField64>(
    a: &Polynomial<F>,
    g: &Polynomial<F>,
    ctx_from: &ExtensionContext<F>,
    ctx_to: &ExtensionContext<F>,
) -> EmbedResult<Polynomial<F>> {
    check_subfield(ctx_from, ctx_to)?;
    ctx_from.check_reduced(a)?;
    ctx_from.check_reduced(g)?;

    let to_deriv_inv = ctx_to.derivative_inverse()?;
    let Some(correction) = trace_one_precomp(g, ctx_from, ctx_to, &to_deriv_inv)? else {
        debug!("no element of relative trace one, returning zero");
        return Ok(Polynomial::zero());
    };
    change_basis_inverse_precomp(a, g, ctx_from, ctx_to, &to_deriv_inv, Some(&correction))
}

/// [`change_basis_inverse`] with the per-embedding data precomputed: `to_deriv_inv` from
/// [`ExtensionContext::derivative_inverse`] on `ctx_to`, and `trace_one` from [`trace_one`].
///
/// With `trace_one = None` no correction is applied, and the result is the preimage of the
/// relative trace of `a` itself. All inputs must be reduced in their contexts.
pub fn change_basis_inverse_precomp<F: Field>(
    a: &Polynomial<F>,
    g: &Polynomial<F>,
    ctx_from: &ExtensionContext<F>,
    ctx_to: &ExtensionContext<F>,
    to_deriv_inv: &Polynomial<F>,
    trace_one: Option<&Polynomial<F>>,
) -> EmbedResult<Polynomial<F>> {
    check_subfield(ctx_from, ctx_to)?;
    ctx_from.check_reduced(a)?;
    ctx_from.check_reduced(g)?;
    ctx_to.check_reduced(to_deriv_inv)?;

    match trace_one {
        Some(t) => {
            ctx_from.check_reduced(t)?;
            let corrected = ctx_from.mul(a, t);
            relative_trace_preimage(&corrected, g, ctx_from, ctx_to, to_deriv_inv)
        }
        None => relative_trace_preimage(a, g, ctx_from, ctx_to, to_deriv_inv),
    }
}

/// An element `t` of `ctx_from` whose trace down to the subfield generated by `g` is one, so that
/// multiplying by `t` before taking the trace leaves subfield elements unchanged.
///
/// With `r = deg(from) / deg(to)`: `1` when `r = 1`, the scalar `1 / r` when the characteristic
/// does not divide `r`, and otherwise `x^j / c(g)` for the first `j` in `1..deg(from)` whose
/// relative trace `c` is nonzero. `None` if that search finds nothing.
pub fn trace_one<F: PrimeField64>(
    g: &Polynomial<F>,
    ctx_from: &ExtensionContext<F>,
    ctx_to: &ExtensionContext<F>,
) -> EmbedResult<Option<Polynomial<F>>> {
    check_subfield(ctx_from, ctx_to)?;
    ctx_from.check_reduced(g)?;
    let to_deriv_inv = ctx_to.derivative_inverse()?;
    trace_one_precomp(g, ctx_from, ctx_to, &to_deriv_inv)
}

fn trace_one_precomp<F: PrimeField64>(
    g: &Polynomial<F>,
    ctx_from: &ExtensionContext<F>,
    ctx_to: &ExtensionContext<F>,
    to_deriv_inv: &Polynomial<F>,
) -> EmbedResult<Option<Polynomial<F>>> {
    let ratio = (ctx_from.degree() / ctx_to.degree()) as u64;
    if ratio == 1 {
        return Ok(Some(Polynomial::one()));
    }
    if ratio % F::ORDER_U64 != 0 {
        return Ok(Some(Polynomial::constant(F::from_u64(ratio).inverse())));
    }

    for j in 1..ctx_from.degree() {
        let x_j = Polynomial::monomial(F::ONE, j);
        let c = relative_trace_preimage(&x_j, g, ctx_from, ctx_to, to_deriv_inv)?;
        if c.is_zero() {
            continue;
        }
        let c_image = change_basis_direct(&c, g, ctx_from)?;
        debug!(j, "found element of nonzero relative trace");
        return Ok(ctx_from.div(&x_j, &c_image));
    }
    Ok(None)
}

/// The element `b` of `ctx_to` with `b(g) = Tr_{from/to}(a)`.
fn relative_trace_preimage<F: Field>(
    a: &Polynomial<F>,
    g: &Polynomial<F>,
    ctx_from: &ExtensionContext<F>,
    ctx_to: &ExtensionContext<F>,
    to_deriv_inv: &Polynomial<F>,
) -> EmbedResult<Polynomial<F>> {
    let dual = monomial_to_dual(a, ctx_from)?;
    let projected = project_powers(
        dual.coords(),
        ctx_to.degree(),
        g,
        ctx_from.modulus(),
        ctx_from.rev_inv(),
    );
    dual_to_monomial_precomp(&DualVector::new(projected), ctx_to, to_deriv_inv)
}

fn check_subfield<F: Field>(
    ctx_from: &ExtensionContext<F>,
    ctx_to: &ExtensionContext<F>,
) -> EmbedResult<()> {
    let (from, to) = (ctx_from.degree(), ctx_to.degree());
    if to > from || from % to != 0 {
        return Err(EmbedError::NotSubfield { from, to });
    }
    Ok(())
}
