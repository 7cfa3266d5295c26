use ffe_field::Field;
use ffe_poly::Polynomial;

use crate::basis_change::change_basis_direct;
use crate::dual::monomial_to_dual;
use crate::{DualVector, EmbedError, EmbedResult, ExtensionContext};

/// The dual vector, in `ctx`, of `y -> [Tr_{ctx/sub}(y)]_0`: the relative trace of `y` down to the
/// subfield generated by `g`, read off as its constant coefficient in the basis
/// `1, g, ..., g^(d-1)`.
///
/// `g` must be reduced in `ctx` and have the modulus `M` of `sub` as its minimal polynomial.
///
/// The functional is `Tr_ctx(w(g) y)` where `w = (M div x) / M' mod M` is the element of `sub`
/// dual to `1` under the trace pairing.
pub fn project_trace<F: Field>(
    g: &Polynomial<F>,
    sub: &ExtensionContext<F>,
    ctx: &ExtensionContext<F>,
) -> EmbedResult<DualVector<F>> {
    let (from, to) = (ctx.degree(), sub.degree());
    if to > from || from % to != 0 {
        return Err(EmbedError::NotSubfield { from, to });
    }

    let modulus = sub.modulus();
    let dual_of_one = sub.mul(&modulus.shift_right(1), &sub.derivative_inverse()?);
    let image = change_basis_direct(&dual_of_one, g, ctx)?;
    monomial_to_dual(&image, ctx)
}
