//! Reference branchless kernel.
//!
//! Both candidates are computed on every element and the decision only
//! selects which one survives, so there is nothing to predict. The price is
//! the multiply on every element, taken or not.

/// Same relation as [`super::branching::branching_kernel`], with the
/// decision used as an index into `[calc * b, calc + a]`.
#[inline(never)]
pub fn branchless_kernel(values_a: &[u64], values_b: &[u64], decisions: &[u8]) -> u64 {
    debug_assert!(values_a.len() == values_b.len() && values_b.len() == decisions.len());

    let mut calc: u64 = 0;
    for ((&a, &b), &d) in values_a.iter().zip(values_b).zip(decisions) {
        let candidates = [calc.wrapping_mul(b), calc.wrapping_add(a)];
        calc = candidates[usize::from(d != 0)];
    }
    calc
}
