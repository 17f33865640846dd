//! Reference branching kernel.
//!
//! One conditional per element: the predictor has to guess `decisions[i]`
//! before the loaded value is known, so its hit rate sets the cost of the
//! loop.
//!
//! LLVM is free to if-convert this loop into a select. The asm variant in
//! `x86_64_asm` keeps the `Jcc` regardless of what the optimizer decides.

/// `calc += a` when the decision is nonzero, `calc *= b` otherwise.
///
/// Arithmetic wraps. Sequences must have equal lengths; extra elements of a
/// longer sequence are ignored.
#[inline(never)]
pub fn branching_kernel(values_a: &[u64], values_b: &[u64], decisions: &[u8]) -> u64 {
    debug_assert!(values_a.len() == values_b.len() && values_b.len() == decisions.len());

    let mut calc: u64 = 0;
    for ((&a, &b), &d) in values_a.iter().zip(values_b).zip(decisions) {
        if d != 0 {
            calc = calc.wrapping_add(a);
        } else {
            calc = calc.wrapping_mul(b);
        }
    }
    calc
}
