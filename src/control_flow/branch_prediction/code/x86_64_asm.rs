//! x86_64 assembly kernels with a fixed instruction shape.
//!
//! The Rust references leave the choice between a jump and a select to
//! LLVM. These two pin it down:
//!
//! # Branching (Jcc)
//! ```asm
//! loop:
//!     cmp byte ptr [d + i], 0
//!     je .mul                      ; data-dependent BRANCH
//!     add calc, qword ptr [a + i*8]
//!     jmp .next
//! .mul:
//!     imul calc, qword ptr [b + i*8]
//! .next:
//!     inc i
//!     cmp i, n
//!     jb loop                      ; loop branch, always predicted
//! ```
//!
//! # Branchless (CMOV)
//! ```asm
//! loop:
//!     mov sum, calc
//!     add sum, qword ptr [a + i*8] ; add path, always computed
//!     imul calc, qword ptr [b + i*8] ; mul path, always computed
//!     cmp byte ptr [d + i], 0
//!     cmovne calc, sum             ; select, no prediction
//!     inc i
//!     cmp i, n
//!     jb loop
//! ```
//!
//! | Aspect               | Jcc                         | CMOV                  |
//! |----------------------|-----------------------------|-----------------------|
//! | Misprediction        | ~15-20 cycles each          | none                  |
//! | Work per element     | one of add/imul             | add + imul            |
//! | Dependency chain     | through the taken path only | through imul and cmov |

use std::arch::asm;

/// Branching kernel with an explicit conditional jump per element.
#[inline(never)]
pub fn branching_kernel_asm(values_a: &[u64], values_b: &[u64], decisions: &[u8]) -> u64 {
    let n = decisions.len().min(values_a.len()).min(values_b.len());
    let mut calc: u64 = 0;
    if n == 0 {
        return calc;
    }

    // SAFETY: every access is at an index below `n`, which does not exceed
    // the length of any of the three slices.
    unsafe {
        asm!(
            "xor {i}, {i}",
            "2:",
            "cmp byte ptr [{d} + {i}], 0",
            "je 3f",                                  // BRANCH on the decision
            "add {calc}, qword ptr [{a} + {i}*8]",
            "jmp 4f",
            "3:",
            "imul {calc}, qword ptr [{b} + {i}*8]",
            "4:",
            "inc {i}",
            "cmp {i}, {n}",
            "jb 2b",
            a = in(reg) values_a.as_ptr(),
            b = in(reg) values_b.as_ptr(),
            d = in(reg) decisions.as_ptr(),
            n = in(reg) n,
            i = out(reg) _,
            calc = inout(reg) calc,
            options(nostack, readonly),
        );
    }

    calc
}

/// Branchless kernel: both paths computed, CMOVNE selects the sum.
#[inline(never)]
pub fn branchless_kernel_cmov(values_a: &[u64], values_b: &[u64], decisions: &[u8]) -> u64 {
    let n = decisions.len().min(values_a.len()).min(values_b.len());
    let mut calc: u64 = 0;
    if n == 0 {
        return calc;
    }

    // SAFETY: see `branching_kernel_asm`.
    unsafe {
        asm!(
            "xor {i}, {i}",
            "2:",
            "mov {sum}, {calc}",
            "add {sum}, qword ptr [{a} + {i}*8]",
            "imul {calc}, qword ptr [{b} + {i}*8]",
            "cmp byte ptr [{d} + {i}], 0",
            "cmovne {calc}, {sum}",
            "inc {i}",
            "cmp {i}, {n}",
            "jb 2b",
            a = in(reg) values_a.as_ptr(),
            b = in(reg) values_b.as_ptr(),
            d = in(reg) decisions.as_ptr(),
            n = in(reg) n,
            i = out(reg) _,
            sum = out(reg) _,
            calc = inout(reg) calc,
            options(nostack, readonly),
        );
    }

    calc
}
