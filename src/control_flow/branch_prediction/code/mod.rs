//! Kernel implementations.
//!
//! Each kernel has a Rust reference named "original" and, when the target
//! and toolchain allow it, assembly and C variants measured alongside it.

mod branching;
mod branchless;
pub mod c_impl;
#[cfg(target_arch = "x86_64")]
mod x86_64_asm;

pub use branching::branching_kernel;
pub use branchless::branchless_kernel;
pub use c_impl::{branching_kernel_c, branchless_kernel_c, C_IMPL_AVAILABLE};
#[cfg(target_arch = "x86_64")]
pub use x86_64_asm::{branching_kernel_asm, branchless_kernel_cmov};

use crate::utils::VariantInfo;

/// Kernel signature: `(values_a, values_b, decisions) -> calc`
pub type KernelFn = fn(&[u64], &[u64], &[u8]) -> u64;

/// The two accumulation kernels under comparison
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kernel {
    Branching,
    Branchless,
}

impl Kernel {
    pub fn name(self) -> &'static str {
        match self {
            Kernel::Branching => "branching",
            Kernel::Branchless => "branchless",
        }
    }

    /// The Rust reference implementation of this kernel
    pub fn reference(self) -> KernelFn {
        match self {
            Kernel::Branching => branching_kernel,
            Kernel::Branchless => branchless_kernel,
        }
    }

    /// All implementations available for the current target, reference first
    pub fn implementations(self) -> Vec<VariantInfo<KernelFn>> {
        match self {
            Kernel::Branching => branching_variants(),
            Kernel::Branchless => branchless_variants(),
        }
    }
}

fn branching_variants() -> Vec<VariantInfo<KernelFn>> {
    #[allow(unused_mut)]
    let mut variants: Vec<VariantInfo<KernelFn>> = vec![VariantInfo {
        name: "original",
        description: "Rust if/else (compiler may if-convert)",
        function: branching_kernel,
    }];

    #[cfg(target_arch = "x86_64")]
    variants.push(VariantInfo {
        name: "x86_64-asm-branch",
        description: "x86_64 assembly with a conditional jump per element",
        function: branching_kernel_asm,
    });

    if C_IMPL_AVAILABLE {
        variants.push(VariantInfo {
            name: "c-branching",
            description: "C if/else",
            function: branching_kernel_c,
        });
    }

    variants
}

fn branchless_variants() -> Vec<VariantInfo<KernelFn>> {
    #[allow(unused_mut)]
    let mut variants: Vec<VariantInfo<KernelFn>> = vec![VariantInfo {
        name: "original",
        description: "Rust two-element array indexed by the decision",
        function: branchless_kernel,
    }];

    #[cfg(target_arch = "x86_64")]
    variants.push(VariantInfo {
        name: "x86_64-asm-cmov",
        description: "x86_64 assembly computing both paths, CMOV select",
        function: branchless_kernel_cmov,
    });

    if C_IMPL_AVAILABLE {
        variants.push(VariantInfo {
            name: "c-branchless",
            description: "C two-element array indexed by the decision",
            function: branchless_kernel_c,
        });
    }

    variants
}
