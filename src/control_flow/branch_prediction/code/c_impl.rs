//! FFI bindings for the C kernels compiled by `build.rs`.

#[cfg(c_implementation_active)]
mod ffi {
    extern "C" {
        pub fn branching_kernel_c(
            values_a: *const u64,
            values_b: *const u64,
            decisions: *const u8,
            n: usize,
        ) -> u64;
        pub fn branchless_kernel_c(
            values_a: *const u64,
            values_b: *const u64,
            decisions: *const u8,
            n: usize,
        ) -> u64;
    }
}

/// C `if`/`else` kernel
#[cfg(c_implementation_active)]
pub fn branching_kernel_c(values_a: &[u64], values_b: &[u64], decisions: &[u8]) -> u64 {
    let n = decisions.len().min(values_a.len()).min(values_b.len());
    // SAFETY: the C side reads `n` elements from each pointer.
    unsafe { ffi::branching_kernel_c(values_a.as_ptr(), values_b.as_ptr(), decisions.as_ptr(), n) }
}

/// C array-select kernel
#[cfg(c_implementation_active)]
pub fn branchless_kernel_c(values_a: &[u64], values_b: &[u64], decisions: &[u8]) -> u64 {
    let n = decisions.len().min(values_a.len()).min(values_b.len());
    // SAFETY: the C side reads `n` elements from each pointer.
    unsafe { ffi::branchless_kernel_c(values_a.as_ptr(), values_b.as_ptr(), decisions.as_ptr(), n) }
}

/// Check if C implementations are available
#[cfg(c_implementation_active)]
pub const C_IMPL_AVAILABLE: bool = true;

#[cfg(not(c_implementation_active))]
pub const C_IMPL_AVAILABLE: bool = false;

// Stubs for missing C compiler
#[cfg(not(c_implementation_active))]
pub fn branching_kernel_c(_values_a: &[u64], _values_b: &[u64], _decisions: &[u8]) -> u64 {
    panic!("C implementation not compiled (requires GCC, MSVC, or Apple Clang)")
}

#[cfg(not(c_implementation_active))]
pub fn branchless_kernel_c(_values_a: &[u64], _values_b: &[u64], _decisions: &[u8]) -> u64 {
    panic!("C implementation not compiled (requires GCC, MSVC, or Apple Clang)")
}
