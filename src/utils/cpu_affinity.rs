//! Thread pinning for stable branch-predictor measurements.
//!
//! The predictor state and the caches are per core, so a migration in the
//! middle of a timed run mixes two warm-up histories into one sample. The
//! measuring thread is pinned to the core it is already running on and the
//! original affinity mask is restored afterwards.
//!
//! Only Linux gets a real implementation (`sched_setaffinity` through
//! `libc`); elsewhere pinning reports failure and measurements run unpinned.

use tracing::debug;

#[cfg(target_os = "linux")]
mod platform {
    use std::cell::RefCell;

    thread_local! {
        static ORIGINAL_AFFINITY: RefCell<Option<libc::cpu_set_t>> = const { RefCell::new(None) };
    }

    pub fn online_cores() -> Option<usize> {
        let num_cpus = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        (num_cpus > 0).then_some(num_cpus as usize)
    }

    pub fn current_cpu() -> Option<usize> {
        let cpu = unsafe { libc::sched_getcpu() };
        (cpu >= 0).then_some(cpu as usize)
    }

    pub fn save_affinity() -> bool {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            if libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) != 0 {
                return false;
            }
            ORIGINAL_AFFINITY.with(|cell| *cell.borrow_mut() = Some(set));
            true
        }
    }

    pub fn set_affinity(core_id: usize) -> bool {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore_affinity() -> bool {
        ORIGINAL_AFFINITY.with(|cell| match cell.borrow_mut().take() {
            Some(set) => unsafe {
                libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
            },
            None => false,
        })
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub fn online_cores() -> Option<usize> {
        None
    }
    pub fn current_cpu() -> Option<usize> {
        None
    }
    pub fn save_affinity() -> bool {
        true
    }
    pub fn set_affinity(_core_id: usize) -> bool {
        false
    }
    pub fn restore_affinity() -> bool {
        true
    }
}

/// Number of online cores, if the platform reports it.
pub fn online_cores() -> Option<usize> {
    platform::online_cores()
}

/// Pin the current thread to the core it is running on (core 0 when the
/// current core is unknown). Returns the pinned core.
pub fn pin_to_current_core() -> Option<usize> {
    let core_id = platform::current_cpu().or_else(|| online_cores().map(|_| 0))?;
    if !platform::save_affinity() {
        debug!("could not read the current affinity mask");
        return None;
    }
    if platform::set_affinity(core_id) {
        Some(core_id)
    } else {
        debug!(core_id, "could not pin measuring thread");
        None
    }
}

/// Restore the affinity saved by the last successful pin.
pub fn unpin() -> bool {
    platform::restore_affinity()
}

/// RAII guard for CPU pinning - pins on creation, unpins on drop.
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
}

impl CpuPinGuard {
    /// Pin to the current CPU core.
    pub fn new() -> Self {
        Self {
            pinned_core: pin_to_current_core(),
        }
    }

    /// Core the thread is pinned to, if pinning succeeded.
    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if self.pinned_core.is_some() {
            unpin();
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn test_online_cores() {
        let cores = online_cores().expect("Linux reports online cores");
        assert!(cores >= 1);
    }

    #[test]
    fn test_pin_guard() {
        let guard = CpuPinGuard::new();
        if guard.is_pinned() {
            assert!(guard.core_id().is_some());
        }
        drop(guard);
    }

    #[test]
    fn test_unpin_without_pin_is_harmless() {
        // Nothing saved on this thread yet: restoring must not panic.
        let _ = unpin();
    }
}
