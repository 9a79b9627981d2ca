//! Exclusão via `critical-section`
//!
//! Em bare-metal a implementação do alvo mascara interrupções; em host a
//! feature `std` do crate usa um mutex global reentrante.

use core::cell::UnsafeCell;

use critical_section::RestoreState;

use super::RawExclusion;

/// Exclusão por seção crítica
///
/// Guarda o `RestoreState` do acquire para devolvê-lo no release.
pub struct CriticalSectionExclusion {
    state: UnsafeCell<RestoreState>,
}

// SAFETY: `state` só é tocado dentro da seção crítica
unsafe impl Sync for CriticalSectionExclusion {}

// SAFETY: seções críticas são mutuamente exclusivas entre contextos
unsafe impl RawExclusion for CriticalSectionExclusion {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self {
        state: UnsafeCell::new(RestoreState::invalid()),
    };

    #[inline]
    fn acquire(&self) {
        // SAFETY: pareado com o release() feito pelo mesmo contexto
        let restore = unsafe { critical_section::acquire() };
        // SAFETY: estamos dentro da seção crítica
        unsafe { *self.state.get() = restore };
    }

    #[inline]
    unsafe fn release(&self) {
        // SAFETY: o chamador detém a seção crítica aberta em acquire()
        unsafe {
            let restore = *self.state.get();
            critical_section::release(restore);
        }
    }
}
