//! Spinlock - exclusão com busy-wait

use spin::mutex::SpinMutex;

use super::RawExclusion;

/// Spinlock - usa busy-wait, NÃO pode dormir
///
/// # Quando usar
///
/// - Tabela compartilhada entre threads ou CPUs
/// - Seções críticas curtas (o scan de N slots)
///
/// # Quando NÃO usar
///
/// - Dentro de handlers de interrupção que podem preemptar o dono do lock
///   na mesma CPU (usar `CriticalSectionExclusion`)
pub struct SpinExclusion {
    lock: SpinMutex<()>,
}

// SAFETY: SpinMutex garante exclusão mútua entre threads
unsafe impl RawExclusion for SpinExclusion {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self {
        lock: SpinMutex::new(()),
    };

    fn acquire(&self) {
        // O guard é esquecido: a liberação vem via release()
        core::mem::forget(self.lock.lock());
    }

    unsafe fn release(&self) {
        // SAFETY: o chamador detém o lock
        unsafe { self.lock.force_unlock() };
    }
}
