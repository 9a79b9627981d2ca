//! No-op para loops bare-metal de contexto único

use core::cell::Cell;

use super::RawExclusion;

/// Exclusão vazia
///
/// Para tabelas usadas por um único contexto de execução (sem threads, sem
/// IRQ tocando a tabela). `Cell` torna o tipo `!Sync`, então uma tabela com
/// `NoExclusion` não pode ser compartilhada entre threads nem ser `static`.
pub struct NoExclusion {
    held: Cell<bool>,
}

// SAFETY: `!Sync`, só um contexto alcança a instância; aquisição aninhada
// é detectada e aborta
unsafe impl RawExclusion for NoExclusion {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self {
        held: Cell::new(false),
    };

    fn acquire(&self) {
        assert!(!self.held.replace(true), "NoExclusion: aquisição aninhada");
    }

    unsafe fn release(&self) {
        self.held.set(false);
    }
}
