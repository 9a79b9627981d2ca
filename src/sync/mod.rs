//! # Synchronization Primitives
//!
//! Mecanismos de exclusão usados pela tabela de timers.
//!
//! ## Hierarquia de Uso
//!
//! ```text
//! SpinExclusion            → Threads / SMP (padrão)
//! CriticalSectionExclusion → Bare-metal com IRQs (crate critical-section)
//! NoExclusion              → Loop single-thread sem interrupções (no-op)
//! ```
//!
//! ## Regras
//!
//! - Seções críticas são só o scan dos slots: nunca rodar código do chamador
//!   com o lock adquirido (ver `ExclusiveGuard::unlocked`).
//! - `NoExclusion` é `!Sync`: o compilador impede compartilhar a tabela
//!   entre threads.

// =============================================================================
// PRIMITIVAS
// =============================================================================

/// Exclusão por seção crítica portável
pub mod critical;

/// Célula protegida + guard RAII
pub mod exclusive;

/// No-op para contexto único
pub mod nolock;

/// Spinlock (busy-wait, não dorme)
pub mod spinlock;


// =============================================================================
// RAW EXCLUSION
// =============================================================================

/// Lock "cru": adquire/libera sem carregar dados.
///
/// # Safety
///
/// Entre um `acquire` e o `release` correspondente nenhum outro contexto que
/// alcance a mesma instância pode completar um `acquire`. Implementações
/// `Sync` devem garantir isso entre threads.
pub unsafe trait RawExclusion {
    /// Estado inicial (liberado)
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self;

    /// Adquire o lock, esperando se necessário
    fn acquire(&self);

    /// Libera o lock
    ///
    /// # Safety
    ///
    /// Só pode ser chamado pelo contexto que detém o lock.
    unsafe fn release(&self);
}

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use critical::CriticalSectionExclusion;
pub use exclusive::{Exclusive, ExclusiveGuard};
pub use nolock::NoExclusion;
pub use spinlock::SpinExclusion;
