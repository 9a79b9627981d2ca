//! Célula protegida por um `RawExclusion`

use core::cell::UnsafeCell;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};

use super::RawExclusion;

/// Dados `T` protegidos pelo lock `L`
pub struct Exclusive<L: RawExclusion, T> {
    raw: L,
    data: UnsafeCell<T>,
}

// SAFETY: acesso a `data` só acontece com `raw` adquirido
unsafe impl<L: RawExclusion + Sync, T: Send> Sync for Exclusive<L, T> {}

impl<L: RawExclusion, T> Exclusive<L, T> {
    /// Cria a célula com o lock liberado
    pub const fn new(data: T) -> Self {
        Self {
            raw: L::INIT,
            data: UnsafeCell::new(data),
        }
    }

    /// Adquire o lock
    pub fn lock(&self) -> ExclusiveGuard<'_, L, T> {
        self.raw.acquire();
        ExclusiveGuard {
            lock: self,
            _not_send: PhantomData,
        }
    }

    /// Acesso direto quando já existe `&mut` (sem lock)
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }
}

/// Guard - libera ao sair do escopo
///
/// `!Send`: seções críticas precisam ser fechadas pelo mesmo contexto.
pub struct ExclusiveGuard<'a, L: RawExclusion, T> {
    lock: &'a Exclusive<L, T>,
    _not_send: PhantomData<*const ()>,
}

impl<L: RawExclusion, T> ExclusiveGuard<'_, L, T> {
    /// Solta o lock, executa `f` e readquire antes de retornar.
    ///
    /// O `&mut` impede usar o guard durante `f`. Se `f` entrar em pânico o
    /// lock é readquirido no unwind, mantendo o drop do guard balanceado.
    pub fn unlocked<F, R>(guard: &mut Self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        struct Relock<'b, L: RawExclusion>(&'b L);

        impl<L: RawExclusion> Drop for Relock<'_, L> {
            fn drop(&mut self) {
                self.0.acquire();
            }
        }

        let raw = &guard.lock.raw;
        // SAFETY: o guard detém o lock; Relock readquire antes de devolvê-lo
        unsafe { raw.release() };
        let _relock = Relock(raw);
        f()
    }
}

impl<L: RawExclusion, T> Deref for ExclusiveGuard<'_, L, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: Lock está adquirido
        unsafe { &*self.lock.data.get() }
    }
}

impl<L: RawExclusion, T> DerefMut for ExclusiveGuard<'_, L, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: Lock está adquirido
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<L: RawExclusion, T> Drop for ExclusiveGuard<'_, L, T> {
    fn drop(&mut self) {
        // SAFETY: o guard existe só enquanto o lock está adquirido
        unsafe { self.lock.raw.release() };
    }
}
