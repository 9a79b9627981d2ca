//! Slot de timer
//!
//! Um timer vivo ocupa exatamente um slot da tabela. Slot livre é `None`.

use crate::config::Ticks;

/// Callback executado na expiração: recebe o `now` do advance e o dado
/// opaco registrado no add.
pub type TimerFn<D> = fn(Ticks, &'static D);

/// Um timer agendado
pub(crate) struct Timer<D: ?Sized + 'static> {
    /// Momento de expiração (na unidade do chamador)
    pub expires: Ticks,
    /// Callback a ser executado
    pub func: TimerFn<D>,
    /// Dado opaco, nunca dereferenciado pela tabela
    pub data: &'static D,
}

impl<D: ?Sized> Clone for Timer<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: ?Sized> Copy for Timer<D> {}

impl<D: ?Sized> Timer<D> {
    /// Verifica se o timer expirou dado o tempo atual
    #[inline]
    pub fn is_expired(&self, now: Ticks) -> bool {
        now >= self.expires
    }

    /// Identidade do par (callback, dado): compara endereços, nunca conteúdo.
    ///
    /// Funções idênticas podem ser mescladas pelo compilador e ter o mesmo
    /// endereço; callbacks distintos devem ter corpos distintos.
    #[inline]
    pub fn matches(&self, func: TimerFn<D>, data: &'static D) -> bool {
        self.func as usize == func as usize && core::ptr::addr_eq(self.data, data)
    }

    /// Executa o callback
    #[inline]
    pub fn run(self, now: Ticks) {
        (self.func)(now, self.data);
    }
}
