//! Tabela de Timers
//!
//! N slots fixos, sem ordenação entre eles: toda operação é um scan linear
//! O(N) sob um único lock da tabela.
//!
//! # Protocolo de dispatch
//!
//! O `advance` NUNCA executa callback com o lock adquirido:
//!
//! 1. Copia (callback, dado) do slot expirado e libera o slot.
//! 2. Solta o lock.
//! 3. Executa o callback com `(now, dado)`.
//! 4. Readquire o lock e continua o scan relendo o estado dos slots.
//!
//! Assim o callback pode chamar `add`/`remove`/`advance` na mesma tabela
//! (inclusive se re-agendar) sem deadlock, e nunca vê o próprio slot ainda
//! ocupado. Entre dois dispatches outras threads podem mexer na tabela; a
//! passada tolera isso porque nenhum snapshot sobrevive ao unlock.
//!
//! Timers adicionados durante a passada podem ou não rodar nela mesma. A
//! ordem de execução entre timers que expiram na mesma passada não é
//! garantida.

use crate::config::{Ticks, TIMER_INFINITY, TIMER_QUEUE_COUNT};
use crate::error::{TimerError, TimerResult};
use crate::sync::{Exclusive, ExclusiveGuard, RawExclusion, SpinExclusion};

use super::slot::{Timer, TimerFn};
use super::stats::TimerStats;

/// Estado protegido pelo lock
struct TableState<D: ?Sized + 'static, const N: usize> {
    slots: [Option<Timer<D>>; N],
    #[cfg(feature = "stats")]
    stats: TimerStats,
}

impl<D: ?Sized + 'static, const N: usize> TableState<D, N> {
    /// Ocupa o primeiro slot livre (ordem 0..N)
    fn insert(&mut self, timer: Timer<D>) -> TimerResult<usize> {
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            #[cfg(feature = "stats")]
            self.stats.record_add_failure();
            return Err(TimerError::CapacityExceeded);
        };

        self.slots[slot] = Some(timer);
        #[cfg(feature = "stats")]
        self.stats.record_add();
        Ok(slot)
    }

    /// Libera todos os slots com o mesmo par (callback, dado)
    fn remove_matching(&mut self, func: TimerFn<D>, data: &'static D) -> usize {
        let mut removed = 0;
        for slot in self.slots.iter_mut() {
            if slot.is_some_and(|timer| timer.matches(func, data)) {
                *slot = None;
                removed += 1;
            }
        }
        #[cfg(feature = "stats")]
        self.stats.record_remove(removed);
        removed
    }

    /// Retira o timer do slot `index` se ele estiver ocupado e expirado
    fn take_expired(&mut self, index: usize, now: Ticks) -> Option<Timer<D>> {
        let slot = &mut self.slots[index];
        if !slot.is_some_and(|timer| timer.is_expired(now)) {
            return None;
        }
        #[cfg(feature = "stats")]
        self.stats.record_execute();
        slot.take()
    }

    fn next_expires(&self, now: Ticks) -> Ticks {
        let mut expires = TIMER_INFINITY;
        for timer in self.slots.iter().flatten() {
            // Já atrasado: pronto agora
            if timer.expires < now {
                return 0;
            }
            expires = expires.min(timer.expires - now);
        }
        expires
    }

    fn outstanding(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Tabela de timers com `N` slots protegidos por `L`
///
/// `new()` é `const`, então a tabela pode ser um `static` do processo ou uma
/// instância local. Com `SpinExclusion`/`CriticalSectionExclusion` ela é
/// `Sync` sempre que `D: Sync`.
///
/// ```ignore
/// static TIMERS: TimerTable<AtomicU32> = TimerTable::new();
/// static FIRED: AtomicU32 = AtomicU32::new(0);
///
/// fn on_expire(_now: Ticks, fired: &'static AtomicU32) {
///     fired.fetch_add(1, Ordering::Relaxed);
/// }
///
/// TIMERS.add(10, on_expire, &FIRED)?;
/// TIMERS.advance(10);
/// ```
pub struct TimerTable<
    D: ?Sized + 'static,
    L: RawExclusion = SpinExclusion,
    const N: usize = { TIMER_QUEUE_COUNT },
> {
    inner: Exclusive<L, TableState<D, N>>,
}

impl<D: ?Sized + 'static, L: RawExclusion, const N: usize> TimerTable<D, L, N> {
    /// Cria a tabela com todos os slots livres
    pub const fn new() -> Self {
        Self {
            inner: Exclusive::new(TableState {
                slots: [None; N],
                #[cfg(feature = "stats")]
                stats: TimerStats::new(),
            }),
        }
    }

    /// Número fixo de slots
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Timers pendentes no instante da chamada
    pub fn outstanding(&self) -> usize {
        self.inner.lock().outstanding()
    }

    /// Agenda `func(now, data)` para quando `advance` receber `now >= expires`.
    ///
    /// # Returns
    /// * `Ok(slot)`: índice do slot ocupado. Apenas informativo: a remoção é
    ///   feita pelo par (callback, dado), não pelo índice.
    /// * `Err(TimerError::CapacityExceeded)`: nenhum slot livre. A tabela não
    ///   é alterada.
    pub fn add(&self, expires: Ticks, func: TimerFn<D>, data: &'static D) -> TimerResult<usize> {
        let result = self.inner.lock().insert(Timer {
            expires,
            func,
            data,
        });

        match result {
            Ok(slot) => crate::tq_trace!("(Timer) add slot=", slot, " expires=", expires),
            Err(_) => crate::tq_warn!("(Timer) Tabela cheia, add rejeitado expires=", expires),
        }
        result
    }

    /// Remove TODOS os timers pendentes com este par (callback, dado).
    ///
    /// Retorna quantos slots foram liberados; zero não é erro.
    pub fn remove(&self, func: TimerFn<D>, data: &'static D) -> usize {
        let removed = self.inner.lock().remove_matching(func, data);
        crate::tq_trace!("(Timer) remove count=", removed);
        removed
    }

    /// Executa todos os timers com `expires <= now`.
    ///
    /// Faz uma passada completa pelos N slots. Cada callback roda com o lock
    /// solto (ver documentação do módulo).
    pub fn advance(&self, now: Ticks) {
        let mut executed: u64 = 0;
        let mut state = self.inner.lock();

        for index in 0..N {
            // Releitura a cada iteração: o lock pode ter sido solto
            let Some(timer) = state.take_expired(index, now) else {
                continue;
            };

            ExclusiveGuard::unlocked(&mut state, || {
                crate::tq_trace!("(Timer) dispatch slot=", index, " now=", now);
                timer.run(now);
            });
            executed += 1;
        }

        drop(state);
        if executed > 0 {
            crate::tq_debug!("(Timer) advance executou=", executed);
        }
    }

    /// Quanto tempo falta para a próxima expiração, relativo a `now`.
    ///
    /// * `0` se algum timer já está atrasado (`expires < now`) ou vence agora.
    /// * `TIMER_INFINITY` se não há timers pendentes.
    pub fn next_expires(&self, now: Ticks) -> Ticks {
        self.inner.lock().next_expires(now)
    }

    /// Snapshot das estatísticas, ou `None` se a feature `stats` está
    /// desligada (distingue "nenhum timer" de "sem estatísticas").
    pub fn get_stats(&self) -> Option<TimerStats> {
        #[cfg(feature = "stats")]
        {
            Some(self.inner.lock().stats)
        }
        #[cfg(not(feature = "stats"))]
        {
            None
        }
    }
}

impl<D: ?Sized + 'static, L: RawExclusion, const N: usize> Default for TimerTable<D, L, N> {
    fn default() -> Self {
        Self::new()
    }
}
