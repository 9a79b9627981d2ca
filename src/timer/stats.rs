//! # Estatísticas da Tabela de Timers
//!
//! Contadores cumulativos mantidos sob o lock da tabela. Só são alimentados
//! com a feature `stats`; sem ela `TimerTable::get_stats()` retorna `None`.
//!
//! Em pontos quiescentes vale:
//! `current_outstanding == added - removed - executed`.

/// Snapshot dos contadores da tabela
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimerStats {
    /// Timers adicionados com sucesso
    pub added: u64,
    /// Adds rejeitados por falta de slot
    pub add_failures: u64,
    /// Timers removidos via `remove`
    pub removed: u64,
    /// Callbacks despachados pelo `advance`
    pub executed: u64,
    /// Pico de timers simultâneos
    pub max_outstanding: u64,
    /// Timers pendentes agora
    pub current_outstanding: u64,
}

#[cfg_attr(not(feature = "stats"), allow(dead_code))]
impl TimerStats {
    pub const fn new() -> Self {
        Self {
            added: 0,
            add_failures: 0,
            removed: 0,
            executed: 0,
            max_outstanding: 0,
            current_outstanding: 0,
        }
    }

    /// Registra add bem sucedido e atualiza o pico
    pub(crate) fn record_add(&mut self) {
        self.added += 1;
        self.current_outstanding += 1;
        if self.current_outstanding > self.max_outstanding {
            self.max_outstanding = self.current_outstanding;
        }
    }

    /// Registra add rejeitado
    pub(crate) fn record_add_failure(&mut self) {
        self.add_failures += 1;
    }

    /// Registra `count` slots removidos
    pub(crate) fn record_remove(&mut self, count: usize) {
        self.removed += count as u64;
        self.current_outstanding -= count as u64;
    }

    /// Registra um dispatch
    pub(crate) fn record_execute(&mut self) {
        self.executed += 1;
        self.current_outstanding -= 1;
    }
}
