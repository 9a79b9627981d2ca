//! Timerq - Fila de Timers de Capacidade Fixa.
//!
//! Agenda callbacks para instantes futuros, cancela e executa os vencidos
//! quando o loop dono fornece o tempo atual. Sem alocação: os N slots vivem
//! dentro da própria tabela.
//!
//! ## Componentes
//!
//! ```text
//! config   → Capacidade padrão, tipo de tempo, sentinela
//! error    → TimerError / TimerResult
//! sync     → Spinlock, seção crítica ou no-op (bare-metal)
//! timer    → TimerTable: add / remove / advance / next_expires
//! logging  → Macros de log zero-overhead + sink plugável
//! selftest → Suite executável no alvo (feature self_test)
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

// --- Base ---
pub mod config;
pub mod error;
pub mod logging;
pub mod sync;

// --- Fila de timers ---
pub mod timer;

#[cfg(feature = "self_test")]
pub mod selftest;

pub use config::{Ticks, TIMER_INFINITY, TIMER_QUEUE_COUNT};
pub use error::{TimerError, TimerResult};
pub use sync::{CriticalSectionExclusion, NoExclusion, RawExclusion, SpinExclusion};
pub use timer::{TimerFn, TimerStats, TimerTable};
