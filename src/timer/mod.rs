//! Tempo e Timers
//!
//! Tabela de timers de capacidade fixa. Chamadores agendam callbacks para um
//! instante futuro; o loop dono chama `advance(now)` periodicamente e usa
//! `next_expires(now)` para saber quanto pode dormir.

pub mod slot;
pub mod stats;
pub mod table;

#[cfg(test)]
mod test;

pub use slot::TimerFn;
pub use stats::TimerStats;
pub use table::TimerTable;
