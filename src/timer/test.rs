//! Testes da tabela de timers
//!
//! Cada teste usa a própria tabela: os testes rodam em paralelo.

use std::boxed::Box;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::{Ticks, TIMER_INFINITY, TIMER_QUEUE_COUNT};
use crate::error::TimerError;
use crate::sync::{CriticalSectionExclusion, NoExclusion};

use super::TimerTable;

fn counter_inc(_now: Ticks, counter: &'static AtomicU32) {
    counter.fetch_add(1, Ordering::SeqCst);
}

fn counter_inc_twice(_now: Ticks, counter: &'static AtomicU32) {
    counter.fetch_add(2, Ordering::SeqCst);
}

fn count(counter: &AtomicU32) -> u32 {
    counter.load(Ordering::SeqCst)
}

// =============================================================================
// EXECUÇÃO
// =============================================================================

#[test]
fn fires_once_at_expiry() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    assert!(TABLE.add(1, counter_inc, &COUNTER).is_ok());
    TABLE.advance(0);
    assert_eq!(count(&COUNTER), 0);
    TABLE.advance(1);
    assert_eq!(count(&COUNTER), 1);
    TABLE.advance(2);
    assert_eq!(count(&COUNTER), 1);
}

#[test]
fn late_advance_still_fires() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    TABLE.add(5, counter_inc, &COUNTER).unwrap();
    TABLE.advance(1_000);
    assert_eq!(count(&COUNTER), 1);
    assert_eq!(TABLE.outstanding(), 0);
}

#[test]
fn only_expired_timers_fire() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static EARLY: AtomicU32 = AtomicU32::new(0);
    static LATE: AtomicU32 = AtomicU32::new(0);

    TABLE.add(10, counter_inc, &EARLY).unwrap();
    TABLE.add(20, counter_inc, &LATE).unwrap();

    TABLE.advance(15);
    assert_eq!(count(&EARLY), 1);
    assert_eq!(count(&LATE), 0);
    assert_eq!(TABLE.outstanding(), 1);

    TABLE.advance(20);
    assert_eq!(count(&LATE), 1);
}

#[test]
fn recursive_readd_fires_on_next_advance() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn recursive(now: Ticks, counter: &'static AtomicU32) {
        counter.fetch_add(1, Ordering::SeqCst);
        assert!(TABLE.add(now + 1, recursive, counter).is_ok());
    }

    assert!(TABLE.add(1, recursive, &COUNTER).is_ok());
    TABLE.advance(0);
    assert_eq!(count(&COUNTER), 0);
    TABLE.advance(1);
    assert_eq!(count(&COUNTER), 1);
    TABLE.advance(2);
    assert_eq!(count(&COUNTER), 2);
    assert_eq!(TABLE.outstanding(), 1);
}

#[test]
fn callback_can_reenter_advance() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static OUTER: AtomicU32 = AtomicU32::new(0);
    static INNER: AtomicU32 = AtomicU32::new(0);

    fn outer(now: Ticks, counter: &'static AtomicU32) {
        counter.fetch_add(1, Ordering::SeqCst);
        TABLE.add(now, counter_inc, &INNER).unwrap();
        // advance aninhado: não pode travar no lock do advance externo
        TABLE.advance(now);
    }

    TABLE.add(3, outer, &OUTER).unwrap();
    TABLE.advance(3);
    assert_eq!(count(&OUTER), 1);
    assert_eq!(count(&INNER), 1);
    assert_eq!(TABLE.outstanding(), 0);
}

#[test]
fn slot_is_free_while_callback_runs() {
    static TABLE: TimerTable<AtomicU32, crate::sync::SpinExclusion, 1> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn probe(now: Ticks, counter: &'static AtomicU32) {
        counter.fetch_add(1, Ordering::SeqCst);
        assert_eq!(TABLE.outstanding(), 0);
        // O único slot já está livre para o re-add
        assert_eq!(TABLE.add(now + 10, counter_inc, counter), Ok(0));
    }

    TABLE.add(1, probe, &COUNTER).unwrap();
    TABLE.advance(1);
    assert_eq!(count(&COUNTER), 1);
    assert_eq!(TABLE.outstanding(), 1);
}

// =============================================================================
// CAPACIDADE
// =============================================================================

#[test]
fn add_fails_when_full_without_side_effects() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    assert_eq!(TABLE.capacity(), TIMER_QUEUE_COUNT);
    for i in 0..TIMER_QUEUE_COUNT {
        assert_eq!(TABLE.add(100 + i as Ticks, counter_inc, &COUNTER), Ok(i));
    }
    assert_eq!(
        TABLE.add(1, counter_inc, &COUNTER),
        Err(TimerError::CapacityExceeded)
    );

    // Nada mudou: o timer rejeitado (expires=1) não existe
    assert_eq!(TABLE.outstanding(), TIMER_QUEUE_COUNT);
    assert_eq!(TABLE.next_expires(0), 100);
    TABLE.advance(99);
    assert_eq!(count(&COUNTER), 0);

    TABLE.advance(100 + TIMER_QUEUE_COUNT as Ticks);
    assert_eq!(count(&COUNTER), TIMER_QUEUE_COUNT as u32);
}

#[test]
fn freed_slot_is_reused_first() {
    static TABLE: TimerTable<AtomicU32, crate::sync::SpinExclusion, 4> = TimerTable::new();
    static A: AtomicU32 = AtomicU32::new(0);
    static B: AtomicU32 = AtomicU32::new(0);

    assert_eq!(TABLE.add(5, counter_inc, &A), Ok(0));
    assert_eq!(TABLE.add(5, counter_inc, &B), Ok(1));
    assert_eq!(TABLE.remove(counter_inc, &A), 1);
    assert_eq!(TABLE.add(5, counter_inc, &A), Ok(0));
    assert_eq!(TABLE.add(5, counter_inc, &A), Ok(2));
}

#[test]
fn capacity_error_is_recoverable() {
    static TABLE: TimerTable<AtomicU32, crate::sync::SpinExclusion, 2> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    TABLE.add(1, counter_inc, &COUNTER).unwrap();
    TABLE.add(2, counter_inc, &COUNTER).unwrap();
    assert_eq!(
        TABLE.add(3, counter_inc, &COUNTER),
        Err(TimerError::CapacityExceeded)
    );

    TABLE.advance(1);
    assert!(TABLE.add(3, counter_inc, &COUNTER).is_ok());
    TABLE.advance(3);
    assert_eq!(count(&COUNTER), 3);
}

// =============================================================================
// REMOÇÃO
// =============================================================================

#[test]
fn remove_before_advance_suppresses_timer() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    assert!(TABLE.add(1, counter_inc, &COUNTER).is_ok());
    assert_eq!(TABLE.remove(counter_inc, &COUNTER), 1);
    TABLE.advance(1);
    assert_eq!(count(&COUNTER), 0);
}

#[test]
fn remove_takes_all_duplicates() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    for expires in [1, 2, 3] {
        TABLE.add(expires, counter_inc, &COUNTER).unwrap();
    }
    assert_eq!(TABLE.remove(counter_inc, &COUNTER), 3);
    assert_eq!(TABLE.remove(counter_inc, &COUNTER), 0);
    TABLE.advance(10);
    assert_eq!(count(&COUNTER), 0);
}

#[test]
fn remove_matches_callback_and_data_identity() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static A: AtomicU32 = AtomicU32::new(0);
    static B: AtomicU32 = AtomicU32::new(0);

    TABLE.add(1, counter_inc, &A).unwrap();
    TABLE.add(1, counter_inc, &B).unwrap();
    TABLE.add(1, counter_inc_twice, &A).unwrap();

    // Mesmo valor, endereço diferente: não casa
    let lookalike: &'static AtomicU32 = Box::leak(Box::new(AtomicU32::new(0)));
    assert_eq!(TABLE.remove(counter_inc, lookalike), 0);

    assert_eq!(TABLE.remove(counter_inc, &A), 1);
    TABLE.advance(1);
    assert_eq!(count(&A), 2);
    assert_eq!(count(&B), 1);
}

#[test]
fn remove_without_match_returns_zero() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    assert_eq!(TABLE.remove(counter_inc, &COUNTER), 0);
}

#[test]
fn recursive_self_removal() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn recursive(now: Ticks, counter: &'static AtomicU32) {
        counter.fetch_add(1, Ordering::SeqCst);
        assert!(TABLE.add(now + 1, recursive, counter).is_ok());
    }

    fn recursive_del(now: Ticks, counter: &'static AtomicU32) {
        counter.fetch_add(1, Ordering::SeqCst);
        assert!(TABLE.add(now + 1, recursive, counter).is_ok());
        // Só o duplicado recém-adicionado casa
        assert_eq!(TABLE.remove(recursive, counter), 1);
    }

    assert!(TABLE.add(1, recursive_del, &COUNTER).is_ok());
    TABLE.advance(1);
    assert_eq!(count(&COUNTER), 1);
    TABLE.advance(2);
    assert_eq!(count(&COUNTER), 1);
    assert_eq!(TABLE.outstanding(), 0);
}

// =============================================================================
// PRÓXIMA EXPIRAÇÃO
// =============================================================================

#[test]
fn next_expires_reports_delay() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    assert_eq!(TABLE.next_expires(0), TIMER_INFINITY);
    assert!(TABLE.add(1, counter_inc, &COUNTER).is_ok());
    assert_eq!(TABLE.next_expires(0), 1);
    assert_eq!(TABLE.next_expires(1), 0);
    assert_eq!(TABLE.next_expires(2), 0);
    TABLE.advance(1);
    assert_eq!(TABLE.next_expires(1), TIMER_INFINITY);
}

#[test]
fn next_expires_takes_minimum() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    for expires in [50, 20, 35] {
        TABLE.add(expires, counter_inc, &COUNTER).unwrap();
    }
    assert_eq!(TABLE.next_expires(10), 10);
    assert_eq!(TABLE.next_expires(20), 0);
    assert_eq!(TABLE.next_expires(21), 0);

    // Query pura: nada foi executado
    assert_eq!(count(&COUNTER), 0);
    assert_eq!(TABLE.outstanding(), 3);
}

// =============================================================================
// ESTATÍSTICAS
// =============================================================================

#[cfg(feature = "stats")]
#[test]
fn stats_track_lifecycle() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let stats = || TABLE.get_stats().unwrap();
    assert_eq!(stats(), super::TimerStats::default());

    assert!(TABLE.add(1, counter_inc, &COUNTER).is_ok());
    assert_eq!(stats().added, 1);
    assert_eq!(stats().current_outstanding, 1);
    assert_eq!(TABLE.remove(counter_inc, &COUNTER), 1);
    assert_eq!(stats().removed, 1);
    assert_eq!(stats().max_outstanding, 1);
    assert_eq!(stats().current_outstanding, 0);

    for _ in 0..3 {
        assert!(TABLE.add(1, counter_inc, &COUNTER).is_ok());
    }
    assert_eq!(stats().max_outstanding, 3);
    TABLE.advance(1);
    assert_eq!(stats().executed, 3);

    let s = stats();
    assert_eq!(s.current_outstanding, s.added - s.removed - s.executed);
}

#[cfg(feature = "stats")]
#[test]
fn stats_count_add_failures() {
    static TABLE: TimerTable<AtomicU32, crate::sync::SpinExclusion, 1> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    TABLE.add(1, counter_inc, &COUNTER).unwrap();
    assert!(TABLE.add(1, counter_inc, &COUNTER).is_err());
    assert!(TABLE.add(1, counter_inc, &COUNTER).is_err());

    let stats = TABLE.get_stats().unwrap();
    assert_eq!(stats.added, 1);
    assert_eq!(stats.add_failures, 2);
    assert_eq!(stats.current_outstanding, 1);
}

#[cfg(not(feature = "stats"))]
#[test]
fn stats_unavailable_without_feature() {
    static TABLE: TimerTable<AtomicU32> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    TABLE.add(1, counter_inc, &COUNTER).unwrap();
    assert!(TABLE.get_stats().is_none());
}

// =============================================================================
// VARIANTES DE EXCLUSÃO E DADOS
// =============================================================================

/// Contexto de um loop bare-metal: a tabela não é `static` (NoExclusion é
/// `!Sync`), então o callback a alcança pelo dado.
struct LoopCtx {
    table: &'static TimerTable<LoopCtx, NoExclusion, 4>,
    ticks: AtomicU32,
}

fn heartbeat(now: Ticks, ctx: &'static LoopCtx) {
    ctx.ticks.fetch_add(1, Ordering::SeqCst);
    ctx.table.add(now + 5, heartbeat, ctx).unwrap();
}

#[test]
fn single_context_table_supports_reentrancy() {
    let table: &'static TimerTable<LoopCtx, NoExclusion, 4> = Box::leak(Box::new(TimerTable::new()));
    let ctx: &'static LoopCtx = Box::leak(Box::new(LoopCtx {
        table,
        ticks: AtomicU32::new(0),
    }));

    table.add(5, heartbeat, ctx).unwrap();
    let mut now = 0;
    while ctx.ticks.load(Ordering::SeqCst) < 4 {
        now += table.next_expires(now);
        table.advance(now);
    }
    assert_eq!(now, 20);
    assert_eq!(table.outstanding(), 1);
    assert_eq!(table.next_expires(now), 5);
}

#[test]
fn critical_section_table_dispatches() {
    static TABLE: TimerTable<AtomicU32, CriticalSectionExclusion> = TimerTable::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn recursive(now: Ticks, counter: &'static AtomicU32) {
        if counter.fetch_add(1, Ordering::SeqCst) < 2 {
            TABLE.add(now + 1, recursive, counter).unwrap();
        }
    }

    TABLE.add(1, recursive, &COUNTER).unwrap();
    for now in 1..=5 {
        TABLE.advance(now);
    }
    assert_eq!(count(&COUNTER), 3);
    assert_eq!(TABLE.next_expires(5), TIMER_INFINITY);
}

#[test]
fn unsized_data_is_passed_through() {
    static TABLE: TimerTable<[AtomicU32]> = TimerTable::new();
    static LANES: [AtomicU32; 3] = [AtomicU32::new(0), AtomicU32::new(0), AtomicU32::new(0)];

    fn bump_all(_now: Ticks, lanes: &'static [AtomicU32]) {
        for lane in lanes {
            lane.fetch_add(1, Ordering::SeqCst);
        }
    }

    TABLE.add(1, bump_all, &LANES[..]).unwrap();
    TABLE.add(1, bump_all, &LANES[1..]).unwrap();

    // Mesmo endereço inicial, comprimento diferente: ainda casa pelo endereço
    assert_eq!(TABLE.remove(bump_all, &LANES[1..2]), 1);
    TABLE.advance(1);
    assert_eq!(count(&LANES[0]), 1);
    assert_eq!(count(&LANES[1]), 1);
    assert_eq!(count(&LANES[2]), 1);
}
