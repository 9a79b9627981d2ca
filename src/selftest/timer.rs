//! Self-tests da tabela de timers
//!
//! Tabelas locais com `NoExclusion`: no alvo a suite roda num único
//! contexto, antes de habilitar interrupções.

use core::sync::atomic::{AtomicU32, Ordering};

use super::{TestCase, TestResult};
use crate::config::{Ticks, TIMER_INFINITY};
use crate::sync::NoExclusion;
use crate::timer::TimerTable;

type LocalTable = TimerTable<AtomicU32, NoExclusion, 4>;

pub(super) const TIMER_TESTS: &[TestCase] = &[
    TestCase::new("timer_fires_once", test_fires_once),
    TestCase::new("timer_capacity", test_capacity),
    TestCase::new("timer_remove", test_remove),
    TestCase::new("timer_next_expires", test_next_expires),
];

fn bump(_now: Ticks, counter: &'static AtomicU32) {
    counter.fetch_add(1, Ordering::Relaxed);
}

fn test_fires_once() -> TestResult {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    COUNTER.store(0, Ordering::Relaxed);
    let table = LocalTable::new();

    if table.add(1, bump, &COUNTER).is_err() {
        return TestResult::Fail;
    }
    table.advance(0);
    if COUNTER.load(Ordering::Relaxed) != 0 {
        return TestResult::Fail;
    }
    table.advance(1);
    table.advance(2);
    if COUNTER.load(Ordering::Relaxed) != 1 {
        return TestResult::Fail;
    }

    crate::tq_trace!("(SelfTest) dispatch único OK");
    TestResult::Pass
}

fn test_capacity() -> TestResult {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let table = LocalTable::new();

    for _ in 0..table.capacity() {
        if table.add(10, bump, &COUNTER).is_err() {
            return TestResult::Fail;
        }
    }
    if table.add(10, bump, &COUNTER).is_ok() {
        return TestResult::Fail;
    }
    if table.outstanding() != table.capacity() {
        return TestResult::Fail;
    }
    TestResult::Pass
}

fn test_remove() -> TestResult {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    COUNTER.store(0, Ordering::Relaxed);
    let table = LocalTable::new();

    let _ = table.add(1, bump, &COUNTER);
    let _ = table.add(2, bump, &COUNTER);
    if table.remove(bump, &COUNTER) != 2 {
        return TestResult::Fail;
    }
    table.advance(5);
    if COUNTER.load(Ordering::Relaxed) != 0 {
        return TestResult::Fail;
    }
    TestResult::Pass
}

fn test_next_expires() -> TestResult {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let table = LocalTable::new();

    if table.next_expires(0) != TIMER_INFINITY {
        return TestResult::Fail;
    }
    let _ = table.add(7, bump, &COUNTER);
    if table.next_expires(3) != 4 || table.next_expires(9) != 0 {
        return TestResult::Fail;
    }
    TestResult::Pass
}
