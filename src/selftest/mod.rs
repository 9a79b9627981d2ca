//! Framework de self-test
//!
//! Suite executável no próprio alvo (bare-metal, sem `cargo test`). O
//! resultado sai pelos macros de log; o chamador decide o que fazer com a
//! contagem de falhas.

mod timer;

/// Resultado de teste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

/// Um caso de teste
pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
}

impl TestCase {
    pub const fn new(name: &'static str, func: fn() -> TestResult) -> Self {
        Self { name, func }
    }
}

/// Contagem de uma execução
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SuiteReport {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SuiteReport {
    fn merge(&mut self, other: SuiteReport) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

/// Executa suite de testes
pub fn run_test_suite(name: &str, tests: &[TestCase]) -> SuiteReport {
    crate::tq_info!("=== Executando suite: ");
    crate::tq_info!(name);

    let mut report = SuiteReport::default();
    for test in tests {
        match (test.func)() {
            TestResult::Pass => {
                crate::tq_info!(test.name);
                report.passed += 1;
            }
            TestResult::Fail => {
                crate::tq_error!(test.name);
                report.failed += 1;
            }
            TestResult::Skip => {
                crate::tq_warn!(test.name);
                report.skipped += 1;
            }
        }
    }

    crate::tq_info!("Resultados: passed=", report.passed);
    report
}

/// Executa todos os self-tests da crate
pub fn run_self_tests() -> SuiteReport {
    let mut report = SuiteReport::default();
    report.merge(run_test_suite("Timer", timer::TIMER_TESTS));

    if report.failed == 0 {
        crate::tq_info!("(SelfTest) Fila de timers validada");
    } else {
        crate::tq_error!("(SelfTest) Falhas=", report.failed);
    }
    report
}
