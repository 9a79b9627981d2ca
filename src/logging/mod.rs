// =============================================================================
// TIMERQ LOGGING - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging da fila de timers com custo ZERO quando desligado.
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias (só
//   tomam referência dos argumentos, sem emitir nada)
// - SEM core::fmt - Apenas strings literais + valores numéricos
// - SEM alocação
// - Escreve no sink instalado pelo chamador (ver `sink`). Sem sink, nada
//   é emitido: a tabela não produz saída observável por padrão.
//
// NÍVEIS DE LOG:
// - ERROR: Estado inconsistente detectado
// - WARN:  Situações recuperáveis (tabela cheia)
// - INFO:  Eventos raros e relevantes
// - DEBUG: Resumo de cada passada do advance
// - TRACE: Cada add/remove/dispatch
//
// REGRA: nunca logar com o lock da tabela adquirido. O sink é código do
// chamador e pode tocar na própria tabela.
//
// USO:
//   tq_warn!("(Timer) Tabela cheia");            // Apenas string
//   tq_trace!("(Timer) add slot=", slot);       // String + hex
//
// =============================================================================

pub mod sink;

pub const P_ERROR: &str = "[ERRO] ";
pub const P_WARN: &str = "[WARN] ";
pub const P_INFO: &str = "[INFO] ";
pub const P_DEBUG: &str = "[DEBG] ";
pub const P_TRACE: &str = "[TRAC] ";

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR / WARN
// =============================================================================
//
// Ativos exceto com no_logs.
//

#[cfg(not(feature = "no_logs"))]
#[doc(hidden)]
#[macro_export]
macro_rules! tq_error {
    ($msg:expr) => {{
        $crate::logging::sink::emit_str($crate::logging::P_ERROR);
        $crate::logging::sink::emit_str($msg);
        $crate::logging::sink::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::sink::emit_str($crate::logging::P_ERROR);
        $crate::logging::sink::emit_str($msg);
        $crate::logging::sink::emit_hex($val as u64);
        $crate::logging::sink::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[doc(hidden)]
#[macro_export]
macro_rules! tq_error {
    ($($arg:expr),* $(,)?) => {{
        $(let _ = &$arg;)*
    }};
}

#[cfg(not(feature = "no_logs"))]
#[doc(hidden)]
#[macro_export]
macro_rules! tq_warn {
    ($msg:expr) => {{
        $crate::logging::sink::emit_str($crate::logging::P_WARN);
        $crate::logging::sink::emit_str($msg);
        $crate::logging::sink::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::sink::emit_str($crate::logging::P_WARN);
        $crate::logging::sink::emit_str($msg);
        $crate::logging::sink::emit_hex($val as u64);
        $crate::logging::sink::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[doc(hidden)]
#[macro_export]
macro_rules! tq_warn {
    ($($arg:expr),* $(,)?) => {{
        $(let _ = &$arg;)*
    }};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================
//
// Desligado por no_logs e por log_error.
//

#[cfg(not(any(feature = "no_logs", feature = "log_error")))]
#[doc(hidden)]
#[macro_export]
macro_rules! tq_info {
    ($msg:expr) => {{
        $crate::logging::sink::emit_str($crate::logging::P_INFO);
        $crate::logging::sink::emit_str($msg);
        $crate::logging::sink::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::sink::emit_str($crate::logging::P_INFO);
        $crate::logging::sink::emit_str($msg);
        $crate::logging::sink::emit_hex($val as u64);
        $crate::logging::sink::emit_nl();
    }};
}

#[cfg(any(feature = "no_logs", feature = "log_error"))]
#[doc(hidden)]
#[macro_export]
macro_rules! tq_info {
    ($($arg:expr),* $(,)?) => {{
        $(let _ = &$arg;)*
    }};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================
//
// Ativo apenas com log_debug ou log_trace.
//

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
))]
#[doc(hidden)]
#[macro_export]
macro_rules! tq_debug {
    ($msg:expr) => {{
        $crate::logging::sink::emit_str($crate::logging::P_DEBUG);
        $crate::logging::sink::emit_str($msg);
        $crate::logging::sink::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::sink::emit_str($crate::logging::P_DEBUG);
        $crate::logging::sink::emit_str($msg);
        $crate::logging::sink::emit_dec($val as u64);
        $crate::logging::sink::emit_nl();
    }};
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
)))]
#[doc(hidden)]
#[macro_export]
macro_rules! tq_debug {
    ($($arg:expr),* $(,)?) => {{
        $(let _ = &$arg;)*
    }};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================
//
// Ativo apenas com log_trace. Formato fixo: msg1 + hex + msg2 + hex.
//

#[cfg(all(not(feature = "no_logs"), feature = "log_trace"))]
#[doc(hidden)]
#[macro_export]
macro_rules! tq_trace {
    ($msg:expr) => {{
        $crate::logging::sink::emit_str($crate::logging::P_TRACE);
        $crate::logging::sink::emit_str($msg);
        $crate::logging::sink::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::sink::emit_str($crate::logging::P_TRACE);
        $crate::logging::sink::emit_str($msg);
        $crate::logging::sink::emit_hex($val as u64);
        $crate::logging::sink::emit_nl();
    }};
    ($msg1:expr, $val1:expr, $msg2:expr, $val2:expr) => {{
        $crate::logging::sink::emit_str($crate::logging::P_TRACE);
        $crate::logging::sink::emit_str($msg1);
        $crate::logging::sink::emit_hex($val1 as u64);
        $crate::logging::sink::emit_str($msg2);
        $crate::logging::sink::emit_hex($val2 as u64);
        $crate::logging::sink::emit_nl();
    }};
}

#[cfg(not(all(not(feature = "no_logs"), feature = "log_trace")))]
#[doc(hidden)]
#[macro_export]
macro_rules! tq_trace {
    ($($arg:expr),* $(,)?) => {{
        $(let _ = &$arg;)*
    }};
}
