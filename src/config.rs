//! # Configuração da Fila de Timers
//!
//! Constantes fixadas em tempo de compilação. Não existe configuração em
//! runtime: capacidade e sentinela são parte do tipo.

// =============================================================================
// TEMPO
// =============================================================================

/// Valor de tempo fornecido pelo chamador.
///
/// A unidade é livre (ms, ticks, ciclos). A tabela só compara valores por
/// ordem, então misturar unidades entre chamadas dá resultado indefinido.
pub type Ticks = u64;

/// Sentinela "sem timer pendente" retornada por `next_expires`.
pub const TIMER_INFINITY: Ticks = Ticks::MAX;

// =============================================================================
// CAPACIDADE
// =============================================================================

/// Número padrão de slots por tabela
pub const TIMER_QUEUE_COUNT: usize = 32;
