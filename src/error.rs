//! Tipos de Erro da Fila de Timers
//!
//! A taxonomia é pequena: só `add` pode falhar. Remover sem match, consultar
//! uma tabela vazia ou pedir estatísticas desabilitadas NÃO são erros.

/// Erros da tabela de timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// Nenhum slot livre. Recuperável: tentar depois, descartar ou remover
    /// outro timer antes.
    CapacityExceeded,
}

impl TimerError {
    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CapacityExceeded => "Tabela de timers cheia",
        }
    }
}

impl core::fmt::Display for TimerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tipo Result específico para operações da tabela
pub type TimerResult<T> = Result<T, TimerError>;
