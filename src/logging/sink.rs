// =============================================================================
// LOG SINK
// =============================================================================
//
// Destino dos macros tq_*. O chamador instala uma função `fn(&str)` (UART,
// RTT, stdout em host...). Sem sink instalado toda emissão é no-op.
//
// FUNÇÕES DISPONÍVEIS:
// - emit_str(s)  : Envia string
// - emit_hex(v)  : Envia u64 em hexadecimal (0x + 16 dígitos)
// - emit_dec(v)  : Envia u64 em decimal
// - emit_nl()    : Envia newline
//
// NOTA: linhas de CPUs/threads diferentes podem se intercalar. Aceitável
// para debugging.
//
// =============================================================================

use spin::RwLock;

/// Função que recebe os fragmentos de log
pub type LogSink = fn(&str);

static SINK: RwLock<Option<LogSink>> = RwLock::new(None);

/// Instala o sink global (substitui o anterior)
pub fn set_sink(sink: LogSink) {
    *SINK.write() = Some(sink);
}

/// Remove o sink global
pub fn clear_sink() {
    *SINK.write() = None;
}

/// Envia uma string para o sink.
#[inline]
pub fn emit_str(s: &str) {
    // Copia o ponteiro e solta o lock antes de chamar código externo
    let sink = *SINK.read();
    if let Some(sink) = sink {
        sink(s);
    }
}

/// Envia uma nova linha.
#[inline]
pub fn emit_nl() {
    emit_str("\n");
}

/// Envia um valor u64 em formato hexadecimal.
///
/// Formato de saída: 0x0123456789ABCDEF (sempre 18 caracteres)
pub fn emit_hex(value: u64) {
    let mut buf = [0u8; 18];
    buf[0] = b'0';
    buf[1] = b'x';
    for (i, byte) in buf[2..].iter_mut().enumerate() {
        let shift = 60 - (i * 4);
        *byte = nibble_to_ascii(((value >> shift) & 0xF) as u8);
    }
    if let Ok(s) = core::str::from_utf8(&buf) {
        emit_str(s);
    }
}

/// Envia um valor u64 em formato decimal.
///
/// Útil para contadores e índices.
pub fn emit_dec(mut value: u64) {
    // Buffer para dígitos (max 20 para u64)
    let mut buf = [0u8; 20];
    let mut pos = buf.len();

    if value == 0 {
        emit_str("0");
        return;
    }

    while value > 0 {
        pos -= 1;
        buf[pos] = b'0' + (value % 10) as u8;
        value /= 10;
    }

    if let Ok(s) = core::str::from_utf8(&buf[pos..]) {
        emit_str(s);
    }
}

/// Converte nibble (0-15) para caractere ASCII ('0'-'9', 'A'-'F').
#[inline(always)]
const fn nibble_to_ascii(n: u8) -> u8 {
    if n < 10 {
        b'0' + n
    } else {
        b'A' + (n - 10)
    }
}
