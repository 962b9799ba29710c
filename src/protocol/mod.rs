mod frame;
mod handshake;

pub use frame::{build_draw_frame, encode_frame, BYTES_PER_LED, MODE_RAW_FRAME};
pub use handshake::{is_handshake_response, read_line, HANDSHAKE_REQUEST, HANDSHAKE_RESPONSE};

/// Space separated lowercase hex, for debug output
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
