use crate::mapping::IndexMapping;
use crate::matrix::Frame;

/// Bytes on the wire per LED: R, G, B and a reserved zero byte
pub const BYTES_PER_LED: usize = 4;

/// Mode select byte telling the firmware a raw frame follows
pub const MODE_RAW_FRAME: u8 = b'0';

const CR: u8 = b'\r';

/// Encode a frame into physical LED order.
///
/// The result is always `width * height * 4` bytes regardless of content.
pub fn encode_frame(frame: &Frame, mapping: &IndexMapping) -> Vec<u8> {
    assert!(
        frame.width() == mapping.width() && frame.height() == mapping.height(),
        "frame is {}x{} but mapping covers {}x{}",
        frame.width(),
        frame.height(),
        mapping.width(),
        mapping.height()
    );

    let mut bytes = vec![0u8; frame.width() * frame.height() * BYTES_PER_LED];

    for (row, col, color) in frame.cells() {
        let base = mapping.get(row, col) * BYTES_PER_LED;
        bytes[base] = color.r;
        bytes[base + 1] = color.g;
        bytes[base + 2] = color.b;
        bytes[base + 3] = 0;
    }

    bytes
}

/// Build the complete draw transmission: mode byte, CR, payload, CR
pub fn build_draw_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(2 + payload.len() + 1);

    // Header
    frame.push(MODE_RAW_FRAME);
    frame.push(CR);

    // Pixel data
    frame.extend_from_slice(payload);

    frame.push(CR);

    frame
}
