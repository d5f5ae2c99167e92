//! Output sanitization for untrusted device bytes.

const LF: u8 = 0x0a;
const CR: u8 = 0x0d;
const ESC: u8 = 0x1b;

/// Replace every byte that is not printable ASCII, LF, CR or ESC with a space.
pub fn sanitize(data: &mut [u8]) {
    for byte in data.iter_mut() {
        if !is_displayable(*byte) {
            *byte = b' ';
        }
    }
}

fn is_displayable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7f | LF | CR | ESC)
}
