//! Fixed-width scalar conversions. Maze files are big-endian throughout.

pub fn i32_to_bytes(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

pub fn i32_from_bytes(bytes: [u8; 4]) -> i32 {
    i32::from_be_bytes(bytes)
}

pub fn f32_to_bytes(value: f32) -> [u8; 4] {
    value.to_be_bytes()
}

pub fn f32_from_bytes(bytes: [u8; 4]) -> f32 {
    f32::from_be_bytes(bytes)
}

pub fn i64_to_bytes(value: i64) -> [u8; 8] {
    value.to_be_bytes()
}

pub fn i64_from_bytes(bytes: [u8; 8]) -> i64 {
    i64::from_be_bytes(bytes)
}

pub fn byte_to_bytes(value: u8) -> [u8; 1] {
    [value]
}

pub fn byte_from_bytes(bytes: [u8; 1]) -> u8 {
    bytes[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_significant_first() {
        assert_eq!(i32_to_bytes(16), [0, 0, 0, 16]);
        assert_eq!(i32_to_bytes(-1), [0xff; 4]);
        assert_eq!(i64_to_bytes(258), [0, 0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(f32_to_bytes(50.0), [0x42, 0x48, 0, 0]);
    }

    #[test]
    fn known_decodes() {
        assert_eq!(i32_from_bytes([0xca, 0xfe, 0xde, 0xed]), 0xcafe_deed_u32 as i32);
        assert_eq!(f32_from_bytes([0x3f, 0x80, 0, 0]), 1.0);
        assert_eq!(i64_from_bytes([0, 0, 0, 0, 0, 0, 0x0e, 0x10]), 3600);
        assert_eq!(byte_from_bytes(byte_to_bytes(0xbe)), 0xbe);
    }
}
