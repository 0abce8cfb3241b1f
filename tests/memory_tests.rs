//! Data image tests: little-endian access, sparsity, bounds checking.

use rv32sim::common::SimError;
use rv32sim::core::memory::DataImage;

#[test]
fn test_absent_bytes_read_zero() {
    let data = DataImage::default();
    assert_eq!(data.read_u8(0x1000_0000).unwrap(), 0);
    assert_eq!(data.read_u32(0x1000_0000).unwrap(), 0);
}

#[test]
fn test_little_endian_word_round_trip() {
    let mut data = DataImage::default();
    data.write_u32(0x1000_0000, 0x1234_5678).unwrap();

    assert_eq!(data.read_u32(0x1000_0000).unwrap(), 0x1234_5678);
    assert_eq!(data.read_u8(0x1000_0000).unwrap(), 0x78, "low byte first");
    assert_eq!(data.read_u8(0x1000_0003).unwrap(), 0x12);
}

#[test]
fn test_little_endian_half_round_trip() {
    let mut data = DataImage::default();
    data.write_u16(0x1000_0000, 0xabcd).unwrap();

    assert_eq!(data.read_u16(0x1000_0000).unwrap(), 0xabcd);
    assert_eq!(data.read_u8(0x1000_0000).unwrap(), 0xcd);
    assert_eq!(data.read_u8(0x1000_0001).unwrap(), 0xab);
}

#[test]
fn test_unaligned_word_access_allowed() {
    let mut data = DataImage::default();
    data.write_u32(0x1000_0001, 0xdead_beef).unwrap();
    assert_eq!(data.read_u32(0x1000_0001).unwrap(), 0xdead_beef);
}

#[test]
fn test_out_of_range_read_fails() {
    let data = DataImage::default();
    match data.read_u32(0x7fff_fffd) {
        Err(SimError::MemoryRange { addr, size }) => {
            assert_eq!(addr, 0x7fff_fffd);
            assert_eq!(size, 4);
        }
        other => panic!("expected MemoryRange, got {:?}", other),
    }
}

#[test]
fn test_out_of_range_write_fails() {
    let mut data = DataImage::default();
    assert!(data.write_u8(0x8000_0000, 1).is_err());
    assert!(data.write_u32(0x7fff_fffc, 1).is_ok(), "last word is in range");
}

#[test]
fn test_address_wraparound_rejected() {
    let data = DataImage::default();
    assert!(data.read_u32(0xffff_fffe).is_err());
}
