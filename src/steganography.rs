use crate::carrier::{CarrierImage, SkipRegion};
use crate::constants::{LENGTH_PREFIX_BITS, LENGTH_PREFIX_BYTES};
use crate::error::CodecError;

fn plane_bits(carrier: &CarrierImage, depth: u8, skip: SkipRegion) -> impl Iterator<Item = u8> {
    let width = carrier.width() as usize;
    let mask = ((1u16 << depth) - 1) as u8;

    carrier
        .rgb()
        .chunks_exact(3)
        .enumerate()
        .filter(move |(index, _)| !skip.contains((index % width) as u32, (index / width) as u32))
        .flat_map(|(_, pixel)| pixel.iter())
        .flat_map(move |&channel| {
            let value = channel & mask;
            (0..depth).rev().map(move |shift| (value >> shift) & 1)
        })
}

/// 按 MSB 优先从每个通道的低 `depth` 位中组装 `byte_count` 个字节。
///
/// 每次调用都从第一个像素重新扫描。
pub fn read_bytes(
    carrier: &CarrierImage,
    depth: u8,
    byte_count: usize,
    skip: SkipRegion,
) -> Result<Vec<u8>, CodecError> {
    if !(1..=8).contains(&depth) {
        return Err(CodecError::UnsupportedDepth(depth));
    }

    let required = byte_count as u64 * 8;
    let mut bytes = Vec::with_capacity(byte_count);
    let mut byte = 0u8;
    let mut read = 0u64;

    for bit in plane_bits(carrier, depth, skip).take(byte_count.saturating_mul(8)) {
        byte = (byte << 1) | bit;
        read += 1;
        if read % 8 == 0 {
            bytes.push(byte);
            byte = 0;
        }
    }

    if bytes.len() < byte_count {
        return Err(CodecError::CapacityExceeded {
            required,
            available: read,
        });
    }
    Ok(bytes)
}

/// 读取长度前缀，再从头重新扫描出完整头部，返回前缀之后的头部字节。
pub fn extract_header_bytes(carrier: &CarrierImage, depth: u8) -> Result<Vec<u8>, CodecError> {
    let available = carrier.available_bits(depth);
    let skip = carrier.skip_region();

    if available < LENGTH_PREFIX_BITS as u64 {
        return Err(CodecError::CapacityExceeded {
            required: LENGTH_PREFIX_BITS as u64,
            available,
        });
    }

    let prefix = read_bytes(carrier, depth, LENGTH_PREFIX_BYTES, skip)?;
    let header_len = prefix.iter().fold(0u64, |value, &b| (value << 8) | b as u64);

    let required = header_len
        .saturating_mul(8)
        .saturating_add(LENGTH_PREFIX_BITS as u64);
    if required > available {
        return Err(CodecError::CapacityExceeded {
            required,
            available,
        });
    }

    log::trace!("depth {depth}: header of {header_len} bytes, {required}/{available} bits");

    let mut header = read_bytes(carrier, depth, LENGTH_PREFIX_BYTES + header_len as usize, skip)?;
    header.drain(..LENGTH_PREFIX_BYTES);
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_SKIP: SkipRegion = SkipRegion { width: 0, height: 0 };

    fn carrier(width: u32, height: u32, rgb: Vec<u8>) -> CarrierImage {
        CarrierImage::new(width, height, rgb).unwrap()
    }

    #[test]
    fn reads_low_bits_msb_first() {
        // 低 2 位依次为 10, 01, 11, 00
        let image = carrier(2, 1, vec![0xFE, 0x01, 0x03, 0xFC, 0, 0]);
        assert_eq!(read_bytes(&image, 2, 1, NO_SKIP).unwrap(), vec![0b1001_1100]);
        assert_eq!(read_bytes(&image, 8, 2, NO_SKIP).unwrap(), vec![0xFE, 0x01]);
    }

    #[test]
    fn six_bit_groups_span_byte_boundaries() {
        // 低 6 位：101010 110011 000111 111000，高位为噪声
        let image = carrier(2, 1, vec![0xEA, 0x73, 0x87, 0x78, 0xFF, 0xFF]);
        assert_eq!(
            read_bytes(&image, 6, 3, NO_SKIP).unwrap(),
            vec![0b1010_1011, 0b0011_0001, 0b1111_1000]
        );
    }

    #[test]
    fn skips_only_the_top_left_rectangle() {
        // 2x2 图像，仅跳过 (0, 0)
        let rgb = vec![
            9, 9, 9, 1, 2, 3, //
            4, 5, 6, 7, 8, 9,
        ];
        let image = carrier(2, 2, rgb);
        let skip = SkipRegion { width: 1, height: 1 };

        assert_eq!(
            read_bytes(&image, 8, 9, skip).unwrap(),
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9]
        );
    }

    #[test]
    fn running_out_of_pixels_is_an_error() {
        let image = carrier(1, 1, vec![0, 0, 0]);
        assert!(matches!(
            read_bytes(&image, 2, 1, NO_SKIP),
            Err(CodecError::CapacityExceeded {
                required: 8,
                available: 6
            })
        ));
    }

    #[test]
    fn out_of_range_depths_are_rejected() {
        let image = carrier(1, 1, vec![0, 0, 0]);
        assert!(matches!(
            read_bytes(&image, 0, 1, NO_SKIP),
            Err(CodecError::UnsupportedDepth(0))
        ));
        assert!(matches!(
            read_bytes(&image, 9, 1, NO_SKIP),
            Err(CodecError::UnsupportedDepth(9))
        ));
    }

    #[test]
    fn zero_bytes_need_no_pixels() {
        let image = carrier(1, 1, vec![0, 0, 0]);
        assert!(read_bytes(&image, 2, 0, NO_SKIP).unwrap().is_empty());
    }

    #[test]
    fn tiny_images_have_no_room_for_a_prefix() {
        // 2x2 像素在 k=2 时只有 24 位
        let image = carrier(2, 2, vec![0xFF; 12]);
        assert!(matches!(
            extract_header_bytes(&image, 2),
            Err(CodecError::CapacityExceeded { required: 32, .. })
        ));
    }

    #[test]
    fn oversized_length_prefix_reports_total_bits() {
        // 所有低位为 1，前缀为 u32::MAX
        let image = carrier(8, 8, vec![0xFF; 8 * 8 * 3]);
        match extract_header_bytes(&image, 8) {
            Err(CodecError::CapacityExceeded {
                required,
                available,
            }) => {
                assert_eq!(required, 32 + u32::MAX as u64 * 8);
                assert_eq!(available, 8 * 8 * 3 * 8);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn header_follows_the_prefix() {
        // k=8 时每个通道即一个字节：前缀 2，随后两个头部字节
        let mut rgb = vec![0, 0, 0, 2, 0xAA, 0xBB];
        rgb.resize(4 * 4 * 3, 0x11);
        let image = carrier(4, 4, rgb);
        assert_eq!(extract_header_bytes(&image, 8).unwrap(), vec![0xAA, 0xBB]);
    }
}
