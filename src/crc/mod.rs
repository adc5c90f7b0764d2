use crc::{CRC_16_XMODEM, CRC_32_ISCSI, Crc};

/// Checksum of user-friendly addresses
pub const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// CRC32C, appended to bags of cells when the crc flag is set
pub const CRC32C: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);
