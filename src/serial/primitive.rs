//! Big-endian serialization of primitive integers.

use std::io::{Read, Write};
use std::mem::size_of;

use anyhow::Result;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use super::Serializable;

macro_rules! common_def {
    ($int:ident, $write:ident, $read:ident) => {
        impl Serializable for $int {
            fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
                writer.$write::<BigEndian>(*self)?;
                Ok(size_of::<Self>())
            }

            fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
                Ok(reader.$read::<BigEndian>()?)
            }

            fn size_in_bytes(&self) -> usize {
                size_of::<Self>()
            }

            fn size_of() -> Option<usize> {
                Some(size_of::<Self>())
            }
        }
    };
}

common_def!(u16, write_u16, read_u16);
common_def!(u32, write_u32, read_u32);
common_def!(u64, write_u64, read_u64);

impl Serializable for u8 {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        writer.write_u8(*self)?;
        Ok(size_of::<Self>())
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        Ok(reader.read_u8()?)
    }

    fn size_in_bytes(&self) -> usize {
        size_of::<Self>()
    }

    fn size_of() -> Option<usize> {
        Some(size_of::<Self>())
    }
}

// usize is persisted as eight big-endian bytes regardless of platform width.
impl Serializable for usize {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        writer.write_u64::<BigEndian>(*self as u64)?;
        Ok(size_of::<u64>())
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        Ok(reader.read_u64::<BigEndian>()? as usize)
    }

    fn size_in_bytes(&self) -> usize {
        size_of::<u64>()
    }

    fn size_of() -> Option<usize> {
        Some(size_of::<u64>())
    }
}

impl Serializable for bool {
    fn serialize_into<W: Write>(&self, writer: W) -> Result<usize> {
        (*self as u8).serialize_into(writer)
    }

    fn deserialize_from<R: Read>(reader: R) -> Result<Self> {
        u8::deserialize_from(reader).map(|x| x != 0)
    }

    fn size_in_bytes(&self) -> usize {
        size_of::<u8>()
    }

    fn size_of() -> Option<usize> {
        Some(size_of::<u8>())
    }
}
