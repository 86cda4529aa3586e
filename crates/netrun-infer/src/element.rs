use std::fmt;

/// Element encoding of a network slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Float32,
    Float16,
    /// 8-bit quantized
    UInt8,
    Int32,
    Int64,
}

impl ElementType {
    /// Size of one element in bytes.
    pub fn size(self) -> usize {
        match self {
            ElementType::Float32 => 4,
            ElementType::Float16 => 2,
            ElementType::UInt8 => 1,
            ElementType::Int32 => 4,
            ElementType::Int64 => 8,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Float32 => "f32",
            ElementType::Float16 => "f16",
            ElementType::UInt8 => "u8",
            ElementType::Int32 => "i32",
            ElementType::Int64 => "i64",
        };
        f.write_str(name)
    }
}
