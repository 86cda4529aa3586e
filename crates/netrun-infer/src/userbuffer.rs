use crate::{ElementType, InferError, TensorShape};
use std::fmt;

/// Application-allocated storage registered with the SDK for zero-copy I/O.
///
/// The byte region has a fixed length for its whole life, so the memory the
/// SDK was handed stays valid across refreshes. Only its contents change.
pub struct UserBuffer {
    data: Box<[u8]>,
    shape: TensorShape,
    strides: Vec<usize>,
    element_type: ElementType,
}

impl fmt::Debug for UserBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserBuffer")
            .field("len", &self.data.len())
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("element_type", &self.element_type)
            .finish()
    }
}

impl UserBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Address of the registered storage.
    pub fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn shape(&self) -> &TensorShape {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }
}

/// Wraps application storage into SDK user buffers.
pub trait UserBufferFactory {
    /// Register `storage` as a user buffer with the given layout.
    ///
    /// Fails if the storage length does not match shape, strides and
    /// element size.
    fn create_user_buffer(
        &self,
        name: &str,
        storage: Box<[u8]>,
        shape: &TensorShape,
        strides: Vec<usize>,
        element_type: ElementType,
    ) -> Result<UserBuffer, InferError>;
}

impl UserBufferFactory for crate::HostFactory {
    fn create_user_buffer(
        &self,
        name: &str,
        storage: Box<[u8]>,
        shape: &TensorShape,
        strides: Vec<usize>,
        element_type: ElementType,
    ) -> Result<UserBuffer, InferError> {
        let expected = shape
            .element_count()?
            .checked_mul(element_type.size())
            .ok_or(InferError::ShapeOverflow)?;
        if storage.len() != expected {
            return Err(InferError::BufferSize {
                name: name.to_string(),
                expected,
                actual: storage.len(),
            });
        }
        if strides.len() != shape.rank() {
            return Err(InferError::Runtime(format!(
                "buffer '{}' has {} strides for rank {}",
                name,
                strides.len(),
                shape.rank()
            )));
        }
        Ok(UserBuffer {
            data: storage,
            shape: shape.clone(),
            strides,
            element_type,
        })
    }
}

/// Name-keyed user buffers, kept in insertion order.
#[derive(Debug, Default)]
pub struct UserBufferMap {
    entries: Vec<(String, UserBuffer)>,
}

impl UserBufferMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, buffer: UserBuffer) -> Option<UserBuffer> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, buffer)),
            None => {
                self.entries.push((name, buffer));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&UserBuffer> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut UserBuffer> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserBuffer)> {
        self.entries.iter().map(|(n, b)| (n.as_str(), b))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut UserBuffer)> {
        self.entries.iter_mut().map(|(n, b)| (n.as_str(), b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
