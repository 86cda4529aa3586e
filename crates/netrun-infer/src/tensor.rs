use crate::{InferError, TensorShape};
use std::fmt;

/// Owned f32 tensor handed out by a [`TensorFactory`].
///
/// The element count always equals the shape's element count. Tensors are
/// moved into [`TensorMap`]s and from there into `Network::execute`.
#[derive(Clone, PartialEq)]
pub struct Tensor {
    shape: TensorShape,
    data: Vec<f32>,
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("len", &self.data.len())
            .finish()
    }
}

impl Tensor {
    /// Zero-filled tensor. Unconstrained dimensions count as 1.
    pub fn zeros(shape: TensorShape) -> Result<Self, InferError> {
        let len = shape.element_count()?;
        Ok(Self {
            shape,
            data: vec![0.0; len],
        })
    }

    pub fn from_vec(shape: TensorShape, data: Vec<f32>) -> Result<Self, InferError> {
        if shape.element_count()? != data.len() {
            return Err(InferError::ShapeMismatch {
                shape,
                elements: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> &TensorShape {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Elements in tensor order, native endian.
    pub fn to_ne_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }
}

/// Name-keyed owned tensors, kept in insertion order.
#[derive(Debug, Default)]
pub struct TensorMap {
    entries: Vec<(String, Tensor)>,
}

impl TensorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tensor, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, tensor: Tensor) -> Option<Tensor> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, tensor)),
            None => {
                self.entries.push((name, tensor));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Tensor> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }

    pub fn remove(&mut self, name: &str) -> Option<Tensor> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tensor)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for TensorMap {
    type Item = (String, Tensor);
    type IntoIter = std::vec::IntoIter<(String, Tensor)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Allocates owned tensors for a shape.
pub trait TensorFactory {
    fn create_tensor(&self, shape: &TensorShape) -> Result<Tensor, InferError>;
}

/// Factory backed by host memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFactory;

impl TensorFactory for HostFactory {
    fn create_tensor(&self, shape: &TensorShape) -> Result<Tensor, InferError> {
        Tensor::zeros(shape.clone())
    }
}
