use crate::InferError;
use std::fmt;

/// Ordered tensor dimensions. A dimension of 0 is unconstrained and gets
/// its size from the data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TensorShape(Vec<usize>);

impl TensorShape {
    pub fn new(dims: Vec<usize>) -> Self {
        Self(dims)
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// True when no dimension is unconstrained.
    pub fn is_fixed(&self) -> bool {
        !self.0.contains(&0)
    }

    /// Number of elements, counting unconstrained dimensions as 1.
    pub fn element_count(&self) -> Result<usize, InferError> {
        self.0.iter().try_fold(1usize, |acc, &dim| {
            acc.checked_mul(dim.max(1)).ok_or(InferError::ShapeOverflow)
        })
    }

    /// Fix the first unconstrained dimension so the shape holds `elements`.
    ///
    /// Further unconstrained dimensions become 1. A fixed shape is returned
    /// unchanged.
    pub fn resolve(&self, elements: usize) -> Result<TensorShape, InferError> {
        let Some(first) = self.0.iter().position(|&d| d == 0) else {
            return Ok(self.clone());
        };

        let fixed = self.element_count()?;
        if elements == 0 || elements % fixed != 0 {
            return Err(InferError::ShapeMismatch {
                shape: self.clone(),
                elements,
            });
        }

        let dims = self
            .0
            .iter()
            .enumerate()
            .map(|(i, &d)| match (i == first, d) {
                (true, _) => elements / fixed,
                (false, 0) => 1,
                (false, d) => d,
            })
            .collect();
        Ok(TensorShape(dims))
    }

    /// Row-major byte strides for elements of `element_size` bytes.
    ///
    /// Unconstrained dimensions are laid out as size 1.
    pub fn byte_strides(&self, element_size: usize) -> Vec<usize> {
        let mut strides = vec![0; self.0.len()];
        let mut stride = element_size;
        for (i, &dim) in self.0.iter().enumerate().rev() {
            strides[i] = stride;
            stride *= dim.max(1);
        }
        strides
    }
}

impl From<Vec<usize>> for TensorShape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

impl From<&[usize]> for TensorShape {
    fn from(dims: &[usize]) -> Self {
        Self(dims.to_vec())
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
