use crate::{ElementType, InferError, TensorMap, TensorShape, UserBufferMap};

/// Declared name, shape and element encoding of a network input or output.
#[derive(Clone, Debug, PartialEq)]
pub struct TensorInfo {
    pub name: String,
    pub shape: TensorShape,
    pub element_type: ElementType,
}

impl TensorInfo {
    pub fn new(name: impl Into<String>, shape: TensorShape, element_type: ElementType) -> Self {
        Self {
            name: name.into(),
            shape,
            element_type,
        }
    }
}

/// A loaded, compiled model.
pub trait Network {
    /// Declared inputs, in the network's order.
    fn inputs(&self) -> &[TensorInfo];

    /// Declared outputs, in the network's order.
    fn outputs(&self) -> &[TensorInfo];

    /// Run with owned input tensors and return one tensor per declared output.
    fn execute(&mut self, inputs: TensorMap) -> Result<TensorMap, InferError>;

    /// Run reading the input user buffers and filling the output user buffers.
    ///
    /// Returns the names of the outputs that were written.
    fn execute_user_buffers(
        &mut self,
        inputs: &UserBufferMap,
        outputs: &mut UserBufferMap,
    ) -> Result<Vec<String>, InferError>;

    fn input_names(&self) -> Vec<&str> {
        self.inputs().iter().map(|i| i.name.as_str()).collect()
    }

    fn output_names(&self) -> Vec<&str> {
        self.outputs().iter().map(|o| o.name.as_str()).collect()
    }

    /// Look up an input or output by name.
    fn tensor_info(&self, name: &str) -> Option<&TensorInfo> {
        self.inputs()
            .iter()
            .chain(self.outputs())
            .find(|info| info.name == name)
    }
}
