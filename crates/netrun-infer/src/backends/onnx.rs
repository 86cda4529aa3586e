use crate::{
    Backend, ElementType, InferError, ModelSource, Network, Runtime, Tensor, TensorInfo,
    TensorMap, TensorShape, UserBuffer, UserBufferMap,
};
use ort::{
    session::{Session, SessionInputValue, builder::GraphOptimizationLevel, builder::SessionBuilder},
    tensor::TensorElementType,
    value::{DynValue, ValueType},
};

/// ONNX Runtime, loading `.onnx` containers.
pub struct OnnxBackend;

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn is_available(&self, runtime: &Runtime) -> bool {
        match runtime {
            Runtime::Cpu => true,
            #[cfg(feature = "cuda")]
            Runtime::Gpu { .. } => {
                use ort::execution_providers::{CUDAExecutionProvider, ExecutionProvider};
                CUDAExecutionProvider::default()
                    .is_available()
                    .unwrap_or(false)
            }
            #[cfg(not(feature = "cuda"))]
            Runtime::Gpu { .. } => false,
        }
    }

    fn load_network(
        &self,
        model: ModelSource,
        runtime: Runtime,
    ) -> Result<Box<dyn Network>, InferError> {
        let builder = Session::builder()?.with_optimization_level(GraphOptimizationLevel::Level3)?;
        let builder = configure_runtime(builder, &runtime)?;

        let description = model.describe();
        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(&path),
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes),
        }
        .map_err(|e| InferError::ModelLoad(format!("{}: {}", description, e)))?;

        let inputs = session
            .inputs
            .iter()
            .map(|input| tensor_info(&input.name, &input.input_type))
            .collect::<Result<Vec<_>, _>>()?;
        let outputs = session
            .outputs
            .iter()
            .map(|output| tensor_info(&output.name, &output.output_type))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "[onnx] loaded {} on {} ({} inputs, {} outputs)",
            description,
            runtime,
            inputs.len(),
            outputs.len()
        );

        Ok(Box::new(OnnxNetwork {
            session,
            inputs,
            outputs,
        }))
    }
}

fn configure_runtime(builder: SessionBuilder, runtime: &Runtime) -> Result<SessionBuilder, InferError> {
    match runtime {
        Runtime::Cpu => Ok(builder),
        #[cfg(feature = "cuda")]
        Runtime::Gpu { device_id } => {
            use ort::execution_providers::CUDAExecutionProvider;
            let ep = CUDAExecutionProvider::default()
                .with_device_id(*device_id)
                .build();
            builder
                .with_execution_providers([ep])
                .map_err(|_| InferError::UnsupportedRuntime(runtime.clone()))
        }
        #[cfg(not(feature = "cuda"))]
        Runtime::Gpu { .. } => Err(InferError::UnsupportedRuntime(runtime.clone())),
    }
}

pub struct OnnxNetwork {
    session: Session,
    inputs: Vec<TensorInfo>,
    outputs: Vec<TensorInfo>,
}

impl Network for OnnxNetwork {
    fn inputs(&self) -> &[TensorInfo] {
        &self.inputs
    }

    fn outputs(&self) -> &[TensorInfo] {
        &self.outputs
    }

    fn execute(&mut self, mut inputs: TensorMap) -> Result<TensorMap, InferError> {
        let mut values = Vec::with_capacity(self.inputs.len());
        for info in &self.inputs {
            let tensor = inputs
                .remove(&info.name)
                .ok_or_else(|| missing_input(&info.name, &self.inputs))?;
            if info.element_type != ElementType::Float32 {
                return Err(InferError::UnsupportedElementType(format!(
                    "tensor input '{}' expects {}, tensors carry f32",
                    info.name, info.element_type
                )));
            }
            let dims = tensor.shape().dims().to_vec();
            let value = ort::value::Tensor::from_array((dims, tensor.into_vec()))?;
            values.push((info.name.clone(), SessionInputValue::from(value.into_dyn())));
        }
        if let Some(extra) = inputs.names().next() {
            return Err(InferError::InvalidInput {
                name: extra.to_string(),
                expected_names: names(&self.inputs),
            });
        }

        let outputs = self.session.run(values)?;

        let mut result = TensorMap::new();
        for (name, value) in outputs.iter() {
            if !self.outputs.iter().any(|o| o.name == name) {
                continue;
            }
            let (shape, data) = value.try_extract_tensor::<f32>()?;
            let dims = shape.iter().map(|&d| d.max(0) as usize).collect();
            result.insert(name, Tensor::from_vec(TensorShape::new(dims), data.to_vec())?);
        }
        Ok(result)
    }

    fn execute_user_buffers(
        &mut self,
        inputs: &UserBufferMap,
        outputs: &mut UserBufferMap,
    ) -> Result<Vec<String>, InferError> {
        let mut values = Vec::with_capacity(self.inputs.len());
        for info in &self.inputs {
            let buffer = inputs
                .get(&info.name)
                .ok_or_else(|| missing_input(&info.name, &self.inputs))?;
            values.push((info.name.clone(), user_buffer_value(buffer)?));
        }

        let produced = self.session.run(values)?;

        let mut written = Vec::with_capacity(self.outputs.len());
        for info in &self.outputs {
            let value = produced.get(info.name.as_str()).ok_or_else(|| {
                InferError::Backend(format!("session produced no output '{}'", info.name))
            })?;
            let buffer = outputs.get_mut(&info.name).ok_or_else(|| {
                InferError::Backend(format!("no user buffer for output '{}'", info.name))
            })?;
            copy_into_user_buffer(&info.name, value, buffer)?;
            written.push(info.name.clone());
        }
        Ok(written)
    }
}

fn names(infos: &[TensorInfo]) -> Vec<String> {
    infos.iter().map(|i| i.name.clone()).collect()
}

fn missing_input(name: &str, declared: &[TensorInfo]) -> InferError {
    InferError::InvalidInput {
        name: name.to_string(),
        expected_names: names(declared),
    }
}

fn tensor_info(name: &str, value_type: &ValueType) -> Result<TensorInfo, InferError> {
    let ValueType::Tensor { ty, shape, .. } = value_type else {
        return Err(InferError::UnsupportedElementType(format!(
            "'{}' is not a tensor",
            name
        )));
    };

    // dynamic dimensions come back as -1
    let dims = shape
        .iter()
        .map(|&d| if d < 0 { 0 } else { d as usize })
        .collect();

    Ok(TensorInfo::new(
        name,
        TensorShape::new(dims),
        element_type(*ty)?,
    ))
}

fn element_type(ty: TensorElementType) -> Result<ElementType, InferError> {
    match ty {
        TensorElementType::Float32 => Ok(ElementType::Float32),
        TensorElementType::Float16 => Ok(ElementType::Float16),
        TensorElementType::Uint8 => Ok(ElementType::UInt8),
        TensorElementType::Int32 => Ok(ElementType::Int32),
        TensorElementType::Int64 => Ok(ElementType::Int64),
        other => Err(InferError::UnsupportedElementType(other.to_string())),
    }
}

fn decode<T, const N: usize>(bytes: &[u8], from_bytes: fn([u8; N]) -> T) -> Vec<T> {
    bytes
        .chunks_exact(N)
        .map(|chunk| {
            let mut raw = [0u8; N];
            raw.copy_from_slice(chunk);
            from_bytes(raw)
        })
        .collect()
}

fn encode<T: Copy, const N: usize>(data: &[T], to_bytes: fn(T) -> [u8; N]) -> Vec<u8> {
    data.iter().flat_map(|&v| to_bytes(v)).collect()
}

fn user_buffer_value(buffer: &UserBuffer) -> Result<SessionInputValue<'static>, InferError> {
    let dims: Vec<usize> = buffer.shape().dims().iter().map(|&d| d.max(1)).collect();
    let bytes = buffer.as_bytes();
    let value = match buffer.element_type() {
        ElementType::Float32 => {
            ort::value::Tensor::from_array((dims, decode(bytes, f32::from_ne_bytes)))?.into_dyn()
        }
        ElementType::UInt8 => ort::value::Tensor::from_array((dims, bytes.to_vec()))?.into_dyn(),
        ElementType::Int32 => {
            ort::value::Tensor::from_array((dims, decode(bytes, i32::from_ne_bytes)))?.into_dyn()
        }
        ElementType::Int64 => {
            ort::value::Tensor::from_array((dims, decode(bytes, i64::from_ne_bytes)))?.into_dyn()
        }
        ElementType::Float16 => {
            return Err(InferError::UnsupportedElementType(
                "f16 user buffers".to_string(),
            ));
        }
    };
    Ok(SessionInputValue::from(value))
}

fn copy_into_user_buffer(
    name: &str,
    value: &DynValue,
    buffer: &mut UserBuffer,
) -> Result<(), InferError> {
    let bytes = match buffer.element_type() {
        ElementType::Float32 => encode(value.try_extract_tensor::<f32>()?.1, f32::to_ne_bytes),
        ElementType::UInt8 => value.try_extract_tensor::<u8>()?.1.to_vec(),
        ElementType::Int32 => encode(value.try_extract_tensor::<i32>()?.1, i32::to_ne_bytes),
        ElementType::Int64 => encode(value.try_extract_tensor::<i64>()?.1, i64::to_ne_bytes),
        ElementType::Float16 => {
            return Err(InferError::UnsupportedElementType(
                "f16 user buffers".to_string(),
            ));
        }
    };
    if bytes.len() != buffer.len() {
        return Err(InferError::BufferSize {
            name: name.to_string(),
            expected: buffer.len(),
            actual: bytes.len(),
        });
    }
    buffer.as_bytes_mut().copy_from_slice(&bytes);
    Ok(())
}
