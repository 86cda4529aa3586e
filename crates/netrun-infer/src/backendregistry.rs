use crate::{Backend, InferError};
use std::collections::HashMap;

pub struct BackendRegistry {
    backends: HashMap<String, Box<dyn Backend>>,
    order: Vec<String>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, backend: Box<dyn Backend>) {
        let name = backend.name().to_string();
        if self.backends.insert(name.clone(), backend).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Backend> {
        self.backends.get(name).map(|b| &**b as &dyn Backend)
    }

    /// Backend names in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// The named backend, or the first registered one when `name` is None.
    pub fn resolve(&self, name: Option<&str>) -> Result<&dyn Backend, InferError> {
        let name = match name {
            Some(name) => name,
            None => self.order.first().map(|s| s.as_str()).unwrap_or(""),
        };
        self.get(name).ok_or_else(|| InferError::UnknownBackend {
            name: name.to_string(),
            available: self.order.clone(),
        })
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry holding every backend compiled into this build.
pub fn create_registry() -> BackendRegistry {
    #[cfg(feature = "onnx")]
    let mut registry = BackendRegistry::new();
    #[cfg(not(feature = "onnx"))]
    let registry = BackendRegistry::new();

    #[cfg(feature = "onnx")]
    {
        use crate::backends::OnnxBackend;
        registry.register(Box::new(OnnxBackend));
    }

    registry
}
