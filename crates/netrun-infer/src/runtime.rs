use std::fmt;

/// Compute runtime a network is loaded onto.
#[derive(Debug, Clone, PartialEq)]
pub enum Runtime {
    Cpu,
    Gpu { device_id: i32 },
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runtime::Cpu => write!(f, "CPU"),
            Runtime::Gpu { device_id } => write!(f, "GPU(device_id={device_id})"),
        }
    }
}
