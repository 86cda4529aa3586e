pub mod logging;

pub use logging::{
    FileLogger, StdoutLogger, TeeLogger, default_level, init_stdout_logger, init_tee_logger,
};

// Re-export log crate so downstream crates can use netrun_base::log::*
pub use log;
