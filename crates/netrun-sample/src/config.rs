use crate::{ErrorPolicy, SampleError};
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use netrun_infer::Runtime;
use std::{fmt, path::PathBuf};

/// How input and output data reach the network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BufferType {
    /// Application-owned buffers registered once and refreshed in place.
    #[default]
    #[value(name = "USERBUFFER")]
    UserBuffer,
    /// Tensors allocated per line and moved into the network.
    #[value(name = "ITENSOR")]
    ITensor,
}

impl fmt::Display for BufferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferType::UserBuffer => write!(f, "USERBUFFER"),
            BufferType::ITensor => write!(f, "ITENSOR"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RuntimeKind {
    Cpu,
    Gpu,
}

#[derive(Parser, Debug)]
#[command(
    name = "netrun-sample",
    version,
    about = "Run a list of raw inputs through a network and dump its outputs"
)]
pub struct Cli {
    /// Path to the model container
    #[arg(short = 'd', long)]
    pub container: PathBuf,

    /// File listing one input per line (several paths per line for multi-input networks)
    #[arg(short = 'i', long)]
    pub input_list: PathBuf,

    /// Directory receiving Result_<n>/<output>.raw
    #[arg(short = 'o', long, env = "NETRUN_OUTPUT_DIR", default_value = "./output/")]
    pub output_dir: PathBuf,

    /// Buffer strategy
    #[arg(
        short = 'b',
        long,
        value_enum,
        ignore_case = true,
        env = "NETRUN_BUFFER_TYPE",
        default_value = "USERBUFFER"
    )]
    pub buffer_type: BufferType,

    /// Compute runtime; an unavailable GPU falls back to CPU
    #[arg(short = 'r', long, value_enum, env = "NETRUN_RUNTIME", default_value = "gpu")]
    pub runtime: RuntimeKind,

    /// GPU device ordinal
    #[arg(long, default_value_t = 0)]
    pub device_id: i32,

    /// Inference backend (defaults to the first one compiled in)
    #[arg(long)]
    pub backend: Option<String>,

    /// Log failing input lines and carry on with the next one
    #[arg(long)]
    pub continue_on_error: bool,

    /// More output (-v debug, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write the log into the output directory
    #[arg(long)]
    pub log_file: bool,
}

/// Everything a run needs, resolved from the command line.
#[derive(Clone, Debug)]
pub struct SampleConfig {
    pub container: PathBuf,
    pub input_list: PathBuf,
    pub output_dir: PathBuf,
    pub buffer_type: BufferType,
    pub runtime: Runtime,
    pub backend: Option<String>,
    pub policy: ErrorPolicy,
    pub log_level: LevelFilter,
    pub log_to_file: bool,
}

impl From<Cli> for SampleConfig {
    fn from(cli: Cli) -> Self {
        let runtime = match cli.runtime {
            RuntimeKind::Cpu => Runtime::Cpu,
            RuntimeKind::Gpu => Runtime::Gpu {
                device_id: cli.device_id,
            },
        };
        let log_level = match cli.verbose {
            0 => netrun_base::default_level(),
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        let policy = if cli.continue_on_error {
            ErrorPolicy::SkipLine
        } else {
            ErrorPolicy::Abort
        };

        SampleConfig {
            container: cli.container,
            input_list: cli.input_list,
            output_dir: cli.output_dir,
            buffer_type: cli.buffer_type,
            runtime,
            backend: cli.backend,
            policy,
            log_level,
            log_to_file: cli.log_file,
        }
    }
}

impl SampleConfig {
    /// Check that the container and the input list are readable files.
    pub fn validate(&self) -> Result<(), SampleError> {
        for path in [&self.container, &self.input_list] {
            let metadata =
                std::fs::metadata(path).map_err(|e| SampleError::io(path.as_path(), e))?;
            if !metadata.is_file() {
                return Err(SampleError::FileNotFound { path: path.clone() });
            }
        }
        Ok(())
    }
}
