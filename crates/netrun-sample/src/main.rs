use anyhow::{Context, bail};
use clap::Parser;
use netrun_base::log_fatal;
use netrun_infer::{ModelSource, create_registry, select_runtime};
use netrun_sample::{Cli, SampleConfig, run_sample};

fn main() {
    let config = SampleConfig::from(Cli::parse());
    init_logging(&config);

    if let Err(e) = config.validate() {
        log_fatal!("{}. Run netrun-sample -h for details", e);
    }
    if let Err(e) = run(&config) {
        log_fatal!("{:#}", e);
    }
}

fn init_logging(config: &SampleConfig) {
    if !config.log_to_file {
        netrun_base::init_stdout_logger(config.log_level);
        return;
    }
    if let Err(e) = netrun_base::init_tee_logger(config.log_level, &config.output_dir) {
        netrun_base::init_stdout_logger(config.log_level);
        log::warn!(
            "cannot write log into {}: {}",
            config.output_dir.display(),
            e
        );
    }
}

fn run(config: &SampleConfig) -> anyhow::Result<()> {
    let registry = create_registry();
    if registry.list().is_empty() {
        bail!("no inference backend compiled in, rebuild with --features onnx");
    }

    let backend = registry.resolve(config.backend.as_deref())?;
    let runtime = select_runtime(backend, config.runtime.clone())?;
    log::info!("backend {} on {}", backend.name(), runtime);

    let mut network = backend
        .load_network(ModelSource::File(config.container.clone()), runtime)
        .with_context(|| format!("loading {}", config.container.display()))?;

    let summary = run_sample(network.as_mut(), config)
        .with_context(|| format!("running {}", config.input_list.display()))?;

    log::info!(
        "{} inputs processed, {} failed, {} lines skipped",
        summary.processed,
        summary.failed,
        summary.skipped
    );
    if let Some(mean) = summary.mean_execute_time() {
        log::info!(
            "execute: {:?} total, {:?} per input",
            summary.execute_time,
            mean
        );
    }
    log::info!("results in {}", config.output_dir.display());
    Ok(())
}
