use crate::{
    BufferMapBuilder, InputLine, InputList, ResultWriter, SampleConfig, SampleError,
    buffers::create_buffers,
};
use netrun_infer::Network;
use std::{
    io::BufRead,
    time::{Duration, Instant},
};

/// What happens when an input line cannot be processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the run at the first failure.
    #[default]
    Abort,
    /// Log the failure and move on. The failed line still uses up its run
    /// index. Network failures abort regardless.
    SkipLine,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Total time spent inside execute.
    pub execute_time: Duration,
}

impl RunSummary {
    pub fn mean_execute_time(&self) -> Option<Duration> {
        if self.processed == 0 {
            return None;
        }
        Some(self.execute_time.div_f64(self.processed as f64))
    }
}

/// Drives one buffer strategy over an input list, line by line.
pub struct Runner<'a> {
    network: &'a mut dyn Network,
    buffers: Box<dyn BufferMapBuilder>,
    writer: ResultWriter,
    policy: ErrorPolicy,
}

impl<'a> Runner<'a> {
    pub fn new(
        network: &'a mut dyn Network,
        buffers: Box<dyn BufferMapBuilder>,
        writer: ResultWriter,
        policy: ErrorPolicy,
    ) -> Self {
        Self {
            network,
            buffers,
            writer,
            policy,
        }
    }

    pub fn run<R: BufRead>(&mut self, mut list: InputList<R>) -> Result<RunSummary, SampleError> {
        let mut summary = RunSummary::default();

        for line in list.by_ref() {
            let line = line?;
            let run_index = summary.processed + summary.failed;

            match self.process_line(&line, run_index) {
                Ok(elapsed) => {
                    summary.processed += 1;
                    summary.execute_time += elapsed;
                }
                Err(err) if self.policy == ErrorPolicy::SkipLine && err.is_line_error() => {
                    log::error!("line {} failed, skipping: {}", line.line_number, err);
                    summary.failed += 1;
                }
                Err(err) => return Err(err),
            }
        }

        summary.skipped = list.skipped();
        Ok(summary)
    }

    fn process_line(&mut self, line: &InputLine, run_index: usize) -> Result<Duration, SampleError> {
        self.buffers.load(&*self.network, line)?;

        let started = Instant::now();
        self.buffers.execute(&mut *self.network)?;
        let elapsed = started.elapsed();
        log::debug!("Result_{}: execute took {:?}", run_index, elapsed);

        self.buffers.write(&self.writer, run_index)?;
        Ok(elapsed)
    }
}

/// Run every line of the configured input list through `network`.
pub fn run_sample(network: &mut dyn Network, config: &SampleConfig) -> Result<RunSummary, SampleError> {
    let list = InputList::open(&config.input_list)?;
    log::info!("using {} buffers", config.buffer_type);
    let buffers = create_buffers(config.buffer_type, &*network)?;
    let writer = ResultWriter::new(&config.output_dir);

    Runner::new(network, buffers, writer, config.policy).run(list)
}
