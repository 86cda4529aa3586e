mod common;

use common::*;
use netrun_infer::Runtime;
use netrun_sample::{
    BufferType, ErrorPolicy, InputList, ResultWriter, RunSummary, Runner, SampleConfig,
    SampleError, create_buffers, run_sample,
};
use std::{fs, io::Cursor, path::Path};

fn run_list(
    network: &mut FakeNetwork,
    buffer_type: BufferType,
    list: &str,
    out: &Path,
    policy: ErrorPolicy,
) -> Result<RunSummary, SampleError> {
    let buffers = create_buffers(buffer_type, &*network)?;
    let mut runner = Runner::new(network, buffers, ResultWriter::new(out), policy);
    runner.run(InputList::new(Cursor::new(list.to_string())))
}

fn left_right_network() -> FakeNetwork {
    FakeNetwork::new(
        vec![f32_info("left", &[2]), f32_info("right", &[2])],
        vec![f32_info("out", &[4])],
    )
}

#[test]
fn test_end_to_end_image_input() {
    for buffer_type in [BufferType::ITensor, BufferType::UserBuffer] {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("img.raw");
        let values: Vec<f32> = (0..150528).map(|i| (i % 255) as f32 / 255.0).collect();
        write_floats(&input, &values);

        let mut network = FakeNetwork::single("data", &[1, 3, 224, 224], "prob", &[1, 1000]);
        let out = dir.path().join("out");
        let summary = run_list(
            &mut network,
            buffer_type,
            &format!("{}\n", path_str(&input)),
            &out,
            ErrorPolicy::Abort,
        )
        .unwrap();

        assert_eq!(summary.processed, 1);
        let result = fs::read(out.join("Result_0/prob.raw")).unwrap();
        assert_eq!(result.len(), 1000 * 4);
        assert_eq!(result, floats_to_bytes(&values[..1000]));
        assert_eq!(network.seen[0][0].1.len(), 150528 * 4);
    }
}

#[test]
fn test_blank_lines_do_not_consume_run_index() {
    for buffer_type in [BufferType::ITensor, BufferType::UserBuffer] {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.raw");
        let b = dir.path().join("b.raw");
        write_floats(&a, &[1.0; 4]);
        write_floats(&b, &[2.0; 4]);

        let mut network = FakeNetwork::single("data", &[4], "prob", &[4]);
        let out = dir.path().join("out");
        let list = format!("{}\n\n   \n# warmup\n{}\n", path_str(&a), path_str(&b));
        let summary = run_list(&mut network, buffer_type, &list, &out, ErrorPolicy::Abort).unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.skipped, 3);
        assert_eq!(
            fs::read(out.join("Result_0/prob.raw")).unwrap(),
            floats_to_bytes(&[1.0; 4])
        );
        assert_eq!(
            fs::read(out.join("Result_1/prob.raw")).unwrap(),
            floats_to_bytes(&[2.0; 4])
        );
        assert!(!out.join("Result_2").exists());
    }
}

#[test]
fn test_left_right_mapping() {
    for buffer_type in [BufferType::ITensor, BufferType::UserBuffer] {
        let dir = tempfile::tempdir().unwrap();
        let l = dir.path().join("l.raw");
        let r = dir.path().join("r.raw");
        write_floats(&l, &[1.0, 2.0]);
        write_floats(&r, &[3.0, 4.0]);

        let mut network = left_right_network();
        let out = dir.path().join("out");
        let list = format!("{} {}\n", path_str(&l), path_str(&r));
        run_list(&mut network, buffer_type, &list, &out, ErrorPolicy::Abort).unwrap();

        let seen = &network.seen[0];
        assert_eq!(seen[0], ("left".to_string(), floats_to_bytes(&[1.0, 2.0])));
        assert_eq!(seen[1], ("right".to_string(), floats_to_bytes(&[3.0, 4.0])));
        assert_eq!(
            fs::read(out.join("Result_0/out.raw")).unwrap(),
            floats_to_bytes(&[1.0, 2.0, 3.0, 4.0])
        );
    }
}

#[test]
fn test_one_path_for_two_inputs_never_executes() {
    for buffer_type in [BufferType::ITensor, BufferType::UserBuffer] {
        let dir = tempfile::tempdir().unwrap();
        let l = dir.path().join("l.raw");
        write_floats(&l, &[1.0, 2.0]);

        let mut network = left_right_network();
        let out = dir.path().join("out");
        let list = format!("{}\n", path_str(&l));
        let err = run_list(&mut network, buffer_type, &list, &out, ErrorPolicy::Abort).unwrap_err();

        assert!(matches!(
            err,
            SampleError::ArgumentCountMismatch { .. } | SampleError::InputArityMismatch { .. }
        ));
        assert_eq!(network.executions, 0);
        assert!(!out.join("Result_0").exists());
    }
}

#[test]
fn test_abort_stops_at_first_bad_line() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.raw");
    write_floats(&a, &[1.0; 4]);

    let mut network = FakeNetwork::single("data", &[4], "prob", &[4]);
    let out = dir.path().join("out");
    let list = format!("{}\nmissing.raw\n{}\n", path_str(&a), path_str(&a));
    let err = run_list(&mut network, BufferType::ITensor, &list, &out, ErrorPolicy::Abort).unwrap_err();

    assert!(matches!(err, SampleError::FileNotFound { .. }));
    assert_eq!(network.executions, 1);
    assert!(!out.join("Result_1").exists());
}

#[test]
fn test_skip_line_keeps_going() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.raw");
    write_floats(&a, &[1.0; 4]);

    let mut network = FakeNetwork::single("data", &[4], "prob", &[4]);
    let out = dir.path().join("out");
    let list = format!("{}\nmissing.raw\n{}\n", path_str(&a), path_str(&a));
    let summary =
        run_list(&mut network, BufferType::UserBuffer, &list, &out, ErrorPolicy::SkipLine).unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 1);
    assert!(out.join("Result_0/prob.raw").exists());
    assert!(!out.join("Result_1").exists());
    assert!(out.join("Result_2/prob.raw").exists());
}

#[test]
fn test_network_failure_aborts_even_when_skipping() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.raw");
    write_floats(&a, &[1.0; 4]);

    let mut network = FakeNetwork::single("data", &[4], "prob", &[4]);
    network.fail = true;
    let list = format!("{}\n{}\n", path_str(&a), path_str(&a));
    let err = run_list(
        &mut network,
        BufferType::ITensor,
        &list,
        &dir.path().join("out"),
        ErrorPolicy::SkipLine,
    )
    .unwrap_err();

    assert!(matches!(err, SampleError::Inference(_)));
}

#[test]
fn test_mean_execute_time() {
    let summary = RunSummary {
        processed: 4,
        execute_time: std::time::Duration::from_millis(100),
        ..Default::default()
    };
    assert_eq!(
        summary.mean_execute_time(),
        Some(std::time::Duration::from_millis(25))
    );
    assert_eq!(RunSummary::default().mean_execute_time(), None);

    let large = RunSummary {
        processed: u32::MAX as usize + 2,
        execute_time: std::time::Duration::from_secs(u32::MAX as u64 + 2),
        ..Default::default()
    };
    let mean = large.mean_execute_time().unwrap();
    assert!((mean.as_secs_f64() - 1.0).abs() < 1e-6);
}

#[test]
fn test_run_sample_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.raw");
    write_floats(&input, &[0.25; 6]);
    let list = dir.path().join("list.txt");
    fs::write(&list, format!("{}\n", path_str(&input))).unwrap();

    let config = SampleConfig {
        container: dir.path().join("model.onnx"),
        input_list: list,
        output_dir: dir.path().join("out"),
        buffer_type: BufferType::UserBuffer,
        runtime: Runtime::Cpu,
        backend: None,
        policy: ErrorPolicy::Abort,
        log_level: log::LevelFilter::Info,
        log_to_file: false,
    };

    let mut network = FakeNetwork::single("data", &[2, 3], "prob", &[2]);
    let summary = run_sample(&mut network, &config).unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(
        fs::read(dir.path().join("out/Result_0/prob.raw")).unwrap(),
        floats_to_bytes(&[0.25; 2])
    );
}

#[test]
fn test_missing_output_fails_instead_of_writing_stale_data() {
    for buffer_type in [BufferType::ITensor, BufferType::UserBuffer] {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.raw");
        write_floats(&a, &[1.0; 4]);

        let mut network = FakeNetwork::new(
            vec![f32_info("data", &[4])],
            vec![f32_info("boxes", &[4]), f32_info("scores", &[2])],
        );
        let out = dir.path().join("out");
        let list = format!("{}\n", path_str(&a));
        run_list(&mut network, buffer_type, &list, &out, ErrorPolicy::Abort).unwrap();
        assert!(out.join("Result_0/scores.raw").exists());

        network.skip_output = Some("scores".to_string());
        let list = format!("{}\n{}\n", path_str(&a), path_str(&a));
        let err = run_list(&mut network, buffer_type, &list, &out, ErrorPolicy::SkipLine).unwrap_err();

        assert!(matches!(err, SampleError::Inference(_)));
        assert!(!out.join("Result_1").exists());
    }
}
