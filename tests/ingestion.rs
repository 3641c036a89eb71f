#![warn(clippy::pedantic)]

use std::io::Write;

use biasx::{load_samples, AnalysisConfig, BiasTest, Delimiter, IngestError, SampleSeries};
use tempfile::NamedTempFile;

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write data");
    file
}

#[test]
fn loading_twice_is_idempotent() {
    let file = write_file("Displacement (mm),Force (N)\n0.12,0.30\n1.12,8.30\n2.12,19.80\n3.12,33.10\n");
    let first = load_samples(file.path(), Delimiter::Byte(b',')).expect("valid file");
    let second = load_samples(file.path(), Delimiter::Byte(b',')).expect("valid file");
    assert_eq!(first, second);
    assert_eq!(first.displacement()[0], 0.0);
    assert_eq!(first.force()[0], 0.0);
    assert_eq!(first.len(), 4);
}

#[test]
fn offset_is_applied_once() {
    let file = write_file("d f\n5.0 2.0\n6.0 4.0\n");
    let samples = load_samples(file.path(), Delimiter::Whitespace).expect("valid file");
    let again = SampleSeries::new(samples.displacement().to_vec(), samples.force().to_vec())
        .expect("paired");
    assert_eq!(samples, again);
    assert_eq!(samples.displacement().to_vec(), vec![0.0, 1.0]);
    assert_eq!(samples.force().to_vec(), vec![0.0, 2.0]);
}

#[test]
fn missing_file_is_an_io_error() {
    let error = load_samples("/nonexistent/bias.csv", Delimiter::default()).expect_err("missing");
    assert!(matches!(error, IngestError::Io(_)));
}

#[test]
fn configuration_drives_a_full_run() {
    let data = write_file("d;f\n0;0\n1;10\n2;20\n3;30\n");
    let config = AnalysisConfig::from_json(&format!(
        r#"{{"specimen": {{"width": 150, "length": 450, "name": "Flax 250"}},
            "input": {:?}, "delimiter": ";"}}"#,
        data.path().display().to_string()
    ))
    .expect("valid configuration");

    let specimen = config.specimen.to_specimen().expect("valid geometry");
    let input = config.input.clone().expect("input given");
    let samples = load_samples(input, config.delimiter().expect("ascii")).expect("valid file");
    let mut test = BiasTest::new(specimen, samples).expect("angles in domain");
    test.evaluate(&config.solver_options()).expect("computable");

    let text = test.to_string();
    assert!(text.contains("Material:  Flax 250"));
    assert!(text.contains("Experimental data: 4 points"));
}
