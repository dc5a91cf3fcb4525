//! Error handling integration tests

use super::*;
use crate::config::ProcessorConfig;
use crate::error::{ProcessingError, SosError};
use crate::processor::BatchProcessor;
use tempfile::TempDir;

#[tokio::test]
async fn test_first_failure_aborts_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let broken = write_response(temp_dir.path(), "broken.xml", "<om:ObservationCollection");

    let processor = BatchProcessor::new(
        temp_dir.path().join("out"),
        ProcessorConfig::default().with_workers(1),
    )
    .unwrap();
    let result = processor.process_files(&[broken.clone()]).await;

    match result.unwrap_err() {
        ProcessingError::Parse { path, source } => {
            assert_eq!(path, broken);
            assert!(matches!(source, SosError::MalformedDocument { .. }));
        }
        other => panic!("Expected Parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_continue_on_error_counts_failures() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = temp_dir.path().join("in");
    write_response(&inputs, "good.xml", OM1_RESPONSE);
    write_response(
        &inputs,
        "unknown.xml",
        r#"<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs"/>"#,
    );

    let config = ProcessorConfig::default().with_continue_on_error(true);
    let processor = BatchProcessor::new(temp_dir.path().join("out"), config).unwrap();
    let stats = processor
        .process_inputs(&[inputs.to_string_lossy().to_string()])
        .await
        .unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.failures[0].0, inputs.join("unknown.xml"));
    assert!(stats.failures[0].1.contains("Unrecognized observation dialect"));
}

#[tokio::test]
async fn test_strict_mode_reaches_the_parser() {
    let temp_dir = TempDir::new().unwrap();
    let observation = |extra: &str| {
        format!(
            r#"<om:member><om:Observation>
      <om:samplingTime><gml:TimeInstant><gml:timePosition>2015-06-01T12:00:00Z</gml:timePosition></gml:TimeInstant></om:samplingTime>
      <om:procedure xlink:href="urn:sensor:1"/>
      <om:observedProperty xlink:href="urn:phenomenon:temperature"/>
      <om:featureOfInterest xlink:href="urn:station:1"/>
      {extra}
      <om:result>12.5</om:result>
    </om:Observation></om:member>"#
        )
    };
    let content = format!(
        r#"<om:ObservationCollection xmlns:om="http://www.opengis.net/om/1.0"
    xmlns:gml="http://www.opengis.net/gml" xmlns:xlink="http://www.w3.org/1999/xlink">{}{}</om:ObservationCollection>"#,
        observation("<gml:description>first only</gml:description>"),
        observation("")
    );
    let input = write_response(temp_dir.path(), "mixed.xml", &content);
    let output_dir = temp_dir.path().join("out");
    std::fs::create_dir_all(&output_dir).unwrap();

    let lenient = BatchProcessor::new(output_dir.clone(), ProcessorConfig::default()).unwrap();
    let outcome = lenient.process_file(&input).await.unwrap();
    assert_eq!(outcome.records, 2);

    let strict = BatchProcessor::new(
        output_dir,
        ProcessorConfig::default().with_strict_optional_fields(true),
    )
    .unwrap();
    let err = strict.process_file(&input).await.unwrap_err();
    assert!(matches!(
        err,
        ProcessingError::Parse {
            source: SosError::InconsistentOptionalField { observation: 1, .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_same_stem_in_sibling_directories_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = temp_dir.path().join("in");
    let first = write_response(&inputs.join("a"), "obs.xml", OM1_RESPONSE);
    let second = write_response(&inputs.join("b"), "obs.xml", OM2_RESPONSE);
    let output_dir = temp_dir.path().join("out");

    // Collisions are not per-file failures, so continuing does not hide them
    let config = ProcessorConfig::default().with_continue_on_error(true);
    let processor = BatchProcessor::new(output_dir.clone(), config).unwrap();
    let result = processor
        .process_inputs(&[inputs.to_string_lossy().to_string()])
        .await;

    match result.unwrap_err() {
        ProcessingError::OutputCollision {
            output,
            first: found_first,
            second: found_second,
        } => {
            assert_eq!(output, output_dir.join("obs.parquet"));
            assert_eq!(found_first, first);
            assert_eq!(found_second, second);
        }
        other => panic!("Expected OutputCollision, got {other:?}"),
    }
    assert!(!output_dir.join("obs.parquet").exists());
}

#[tokio::test]
async fn test_distinct_stems_in_sibling_directories_convert() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = temp_dir.path().join("in");
    write_response(&inputs.join("a"), "obs-a.xml", OM1_RESPONSE);
    write_response(&inputs.join("b"), "obs-b.xml", OM2_RESPONSE);
    let output_dir = temp_dir.path().join("out");

    let processor = BatchProcessor::new(output_dir.clone(), ProcessorConfig::default()).unwrap();
    let stats = processor
        .process_inputs(&[inputs.to_string_lossy().to_string()])
        .await
        .unwrap();

    assert_eq!(stats.files_processed, 2);
    assert!(output_dir.join("obs-a.parquet").exists());
    assert!(output_dir.join("obs-b.parquet").exists());
}

#[test]
fn test_zero_workers_rejected() {
    let result = BatchProcessor::new(
        std::path::PathBuf::from("out"),
        ProcessorConfig::default().with_workers(0),
    );
    assert!(matches!(result, Err(ProcessingError::Configuration { .. })));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let processor = BatchProcessor::new(temp_dir.path().join("out"), ProcessorConfig::default()).unwrap();
    let result = processor
        .process_file(&temp_dir.path().join("missing.xml"))
        .await;
    assert!(matches!(result, Err(ProcessingError::Io(_))));
}
