//! # Integration Tests
//!
//! Integration and end-to-end tests.
//!
//! Covers:
//! - Contract defaults shared across crates
//! - Fixture sessions through loader -> sync engine -> exporters
//! - Lookup behaviour under offsets, seeks and concurrent commands

#[cfg(test)]
mod fixtures {
    use std::path::{Path, PathBuf};

    pub const SIDECAR: &str = r#""Format","MoTeC CSV File",
"Venue","Spa-Francorchamps",
"Vehicle","GT3 Cup",
"Driver","A. Driver",
"Log Date","14/06/2024",
"Log Time","10:42:07",
"Sample Rate","50.000Hz",
"Duration","2.000s",
"Range","Lap 3",
"#;

    /// Vendor export: preamble, header, units row, 101 rows at 50 Hz, one
    /// truncated row and one text row
    pub fn vendor_log() -> String {
        let mut text = String::from(
            "\"Format\",\"MoTeC CSV File\"\n\
             \"Venue\",\"Spa-Francorchamps\"\n\
             \n\
             \"Time\",\"Distance\",\"Engine RPM\",\"Throttle Pos\",\"Brake Pos\",\"Speed_MS\",\"Gear\"\n\
             \"s\",\"m\",\"rpm\",\"%\",\"%\",\"m/s\",\"\"\n",
        );
        for i in 0..=100 {
            text.push_str(&format!(
                "\"{:.3}\",\"{:.1}\",\"{}\",\"{:.1}\",\"0.0\",\"{:.1}\",\"3\"\n",
                i as f64 * 0.02,
                i as f64 * 0.4,
                4000 + i * 10,
                50.0 + i as f64 * 0.5,
                20.0 + i as f64 * 0.1,
            ));
        }
        text.push_str("\"2.020\",\"40.4\",\"5010\"\n");
        text.push_str("\"end\",\"-\",\"-\",\"-\",\"-\",\"-\",\"-\"\n");
        text
    }

    /// Write the vendor log and sidecar into `dir`
    pub fn write_session(dir: &Path) -> (PathBuf, PathBuf) {
        let telemetry = dir.join("teledata.csv");
        let metadata = dir.join("teledata_metadata.csv");
        std::fs::write(&telemetry, vendor_log()).unwrap();
        std::fs::write(&metadata, SIDECAR).unwrap();
        (telemetry, metadata)
    }

    /// Overlay config (TOML) pointing at the fixture session
    pub fn config_toml(telemetry: &Path, metadata: &Path, output_dir: &Path) -> String {
        format!(
            r#"
[sources]
telemetry = "{}"
metadata = "{}"

[sync]
initial_offset_s = -1.090

[export]
output_dir = "{}"
formats = ["csv", "json", "log"]
json_decimation = 5
"#,
            telemetry.display(),
            metadata.display(),
            output_dir.display()
        )
    }
}

#[cfg(test)]
mod contract_tests {
    use contracts::{
        ConfigVersion, LookupStrategy, OverlayConfig, SyncEngineConfig, SyncStatus,
        DEFAULT_INITIAL_OFFSET_S,
    };

    #[test]
    fn test_contract_defaults() {
        let config = OverlayConfig::default();
        assert_eq!(config.version, ConfigVersion::V1);
        assert_eq!(config.sync.initial_offset_s, DEFAULT_INITIAL_OFFSET_S);
        assert_eq!(config.sync.lookup, LookupStrategy::Cursor);
        assert_eq!(config.export.json_decimation, 5);
        assert!(config_loader::ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_status_line() {
        let config = SyncEngineConfig::default();
        let status = SyncStatus {
            video_time: 12.0,
            offset: config.initial_offset_s,
            synced_time: 12.0 + config.initial_offset_s,
            samples_loaded: 4200,
        };
        assert!(status
            .to_string()
            .starts_with("Video 12.00s -> Telemetry 10.91s"));
    }
}

#[cfg(test)]
mod e2e_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{LogDialect, ResolutionStatus, SessionBundle};
    use ingestion::{IngestionError, LogParser, SessionLoader};
    use observability::PlaybackMetricsAggregator;
    use sync_engine::{LookupStrategy, SyncCommand, SyncEngine, SyncEngineConfig};

    use crate::fixtures;

    /// End-to-end: config file -> loader -> sync engine lookups
    #[tokio::test]
    async fn test_e2e_vendor_session_sync() {
        let dir = tempfile::tempdir().unwrap();
        let (telemetry, metadata) = fixtures::write_session(dir.path());
        let toml = fixtures::config_toml(&telemetry, &metadata, &dir.path().join("out"));
        let config = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();

        let session = SessionLoader::from_config(&config).load().await.unwrap();

        assert_eq!(session.report.dialect, LogDialect::Vendor);
        assert_eq!(session.report.header_line, Some(3));
        assert_eq!(session.series.len(), 101);
        // units row, truncated row, text row
        assert_eq!(session.report.rows_skipped, 3);
        assert_eq!(session.metadata.venue, "Spa-Francorchamps");
        assert_eq!(session.metadata.sample_rate, 50.0);
        assert_eq!(session.series.time_range(), Some((0.0, 2.0)));

        let mut engine = SyncEngine::new(session.series, config.sync.clone());
        assert_eq!(engine.offset(), -1.090);

        // Video 2.09s -> telemetry 1.00s, row 50
        let hit = engine.resolve(2.09);
        assert_eq!(hit.status(), ResolutionStatus::Hit);
        let sample = hit.sample.unwrap();
        assert_eq!(sample.timestamp, 1.0);
        assert_eq!(sample.rpm, 4500.0);
        assert!((sample.speed - 25.0 * contracts::MS_TO_MPH).abs() < 1e-9);

        // Align video 12.0 with telemetry 1.5
        let offset = engine
            .apply(SyncCommand::SetAbsolute {
                video: 12.0,
                telemetry: 1.5,
            })
            .unwrap();
        assert!((offset + 10.5).abs() < 1e-9);
        assert_eq!(engine.resolve(12.0).sample.unwrap().timestamp, 1.5);

        // Far past the end of the log
        let stale = engine.resolve(20.0);
        assert_eq!(stale.status(), ResolutionStatus::Stale);
        assert!(stale.nearest_distance.unwrap() > 1.0);

        // Within one second of the last sample still resolves
        assert!(engine.resolve(13.4).is_available());

        engine.apply(SyncCommand::Reset);
        assert_eq!(engine.offset(), 0.0);
        assert_eq!(engine.resolve(0.5).sample.unwrap().timestamp, 0.5);
    }

    /// End-to-end: loader -> stats -> dispatcher with every exporter
    #[tokio::test]
    async fn test_e2e_export_all_formats() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let (telemetry, metadata) = fixtures::write_session(dir.path());
        let toml = fixtures::config_toml(&telemetry, &metadata, &out);
        let config = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();

        let session = SessionLoader::from_config(&config).load().await.unwrap();
        let stats = ingestion::compute_stats(&session.series);
        assert_eq!(stats.num_samples, 101);
        assert_eq!(stats.total_distance_m, 40.0);
        assert_eq!(stats.max_rpm, 5000.0);

        let bundle = SessionBundle {
            metadata: session.metadata,
            series: session.series.clone(),
            stats,
        };
        let dispatcher = exporter::create_dispatcher(&config.export, bundle).unwrap();
        assert_eq!(dispatcher.pending(), 3);

        let report = dispatcher.finish().await;
        assert!(report.is_success(), "failures: {:?}", report.failures);
        assert_eq!(report.artifacts.len(), 3);
        assert_eq!(report.paths().count(), 2);

        // CSV is full resolution and reads back through the generic dialect
        let csv = std::fs::read_to_string(out.join("telemetry_processed.csv")).unwrap();
        assert_eq!(csv.lines().next(), Some(exporter::CSV_HEADER));
        let reparsed = LogParser::default().parse(&csv).unwrap();
        assert_eq!(reparsed.report.dialect, LogDialect::Generic);
        assert_eq!(reparsed.series.len(), 101);
        for (a, b) in reparsed.series.iter().zip(session.series.iter()) {
            assert_eq!(a.timestamp, b.timestamp);
            assert_eq!(a.rpm, b.rpm);
            assert_eq!(a.gear, b.gear);
            assert!((a.speed - b.speed).abs() < 1e-9);
        }

        // JSON keeps every fifth sample
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("telemetry.json")).unwrap())
                .unwrap();
        let frames = json["telemetry"].as_array().unwrap();
        assert_eq!(frames.len(), 21);
        assert_eq!(frames[1]["time"], 0.1);
        assert_eq!(json["metadata"]["venue"], "Spa-Francorchamps");
        assert_eq!(json["stats"]["num_samples"], 101);
        assert_eq!(json["sample_every"], 5);
    }

    /// Missing sidecar falls back to defaults; missing log is a fetch error
    #[tokio::test]
    async fn test_e2e_missing_sources() {
        let dir = tempfile::tempdir().unwrap();
        let (telemetry, _) = fixtures::write_session(dir.path());

        let session = SessionLoader::new(&telemetry)
            .with_metadata(dir.path().join("absent_metadata.csv"))
            .load()
            .await
            .unwrap();
        assert_eq!(session.series.len(), 101);
        assert_eq!(session.metadata.venue, "");
        assert_eq!(session.metadata.sample_rate, 50.0);

        let err = SessionLoader::new(dir.path().join("absent.csv"))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, IngestionError::Fetch { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn test_resolve_reference_cases() {
        let series = |ts: &[f64]| -> contracts::TelemetrySeries {
            ts.iter().map(|&t| contracts::TelemetrySample::at(t)).collect()
        };

        let s = series(&[4.0, 5.05, 6.0]);
        assert_eq!(sync_engine::resolve(&s, 5.0, 0.0).unwrap().timestamp, 5.05);

        let s = series(&[10.0, 20.0]);
        assert!(sync_engine::resolve(&s, 0.0, 0.0).is_none());

        // Equidistant neighbours: the earlier sample wins
        let s = series(&[1.0, 2.0]);
        assert_eq!(sync_engine::resolve(&s, 1.5, 0.0).unwrap().timestamp, 1.0);

        // Exactly one second away still counts
        let s = series(&[3.0]);
        assert!(sync_engine::resolve(&s, 2.0, 0.0).is_some());

        assert!(sync_engine::resolve(&series(&[]), 1.0, 0.0).is_none());
    }

    /// Both lookup strategies agree across seeks and offset changes
    #[test]
    fn test_cursor_matches_linear_across_seeks() {
        let session = SessionLoader::new("unused.csv")
            .load_from_str(&fixtures::vendor_log(), Some(fixtures::SIDECAR))
            .unwrap();

        let make = |lookup| {
            SyncEngine::new(
                session.series.clone(),
                SyncEngineConfig {
                    lookup,
                    ..Default::default()
                },
            )
        };
        let mut linear = make(LookupStrategy::Linear);
        let mut cursor = make(LookupStrategy::Cursor);

        let script: [(f64, Option<SyncCommand>); 10] = [
            (0.0, None),
            (1.2, None),
            (1.21, Some(SyncCommand::Nudge(0.1))),
            (3.5, None),
            (0.4, Some(SyncCommand::SetDirect(0.0))),
            (0.41, None),
            (1.99, Some(SyncCommand::Nudge(-1.0))),
            (2.5, Some(SyncCommand::Reset)),
            (-3.0, None),
            (1.01, None),
        ];

        for (t, command) in script {
            if let Some(command) = command {
                linear.apply(command);
                cursor.apply(command);
            }
            assert_eq!(linear.resolve(t), cursor.resolve(t), "diverged at t={t}");
        }
    }

    /// Offset commands from another task take effect on the next lookup
    #[tokio::test]
    async fn test_offset_handle_from_command_task() {
        let session = SessionLoader::new("unused.csv")
            .load_from_str(&fixtures::vendor_log(), None)
            .unwrap();
        let mut engine = SyncEngine::new(session.series, SyncEngineConfig::default());
        let handle = engine.offset_handle();

        tokio::spawn(async move {
            handle.set_direct(0.0);
            for _ in 0..5 {
                handle.nudge(0.1);
            }
        })
        .await
        .unwrap();

        assert!((engine.offset() - 0.5).abs() < 1e-9);
        let resolution = engine.resolve(1.0);
        assert!((resolution.synced_time - 1.5).abs() < 1e-9);
        assert_eq!(resolution.sample.unwrap().timestamp, 1.5);
    }

    /// Simulated playback folds into the aggregator summary
    #[test]
    fn test_playback_aggregation() {
        let session = SessionLoader::new("unused.csv")
            .load_from_str(&fixtures::vendor_log(), None)
            .unwrap();
        let mut engine = SyncEngine::new(
            session.series,
            SyncEngineConfig {
                initial_offset_s: 0.0,
                ..Default::default()
            },
        );
        let mut aggregator = PlaybackMetricsAggregator::new();

        // 30 fps over 0..4s of video; the log ends at 2s
        for frame in 0..120 {
            aggregator.update(&engine.resolve(frame as f64 / 30.0));
        }
        if engine.apply(SyncCommand::Nudge(-0.5)).is_some() {
            aggregator.record_offset_change();
        }

        let summary = aggregator.summary();
        assert_eq!(summary.total_ticks, 120);
        // Frames up to 3.0s are within a second of the last sample
        assert_eq!(summary.hits, 91);
        assert_eq!(summary.stale, 29);
        assert_eq!(summary.empty, 0);
        assert_eq!(summary.offset_changes, 1);
        assert!(summary.to_string().contains("Offset changes: 1"));
    }
}
