mod common;

use std::collections::HashMap;

use common::{ConfigDir, GreeterConfig};
use factory::factories::observability::TelemetryExporter;
use saddle::{ConfigError, ConfigLoader, config::ConfigScope};

const VALID: &str = r#"{
  "harness": {
    "jaeger": { "uri": "http://jaeger:4317", "sample_rate": 50 },
    "shutdown": { "drain_timeout_secs": 3 }
  },
  "v1": { "test": "value" }
}"#;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn loads_both_stages() {
    let dir = ConfigDir::new();
    dir.write("test.json", VALID);

    let loaded = ConfigLoader::new(dir.path())
        .load_with::<GreeterConfig, _>("test", no_env)
        .unwrap();

    assert_eq!(loaded.service.v1.test, "value");
    assert_eq!(
        loaded.harness.exporters.select(),
        TelemetryExporter::Jaeger {
            uri: "http://jaeger:4317".into(),
            sample_rate: 50.0,
        }
    );
    assert_eq!(loaded.harness.shutdown.drain_timeout_secs, 3);
    assert_eq!(loaded.harness.shutdown.flush_timeout_secs, 5);
}

#[test]
fn environment_overrides_file_values() {
    let dir = ConfigDir::new();
    dir.write("test.json", VALID);
    let env: HashMap<&str, &str> = HashMap::from([
        ("HARNESS_JAEGER_SAMPLE_RATE", "12.5"),
        ("V1_TEST", "from-env"),
    ]);

    let loaded = ConfigLoader::new(dir.path())
        .load_with::<GreeterConfig, _>("test", |name| env.get(name).map(|v| v.to_string()))
        .unwrap();

    assert_eq!(loaded.service.v1.test, "from-env");
    assert_eq!(
        loaded.harness.exporters.select(),
        TelemetryExporter::Jaeger {
            uri: "http://jaeger:4317".into(),
            sample_rate: 12.5,
        }
    );
}

#[test]
fn toml_files_are_read() {
    let dir = ConfigDir::new();
    dir.write(
        "staging.toml",
        "[harness.none]\ndisabled = true\n\n[v1]\ntest = \"toml\"\n",
    );

    let loaded = ConfigLoader::new(dir.path())
        .load_with::<GreeterConfig, _>("staging", no_env)
        .unwrap();

    assert_eq!(loaded.service.v1.test, "toml");
    assert_eq!(loaded.harness.exporters.select(), TelemetryExporter::Disabled);
}

#[test]
fn missing_harness_table_defaults_to_stdout() {
    let dir = ConfigDir::new();
    dir.write("test.json", r#"{"v1": {"test": "x"}}"#);

    let loaded = ConfigLoader::new(dir.path())
        .load_with::<GreeterConfig, _>("test", no_env)
        .unwrap();

    assert_eq!(
        loaded.harness.exporters.select(),
        TelemetryExporter::StdOut { sample_rate: 10.0 }
    );
}

#[test]
fn missing_file_is_not_found() {
    let dir = ConfigDir::new();

    let err = ConfigLoader::new(dir.path())
        .load_with::<GreeterConfig, _>("production", no_env)
        .unwrap_err();

    assert!(matches!(err, ConfigError::NotFound { ref environment, .. } if environment == "production"));
}

#[test]
fn two_exporters_fail_harness_stage() {
    let dir = ConfigDir::new();
    dir.write(
        "test.json",
        r#"{
          "harness": {
            "stdout": { "sample_rate": 10 },
            "jaeger": { "uri": "http://jaeger:4317", "sample_rate": 10 }
          },
          "v1": { "test": "x" }
        }"#,
    );

    let err = ConfigLoader::new(dir.path())
        .load_with::<GreeterConfig, _>("test", no_env)
        .unwrap_err();

    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert_eq!(err.scope(), Some(ConfigScope::Harness));
}

#[test]
fn sample_rate_out_of_range_fails_harness_stage() {
    let dir = ConfigDir::new();
    dir.write(
        "test.json",
        r#"{"harness": {"stdout": {"sample_rate": 101}}, "v1": {"test": "x"}}"#,
    );

    let err = ConfigLoader::new(dir.path())
        .load_with::<GreeterConfig, _>("test", no_env)
        .unwrap_err();

    assert_eq!(err.scope(), Some(ConfigScope::Harness));
}

#[test]
fn service_requirements_fail_service_stage() {
    let dir = ConfigDir::new();
    dir.write("test.json", r#"{"v1": {"test": ""}}"#);

    let err = ConfigLoader::new(dir.path())
        .load_with::<GreeterConfig, _>("test", no_env)
        .unwrap_err();

    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert_eq!(err.scope(), Some(ConfigScope::Service));
}

#[test]
fn missing_service_table_fails_service_stage() {
    let dir = ConfigDir::new();
    dir.write("test.json", r#"{"harness": {}}"#);

    let err = ConfigLoader::new(dir.path())
        .load_with::<GreeterConfig, _>("test", no_env)
        .unwrap_err();

    assert!(matches!(err, ConfigError::Deserialize { .. }));
    assert_eq!(err.scope(), Some(ConfigScope::Service));
}
