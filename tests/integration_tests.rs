use lang_reduce::{EtlEngine, EtlError, LanguagePipeline, LocalStorage, ReduceConfig};
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_input(dir: &Path, content: &str) -> PathBuf {
    let input_path = dir.join("repositories.json");
    std::fs::write(&input_path, content).unwrap();
    input_path
}

fn engine_for(config: ReduceConfig) -> EtlEngine<LanguagePipeline<LocalStorage, ReduceConfig>> {
    let storage = LocalStorage::new(config.input_dir());
    EtlEngine::new(LanguagePipeline::new(storage, config))
}

#[tokio::test]
async fn test_end_to_end_reduction() {
    let temp_dir = TempDir::new().unwrap();
    let input = json!([
        {
            "name": "octo/big",
            "stars": 120,
            "languages": [
                {"A": "40"}, {"B": "20"}, {"C": "15"}, {"D": "10"},
                {"E": "5"}, {"F": "4"}, {"G": "3"}, {"H": "3"}
            ],
            "topics": ["cli"]
        },
        {
            "name": "octo/small",
            "languages": [{"Go": "50"}, {"Python": "30"}, {"JS": "20"}]
        }
    ]);
    let input_path = write_input(temp_dir.path(), &input.to_string());

    let config = ReduceConfig::new(input_path.to_str().unwrap());
    let output_path = engine_for(config).run().await.unwrap();

    let expected_path = temp_dir.path().join("repositoriesnew.json");
    assert_eq!(PathBuf::from(&output_path), expected_path);

    let written = std::fs::read_to_string(&expected_path).unwrap();
    assert_eq!(
        written,
        concat!(
            r#"[{"name":"octo/big","stars":120,"languages":[{"A":"40"},{"B":"20"},{"C":"15"},{"D":"10"},{"E":"5"},{"Other":"10"}],"topics":["cli"]},"#,
            r#"{"name":"octo/small","languages":[{"Go":"50"},{"Python":"30"},{"JS":"20"}]}]"#
        )
    );

    // 輸入檔不受影響
    let original: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&input_path).unwrap()).unwrap();
    assert_eq!(original, input);
}

#[tokio::test]
async fn test_empty_repository_list() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = write_input(temp_dir.path(), "[]");

    let config = ReduceConfig::new(input_path.to_str().unwrap());
    engine_for(config).run().await.unwrap();

    let written = std::fs::read_to_string(temp_dir.path().join("repositoriesnew.json")).unwrap();
    assert_eq!(written, "[]");
}

#[tokio::test]
async fn test_second_pass_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let input = json!([{
        "languages": [
            {"Rust": "70.5"}, {"C": "10"}, {"Shell": "6.5"}, {"Python": "5"},
            {"Makefile": "4"}, {"Dockerfile": "2"}, {"Nix": "2"}
        ]
    }]);
    let input_path = write_input(temp_dir.path(), &input.to_string());

    let config = ReduceConfig::new(input_path.to_str().unwrap());
    let first_output = engine_for(config).run().await.unwrap();
    let first = std::fs::read_to_string(&first_output).unwrap();

    // 以第一次的輸出作為輸入再跑一次
    let mut second_config = ReduceConfig::new(first_output.clone());
    second_config.output_file_name = "second.json".to_string();
    let second_output = engine_for(second_config).run().await.unwrap();
    let second = std::fs::read_to_string(second_output).unwrap();

    assert_eq!(first, second);
    assert!(first.contains(r#"{"Other":"4"}"#));
}

#[tokio::test]
async fn test_malformed_json_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = write_input(temp_dir.path(), r#"[{"languages": [{"Go": "50"}"#);

    let config = ReduceConfig::new(input_path.to_str().unwrap());
    let err = engine_for(config).run().await.unwrap_err();
    assert!(matches!(err, EtlError::SerializationError(_)));

    assert!(!temp_dir.path().join("repositoriesnew.json").exists());
}

#[tokio::test]
async fn test_failure_keeps_previous_output() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("repositoriesnew.json");
    std::fs::write(&output_path, "previous").unwrap();

    let input = json!([
        {"languages": [{"Go": "100"}]},
        {"languages": [
            {"A": "x"}, {"B": "1"}, {"C": "1"}, {"D": "1"},
            {"E": "1"}, {"F": "1"}, {"G": "1"}
        ]}
    ]);
    let input_path = write_input(temp_dir.path(), &input.to_string());

    let config = ReduceConfig::new(input_path.to_str().unwrap());
    let err = engine_for(config).run().await.unwrap_err();
    assert!(matches!(err, EtlError::PercentageParseError { .. }));

    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "previous");
}

#[tokio::test]
async fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("missing.json");

    let config = ReduceConfig::new(input_path.to_str().unwrap());
    let err = engine_for(config).run().await.unwrap_err();
    assert!(matches!(err, EtlError::InputNotFoundError { .. }));
    assert!(!temp_dir.path().join("repositoriesnew.json").exists());
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = json!([{
        "languages": [
            {"A": "30"}, {"B": "20"}, {"C": "20"}, {"D": "10"},
            {"E": "10"}, {"F": "5"}, {"G": "5"}
        ]
    }]);
    let input_path = write_input(temp_dir.path(), &input.to_string());

    let config = ReduceConfig::new(input_path.to_str().unwrap());
    let result = engine_for(config).dry_run().await.unwrap();

    assert_eq!(result.total(), 1);
    assert_eq!(result.reduced_count, 1);
    assert!(!temp_dir.path().join("repositoriesnew.json").exists());
}

#[tokio::test]
async fn test_pretty_output_and_custom_name() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = write_input(temp_dir.path(), r#"[{"languages":[{"Go":"100"}]}]"#);

    let mut config = ReduceConfig::new(input_path.to_str().unwrap());
    config.output_file_name = "pretty.json".to_string();
    config.pretty = true;
    let output_path = engine_for(config).run().await.unwrap();

    assert!(output_path.ends_with("pretty.json"));
    let written = std::fs::read_to_string(temp_dir.path().join("pretty.json")).unwrap();
    assert!(written.contains('\n'));
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed, json!([{"languages": [{"Go": "100"}]}]));
}
