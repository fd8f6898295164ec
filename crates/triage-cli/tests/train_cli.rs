use clap::Parser;
use triage_cli::{Cli, Commands};

#[test]
fn cli_parses_train_flags() {
    let cli = Cli::parse_from([
        "triage",
        "train",
        "--seed",
        "11",
        "--model",
        "ridge",
        "--output-dir",
        "/tmp/triage-test",
    ]);
    match cli.command {
        Commands::Train(cmd) => {
            assert_eq!(cmd.seed, 11);
            assert_eq!(cmd.output_dir, std::path::PathBuf::from("/tmp/triage-test"));
        }
        other => panic!("expected train, got {other:?}"),
    }
}

#[tokio::test]
async fn parsed_train_command_writes_readable_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    let cli = Cli::parse_from(["triage", "train", "--output-dir", dir_arg, "--seed", "3"]);
    match cli.command {
        Commands::Train(cmd) => cmd.run().await.unwrap(),
        other => panic!("expected train, got {other:?}"),
    }

    let raw = std::fs::read_to_string(dir.path().join("metrics.json")).unwrap();
    let metrics: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(metrics["seed"], 3);
    assert_eq!(metrics["model"], "linear");
    assert!(metrics["rmse"].as_f64().unwrap() > 0.0);
    assert_eq!(
        metrics["n_train"].as_u64().unwrap() + metrics["n_test"].as_u64().unwrap(),
        442
    );
}
