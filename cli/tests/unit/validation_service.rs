//! Tests for the `validation` application service.
//!
//! Runs the whole registry against `FakeHost` and checks gating, config
//! handling, aggregation and report ordering.

#![allow(clippy::expect_used)]

use preingest_cli::application::services::catalogue::default_config;
use preingest_cli::application::services::validation::{
    ValidationRun, collect_snapshot, validate_host,
};
use preingest_cli::domain::summary::{MSG_CUSTOM_SUFFIX, MSG_ERROR, MSG_PARTIAL, MSG_READY};
use preingest_cli::domain::{ConfigFormat, ProbeOverrides, parse_overrides, registry};
use preingest_common::{ConfigMode, FinalResult, Outcome, ValidationReport, ValidationResult};
use serde_json::{Map, Value, json};

use crate::helpers::RHEL_KERNEL;
use crate::mocks::{FakeHost, RecordingReporter, healthy_host};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Full default config with `patch` applied to the top-level sections.
fn overrides_with(patch: impl FnOnce(&mut Map<String, Value>)) -> ProbeOverrides {
    let mut config = default_config(&registry());
    if let Value::Object(sections) = &mut config {
        patch(sections);
    }
    parse_overrides(&config.to_string(), ConfigFormat::Json).expect("valid config")
}

async fn run(host: &FakeHost, overrides: Option<&ProbeOverrides>) -> ValidationRun {
    validate_host(&registry(), overrides, host, &RecordingReporter::default())
        .await
        .expect("snapshot collected")
}

async fn completed(host: &FakeHost, overrides: Option<&ProbeOverrides>) -> ValidationReport {
    match run(host, overrides).await {
        ValidationRun::Completed(report) => report,
        ValidationRun::Gated(report) => panic!("unexpected gate: {:?}", report.outcomes),
    }
}

fn outcome<'a>(report: &'a ValidationReport, name: &str) -> &'a Outcome {
    report
        .outcomes
        .iter()
        .find(|o| o.name == name)
        .unwrap_or_else(|| panic!("no outcome for {name}"))
}

// ── Full runs ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_healthy_host_passes_every_probe() {
    let run = run(&healthy_host(), None).await;
    assert_eq!(run.exit_code(), 0);
    let report = run.report();
    assert_eq!(report.summary.pass_count, 8);
    assert_eq!(report.summary.total_count, 8);
    assert_eq!(report.summary.final_result, FinalResult::Pass);
    assert_eq!(report.summary.config_mode, ConfigMode::Default);
    assert_eq!(report.summary.message, MSG_READY);
    assert!(
        report
            .outcomes
            .iter()
            .all(|o| o.config_mode == Some(ConfigMode::Default))
    );
}

#[tokio::test]
async fn test_default_config_file_matches_no_config_file() {
    let without = completed(&healthy_host(), None).await;
    let with = completed(&healthy_host(), Some(&overrides_with(|_| {}))).await;
    assert_eq!(without.summary.message, with.summary.message);
    assert_eq!(with.summary.config_mode, ConfigMode::Default);
}

#[tokio::test]
async fn test_on_prem_host_passes_with_partial_message() {
    let report = completed(&healthy_host().offline(), None).await;
    assert_eq!(report.summary.final_result, FinalResult::Pass);
    assert_eq!(report.summary.message, MSG_PARTIAL);
    assert_eq!(report.summary.pass_count, 7);
    assert_eq!(report.outcomes[0].name, "Instance Profile");
    assert_eq!(report.outcomes[0].result, ValidationResult::Fail);
}

#[tokio::test]
async fn test_required_failure_fails_the_run() {
    let host = healthy_host().with_command(
        "systemctl status amazon-ssm-agent",
        crate::helpers::err_output(4, b""),
    );
    let run = run(&host, None).await;
    assert_eq!(run.exit_code(), 2);
    assert_eq!(run.report().summary.final_result, FinalResult::Fail);
}

#[tokio::test]
async fn test_errors_sort_before_failures_and_keep_run_order() {
    let host = healthy_host()
        .without_executable("yum")
        .without_executable("systemctl")
        .without_file(&format!(
            "/lib/modules/{RHEL_KERNEL}/kernel/drivers/amazon/net/ena/ena.ko.xz"
        ));
    let run = run(&host, None).await;
    assert_eq!(run.exit_code(), 1);

    let report = run.report();
    let order: Vec<(&str, ValidationResult)> = report
        .outcomes
        .iter()
        .take(3)
        .map(|o| (o.name.as_str(), o.result))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Repo Access", ValidationResult::Error),
            ("SSM Agent", ValidationResult::Error),
            ("Enhanced Networking", ValidationResult::Fail),
        ]
    );
    assert_eq!(report.summary.message, MSG_ERROR);
}

#[tokio::test]
async fn test_probe_error_reports_unsupported_environment() {
    let host = healthy_host().with_failing_command("df -P -k /", "cannot spawn df");
    let report = completed(&host, None).await;
    let disk = outcome(&report, "Free Disk Space");
    assert_eq!(disk.result, ValidationResult::Error);
    assert_eq!(
        disk.message.as_deref(),
        Some("Unable to validate due to unsupported environment")
    );
    assert!(
        disk.verbose_message
            .as_deref()
            .is_some_and(|m| m.contains("cannot spawn df"))
    );
}

// ── Config handling ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_section_is_error_with_defaults() {
    let overrides = overrides_with(|sections| {
        sections.remove("RepoAccess");
    });
    let host = healthy_host();
    let report = completed(&host, Some(&overrides)).await;
    let repo = outcome(&report, "Repo Access");
    assert_eq!(repo.result, ValidationResult::Error);
    assert_eq!(
        repo.message.as_deref(),
        Some("Missing section in config file, default values are \"RepoAccess\": {\"enabled\":true}")
    );
    assert!(!host.calls().iter().any(|(line, _)| line.starts_with("yum")));
}

#[tokio::test]
async fn test_disabled_probe_is_not_run() {
    let overrides = overrides_with(|sections| {
        sections.insert("RepoAccess".to_string(), json!({"enabled": false}));
    });
    let host = healthy_host();
    let report = completed(&host, Some(&overrides)).await;

    let repo = outcome(&report, "Repo Access");
    assert_eq!(repo.result, ValidationResult::NotRun);
    assert_eq!(repo.config_mode, None);
    assert_eq!(report.summary.pass_count, 7);
    assert_eq!(report.summary.total_count, 8);
    assert_eq!(report.summary.final_result, FinalResult::Pass);
    assert!(!host.calls().iter().any(|(line, _)| line.starts_with("yum")));
}

#[tokio::test]
async fn test_custom_parameter_marks_outcome_and_summary() {
    let overrides = overrides_with(|sections| {
        sections.insert("FreeDiskSpace".to_string(), json!({"min_gb": 10}));
    });
    let report = completed(&healthy_host(), Some(&overrides)).await;

    let disk = outcome(&report, "Free Disk Space");
    assert_eq!(disk.config_mode, Some(ConfigMode::Custom));
    assert_eq!(
        disk.message.as_deref(),
        Some("There are 60gb free, 10gb are required")
    );
    assert_eq!(report.summary.config_mode, ConfigMode::Custom);
    assert!(report.summary.message.ends_with(MSG_CUSTOM_SUFFIX));
}

#[tokio::test]
async fn test_integral_float_min_gb_runs_with_default_mode() {
    let overrides = overrides_with(|sections| {
        sections.insert("FreeDiskSpace".to_string(), json!({"min_gb": 5.0, "enabled": true}));
    });
    let run = run(&healthy_host(), Some(&overrides)).await;
    assert_eq!(run.exit_code(), 0);

    let report = run.report();
    let disk = outcome(report, "Free Disk Space");
    assert_eq!(disk.result, ValidationResult::Pass);
    assert_eq!(disk.config_mode, Some(ConfigMode::Default));
    assert_eq!(report.summary.config_mode, ConfigMode::Default);
}

#[tokio::test]
async fn test_yaml_float_min_gb_is_accepted() {
    let yaml: String = registry()
        .iter()
        .map(|d| match d.id {
            "FreeDiskSpace" => "FreeDiskSpace:\n  min_gb: 5.0\n".to_string(),
            id => format!("{id}: {{}}\n"),
        })
        .collect();
    let overrides = parse_overrides(&yaml, ConfigFormat::Yaml).expect("yaml config");
    let report = completed(&healthy_host(), Some(&overrides)).await;
    assert_eq!(outcome(&report, "Free Disk Space").result, ValidationResult::Pass);
    assert_eq!(report.summary.final_result, FinalResult::Pass);
}

#[tokio::test]
async fn test_custom_software_list_is_scanned() {
    let overrides = overrides_with(|sections| {
        sections.insert(
            "ThirdPartySoftware".to_string(),
            json!({"custom_software_list": ["nessus"], "enabled": true}),
        );
    });
    let host = healthy_host().with_executable("nessus");
    let report = completed(&host, Some(&overrides)).await;
    let software = outcome(&report, "Third Party Software");
    assert_eq!(software.result, ValidationResult::Fail);
    assert_eq!(software.config_mode, Some(ConfigMode::Custom));
}

#[tokio::test]
async fn test_wrong_parameter_type_is_error_with_defaults_in_verbose() {
    let overrides = overrides_with(|sections| {
        sections.insert("FreeDiskSpace".to_string(), json!({"min_gb": "ten"}));
    });
    let report = completed(&healthy_host(), Some(&overrides)).await;
    let disk = outcome(&report, "Free Disk Space");
    assert_eq!(disk.result, ValidationResult::Error);
    assert_eq!(
        disk.message.as_deref(),
        Some("Error loading parameters of FreeDiskSpace from config file")
    );
    assert!(
        disk.verbose_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Default parameters are {\"enabled\":true,\"min_gb\":5}"))
    );
}

#[tokio::test]
async fn test_unknown_parameter_is_error() {
    let overrides = overrides_with(|sections| {
        sections.insert("SSHConfiguration".to_string(), json!({"port": 22}));
    });
    let report = completed(&healthy_host(), Some(&overrides)).await;
    assert_eq!(
        outcome(&report, "SSH Configuration").result,
        ValidationResult::Error
    );
}

#[tokio::test]
async fn test_custom_role_name_is_looked_up() {
    let overrides = overrides_with(|sections| {
        sections.insert(
            "InstanceProfile".to_string(),
            json!({"role_name": "ingest-role", "enabled": true}),
        );
    });
    let host = healthy_host().with_metadata("iam/security-credentials/ingest-role", true);
    let report = completed(&host, Some(&overrides)).await;
    let profile = outcome(&report, "Instance Profile");
    assert_eq!(profile.result, ValidationResult::Pass);
    assert_eq!(profile.config_mode, Some(ConfigMode::Custom));
}

// ── Operating system gate ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_unsupported_os_gates_the_run() {
    let host = healthy_host().with_file(
        "/etc/os-release",
        "ID=ubuntu\nVERSION_ID=\"22.04\"\nPRETTY_NAME=\"Ubuntu 22.04.3 LTS\"\n",
    );
    let reporter = RecordingReporter::default();
    let run = validate_host(&registry(), None, &host, &reporter)
        .await
        .expect("snapshot collected");

    assert!(matches!(run, ValidationRun::Gated(_)));
    assert_eq!(run.exit_code(), 2);
    let report = run.report();
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].name, "Operating System");
    assert_eq!(
        report.outcomes[0].message.as_deref(),
        Some("Unsupported operating system: Ubuntu 22.04.3 LTS")
    );
    assert!(host.calls().is_empty());
    assert_eq!(reporter.events(), vec!["step: collecting host facts..."]);
}

#[tokio::test]
async fn test_undecidable_os_version_gates_with_error_exit() {
    let host = healthy_host().with_file(
        "/etc/os-release",
        "ID=rhel\nVERSION_ID=\"7.9a\"\nPRETTY_NAME=\"Red Hat 7.9a\"\n",
    );
    let run = run(&host, None).await;

    assert!(matches!(run, ValidationRun::Gated(_)));
    let report = run.report();
    assert_eq!(report.outcomes[0].result, ValidationResult::Error);
    assert_eq!(report.summary.final_result, FinalResult::Error);
    assert_eq!(run.exit_code(), 1);
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_unsupported_os_exit_matches_final_result() {
    let host = healthy_host().with_file("/etc/os-release", "ID=debian\nVERSION_ID=\"12\"\n");
    let run = run(&host, None).await;
    assert_eq!(run.report().summary.final_result, FinalResult::Fail);
    assert_eq!(run.exit_code(), run.report().summary.final_result.exit_code());
}

#[tokio::test]
async fn test_gate_ignores_disabled_operating_system_probe() {
    let host = healthy_host().with_file("/etc/os-release", "ID=debian\nVERSION_ID=\"12\"\n");
    let overrides = overrides_with(|sections| {
        sections.insert("OperatingSystem".to_string(), json!({"enabled": false}));
    });
    let run = run(&host, Some(&overrides)).await;
    assert!(matches!(run, ValidationRun::Gated(_)));
}

// ── Snapshot collection ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_os_release_is_an_error() {
    let host = healthy_host().without_file("/etc/os-release");
    let result = validate_host(&registry(), None, &host, &RecordingReporter::default()).await;
    let err = result.expect_err("no os-release");
    assert!(format!("{err:#}").contains("cannot determine operating system"));
}

#[tokio::test]
async fn test_snapshot_falls_back_to_usr_lib_os_release() {
    let host = FakeHost::new()
        .with_file("/usr/lib/os-release", "ID=\"sles\"\nVERSION_ID=\"15.4\"\n")
        .with_file("/proc/sys/kernel/osrelease", "5.14.21-150400.24-default\n")
        .offline();
    let snapshot = collect_snapshot(&host).await.expect("snapshot");
    assert_eq!(snapshot.distribution, "sles");
    assert_eq!(snapshot.major_version, "15");
    assert_eq!(snapshot.minor_version, "4");
    assert_eq!(snapshot.kernel_release, "5.14.21-150400.24-default");
    assert!(!snapshot.is_ec2);
}

// ── Progress reporting ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_reporter_sees_each_probe_and_error_warnings() {
    let host = healthy_host().without_executable("yum");
    let reporter = RecordingReporter::default();
    validate_host(&registry(), None, &host, &reporter)
        .await
        .expect("snapshot collected");

    let events = reporter.events();
    assert_eq!(events.first().map(String::as_str), Some("step: collecting host facts..."));
    assert!(events.contains(&"step: validating enhanced networking...".to_string()));
    assert!(events.contains(&"warn: Repo Access could not be validated".to_string()));
    assert_eq!(events.last().map(String::as_str), Some("success: 8 validations run"));
    assert_eq!(events.iter().filter(|e| e.starts_with("step: validating")).count(), 8);
}
