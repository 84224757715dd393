mod common;

use assert_cmd::Command;
use common::*;
use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CREDENTIAL_VARS: [&str; 8] = [
    "REACTOR_IO_INTEGRATION_CLIENT_ID",
    "REACTOR_IO_INTEGRATION_CLIENT_SECRET",
    "REACTOR_IO_INTEGRATION_CLIENT_ID_PRODUCTION",
    "REACTOR_IO_INTEGRATION_CLIENT_SECRET_PRODUCTION",
    "REACTOR_IO_INTEGRATION_CLIENT_ID_STAGE",
    "REACTOR_IO_INTEGRATION_CLIENT_SECRET_STAGE",
    "REACTOR_IO_INTEGRATION_CLIENT_ID_INTEGRATION",
    "REACTOR_IO_INTEGRATION_CLIENT_SECRET_INTEGRATION",
];

/// Mock token, company and single-page listing endpoints
async fn reactor_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(companies_body(&[ORG_ID])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/extension_packages"))
        .and(query_param("page[number]", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(listing(vec![package("EP1", "my-ext", "1.0.0")], 1, None)),
        )
        .mount(&server)
        .await;
    server
}

async fn mount_release(server: &MockServer, status: u16, expected_calls: u64) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": package_with_availability("EP1", "my-ext", "1.0.0", "private")
        }))
    } else {
        ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "errors": [{ "title": "Internal Server Error", "detail": "release failed" }]
        }))
    };

    Mock::given(method("PATCH"))
        .and(path("/extension_packages/EP1"))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn releaser(server: &MockServer, dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("reactor_releaser").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    for (key, value) in mock_env(server) {
        cmd.env(key, value);
    }
    cmd
}

/// Run the binary off the async runtime so the mock server keeps serving
async fn run(mut cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap()
}

fn manifest_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "my-ext", "1.0.0");
    dir
}

#[tokio::test(flavor = "multi_thread")]
async fn test_declining_exits_zero_without_release() {
    let server = reactor_server().await;
    mount_release(&server, 200, 0).await;
    let dir = manifest_dir();

    let mut cmd = releaser(&server, dir.path());
    cmd.args(["--auth.client-id", CLIENT_ID, "--auth.client-secret", CLIENT_SECRET])
        .write_stdin("n\n");

    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("Are you sure you want to release"))
        .stdout(predicate::str::contains("Release cancelled"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_confirmed_release_exits_zero() {
    let server = reactor_server().await;
    mount_release(&server, 200, 1).await;
    let dir = manifest_dir();

    let mut cmd = releaser(&server, dir.path());
    cmd.args([
        "--auth.client-id",
        CLIENT_ID,
        "--auth.client-secret",
        CLIENT_SECRET,
        "--confirm-package-release",
    ]);

    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("Are you sure").not())
        .stdout(predicate::str::contains("has been released with private availability"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_release_failure_prints_message_only() {
    let server = reactor_server().await;
    mount_release(&server, 500, 1).await;
    let dir = manifest_dir();

    let mut cmd = releaser(&server, dir.path());
    cmd.args([
        "--auth.client-id",
        CLIENT_ID,
        "--auth.client-secret",
        CLIENT_SECRET,
        "--confirm-package-release",
    ]);

    run(cmd)
        .await
        .code(1)
        .stderr(predicate::str::contains("Error releasing extension package EP1: 500"))
        .stderr(predicate::str::contains("run in --verbose mode for full stack trace"))
        .stderr(predicate::str::contains("Rejected {").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_release_failure_verbose_prints_full_detail() {
    let server = reactor_server().await;
    mount_release(&server, 500, 1).await;
    let dir = manifest_dir();

    let mut cmd = releaser(&server, dir.path());
    cmd.args([
        "--auth.client-id",
        CLIENT_ID,
        "--auth.client-secret",
        CLIENT_SECRET,
        "--confirm-package-release",
        "--verbose",
    ]);

    run(cmd)
        .await
        .code(1)
        .stderr(predicate::str::contains("Rejected {"))
        .stderr(predicate::str::contains("run in --verbose mode").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_qe_environment_warns_and_uses_stage_credentials() {
    let server = reactor_server().await;
    mount_release(&server, 200, 1).await;
    let dir = manifest_dir();

    let mut cmd = releaser(&server, dir.path());
    cmd.env("REACTOR_IO_INTEGRATION_CLIENT_ID_STAGE", CLIENT_ID)
        .env("REACTOR_IO_INTEGRATION_CLIENT_SECRET_STAGE", CLIENT_SECRET)
        .args(["--environment", "qe", "--confirm-package-release"]);

    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains(
            "'--environment=qe' is currently redirecting to '--environment=stage'",
        ))
        .stdout(predicate::str::contains("Prefer usage of '--environment=stage'."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_credentials_exit_one() {
    let server = MockServer::start().await;
    let dir = manifest_dir();

    let cmd = releaser(&server, dir.path());

    run(cmd)
        .await
        .code(1)
        .stderr(predicate::str::contains("No credentials provided"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_environment_exit_one() {
    let server = MockServer::start().await;
    let dir = manifest_dir();

    let mut cmd = releaser(&server, dir.path());
    cmd.args(["--environment", "moon", "--auth.access-token", "token"]);

    run(cmd)
        .await
        .code(1)
        .stderr(predicate::str::contains("Unknown environment 'moon'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_manifest_exit_one() {
    let server = reactor_server().await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = releaser(&server, dir.path());
    cmd.args(["--auth.client-id", CLIENT_ID, "--auth.client-secret", CLIENT_SECRET]);

    run(cmd)
        .await
        .code(1)
        .stderr(predicate::str::contains("No extension.json found"));
}
