use assert_cmd::{assert::Assert, Command};
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::{json, Value};

mod stubs;

use stubs::upstream;

fn cmd_call_assert(host: &str, credentials: bool, action: &str) -> Assert {
    let mut cmd = Command::cargo_bin("tbproxy").unwrap();
    cmd.env("TB_HOST", host).env("LOG_LEVEL", "warn");
    if credentials {
        cmd.env("TB_USER", upstream::USERNAME)
            .env("TB_PASS", upstream::PASSWORD);
    } else {
        cmd.env_remove("TB_USER").env_remove("TB_PASS");
    }
    cmd.arg("call").arg(action).arg(upstream::DEVICE_ID).assert()
}

#[test]
fn call_attrs_prints_keyed_map() {
    let mut server = Server::new();
    let login = server
        .mock("POST", upstream::LOGIN_PATH)
        .match_body(Matcher::Json(json!({
            "username": upstream::USERNAME,
            "password": upstream::PASSWORD
        })))
        .with_body(upstream::LOGIN_RESPONSE)
        .expect(1)
        .create();
    let _attrs = server
        .mock("GET", Matcher::Regex(upstream::ATTRIBUTES_PATH.into()))
        .with_body(upstream::ATTRIBUTES_RESPONSE)
        .create();

    let assert = cmd_call_assert(&server.url(), true, "attrs").success();
    let printed: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(printed["latitude"]["value"], json!(52.3676));
    assert_eq!(printed["longitude"]["ts"], json!(1700000000500i64));
    login.assert();
}

#[test]
fn call_telemetry_prints_upstream_body() {
    let mut server = Server::new();
    let _login = server
        .mock("POST", upstream::LOGIN_PATH)
        .with_body(upstream::LOGIN_RESPONSE)
        .create();
    let _telemetry = server
        .mock("GET", Matcher::Regex(upstream::TIMESERIES_PATH.into()))
        .with_body(upstream::TIMESERIES_RESPONSE)
        .create();

    let assert = cmd_call_assert(&server.url(), true, "telemetry").success();
    let printed: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let expected: Value = serde_json::from_str(upstream::TIMESERIES_RESPONSE).unwrap();
    assert_eq!(printed, expected);
}

#[test]
fn call_without_credentials_fails() {
    let mut server = Server::new();
    let login = server.mock("POST", Matcher::Any).expect(0).create();

    cmd_call_assert(&server.url(), false, "flush")
        .failure()
        .stdout("")
        .stderr(predicate::str::contains(
            "Error: Server misconfigured: TB_USER or TB_PASS not set",
        ));
    login.assert();
}

#[test]
fn call_unknown_action_fails() {
    let server = Server::new();
    cmd_call_assert(&server.url(), true, "delete")
        .failure()
        .stderr(predicate::str::contains("Error: Unknown action"));
}

#[test]
fn unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("tbproxy").unwrap();
    cmd.arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Subcommand must be one of"));
}
