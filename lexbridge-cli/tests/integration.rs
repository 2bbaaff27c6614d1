use assert_cmd::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LEMMA_BODY: &str = r#"{
    "head": {"vars": ["lex", "lemma"]},
    "results": {"bindings": [
        {"lex": {"type": "uri", "value": "https://wiki.example.org/entity/L1"},
         "lemma": {"type": "literal", "value": "athenai"}},
        {"lex": {"type": "uri", "value": "https://wiki.example.org/entity/L2"},
         "lemma": {"type": "literal", "value": "sparta"}}
    ]}
}"#;

/// Helper to create a `lexbridge` command that runs in an isolated temp directory.
fn lexbridge_cmd(work_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("lexbridge");
    cmd.current_dir(work_dir.path());
    cmd.env("HOME", work_dir.path());
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write_login_info(work_dir: &TempDir, wiki_url: &str) {
    let login = serde_json::json!({
        "wiki_url": wiki_url,
        "consumer_token": "unused",
        "access_token": "unused",
        "sleep": 0.0
    });
    std::fs::write(
        work_dir.path().join("login_info.json"),
        serde_json::to_string(&login).unwrap(),
    )
    .unwrap();
}

// ============================================================================
// Argument handling
// ============================================================================

#[test]
fn version_flag() {
    cargo_bin_cmd!("lexbridge")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lexbridge"));
}

#[test]
fn help_flag() {
    cargo_bin_cmd!("lexbridge")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("match"))
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("load"))
        .stdout(predicate::str::contains("drop"));
}

#[test]
fn verbose_quiet_conflict() {
    cargo_bin_cmd!("lexbridge")
        .args(["--verbose", "--quiet", "query", "-e", "ASK {}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn unknown_query_form_rejected() {
    cargo_bin_cmd!("lexbridge")
        .args(["query", "--form", "insert", "-e", "ASK {}"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown query form 'insert'"));
}

#[test]
fn unknown_method_rejected() {
    cargo_bin_cmd!("lexbridge")
        .args(["--method", "put", "query", "-e", "ASK {}"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown HTTP method 'put'"));
}

#[test]
fn drop_requires_force() {
    let tmp = TempDir::new().unwrap();
    lexbridge_cmd(&tmp)
        .args(["drop", "http://example.org/g1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn public_endpoint_without_user_agent_fails() {
    let tmp = TempDir::new().unwrap();
    lexbridge_cmd(&tmp)
        .args(["query", "-e", "ASK {}"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("user agent"));
}

#[test]
fn match_without_wiki_url_is_usage_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("names.csv"), "anc_name,transc_name\n").unwrap();
    lexbridge_cmd(&tmp)
        .args([
            "--endpoint",
            "http://127.0.0.1:1/sparql",
            "match",
            "--csv",
            "names.csv",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("wiki_url"));
}

// ============================================================================
// Against a mock endpoint
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn match_writes_matching_entries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query/sparql"))
        .and(body_string_contains("lexicalCategory"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LEMMA_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    write_login_info(&tmp, &server.uri());
    std::fs::write(
        tmp.path().join("cigs.csv"),
        "id,anc_name,transc_name\n1,Athenai,Athens\n2,Roma,Rome\n3,,Sparta\n",
    )
    .unwrap();

    lexbridge_cmd(&tmp)
        .args(["match", "--csv", "cigs.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 matching entries written to"));

    let written = std::fs::read_to_string(tmp.path().join("matching_entries.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["Athenai", "Sparta"]);
    assert_eq!(value["Athenai"]["id"], 1);
    assert_eq!(value["Sparta"]["anc_name"], serde_json::Value::Null);
    assert!(written.starts_with("{\n    \"Athenai\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn query_prints_bindings_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sparql"))
        .and(header("accept", "application/sparql-results+json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LEMMA_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let endpoint = format!("{}/sparql", server.uri());
    lexbridge_cmd(&tmp)
        .args([
            "--endpoint",
            endpoint.as_str(),
            "--method",
            "get",
            "--sleep",
            "0",
            "query",
            "--format",
            "json",
            "-e",
            "SELECT ?lex ?lemma WHERE { ?lex wikibase:lemma ?lemma }",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"athenai\""))
        .stdout(predicate::str::contains("\"sparta\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn undecodable_query_response_warns_but_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let endpoint = server.uri();
    lexbridge_cmd(&tmp)
        .args([
            "--endpoint",
            endpoint.as_str(),
            "--sleep",
            "0",
            "query",
            "--form",
            "ask",
            "ASK {}",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("no value"));
}

#[tokio::test(flavor = "multi_thread")]
async fn load_from_bucket_and_drop() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains(
            "update=LOAD+%3Chttps%3A%2F%2Fmybucket.s3.amazonaws.com%2Fdata.ttl%3E",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"loaded": true}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("update=DROP+GRAPH"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"dropped": true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let endpoint = server.uri();
    lexbridge_cmd(&tmp)
        .args([
            "--endpoint",
            endpoint.as_str(),
            "--sleep",
            "0",
            "load",
            "data.ttl",
            "http://example.org/g1",
            "--bucket",
            "mybucket",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"loaded\": true"));

    lexbridge_cmd(&tmp)
        .args([
            "--endpoint",
            endpoint.as_str(),
            "--sleep",
            "0",
            "drop",
            "http://example.org/g1",
            "--force",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dropped\": true"));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_text_media_type_prints_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("accept", "text/plain"))
        .and(body_string_contains("using-graph-uri=urn%3Ag1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Modified 3 triples"))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let endpoint = server.uri();
    lexbridge_cmd(&tmp)
        .args([
            "--endpoint",
            endpoint.as_str(),
            "--sleep",
            "0",
            "update",
            "--media-type",
            "text/plain",
            "--using-graph",
            "urn:g1",
            "-e",
            "DELETE WHERE { ?s ?p ?o }",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Modified 3 triples"));
}
