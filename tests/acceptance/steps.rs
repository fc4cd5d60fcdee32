use crate::PrWindowWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONFIG_FILENAME: &str = "auth.properties";

async fn server(world: &mut PrWindowWorld) -> &MockServer {
    if world.server.is_none() {
        world.server = Some(MockServer::start().await);
    }
    world
        .server
        .as_ref()
        .expect("mock server should be running")
}

fn config_dir(world: &mut PrWindowWorld) -> std::path::PathBuf {
    world
        .config_dir
        .get_or_insert_with(|| tempfile::tempdir().expect("Failed to create config dir"))
        .path()
        .to_path_buf()
}

#[given("the GitHub API returns the pull requests")]
async fn given_api_returns_pull_requests(world: &mut PrWindowWorld, step: &Step) {
    let body = step
        .docstring
        .as_ref()
        .expect("pull request JSON docstring required");
    let body: serde_json::Value =
        serde_json::from_str(body).expect("docstring should be valid JSON");

    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/pulls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server(world).await)
        .await;
}

#[given(regex = r#"^the GitHub API responds with status (\d+) and body '(.*)'$"#)]
async fn given_api_responds_with(world: &mut PrWindowWorld, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/pulls"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server(world).await)
        .await;
}

#[given(regex = r#"^a config file with token "(.*)"$"#)]
async fn given_config_file_with_token(world: &mut PrWindowWorld, token: String) {
    let api_url = server(world).await.uri();
    let config_path = config_dir(world).join(CONFIG_FILENAME);
    std::fs::write(
        &config_path,
        format!("# test credentials\nauth={token}\napi_url={api_url}\n"),
    )
    .unwrap_or_else(|e| panic!("Failed to write config file {:?}: {}", config_path, e));
}

#[given(regex = r#"^the config file content is '(.*)'$"#)]
async fn given_config_file_content(world: &mut PrWindowWorld, content: String) {
    let config_path = config_dir(world).join(CONFIG_FILENAME);
    std::fs::write(&config_path, content.replace("\\n", "\n"))
        .unwrap_or_else(|e| panic!("Failed to write config file {:?}: {}", config_path, e));
}

#[given("no config file")]
async fn given_no_config_file(world: &mut PrWindowWorld) {
    let config_path = config_dir(world).join(CONFIG_FILENAME);
    let _ = std::fs::remove_file(&config_path);
}

#[when(regex = r#"^I run `prwindow(.*)`$"#)]
async fn when_run_prwindow(world: &mut PrWindowWorld, arguments: String) {
    let config_path = config_dir(world).join(CONFIG_FILENAME);

    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_prwindow"))
        .args(arguments.split_whitespace())
        .arg("--config")
        .arg(&config_path)
        .env_remove("RUST_LOG")
        .output()
        .await
        .unwrap_or_else(|e| panic!("Failed to execute prwindow: {}", e));

    world.captured_output = output.stdout;
    world.captured_error = output.stderr;
    world.command_status = Some(output.status);
}

#[then("the command succeeds")]
async fn then_command_succeeds(world: &mut PrWindowWorld) {
    assert!(
        world.command_status.is_some_and(|s| s.success()),
        "Command failed with status {:?}, stderr:\n{}",
        world.command_status,
        String::from_utf8_lossy(&world.captured_error)
    );
}

#[then(regex = r#"^the output should be "(.*)"$"#)]
async fn then_output_should_be(world: &mut PrWindowWorld, expected_output: String) {
    let output = String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8");
    assert_eq!(
        output.trim_end(),
        expected_output,
        "Expected output '{}', but got:\n---\n{}\n---",
        expected_output,
        output.trim_end()
    );
}

#[then(regex = r#"^the output lists pull requests (.*)$"#)]
async fn then_output_lists_pull_requests(world: &mut PrWindowWorld, ids: String) {
    let expected: Vec<u64> = ids
        .split(',')
        .map(|id| id.trim().parse().expect("pull request id should be a number"))
        .collect();

    let printed: Vec<serde_json::Value> =
        serde_json::from_slice(&world.captured_output).expect("stdout should be a JSON array");
    let actual: Vec<u64> = printed
        .iter()
        .map(|record| record["id"].as_u64().expect("record should have an id"))
        .collect();

    assert_eq!(actual, expected);
}

#[then(regex = r#"^record (\d+) has user "(.*)", title "(.*)", state "(.*)" and created_at "(.*)"$"#)]
async fn then_record_has_fields(
    world: &mut PrWindowWorld,
    id: u64,
    user: String,
    title: String,
    state: String,
    created_at: String,
) {
    let printed: Vec<serde_json::Value> =
        serde_json::from_slice(&world.captured_output).expect("stdout should be a JSON array");
    let record = printed
        .iter()
        .find(|record| record["id"].as_u64() == Some(id))
        .unwrap_or_else(|| panic!("record {} not found in output", id));

    assert_eq!(
        record,
        &serde_json::json!({
            "id": id,
            "user": user,
            "title": title,
            "state": state,
            "created_at": created_at,
        })
    );
}

#[then(regex = r#"^the command fails with "(.*)"$"#)]
async fn then_command_fails_with(world: &mut PrWindowWorld, expected_error: String) {
    assert!(
        world.command_status.is_some_and(|s| !s.success()),
        "Command unexpectedly succeeded with status {:?}",
        world.command_status
    );
    let error = String::from_utf8_lossy(&world.captured_error);
    assert!(
        error.contains(&expected_error),
        "Expected error containing '{}', but got:\n---\n{}\n---",
        expected_error,
        error
    );
}

#[then("nothing is printed to stdout")]
async fn then_nothing_printed(world: &mut PrWindowWorld) {
    assert!(
        world.captured_output.is_empty(),
        "Expected empty stdout, got:\n{}",
        String::from_utf8_lossy(&world.captured_output)
    );
}

#[then(regex = r#"^the API received one request with token "(.*)"$"#)]
async fn then_api_received_request(world: &mut PrWindowWorld, token: String) {
    let requests = server(world)
        .await
        .received_requests()
        .await
        .expect("request recording should be enabled");
    assert_eq!(requests.len(), 1, "expected exactly one API call");

    let request = &requests[0];
    assert_eq!(
        request.url.query(),
        Some("state=all&per_page=100&page=1"),
        "unexpected query string"
    );
    let authorization = request
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    assert_eq!(authorization, Some(format!("Bearer {token}").as_str()));
}
