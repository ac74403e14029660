use clap::{ArgMatches, Command, arg};
use menuroute::handlers::*;
use menuroute_core::config::MenuConfig;
use menuroute_core::iframe::IframeRouteManager;
use menuroute_core::processor::AppMode;
use menuroute_core::router::Router;
use menuroute_fetch::MENU_LIST_PATH;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tempfile::{NamedTempFile, TempDir};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn roles(list: &[&str]) -> Vec<String> {
    list.iter().map(|r| r.to_string()).collect()
}

fn menu_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

// ============================================================================
// Menu File Loading Tests
// ============================================================================

#[test]
fn test_load_menus_from_bare_array() -> Result<(), Box<dyn std::error::Error>> {
    let temp_file = menu_file(r#"[{"path": "/a", "name": "A", "children": []}]"#);

    let menus = load_menus_from_file(temp_file.path())?;

    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].name.as_deref(), Some("A"));
    assert_eq!(menus[0].children, Some(vec![]));
    Ok(())
}

#[test]
fn test_load_menus_from_saved_response() -> Result<(), Box<dyn std::error::Error>> {
    let temp_file = menu_file(
        r#"{"code": 200, "msg": "ok", "data": [{"path": "/b", "name": "B", "component": "/b"}]}"#,
    );

    let menus = load_menus_from_file(temp_file.path())?;

    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].component.as_deref(), Some("/b"));
    Ok(())
}

#[test]
fn test_load_menus_rejects_error_response() {
    let temp_file = menu_file(r#"{"code": 500, "msg": "boom"}"#);
    let err = load_menus_from_file(temp_file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("500"));
}

#[test]
fn test_load_menus_rejects_invalid_json() {
    let temp_file = menu_file("not json");
    assert!(load_menus_from_file(temp_file.path()).is_err());
}

#[test]
fn test_load_menus_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_menus_from_file(&temp_dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read menu file"));
}

#[test]
fn test_bundled_menus_parse() {
    let menus = parse_menu_document(DEFAULT_MENUS).unwrap();
    let names: Vec<_> = menus.iter().filter_map(|m| m.name.as_deref()).collect();
    assert!(names.contains(&"Dashboard"));
    assert!(names.contains(&"Docs"));
}

// ============================================================================
// Role Parsing Tests
// ============================================================================

#[test]
fn test_parse_roles() {
    assert_eq!(parse_roles(Some("R_SUPER,R_ADMIN")), roles(&["R_SUPER", "R_ADMIN"]));
    assert_eq!(parse_roles(Some(" R_ADMIN , ,R_ADMIN ")), roles(&["R_ADMIN"]));
    assert!(parse_roles(Some("")).is_empty());
    assert!(parse_roles(None).is_empty());
}

// ============================================================================
// Pipeline Helper Tests
// ============================================================================

#[tokio::test]
async fn test_process_bundled_menus_for_admin() {
    let temp_dir = TempDir::new().unwrap();
    let config = MenuConfig {
        state_dir: temp_dir.path().display().to_string(),
        ..MenuConfig::default()
    };

    let menus = process_menus(&config, None, &roles(&["R_ADMIN"]), false)
        .await
        .unwrap();
    let names: Vec<_> = menus.iter().filter_map(|m| m.name.as_deref()).collect();

    assert_eq!(names, vec!["Dashboard", "System", "Docs"]);
    assert_eq!(menus[1].children().len(), 1);
    assert_eq!(menus[1].children()[0].path, "/system/user");
}

#[test]
fn test_build_route_table_records_iframes() {
    let menus = parse_menu_document(DEFAULT_MENUS).unwrap();
    let normalized = menuroute_core::path::normalize_menu_paths(&menus, "");
    let iframes = Arc::new(IframeRouteManager::in_memory());

    let registry = build_route_table(&normalized, iframes.clone()).unwrap();

    assert!(registry.is_registered());
    assert!(registry.router().has_route("Exception404"));
    assert!(iframes.find_by_path("/outside/iframe/docs").is_some());
}

#[tokio::test]
async fn test_check_path() {
    let menus = parse_menu_document(DEFAULT_MENUS).unwrap();

    assert!(check_path(menus.clone(), &roles(&["R_ADMIN"]), "/system/user").await.unwrap());
    assert!(!check_path(menus.clone(), &roles(&["R_ADMIN"]), "/system/role").await.unwrap());
    assert!(check_path(menus.clone(), &roles(&["R_SUPER"]), "/system/role").await.unwrap());
    assert!(check_path(menus, &roles(&["R_USER"]), "/auth/login").await.unwrap());
}

#[tokio::test]
async fn test_backend_saved_response_is_not_role_filtered() {
    let temp_file = menu_file(
        &json!({
            "code": 200,
            "msg": "ok",
            "data": [{
                "path": "/system",
                "name": "System",
                "meta": {"roles": ["R_SUPER"]},
                "children": [{"path": "user", "name": "User", "component": "/system/user"}]
            }]
        })
        .to_string(),
    );
    let config = MenuConfig {
        mode: AppMode::Backend,
        ..MenuConfig::default()
    };

    let menus = process_menus(&config, Some(temp_file.path()), &roles(&["R_USER"]), false)
        .await
        .unwrap();

    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].children()[0].path, "/system/user");
}

#[tokio::test]
async fn test_backend_menus_fetched_with_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MENU_LIST_PATH))
        .and(header("Authorization", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "ok",
            "data": [{"path": "/home", "name": "Home", "component": "/home/index"}]
        })))
        .mount(&mock_server)
        .await;

    let config = MenuConfig {
        mode: AppMode::Backend,
        api_base_url: mock_server.uri(),
        access_token: Some("secret".to_string()),
        ..MenuConfig::default()
    };

    let menus = process_menus(&config, None, &[], false).await.unwrap();

    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].name.as_deref(), Some("Home"));
}

#[tokio::test]
async fn test_backend_failure_names_the_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MENU_LIST_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = MenuConfig {
        mode: AppMode::Backend,
        api_base_url: mock_server.uri(),
        ..MenuConfig::default()
    };

    let err = process_menus(&config, None, &[], false).await.unwrap_err();
    assert!(err.to_string().contains(&mock_server.uri()));
}

// ============================================================================
// State File Tests
// ============================================================================

#[test]
fn test_write_state_files() {
    let temp_dir = TempDir::new().unwrap();
    let state_dir = temp_dir.path().join("menuroute");

    let written = write_state_files(&state_dir, false).unwrap();
    assert_eq!(written.len(), 2);

    let config = MenuConfig::load(&state_dir.join("config.json")).unwrap();
    assert_eq!(config.state_dir, state_dir.display().to_string());
    assert_eq!(config.menu_file(), state_dir.join("menus.json"));
    assert!(load_menus_from_file(&config.menu_file()).is_ok());
}

#[test]
fn test_write_state_files_keeps_existing_unless_forced() {
    let temp_dir = TempDir::new().unwrap();
    let menu_path = temp_dir.path().join("menus.json");
    std::fs::write(&menu_path, "[]").unwrap();

    let written = write_state_files(temp_dir.path(), false).unwrap();
    assert_eq!(written, vec![temp_dir.path().join("config.json")]);
    assert_eq!(std::fs::read_to_string(&menu_path).unwrap(), "[]");

    let written = write_state_files(temp_dir.path(), true).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(std::fs::read_to_string(&menu_path).unwrap(), DEFAULT_MENUS);
}

fn init_args(dir: &std::path::Path, extra: &[&str]) -> ArgMatches {
    let cmd = Command::new("init")
        .arg(arg!(-q --"quiet"))
        .arg(arg!([PATH]))
        .arg(arg!(-f --"force"));
    let dir = dir.display().to_string();
    let mut argv = vec!["init", dir.as_str()];
    argv.extend_from_slice(extra);
    cmd.get_matches_from(argv)
}

#[test]
fn test_quiet_init_keeps_existing_files_without_prompting() {
    let temp_dir = TempDir::new().unwrap();
    let menu_path = temp_dir.path().join("menus.json");
    std::fs::write(&menu_path, "[]").unwrap();

    handle_init(&init_args(temp_dir.path(), &["--quiet"])).unwrap();

    assert_eq!(std::fs::read_to_string(&menu_path).unwrap(), "[]");
    assert!(temp_dir.path().join("config.json").exists());
}

#[test]
fn test_quiet_init_with_force_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let menu_path = temp_dir.path().join("menus.json");
    std::fs::write(&menu_path, "[]").unwrap();

    handle_init(&init_args(temp_dir.path(), &["--quiet", "--force"])).unwrap();

    assert_eq!(std::fs::read_to_string(&menu_path).unwrap(), DEFAULT_MENUS);
}
