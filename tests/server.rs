use axum::extract::State;
use axum::http::StatusCode;
use bonsai_onboarding::server::{self, AppState, BANNER};
use bonsai_onboarding::AppConfig;
use bonsai_persistence::{ConnectivityProbe, DbConfig};
use std::collections::HashMap;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn sqlite_state() -> AppState {
  AppState::new(ConnectivityProbe::new(DbConfig::with_url(":memory:")))
}

fn unreachable_state() -> AppState {
  let vars: HashMap<String, String> = [("DB_USER", "bonsai"), ("DB_PASSWORD", "x"), ("DB_DSN", "127.0.0.1:1/bonsai")]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
  AppState::new(ConnectivityProbe::new(DbConfig::from_map(&vars)))
}

#[test]
fn db_test_reports_the_server_date() {
  let (status, body) = tokio_test::block_on(server::db_test(State(sqlite_state())));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.0["success"], true);
  assert!(body.0["date"].as_str().map(|d| !d.is_empty()).unwrap_or(false));
}

#[test]
fn db_test_failure_is_a_500_with_the_message() {
  let (status, body) = tokio_test::block_on(server::db_test(State(unreachable_state())));
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body.0["success"], false);
  assert!(body.0["error"].as_str().map(|e| !e.is_empty()).unwrap_or(false));
  assert!(body.0.get("date").is_none());
}

#[test]
fn missing_configuration_is_also_a_500() {
  let state = AppState::new(ConnectivityProbe::new(DbConfig::default()));
  let (status, body) = tokio_test::block_on(server::db_test(State(state)));
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body.0["error"].as_str().unwrap_or_default().contains("DB_USER"));
}

async fn get(addr: std::net::SocketAddr, path: &str) -> String {
  let mut stream = TcpStream::connect(addr).await.expect("connect");
  let req = format!("GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n", path);
  stream.write_all(req.as_bytes()).await.expect("write");
  let mut buf = Vec::new();
  stream.read_to_end(&mut buf).await.expect("read");
  String::from_utf8_lossy(&buf).into_owned()
}

#[tokio::test]
async fn routes_are_served_over_http() {
  let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
  let addr = listener.local_addr().unwrap();
  let handle = tokio::spawn(server::serve_on(listener, sqlite_state()));

  let root = get(addr, "/").await;
  assert!(root.starts_with("HTTP/1.1 200"));
  assert!(root.ends_with(BANNER));

  let probe = get(addr, "/api/test").await;
  assert!(probe.starts_with("HTTP/1.1 200"));
  assert!(probe.contains("\"success\":true"));

  let missing = get(addr, "/nope").await;
  assert!(missing.starts_with("HTTP/1.1 404"));

  handle.abort();
}

#[test]
fn port_and_bind_address_come_from_the_environment() {
  let cfg = AppConfig::from_lookup(|_| None).unwrap();
  assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:3001");

  let cfg = AppConfig::from_lookup(|k| match k {
              "PORT" => Some("8080".into()),
              "BIND_ADDR" => Some("127.0.0.1".into()),
              _ => None,
            }).unwrap();
  assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:8080");

  assert!(AppConfig::from_lookup(|k| (k == "PORT").then(|| "abc".to_string())).is_err());
}
