//! Integration tests for the management API surface.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::mpsc;

use nginx_site_manager::config::ManagerConfig;
use nginx_site_manager::http::HttpServer;
use nginx_site_manager::lifecycle::Shutdown;

mod common;
use common::Sandbox;

/// Boot a server on an ephemeral loopback port.
async fn start_server(config: ManagerConfig) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (_, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    // Give the acceptor a moment to come up.
    tokio::time::sleep(Duration::from_millis(100)).await;

    (addr, shutdown)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_create_then_list_and_detail() {
    let sandbox = Sandbox::new();
    let (addr, shutdown) = start_server(sandbox.config()).await;
    let client = client();

    let res = client
        .post(format!("http://{addr}/sites"))
        .json(&serde_json::json!({
            "server_name": "svc-a",
            "server_address": "10.0.0.5"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let outcome: serde_json::Value = res.json().await.unwrap();
    assert_eq!(outcome["success"], true, "{}", outcome["message"]);

    let res = client
        .get(format!("http://{addr}/sites"))
        .send()
        .await
        .unwrap();
    let list: serde_json::Value = res.json().await.unwrap();
    assert_eq!(list["total"], 1);
    assert_eq!(list["sites"][0]["name"], "svc-a");
    assert_eq!(list["sites"][0]["enabled"], true);

    let res = client
        .get(format!("http://{addr}/sites/svc-a"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let detail: serde_json::Value = res.json().await.unwrap();
    assert_eq!(detail["upstream"], "10.0.0.5");
    assert_eq!(detail["enabled"], true);
    assert!(detail["content"]
        .as_str()
        .unwrap()
        .contains("server 10.0.0.5:443;"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_duplicate_create_reports_failure() {
    let sandbox = Sandbox::new();
    let (addr, shutdown) = start_server(sandbox.config()).await;
    let client = client();

    let body = serde_json::json!({
        "server_name": "svc-a",
        "server_address": "10.0.0.5"
    });
    client
        .post(format!("http://{addr}/sites"))
        .json(&body)
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("http://{addr}/sites"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let outcome: serde_json::Value = res.json().await.unwrap();
    assert_eq!(outcome["success"], false);
    assert!(outcome["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_edit_roundtrips_content() {
    let sandbox = Sandbox::new();
    let (addr, shutdown) = start_server(sandbox.config()).await;
    let client = client();

    let content = "upstream svc-a {\n    server 10.1.1.1:443;\n}\n";
    let res = client
        .put(format!("http://{addr}/sites/svc-a"))
        .json(&serde_json::json!({ "content": content }))
        .send()
        .await
        .unwrap();
    let outcome: serde_json::Value = res.json().await.unwrap();
    assert_eq!(outcome["success"], true, "{}", outcome["message"]);

    let res = client
        .get(format!("http://{addr}/sites/svc-a"))
        .send()
        .await
        .unwrap();
    let detail: serde_json::Value = res.json().await.unwrap();
    assert_eq!(detail["content"], content);
    assert_eq!(detail["rows"], 4);
    // Edit never creates the enable link.
    assert_eq!(detail["enabled"], false);

    shutdown.trigger();
}

#[tokio::test]
async fn test_delete_removes_from_listing() {
    let sandbox = Sandbox::new();
    let (addr, shutdown) = start_server(sandbox.config()).await;
    let client = client();

    client
        .post(format!("http://{addr}/sites"))
        .json(&serde_json::json!({
            "server_name": "svc-a",
            "server_address": "10.0.0.5"
        }))
        .send()
        .await
        .unwrap();

    let res = client
        .delete(format!("http://{addr}/sites/svc-a"))
        .send()
        .await
        .unwrap();
    let outcome: serde_json::Value = res.json().await.unwrap();
    assert_eq!(outcome["success"], true, "{}", outcome["message"]);

    let res = client
        .get(format!("http://{addr}/sites"))
        .send()
        .await
        .unwrap();
    let list: serde_json::Value = res.json().await.unwrap();
    assert_eq!(list["total"], 0);

    let res = client
        .get(format!("http://{addr}/sites/svc-a"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_list_search_and_pagination() {
    let sandbox = Sandbox::new();
    for name in ["api-prod", "api-staging", "web-prod", "web-staging"] {
        std::fs::write(sandbox.available.join(name), "x").unwrap();
    }
    let (addr, shutdown) = start_server(sandbox.config()).await;
    let client = client();

    let res = client
        .get(format!("http://{addr}/sites?search=api"))
        .send()
        .await
        .unwrap();
    let list: serde_json::Value = res.json().await.unwrap();
    assert_eq!(list["total"], 2);
    assert_eq!(list["sites"][0]["name"], "api-prod");
    assert_eq!(list["sites"][1]["name"], "api-staging");

    let res = client
        .get(format!("http://{addr}/sites?page=2&per_page=3"))
        .send()
        .await
        .unwrap();
    let list: serde_json::Value = res.json().await.unwrap();
    assert_eq!(list["total"], 4);
    assert_eq!(list["sites"].as_array().unwrap().len(), 1);
    // Alphabetical order: page 2 of 3-per-page holds the last name.
    assert_eq!(list["sites"][0]["name"], "web-staging");

    shutdown.trigger();
}

#[tokio::test]
async fn test_logs_served_and_missing_is_404() {
    let sandbox = Sandbox::new();
    std::fs::write(
        sandbox.logs.join("svc-a.access.log"),
        "GET / 200\nGET /x 404\n",
    )
    .unwrap();
    let (addr, shutdown) = start_server(sandbox.config()).await;
    let client = client();

    let res = client
        .get(format!("http://{addr}/logs/svc-a"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "GET / 200\nGET /x 404\n");

    let res = client
        .get(format!("http://{addr}/logs/ghost"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_traversal_names_are_rejected() {
    let sandbox = Sandbox::new();
    let (addr, shutdown) = start_server(sandbox.config()).await;
    let client = client();

    let res = client
        .post(format!("http://{addr}/sites"))
        .json(&serde_json::json!({
            "server_name": "../evil",
            "server_address": "10.0.0.5"
        }))
        .send()
        .await
        .unwrap();
    let outcome: serde_json::Value = res.json().await.unwrap();
    assert_eq!(outcome["success"], false);

    // A name with a disallowed character dies at parsing, not on disk.
    let res = client
        .get(format!("http://{addr}/logs/bad%20name"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    shutdown.trigger();
}

#[tokio::test]
async fn test_api_key_guard() {
    let sandbox = Sandbox::new();
    let mut config = sandbox.config();
    config.auth.enabled = true;
    config.auth.api_key = "test-secret".to_string();
    let (addr, shutdown) = start_server(config).await;
    let client = client();

    let res = client
        .get(format!("http://{addr}/sites"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    let res = client
        .get(format!("http://{addr}/sites"))
        .header("Authorization", "Bearer wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    let res = client
        .get(format!("http://{addr}/sites"))
        .header("Authorization", "Bearer test-secret")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
}
