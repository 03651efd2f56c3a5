// ABOUTME: End-to-end test of the bootstrap lifecycle against a live listener.
// ABOUTME: Covers route attachment, Basic Auth, embedded assets, and idempotent interrupt.

use axum::routing::get;
use stagehand::{BOOT_ASSETS, greeter};
use stagehand_core::Shutdown;
use stagehand_server::Boot;

const GREETER_CONFIG: &str = r#"
web:
  - name: greeter
    host: 127.0.0.1
    port: 0
    auth:
      realm: test-realm
      accounts:
        admin: secret
    assets:
      enabled: true
"#;

const INTERNAL_CONFIG: &str = r#"
internal:
  enabled: true
  host: 127.0.0.1
  port: 0
web:
  - name: greeter
    host: 127.0.0.1
    port: 0
"#;

#[tokio::test]
async fn bootstrap_lifecycle_end_to_end() {
    // 1. Parse the embedded configuration and build the boot set.
    let mut boot = Boot::from_slice(GREETER_CONFIG.as_bytes()).unwrap();

    // 2. Attach the greeter route and the asset bundle, then bootstrap.
    boot.web_mut("greeter")
        .unwrap()
        .route("/v1/greeter", get(greeter::greet))
        .with_assets(&BOOT_ASSETS);

    let shutdown = Shutdown::new();
    boot.bootstrap(&shutdown).await.unwrap();
    let addr = boot.web_mut("greeter").unwrap().local_addr().unwrap();
    let base = format!("http://{addr}");

    let client = reqwest::Client::new();

    // 3. Requests without credentials are challenged with the realm.
    let resp = client
        .get(format!("{base}/v1/greeter?name=Bob"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let challenge = resp
        .headers()
        .get("www-authenticate")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(
        challenge.contains("test-realm"),
        "challenge should name the realm: {}",
        challenge
    );

    // 4. Valid credentials reach the greeter.
    let resp = client
        .get(format!("{base}/v1/greeter?name=Bob"))
        .basic_auth("admin", Some("secret"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), r#"{"Message":"Hello Bob!"}"#);

    // 5. The asset bundle is served under the default prefix.
    let resp = client
        .get(format!("{base}/assets/index.html"))
        .basic_auth("admin", Some("secret"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("greeter"));

    // 6. Interrupt drains the listener; repeating it is a no-op.
    boot.interrupt().await.unwrap();
    boot.interrupt().await.unwrap();

    // 7. No further requests are accepted once interrupt has completed.
    let result = client.get(format!("{base}/v1/greeter")).send().await;
    assert!(result.is_err(), "listener should be closed after interrupt");
}

#[tokio::test]
async fn internal_entry_serves_health_and_info() {
    let mut boot = Boot::from_slice(INTERNAL_CONFIG.as_bytes()).unwrap();

    let shutdown = Shutdown::new();
    boot.bootstrap(&shutdown).await.unwrap();
    let addr = boot.internal_mut().unwrap().local_addr().unwrap();
    let base = format!("http://{addr}");

    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/healthy")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["healthy"], true);

    let resp = client.get(format!("{base}/info")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["version"].is_string());
    assert!(json["uptime_secs"].is_u64());

    boot.interrupt().await.unwrap();
}

#[tokio::test]
async fn global_shutdown_trigger_stops_serving() {
    let mut boot = Boot::from_slice(INTERNAL_CONFIG.as_bytes()).unwrap();

    let shutdown = Shutdown::new();
    boot.bootstrap(&shutdown).await.unwrap();

    // Trip the process-wide signal the way wait_for_signal would, then
    // interrupt to join the already-draining serve loops.
    shutdown.trigger();
    boot.interrupt().await.unwrap();

    assert!(boot.web_mut("greeter").unwrap().local_addr().is_none());
}
