//! # Copy Server Smoke Test
//!
//! Walks the HTTP surface of a running `server_copy` instance and checks
//! each endpoint's contract: listing, since-filtering (including the
//! sentinel message), key lookup, the 404 body, and refresh.
//!
//! The target defaults to a local instance; point `COPY_SERVER_URL` at a
//! deployed one to smoke-test it instead:
//!
//! ```sh
//! COPY_SERVER_URL=https://copy.example.com cargo run --bin test_copy_api
//! ```
//!
//! This is a live diagnostic, not part of `cargo test`; it needs a running
//! server with real source credentials behind it.

use lib_common::copy::CopyRecord;
use serde_json::Value;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_url =
        env::var("COPY_SERVER_URL").unwrap_or_else(|_| "http://127.0.0.1:8090".to_string());
    let client = reqwest::Client::new();

    println!("--- Copy server smoke test against {base_url} ---");

    // 1. Health probe
    let health = client.get(format!("{base_url}/health")).send().await?;
    assert!(health.status().is_success(), "health probe failed: {}", health.status());
    println!("✅ /health is OK");

    // 2. Refresh pulls from the real source and echoes the installed set
    let refreshed: Vec<CopyRecord> = client
        .get(format!("{base_url}/copy/refresh"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    println!("✅ /copy/refresh installed {} records", refreshed.len());

    // 3. Listing matches what refresh just installed
    let listed: Vec<CopyRecord> = client
        .get(format!("{base_url}/copy"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(listed.len(), refreshed.len(), "listing diverges from refresh");
    for record in &listed {
        if record.created_at().is_none() {
            println!(
                "⚠ record {} carries unparsable createdTime {:?}",
                record.id, record.created_time
            );
        }
    }
    println!("✅ /copy lists {} records", listed.len());

    // 4. A since before every record returns everything
    let since_all: Value = client
        .get(format!("{base_url}/copy"))
        .query(&[("since", "1970-01-01T00:00:00Z")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(
        since_all.as_array().map(Vec::len),
        Some(listed.len()),
        "since=epoch should return the full set"
    );
    println!("✅ since=<epoch> returns the full set");

    // 5. A since after every record returns the sentinel message
    let sentinel: Value = client
        .get(format!("{base_url}/copy"))
        .query(&[("since", "2999-01-01T00:00:00Z")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert!(
        sentinel.get("message").and_then(Value::as_str).is_some(),
        "expected the sentinel message object, got: {sentinel}"
    );
    println!("✅ since=<far future> returns the sentinel message");

    // 6. Key lookup round-trips a listed record (skip awkward keys)
    let lookup_target = listed.iter().find(|r| {
        !r.fields.key.is_empty()
            && r.fields.key != "refresh"
            && r.fields.key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    });
    if let Some(target) = lookup_target {
        let found: CopyRecord = client
            .get(format!("{base_url}/copy/{}", target.fields.key))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        assert_eq!(found.fields.key, target.fields.key);
        println!("✅ /copy/{} returned its copy text", target.fields.key);
    } else {
        println!("ℹ no lookup-friendly key in the data set, skipping lookup check");
    }

    // 7. A miss is a 404 with the documented body
    let missing = client
        .get(format!("{base_url}/copy/__definitely_not_a_key__"))
        .send()
        .await?;
    assert_eq!(missing.status().as_u16(), 404);
    let missing_body: Value = missing.json().await?;
    assert_eq!(missing_body["error"], "Key not found");
    println!("✅ unknown key returns 404 with the documented body");

    println!("--- All smoke checks passed ---");
    Ok(())
}
