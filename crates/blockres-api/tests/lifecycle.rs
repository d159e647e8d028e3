//! Construction, listening, and shutdown against real sockets.

use std::net::{IpAddr, Ipv4Addr};

use anyhow::{Result, anyhow};
use blockres_api::{DEFAULT_PORT, ResourceServer, ServerError, ServerEvent};
use blockres_catalog::{AssemblyError, IndexError};
use blockres_i18n::TranslationError;
use blockres_test_support::UserDataFixture;
use futures_util::future::join_all;
use serde_json::json;

const LOOPBACK: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

fn server(fixture: &UserDataFixture) -> Result<ResourceServer> {
    Ok(ResourceServer::new(fixture.path())?.with_bind_ip(LOOPBACK))
}

#[test]
fn construction_requires_translations() -> Result<()> {
    let fixture = UserDataFixture::new()?;
    match ResourceServer::new(fixture.path()) {
        Err(ServerError::Translations {
            source: TranslationError::Read { .. },
        }) => Ok(()),
        Err(other) => Err(anyhow!("unexpected error: {other:?}")),
        Ok(_) => Err(anyhow!("construction succeeded without locales.json")),
    }
}

#[test]
fn construction_rejects_malformed_translations() -> Result<()> {
    let fixture = UserDataFixture::new()?;
    fixture.write_file("locales.json", b"module.exports = { hello: {} };")?;
    assert!(matches!(
        ResourceServer::new(fixture.path()),
        Err(ServerError::Translations {
            source: TranslationError::Parse { .. }
        })
    ));
    Ok(())
}

#[test]
fn construction_fails_fast_on_malformed_catalog_entry() -> Result<()> {
    let fixture = UserDataFixture::sample()?;
    fixture.write_device("broken", &json!({"name": "no id"}))?;
    assert!(matches!(
        ResourceServer::new(fixture.path()),
        Err(ServerError::Index {
            source: IndexError::Assembly {
                source: AssemblyError::InvalidManifest { .. },
                ..
            }
        })
    ));
    Ok(())
}

#[test]
fn construction_builds_index_before_listening() -> Result<()> {
    let fixture = UserDataFixture::sample()?;
    let server = server(&fixture)?;
    assert_eq!(server.index().len(), 4);
    assert_eq!(server.user_data_path(), fixture.path());
    assert_eq!(DEFAULT_PORT, 20120);
    Ok(())
}

#[tokio::test]
async fn listen_serves_catalogs_and_shuts_down() -> Result<()> {
    let fixture = UserDataFixture::sample()?;
    let server = server(&fixture)?;
    let outcome = server.listen(Some(0)).await;
    let event = ServerEvent::from_listen(&outcome);
    let running = outcome?;
    let addr = running.local_addr();
    assert_eq!(event, ServerEvent::Ready { addr });
    assert_ne!(addr.port(), 0);

    let response = reqwest::get(format!("http://{addr}/extensions/zh-cn.json")).await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|value| value.as_bytes()),
        Some(&b"*"[..])
    );
    let body = response.text().await?;
    assert!(body.contains(r#""name":"舵机""#), "{body}");

    let missing = reqwest::get(format!("http://{addr}/devices/xx.json")).await?;
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
    drop(missing);

    running.shutdown().await?;
    assert!(reqwest::get(format!("http://{addr}/devices/en.json")).await.is_err());
    Ok(())
}

#[tokio::test]
async fn concurrent_requests_see_identical_bodies() -> Result<()> {
    let fixture = UserDataFixture::sample()?;
    let server = server(&fixture)?;
    let running = server.listen(Some(0)).await?;
    let url = format!("http://{}/extensions/en.json", running.local_addr());
    let client = reqwest::Client::new();

    let responses = join_all((0..32).map(|_| {
        let client = client.clone();
        let url = url.clone();
        async move { client.get(url).send().await?.bytes().await }
    }))
    .await;

    let expected = server
        .index()
        .lookup("extensions", "en")
        .ok_or_else(|| anyhow!("missing extensions/en"))?
        .clone();
    for body in responses {
        assert_eq!(body?, expected);
    }
    running.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn bind_failure_is_reported_not_retried() -> Result<()> {
    let fixture = UserDataFixture::sample()?;
    let server = server(&fixture)?;
    let first = server.listen(Some(0)).await?;
    let port = first.local_addr().port();

    let outcome = server.listen(Some(port)).await;
    match ServerEvent::from_listen(&outcome) {
        ServerEvent::Error { message } => {
            assert!(
                message.starts_with(&format!("Error while trying to listen port {port}: ")),
                "{message}"
            );
        }
        ServerEvent::Ready { addr } => return Err(anyhow!("second bind succeeded on {addr}")),
    }
    assert!(matches!(outcome, Err(ServerError::Bind { addr, .. }) if addr.port() == port));

    let still_serving = reqwest::get(format!("http://{}/devices/en.json", first.local_addr())).await?;
    assert_eq!(still_serving.status(), reqwest::StatusCode::OK);
    first.shutdown().await?;
    Ok(())
}
