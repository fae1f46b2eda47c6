//! Exercises the token cache against a minimal in-process HTTP stub, so the reuse/refresh/single-flight behaviour
//! can be asserted by counting the auth calls that actually hit the wire.
use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use reqwest::Client;
use stk_tools::{StkApiError, StkConfig, TokenCache};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::Mutex,
};

/// Serves one canned JSON body per connection, in order, repeating the last one; counts connections handled.
async fn spawn_auth_stub(bodies: Vec<String>, hits: Arc<AtomicUsize>, delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    let queue = Arc::new(Mutex::new(VecDeque::from(bodies)));
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else { return };
            let queue = Arc::clone(&queue);
            let hits = Arc::clone(&hits);
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                // Read until the end of the request headers; the request body is irrelevant to the stub.
                loop {
                    match stream.read(&mut chunk).await {
                        Ok(0) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        Err(_) => return,
                    }
                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                hits.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                let body = {
                    let mut q = queue.lock().await;
                    if q.len() > 1 {
                        q.pop_front().unwrap()
                    } else {
                        q.front().cloned().unwrap_or_default()
                    }
                };
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: \
                     close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    addr
}

fn config_for(addr: SocketAddr) -> StkConfig {
    StkConfig { base_url: format!("http://{addr}"), ..StkConfig::default() }
}

#[tokio::test]
async fn token_is_reused_within_expiry_window() {
    let _ = env_logger::try_init();
    let hits = Arc::new(AtomicUsize::new(0));
    let addr =
        spawn_auth_stub(vec![r#"{"token":"tok-1","expires_in":3600}"#.to_string()], hits.clone(), Duration::ZERO).await;
    let cache = TokenCache::new(config_for(addr), Client::new());

    assert_eq!(cache.get_token().await.unwrap(), "tok-1");
    assert_eq!(cache.get_token().await.unwrap(), "tok-1");
    assert_eq!(hits.load(Ordering::SeqCst), 1, "second call within the expiry window must not hit the network");
}

#[tokio::test]
async fn stale_token_triggers_exactly_one_refresh() {
    let _ = env_logger::try_init();
    let hits = Arc::new(AtomicUsize::new(0));
    // A 60s expiry collapses to zero after the safety margin, so the first token is stale immediately.
    let bodies = vec![
        r#"{"token":"stale","expires_in":60}"#.to_string(),
        r#"{"token":"fresh","expires_in":3600}"#.to_string(),
    ];
    let addr = spawn_auth_stub(bodies, hits.clone(), Duration::ZERO).await;
    let cache = TokenCache::new(config_for(addr), Client::new());

    assert_eq!(cache.get_token().await.unwrap(), "stale");
    assert_eq!(cache.get_token().await.unwrap(), "fresh");
    assert_eq!(cache.get_token().await.unwrap(), "fresh");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn concurrent_callers_share_a_single_refresh() {
    let _ = env_logger::try_init();
    let hits = Arc::new(AtomicUsize::new(0));
    let addr = spawn_auth_stub(
        vec![r#"{"token":"tok-1","expires_in":3600}"#.to_string()],
        hits.clone(),
        Duration::from_millis(100),
    )
    .await;
    let cache = Arc::new(TokenCache::new(config_for(addr), Client::new()));

    let mut handles = Vec::new();
    for _ in 0..5 {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move { cache.get_token().await }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "tok-1");
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1, "concurrent callers must coalesce onto one auth call");
}

#[tokio::test]
async fn missing_token_field_is_an_auth_error() {
    let _ = env_logger::try_init();
    let hits = Arc::new(AtomicUsize::new(0));
    let addr = spawn_auth_stub(vec![r#"{"expires_in":3600}"#.to_string()], hits.clone(), Duration::ZERO).await;
    let cache = TokenCache::new(config_for(addr), Client::new());

    let err = cache.get_token().await.expect_err("expected auth error");
    assert!(matches!(err, StkApiError::NoTokenInResponse));
}
