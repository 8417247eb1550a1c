use std::sync::Arc;
use std::time::Duration;

use futures::stream::StreamExt;
use holochain_serialized_bytes::prelude::*;
use holochain_websocket::*;
use url2::prelude::*;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();
}

#[derive(serde::Serialize, serde::Deserialize, SerializedBytes, Debug, Clone, PartialEq)]
struct TestMessage(pub String);

async fn bind_echo_server() -> Url2 {
    let mut server = WebsocketListener::bind(
        url2!("ws://127.0.0.1:0"),
        Arc::new(WebsocketConfig::default()),
    )
    .await
    .unwrap();
    let binding = server.local_addr().clone();

    tokio::task::spawn(async move {
        while let Ok((send, mut recv)) = server.accept().await {
            tokio::task::spawn(async move {
                while let Some(msg) = recv.next().await {
                    match msg {
                        WebsocketMessage::Request(data, respond) => {
                            let msg: TestMessage = data.try_into().unwrap();
                            let msg = TestMessage(format!("echo: {}", msg.0));
                            respond(msg.try_into().unwrap()).await.unwrap();
                        }
                        WebsocketMessage::Signal(data) => {
                            let msg: TestMessage = data.try_into().unwrap();
                            let msg = TestMessage(format!("echo: {}", msg.0));
                            send.signal(msg).await.unwrap();
                        }
                        WebsocketMessage::Close(_) => break,
                    }
                }
            });
        }
    });

    binding
}

#[tokio::test(flavor = "multi_thread")]
async fn websocket_request_echo() {
    init_tracing();
    let binding = bind_echo_server().await;

    let (send, _recv) = connect(binding, Arc::new(WebsocketConfig::default()))
        .await
        .unwrap();

    let rsp: TestMessage = send
        .request(TestMessage("hello".to_string()))
        .await
        .unwrap();
    assert_eq!("echo: hello", &rsp.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn websocket_signal_echo_preserves_order() {
    init_tracing();
    let binding = bind_echo_server().await;

    let (send, mut recv) = connect(binding, Arc::new(WebsocketConfig::default()))
        .await
        .unwrap();

    for i in 0..5 {
        send.signal(TestMessage(format!("sig {}", i))).await.unwrap();
    }

    for i in 0..5 {
        match recv.next().await {
            Some(WebsocketMessage::Signal(data)) => {
                let msg: TestMessage = data.try_into().unwrap();
                assert_eq!(format!("echo: sig {}", i), msg.0);
            }
            oth => panic!("unexpected: {:?}", oth),
        }
    }
}

/// Responses routed by correlation id, not by arrival order: the server
/// holds all the requests and answers them newest first.
#[tokio::test(flavor = "multi_thread")]
async fn websocket_concurrent_requests_resolve_out_of_order() {
    init_tracing();
    const COUNT: usize = 10;

    let mut server = WebsocketListener::bind(
        url2!("ws://127.0.0.1:0"),
        Arc::new(WebsocketConfig::default()),
    )
    .await
    .unwrap();
    let binding = server.local_addr().clone();

    tokio::task::spawn(async move {
        let (_send, mut recv) = server.accept().await.unwrap();
        let mut held = Vec::new();
        while held.len() < COUNT {
            if let Some(WebsocketMessage::Request(data, respond)) = recv.next().await {
                let msg: TestMessage = data.try_into().unwrap();
                held.push((msg, respond));
            }
        }
        while let Some((msg, respond)) = held.pop() {
            let msg = TestMessage(format!("echo: {}", msg.0));
            respond(msg.try_into().unwrap()).await.unwrap();
        }
    });

    let (send, _recv) = connect(binding, Arc::new(WebsocketConfig::default()))
        .await
        .unwrap();

    let all = futures::future::join_all((0..COUNT).map(|i| {
        let send = send.clone();
        async move {
            let rsp: TestMessage = send.request(TestMessage(format!("msg {}", i))).await?;
            WebsocketResult::Ok((i, rsp))
        }
    }))
    .await;

    for result in all {
        let (i, rsp) = result.unwrap();
        assert_eq!(format!("echo: msg {}", i), rsp.0);
    }
}

/// Closing the connection fails every outstanding request with `Closed`
/// and any request issued afterwards fails the same way.
#[tokio::test(flavor = "multi_thread")]
async fn websocket_close_fails_pending_and_future_requests() {
    init_tracing();

    // This server accepts but never answers.
    let mut server = WebsocketListener::bind(
        url2!("ws://127.0.0.1:0"),
        Arc::new(WebsocketConfig::default()),
    )
    .await
    .unwrap();
    let binding = server.local_addr().clone();
    tokio::task::spawn(async move {
        let (_send, mut recv) = server.accept().await.unwrap();
        while recv.next().await.is_some() {}
    });

    let (send, _recv) = connect(binding, Arc::new(WebsocketConfig::default()))
        .await
        .unwrap();

    let mut outstanding = Vec::new();
    for i in 0..3 {
        let send = send.clone();
        outstanding.push(tokio::task::spawn(async move {
            send.request::<_, TestMessage>(TestMessage(format!("never answered {}", i)))
                .await
        }));
    }
    // Let the requests hit the pending table before closing.
    tokio::time::sleep(Duration::from_millis(50)).await;

    send.close().await;

    for handle in outstanding {
        match handle.await.unwrap() {
            Err(WebsocketError::Closed) => {}
            oth => panic!("unexpected: {:?}", oth),
        }
    }

    match send
        .request::<_, TestMessage>(TestMessage("too late".to_string()))
        .await
    {
        Err(WebsocketError::Closed) => {}
        oth => panic!("unexpected: {:?}", oth),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn websocket_request_timeout() {
    init_tracing();

    let mut server = WebsocketListener::bind(
        url2!("ws://127.0.0.1:0"),
        Arc::new(WebsocketConfig::default()),
    )
    .await
    .unwrap();
    let binding = server.local_addr().clone();
    tokio::task::spawn(async move {
        let (_send, mut recv) = server.accept().await.unwrap();
        while recv.next().await.is_some() {}
    });

    let (send, _recv) = connect(binding, Arc::new(WebsocketConfig::default()))
        .await
        .unwrap();

    match send
        .request_timeout::<_, TestMessage>(
            TestMessage("no answer".to_string()),
            Duration::from_millis(100),
        )
        .await
    {
        Err(WebsocketError::RequestTimeout) => {}
        oth => panic!("unexpected: {:?}", oth),
    }
}

/// A frame that doesn't decode as a wire message takes the whole session
/// down: there is no id to attribute the failure to.
#[tokio::test(flavor = "multi_thread")]
async fn websocket_malformed_frame_is_fatal() {
    init_tracing();

    let raw = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = raw.local_addr().unwrap();
    tokio::task::spawn(async move {
        use futures::sink::SinkExt;
        let (stream, _) = raw.accept().await.unwrap();
        let mut socket = tokio_tungstenite::accept_async(stream).await.unwrap();
        socket
            .send(tungstenite::Message::Binary(b"not a wire message".to_vec()))
            .await
            .unwrap();
        // Hold the socket open; the client should still give up.
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let (send, mut recv) = connect(
        url2!("ws://{}", addr),
        Arc::new(WebsocketConfig::default()),
    )
    .await
    .unwrap();

    match send
        .request::<_, TestMessage>(TestMessage("doomed".to_string()))
        .await
    {
        Err(WebsocketError::Closed) => {}
        oth => panic!("unexpected: {:?}", oth),
    }

    // The receiver stream ends rather than surfacing the garbage.
    assert!(recv.next().await.is_none());
}
