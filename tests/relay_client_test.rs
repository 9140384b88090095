//! RelayClient against an in-test relay speaking the line protocol.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use tui_2048::adapter::protocol::{
    create_error, create_receipt, create_top_scores_response, parse_request, ErrorCode,
    ParsedRequest,
};
use tui_2048::adapter::{ChainClient, ChainError, RelayClient, RelayConfig};
use tui_2048::types::LeaderboardEntry;

/// Serve `connections` requests, one per connection, answering with `reply`.
async fn fake_relay<F>(connections: usize, reply: F) -> RelayConfig
where
    F: Fn(ParsedRequest) -> Vec<String> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for _ in 0..connections {
            let (socket, _) = listener.accept().await.unwrap();
            let (read_half, mut write_half) = socket.into_split();
            let mut lines = BufReader::new(read_half).lines();
            let line = lines.next_line().await.unwrap().expect("request line");
            let request = parse_request(&line).unwrap();
            for out in reply(request) {
                write_half.write_all(out.as_bytes()).await.unwrap();
                write_half.write_all(b"\n").await.unwrap();
            }
            write_half.flush().await.unwrap();
        }
    });

    RelayConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        timeout: Duration::from_secs(2),
    }
}

#[tokio::test]
async fn submit_score_returns_receipt() {
    let config = fake_relay(1, |req| match req {
        ParsedRequest::SubmitScore(m) => {
            assert_eq!(m.name, "ann");
            assert_eq!(m.score, 2048);
            vec![serde_json::to_string(&create_receipt(m.seq, "0xfeed")).unwrap()]
        }
        other => panic!("unexpected request {other:?}"),
    })
    .await;

    let client = RelayClient::new(config);
    let receipt = client.submit_score("ann", 2048).await.unwrap();
    assert_eq!(receipt.tx_hash, "0xfeed");
}

#[tokio::test]
async fn stale_and_blank_lines_are_skipped() {
    let config = fake_relay(1, |req| {
        let seq = req.seq();
        vec![
            String::new(),
            serde_json::to_string(&create_receipt(seq + 100, "0xstale")).unwrap(),
            serde_json::to_string(&create_receipt(seq, "0xfresh")).unwrap(),
        ]
    })
    .await;

    let receipt = RelayClient::new(config).gm().await.unwrap();
    assert_eq!(receipt.tx_hash, "0xfresh");
}

#[tokio::test]
async fn top_scores_are_converted_and_capped() {
    let config = fake_relay(1, |req| {
        let ParsedRequest::TopScores(m) = req else {
            panic!("expected top_scores");
        };
        assert_eq!(m.limit, 2);
        let rows: Vec<LeaderboardEntry> = (1..=3)
            .map(|i| LeaderboardEntry {
                player: format!("0x{i}"),
                name: if i == 2 { String::new() } else { format!("p{i}") },
                score: 1000 / i,
            })
            .collect();
        vec![serde_json::to_string(&create_top_scores_response(m.seq, &rows)).unwrap()]
    })
    .await;

    let rows = RelayClient::new(config).top_scores(2).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].score, 1000);
    assert_eq!(rows[1].display_name(), "(unknown)");
}

#[tokio::test]
async fn relay_errors_keep_their_code() {
    let config = fake_relay(1, |req| {
        vec![serde_json::to_string(&create_error(
            req.seq(),
            ErrorCode::WalletUnavailable,
            "connect a wallet",
        ))
        .unwrap()]
    })
    .await;

    let err = RelayClient::new(config)
        .submit_score("ann", 8)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::WalletUnavailable));
}

#[tokio::test]
async fn closed_connection_is_reported() {
    let config = fake_relay(1, |_| Vec::new()).await;
    let err = RelayClient::new(config).gm().await.unwrap_err();
    assert!(matches!(err, ChainError::Closed), "got {err:?}");
}

#[tokio::test]
async fn silent_relay_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(socket);
    });

    let client = RelayClient::new(RelayConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        timeout: Duration::from_millis(100),
    });
    let err = client.top_scores(5).await.unwrap_err();
    assert!(matches!(err, ChainError::Timeout(_)), "got {err:?}");
    server.abort();
}

#[tokio::test]
async fn unreachable_relay_is_a_connect_error() {
    // Bind then drop to get a port nobody listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = RelayClient::new(RelayConfig {
        host: "127.0.0.1".into(),
        port,
        timeout: Duration::from_secs(2),
    });
    let err = client.gm().await.unwrap_err();
    assert!(matches!(err, ChainError::Connect { .. }), "got {err:?}");
}
