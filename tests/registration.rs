//! Integration tests for the PASS / NICK / USER handshake.

mod common;

use common::{TestServer, SERVER_NAME};

#[tokio::test]
async fn test_full_registration() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = server.connect("alice").await.expect("Failed to connect");

    alice.send_raw("PASS s3cr3t").await.unwrap();
    alice.send_raw("NICK alice").await.unwrap();
    assert_eq!(
        alice.recv().await.unwrap(),
        format!(":{SERVER_NAME} 311 alice alice")
    );

    alice
        .send_raw("USER alice localhost serv :Alice Example")
        .await
        .unwrap();
    assert_eq!(
        alice.recv().await.unwrap(),
        format!(":{SERVER_NAME} 311 alice alice localhost serv :Alice Example")
    );
    let welcome = alice.recv().await.unwrap();
    assert_eq!(
        welcome,
        format!(
            ":{SERVER_NAME} 001 alice :Welcome to the Internet Relay Network alice!alice@localhost"
        )
    );

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_commands_before_pass_are_ignored() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect("alice").await.unwrap();

    client.send_raw("NICK alice").await.unwrap();
    client.send_raw("JOIN #early").await.unwrap();
    client.expect_silence().await.unwrap();

    client.send_raw("PASS wrong").await.unwrap();
    let reply = client.recv().await.unwrap();
    assert!(reply.starts_with(":IRCS 464 "), "{reply}");
}

#[tokio::test]
async fn test_unregistered_commands_rejected() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect("alice").await.unwrap();

    client.send_raw("PASS s3cr3t").await.unwrap();
    client.send_raw("JOIN #early").await.unwrap();
    let reply = client.recv().await.unwrap();
    assert_eq!(reply, ":IRCS 451 User1 :You have not registered");
}

#[tokio::test]
async fn test_nick_collision_is_case_insensitive() {
    let server = TestServer::spawn().await.unwrap();
    let _alice = server.registered("alice").await.unwrap();

    let mut other = server.connect("ALICE").await.unwrap();
    other.send_raw("PASS s3cr3t").await.unwrap();
    other.send_raw("NICK ALICE").await.unwrap();
    let reply = other.recv().await.unwrap();
    assert!(reply.contains(" 433 "), "{reply}");
    assert!(reply.contains("ALICE :Nickname is already in use"), "{reply}");
}

#[tokio::test]
async fn test_ping_pong() {
    let server = TestServer::spawn().await.unwrap();
    let mut alice = server.registered("alice").await.unwrap();

    alice.send_raw("PING IRCS").await.unwrap();
    assert_eq!(alice.recv().await.unwrap(), ":IRCS PONG IRCS");

    alice.send_raw("PING elsewhere").await.unwrap();
    let reply = alice.recv().await.unwrap();
    assert!(reply.starts_with(":IRCS 402 alice elsewhere"), "{reply}");
}

#[tokio::test]
async fn test_fragmented_handshake() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect("frag").await.unwrap();

    for chunk in [&b"PASS s3"[..], b"cr3t\r\nNICK fr", b"ag\r\nUSER frag localhost serv :F\r", b"\n"] {
        client.send_bytes(chunk).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    let lines = client
        .recv_until(|line| line.contains(" 001 "))
        .await
        .unwrap();
    assert!(lines.last().unwrap().contains("frag!frag@localhost"));
}
