//! Integration tests for PRIVMSG delivery and disconnect notices.

mod common;

use common::client::numeric;
use common::TestServer;

#[tokio::test]
async fn test_private_message() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = server.registered("alice").await.unwrap();
    let mut bob = server.registered("bob").await.unwrap();

    alice.send_raw("PRIVMSG Bob :hello bob").await.unwrap();
    assert_eq!(
        bob.recv().await.unwrap(),
        ":alice!alice@localhost PRIVMSG bob :hello bob"
    );
    alice.expect_silence().await.unwrap();

    alice.send_raw("PRIVMSG nobody :hi").await.unwrap();
    assert_eq!(numeric(&alice.recv().await.unwrap()), Some(401));
}

#[tokio::test]
async fn test_channel_message_fanout() {
    let server = TestServer::spawn().await.unwrap();
    let mut alice = server.registered("alice").await.unwrap();
    let mut bob = server.registered("bob").await.unwrap();
    let mut carol = server.registered("carol").await.unwrap();

    alice.join("#lobby").await.unwrap();
    bob.join("#lobby").await.unwrap();
    carol.join("#lobby").await.unwrap();
    alice.recv_until(|l| l.starts_with(":carol")).await.unwrap();
    bob.recv_until(|l| l.starts_with(":carol")).await.unwrap();

    alice.send_raw("PRIVMSG #lobby :hi all").await.unwrap();
    let expected = ":alice!alice@localhost PRIVMSG #lobby :hi all";
    assert_eq!(bob.recv().await.unwrap(), expected);
    assert_eq!(carol.recv().await.unwrap(), expected);
    alice.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_quit_notifies_channel_peers() {
    let server = TestServer::spawn().await.unwrap();
    let mut alice = server.registered("alice").await.unwrap();
    let mut bob = server.registered("bob").await.unwrap();

    alice.join("#bye").await.unwrap();
    bob.join("#bye").await.unwrap();
    alice.recv().await.unwrap();

    alice.send_raw("QUIT :gone fishing").await.unwrap();
    assert_eq!(
        bob.recv().await.unwrap(),
        ":alice!alice@localhost QUIT :gone fishing"
    );
    alice.expect_closed().await.unwrap();
}

#[tokio::test]
async fn test_dropped_connection_notifies_peers() {
    let server = TestServer::spawn().await.unwrap();
    let mut alice = server.registered("alice").await.unwrap();
    let mut bob = server.registered("bob").await.unwrap();

    alice.join("#drop").await.unwrap();
    bob.join("#drop").await.unwrap();
    alice.recv().await.unwrap();

    drop(alice);
    assert_eq!(
        bob.recv().await.unwrap(),
        ":alice!alice@localhost QUIT :disconnected"
    );

    // The nick is free again.
    let mut again = server.connect("alice").await.unwrap();
    again.register().await.unwrap();
}
