use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use bytes::Bytes;
use ircserv::error::SendError;
use ircserv::network::{Server, Transport};
use ircserv::state::ServerInfo;
use ircserv_proto::{ConnectionId, ReadEvent};

// Drives the event core without sockets: every line is accepted and dropped.
struct NullTransport;

impl Transport for NullTransport {
    fn send(&mut self, _to: ConnectionId, _line: &str) -> Result<(), SendError> {
        Ok(())
    }

    fn close(&mut self, _id: ConnectionId) {}
}

fn registered_server(clients: usize) -> (Server, Vec<ConnectionId>) {
    let info = ServerInfo {
        name: "IRCS".to_string(),
        password: "bench".to_string(),
    };
    let mut server = Server::new(info, None);
    let mut transport = NullTransport;
    let mut ids = Vec::with_capacity(clients);
    for n in 0..clients {
        let id = server.accept();
        let handshake = format!(
            "PASS bench\r\nNICK user{n}\r\nUSER user{n} host serv :Bench User\r\nJOIN #bench\r\n"
        );
        server.on_read(id, ReadEvent::Data(Bytes::from(handshake)), &mut transport);
        ids.push(id);
    }
    (server, ids)
}

fn channel_fanout_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("fanout");
    let raw = Bytes::from_static(b"PRIVMSG #bench :Hello world\r\n");
    group.throughput(Throughput::Bytes(raw.len() as u64));

    for clients in [2usize, 50] {
        let (mut server, ids) = registered_server(clients);
        let mut transport = NullTransport;
        group.bench_function(format!("privmsg_{clients}_members"), |b| {
            b.iter(|| server.on_read(ids[0], ReadEvent::Data(raw.clone()), &mut transport))
        });
    }

    group.finish();
}

fn fragmented_input_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("framing");
    let (mut server, ids) = registered_server(1);
    let mut transport = NullTransport;
    group.throughput(Throughput::Elements(1));

    group.bench_function("ping_in_three_reads", |b| {
        b.iter(|| {
            for part in [&b"PI"[..], b"NG IR", b"CS\r\n"] {
                server.on_read(ids[0], ReadEvent::Data(Bytes::from_static(part)), &mut transport);
            }
        })
    });

    group.finish();
}

criterion_group!(benches, channel_fanout_benchmark, fragmented_input_benchmark);
criterion_main!(benches);
