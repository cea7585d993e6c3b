use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use dashmap::DashMap;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{Notify, mpsc, oneshot};
use tracing::{debug, trace, warn};

use crate::envelope::{Envelope, ErrorData, PROTOCOL_VERSION, Payload, UNIMPLEMENTED_MESSAGE};
use crate::error::RpcError;

/// Async request handler registered under a key.
pub type Handler = Arc<dyn Fn(Value) -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync>;

/// Which end of the stream this connection is. Decides the id range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Ids 0, 1, 2, ...
    Client,
    /// Ids -1, -2, -3, ...
    Server,
}

impl Side {
    fn first_mid(self) -> i64 {
        match self {
            Side::Client => 0,
            Side::Server => -1,
        }
    }

    fn step(self) -> i64 {
        match self {
            Side::Client => 1,
            Side::Server => -1,
        }
    }
}

struct Shared {
    side: Side,
    next_mid: AtomicI64,
    pending: DashMap<i64, oneshot::Sender<Payload>>,
    handlers: DashMap<String, Handler>,
    outgoing: mpsc::UnboundedSender<String>,
    closed: AtomicBool,
    on_close: Notify,
}

impl Shared {
    fn allocate_mid(&self) -> i64 {
        self.next_mid.fetch_add(self.side.step(), Ordering::Relaxed)
    }

    fn send(&self, envelope: &Envelope) -> Result<(), RpcError> {
        let line = serde_json::to_string(envelope)?;
        trace!(mid = envelope.mid, key = %envelope.key, "sending");
        self.outgoing
            .send(line)
            .map_err(|_| RpcError::ConnectionClosed)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        // Dropping the senders wakes every waiter with a closed-channel error.
        self.pending.clear();
        self.on_close.notify_waiters();
    }
}

/// One end of a newline-delimited JSON stream.
///
/// Cloning is cheap; all clones share the handler table and the pending
/// request map. The reader and writer run as background tokio tasks, so the
/// connection must be created inside a runtime.
#[derive(Clone)]
pub struct RpcConnection {
    shared: Arc<Shared>,
}

impl RpcConnection {
    pub fn new<R, W>(side: Side, reader: R, writer: W) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (outgoing, rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared {
            side,
            next_mid: AtomicI64::new(side.first_mid()),
            pending: DashMap::new(),
            handlers: DashMap::new(),
            outgoing,
            closed: AtomicBool::new(false),
            on_close: Notify::new(),
        });

        tokio::spawn(write_loop(writer, rx));
        tokio::spawn(read_loop(Arc::clone(&shared), reader));

        RpcConnection { shared }
    }

    /// Splits a duplex stream into the two halves `new` expects.
    pub fn from_stream<S>(side: Side, stream: S) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        Self::new(side, reader, writer)
    }

    /// Serves over the process's stdin and stdout.
    pub fn stdio(side: Side) -> Self {
        Self::new(side, tokio::io::stdin(), tokio::io::stdout())
    }

    pub fn side(&self) -> Side {
        self.shared.side
    }

    /// Registers `handler` for `key`, replacing any previous one.
    pub fn set_handler<F, Fut>(&self, key: impl Into<String>, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        let handler: Handler = Arc::new(move |data| handler(data).boxed());
        self.shared.handlers.insert(key.into(), handler);
    }

    pub fn remove_handler(&self, key: &str) -> bool {
        self.shared.handlers.remove(key).is_some()
    }

    /// Sends a request and waits for whatever payload comes back, including
    /// error payloads produced by the peer.
    pub async fn send_and_receive(&self, key: &str, data: Value) -> Result<Payload, RpcError> {
        let mid = self.shared.allocate_mid();
        let (tx, rx) = oneshot::channel();
        self.shared.pending.insert(mid, tx);

        if self.shared.closed.load(Ordering::SeqCst) {
            self.shared.pending.remove(&mid);
            return Err(RpcError::ConnectionClosed);
        }

        if let Err(err) = self
            .shared
            .send(&Envelope::new(mid, key, Payload::Request(data)))
        {
            self.shared.pending.remove(&mid);
            return Err(err);
        }

        rx.await.map_err(|_| RpcError::ConnectionClosed)
    }

    /// Typed wrapper over [`send_and_receive`](Self::send_and_receive) that
    /// turns error payloads into [`RpcError::Remote`].
    pub async fn request<T, R>(&self, key: &str, data: &T) -> Result<R, RpcError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let data = serde_json::to_value(data)?;
        match self.send_and_receive(key, data).await? {
            Payload::Response(value) => Ok(serde_json::from_value(value)?),
            Payload::Error(ErrorData { msg, stack }) => Err(RpcError::Remote { msg, stack }),
            Payload::Request(_) => Err(RpcError::UnexpectedPayload {
                key: key.to_string(),
            }),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Resolves once the inbound stream has ended.
    pub async fn closed(&self) {
        let notified = self.shared.on_close.notified();
        if self.is_closed() {
            return;
        }
        notified.await;
    }
}

async fn write_loop<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<String>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(mut line) = rx.recv().await {
        line.push('\n');
        if let Err(err) = writer.write_all(line.as_bytes()).await {
            warn!(%err, "rpc writer failed");
            return;
        }
        if let Err(err) = writer.flush().await {
            warn!(%err, "rpc writer failed to flush");
            return;
        }
    }
}

async fn read_loop<R>(shared: Arc<Shared>, reader: R)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => dispatch(&shared, &line),
            Ok(None) => break,
            Err(err) => {
                warn!(%err, "rpc reader failed");
                break;
            }
        }
    }
    debug!(side = ?shared.side, "rpc stream ended");
    shared.close();
}

fn dispatch(shared: &Arc<Shared>, line: &str) {
    if line.trim().is_empty() {
        return;
    }
    let envelope: Envelope = match serde_json::from_str(line) {
        Ok(envelope) => envelope,
        Err(err) => {
            debug!(%err, line, "dropping malformed rpc line");
            return;
        }
    };
    trace!(mid = envelope.mid, key = %envelope.key, "received");

    let Envelope {
        mid,
        key,
        payload,
        v,
    } = envelope;
    match payload {
        Payload::Request(data) => {
            if let Some(version) = v.filter(|&version| version != PROTOCOL_VERSION) {
                let error = ErrorData::new(format!(
                    "unsupported protocol version {version}, expected {PROTOCOL_VERSION}"
                ));
                reply(shared, mid, &key, Payload::Error(error));
                return;
            }
            let Some(handler) = shared.handlers.get(&key).map(|entry| Arc::clone(entry.value()))
            else {
                debug!(key, "no handler registered");
                reply(
                    shared,
                    mid,
                    &key,
                    Payload::Error(ErrorData::new(format!("{key}: {UNIMPLEMENTED_MESSAGE}"))),
                );
                return;
            };
            let shared = Arc::clone(shared);
            tokio::spawn(async move {
                let payload = match handler(data).await {
                    Ok(value) => Payload::Response(value),
                    Err(err) => {
                        debug!(key, error = %err, "handler failed");
                        Payload::Error(ErrorData::from_anyhow(&err))
                    }
                };
                reply(&shared, mid, &key, payload);
            });
        }
        payload @ (Payload::Response(_) | Payload::Error(_)) => {
            match shared.pending.remove(&mid) {
                // The waiter may have been dropped; nothing to deliver to then.
                Some((_, tx)) => {
                    let _ = tx.send(payload);
                }
                None => debug!(mid, key, "response for unknown request"),
            }
        }
    }
}

fn reply(shared: &Shared, mid: i64, key: &str, payload: Payload) {
    if let Err(err) = shared.send(&Envelope::new(mid, key, payload)) {
        debug!(mid, key, %err, "could not send reply");
    }
}

#[cfg(test)]
#[path = "../tests/connection_tests.rs"]
mod tests;
