/**
 * Read and Write Pumps
 *
 * Each accepted connection runs two loops. The read pump owns the inbound
 * half of the socket and enforces the idle deadline; the write pump owns the
 * outbound half and is the only writer to it. They never talk to each other
 * directly: the read pump's only output is a best-effort pong on the
 * outbound queue, and either pump ending is what ends the session.
 *
 * Both pumps are generic over `Stream`/`Sink` so they can be driven by an
 * in-memory transport in tests.
 */
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, timeout, timeout_at, Instant, MissedTickBehavior};

use axum::extract::ws::Message;
use bytes::Bytes;

use crate::backend::session::config::SessionConfig;
use crate::backend::session::handle::Payload;
use crate::backend::session::lifecycle::CloseReason;
use crate::shared::event::FRAME_DELIMITER;
use crate::shared::{ClientControl, ClientEnvelope, ServerEnvelope};

/// Consume inbound frames until the peer goes away or goes quiet
///
/// `replies` is weak so that a session the hub has already dropped is not
/// kept alive by its own keepalive replies.
pub async fn read_pump<S>(
    mut stream: S,
    replies: mpsc::WeakSender<Payload>,
    config: &SessionConfig,
) -> CloseReason
where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    let pong = match ServerEnvelope::pong().to_payload() {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::error!("Failed to serialize pong envelope: {}", e);
            None
        }
    };
    let mut deadline = Instant::now() + config.pong_wait;

    loop {
        let frame = match timeout_at(deadline, stream.next()).await {
            Err(_) => return CloseReason::IdleTimeout,
            Ok(None) => return CloseReason::ClientClosed,
            Ok(Some(Err(e))) => {
                tracing::debug!("WebSocket read error: {}", e);
                return CloseReason::ReadError;
            }
            Ok(Some(Ok(frame))) => frame,
        };

        deadline = Instant::now() + config.pong_wait;

        let raw: &[u8] = match &frame {
            Message::Text(text) => text.as_str().as_bytes(),
            Message::Binary(data) => &data[..],
            Message::Close(_) => return CloseReason::ClientClosed,
            // Transport keepalives only extend the deadline
            Message::Ping(_) | Message::Pong(_) => continue,
        };

        if raw.len() > config.max_message_size {
            tracing::debug!(len = raw.len(), "Inbound frame over size limit");
            return CloseReason::MessageTooLarge;
        }

        let Some(envelope) = ClientEnvelope::parse(raw) else {
            continue;
        };

        if envelope.control() == ClientControl::Ping {
            if let (Some(pong), Some(tx)) = (&pong, replies.upgrade()) {
                if tx.try_send(pong.clone()).is_err() {
                    tracing::debug!("Outbound queue unavailable, pong dropped");
                }
            }
        }
    }
}

/// Drain the outbound queue onto the transport
pub async fn write_pump<S>(
    mut sink: S,
    mut outbound: mpsc::Receiver<Payload>,
    config: &SessionConfig,
) -> CloseReason
where
    S: Sink<Message> + Unpin,
    S::Error: fmt::Display,
{
    let mut ticker = interval_at(Instant::now() + config.ping_period, config.ping_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            next = outbound.recv() => {
                let Some(first) = next else {
                    // Best effort; the peer may already be gone
                    let _ = write(&mut sink, Message::Close(None), config.write_wait).await;
                    return CloseReason::QueueClosed;
                };

                let frame = coalesce(first, &mut outbound);
                if write(&mut sink, Message::Text(frame.into()), config.write_wait).await.is_err() {
                    return CloseReason::WriteError;
                }
            }
            _ = ticker.tick() => {
                if write(&mut sink, Message::Ping(Bytes::new()), config.write_wait).await.is_err() {
                    return CloseReason::WriteError;
                }
            }
        }
    }
}

/// Join `first` with whatever was already waiting behind it
///
/// Only the items queued at this moment are taken, so a producer that keeps
/// the queue busy cannot grow a frame without bound.
fn coalesce(first: Payload, outbound: &mut mpsc::Receiver<Payload>) -> String {
    let waiting = outbound.len();
    let mut frame = String::from(&*first);

    for _ in 0..waiting {
        match outbound.try_recv() {
            Ok(next) => {
                frame.push(FRAME_DELIMITER);
                frame.push_str(&next);
            }
            Err(_) => break,
        }
    }

    frame
}

async fn write<S>(sink: &mut S, message: Message, deadline: Duration) -> Result<(), ()>
where
    S: Sink<Message> + Unpin,
    S::Error: fmt::Display,
{
    match timeout(deadline, sink.send(message)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            tracing::debug!("WebSocket write error: {}", e);
            Err(())
        }
        Err(_) => {
            tracing::debug!("WebSocket write missed its deadline");
            Err(())
        }
    }
}
