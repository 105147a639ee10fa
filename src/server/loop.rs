// Server loop module
// Accepts connections until shutdown, then drains the in-flight ones

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::{wait_for_shutdown, SignalHandler};
use crate::config::AppState;
use crate::logger;

/// Interval at which the drain phase re-checks the connection counter
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Run the accept loop until the shutdown signal fires.
///
/// After shutdown the listener is dropped and open connections get up to
/// `performance.shutdown_timeout` seconds to finish.
pub async fn run_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));
    let mut shutdown = signals.subscribe();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                            signals.subscribe(),
                        );
                    }
                    Err(e) => logger::log_accept_error(&e),
                }
            }

            () = wait_for_shutdown(&mut shutdown) => break,
        }
    }

    drop(listener);
    let active = active_connections.load(Ordering::SeqCst);
    logger::log_shutdown_started(active);

    let deadline = Duration::from_secs(state.config.performance.shutdown_timeout);
    let drained = tokio::time::timeout(deadline, async {
        while active_connections.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(DRAIN_POLL).await;
        }
    })
    .await;

    if drained.is_err() {
        logger::log_shutdown_timeout(active_connections.load(Ordering::SeqCst));
    }
    logger::log_shutdown_complete();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    type Running = (std::net::SocketAddr, Arc<SignalHandler>, tokio::task::JoinHandle<()>);

    fn spawn_server() -> Running {
        spawn_server_with(Config::default())
    }

    fn spawn_server_with(mut config: Config) -> Running {
        config.performance.shutdown_timeout = 1;
        config.logging.access_log = false;
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::new(config));
        let signals = Arc::new(SignalHandler::new());
        let loop_signals = Arc::clone(&signals);
        let task = tokio::spawn(async move {
            run_server_loop(listener, state, loop_signals).await.unwrap();
        });
        (addr, signals, task)
    }

    #[tokio::test]
    async fn test_serves_root_over_tcp() {
        let (addr, signals, task) = spawn_server();

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        assert!(raw.starts_with("HTTP/1.1 200 OK"));
        assert!(raw.contains("{\"message\":\"Hello World\"}"));

        signals.trigger_shutdown();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_stops_accepting() {
        let (addr, signals, task) = spawn_server();
        signals.trigger_shutdown();
        task.await.unwrap();
        assert!(tokio::net::TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn test_rejects_connections_over_limit() {
        let mut config = Config::default();
        config.performance.max_connections = Some(1);
        let (addr, signals, task) = spawn_server_with(config);

        let mut first = tokio::net::TcpStream::connect(addr).await.unwrap();
        // Accepted in order, so the idle first client holds the only slot
        tokio::time::sleep(Duration::from_millis(100)).await;

        let mut second = tokio::net::TcpStream::connect(addr).await.unwrap();
        let mut buf = Vec::new();
        let rejected = tokio::time::timeout(Duration::from_secs(5), second.read_to_end(&mut buf))
            .await
            .unwrap();
        assert!(matches!(rejected, Ok(0) | Err(_)));

        first
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        first.read_to_string(&mut raw).await.unwrap();
        assert!(raw.starts_with("HTTP/1.1 200 OK"));

        signals.trigger_shutdown();
        task.await.unwrap();
    }
}
