use std::io::Result;
use tokio::net::TcpListener;

/// Binds a listener to an OS-assigned port on `127.0.0.1` and returns it
/// together with the `http://` base URL an agent should be configured with.
///
/// Intended for tests and local demos that need a server on a free port.
pub async fn bind_local_listener() -> Result<(TcpListener, String)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = base_url_of(&listener)?;

    Ok((listener, base_url))
}

/// The `http://host:port` URL a bound listener is reachable at.
pub fn base_url_of(listener: &TcpListener) -> Result<String> {
    let addr = listener.local_addr()?;
    Ok(format!("http://{addr}"))
}
