//! internal websocket utility types and code

use std::io::{Error, ErrorKind};
use std::net::SocketAddr;

use url2::{url2, Url2};

pub(crate) type ToFromSocket = tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>;

/// internal helper to convert addrs to urls
pub(crate) fn addr_to_url(a: SocketAddr, scheme: &str) -> Url2 {
    url2!("{}://{}", scheme, a)
}

/// internal helper convert urls to socket addrs for binding / connection.
/// Any scheme is accepted, only the host and port matter.
pub(crate) async fn url_to_addr(url: &Url2) -> std::io::Result<SocketAddr> {
    let (host, port) = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => (host, port),
        _ => {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("got: '{}', expected: 'scheme://host:port'", url),
            ));
        }
    };

    let rendered = format!("{}:{}", host, port);

    if let Ok(iter) = tokio::net::lookup_host(rendered.clone()).await {
        let mut fallback = None;
        for addr in iter {
            if addr.is_ipv4() {
                return Ok(addr);
            }
            fallback = Some(addr);
        }
        if let Some(addr) = fallback {
            return Ok(addr);
        }
    }

    Err(Error::new(
        ErrorKind::InvalidInput,
        format!("could not parse '{}', as 'host:port'", rendered),
    ))
}
