use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use shared::domain::context::ClientMeta;
use std::{convert::Infallible, net::SocketAddr};

const FORWARDED_FOR: &str = "x-forwarded-for";

/// First hop of `x-forwarded-for`, else the peer address.
pub fn client_meta(headers: &HeaderMap, peer: Option<SocketAddr>) -> ClientMeta {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_owned);

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    ClientMeta {
        ip_address: forwarded.or_else(|| peer.map(|addr| addr.ip().to_string())),
        user_agent,
    }
}

/// Extractor for handlers that run before authentication.
pub struct ClientInfo(pub ClientMeta);

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(ClientInfo(client_meta(&parts.headers, peer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_header_wins_over_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_static("203.0.113.9, 10.0.0.1"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static("kasir-app/1.0"));

        let meta = client_meta(&headers, "127.0.0.1:9000".parse().ok());
        assert_eq!(meta.ip_address.as_deref(), Some("203.0.113.9"));
        assert_eq!(meta.user_agent.as_deref(), Some("kasir-app/1.0"));
    }

    #[test]
    fn peer_address_is_the_fallback() {
        let meta = client_meta(&HeaderMap::new(), "192.168.1.20:51000".parse().ok());
        assert_eq!(meta.ip_address.as_deref(), Some("192.168.1.20"));
        assert!(meta.user_agent.is_none());

        assert!(client_meta(&HeaderMap::new(), None).ip_address.is_none());
    }
}
