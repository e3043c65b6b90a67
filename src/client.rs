use std::net::IpAddr;

use rocket::http::HeaderMap;
use rocket::request::{FromRequest, Outcome, Request};
use sha2::{Digest, Sha256};

use crate::config::SiteConfig;

/// Headers a proxy sets to the single address it accepted the request from.
const SINGLE_IP_HEADERS: &[&str] = &["CF-Connecting-IP", "True-Client-IP", "X-Real-IP"];

/// The visitor's address. Proxy headers only count when the connecting peer
/// is listed in `trusted_proxies`; everyone else is keyed on the socket peer.
pub struct ClientIp(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientIp {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let trusted: &[IpAddr] = request
            .rocket()
            .state::<SiteConfig>()
            .map(|cfg| cfg.trusted_proxies.as_slice())
            .unwrap_or(&[]);
        let peer = request.remote().map(|addr| addr.ip());
        Outcome::Success(ClientIp(client_address(peer, request.headers(), trusted)))
    }
}

impl ClientIp {
    /// Hashed form used as a limiter / in-flight key; raw addresses are not kept.
    pub fn key(&self) -> String {
        hash_ip(&self.0)
    }
}

pub fn client_address(peer: Option<IpAddr>, headers: &HeaderMap<'_>, trusted: &[IpAddr]) -> String {
    let Some(peer) = peer else {
        return "unknown".to_string();
    };
    if !trusted.contains(&peer) {
        return peer.to_string();
    }

    for name in SINGLE_IP_HEADERS {
        if let Some(ip) = headers.get_one(name).and_then(parse_ip) {
            return ip.to_string();
        }
    }

    // X-Forwarded-For: client, proxy1, proxy2. Rightmost hop that is not ours.
    if let Some(forwarded) = headers.get_one("X-Forwarded-For") {
        let hops: Vec<IpAddr> = forwarded.split(',').filter_map(parse_ip).collect();
        if let Some(ip) = hops.iter().rev().find(|ip| !trusted.contains(ip)) {
            return ip.to_string();
        }
        if let Some(first) = hops.first() {
            return first.to_string();
        }
    }

    peer.to_string()
}

fn parse_ip(raw: &str) -> Option<IpAddr> {
    raw.trim().parse().ok()
}

pub fn hash_ip(ip: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap<'static> {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.add_raw(*name, *value);
        }
        map
    }

    #[test]
    fn untrusted_peer_ignores_proxy_headers() {
        let h = headers(&[
            ("X-Forwarded-For", "203.0.113.7"),
            ("CF-Connecting-IP", "198.51.100.2"),
        ]);
        assert_eq!(client_address(Some(ip("192.0.2.10")), &h, &[]), "192.0.2.10");
    }

    #[test]
    fn trusted_proxy_forwards_single_ip_header() {
        let h = headers(&[("X-Real-IP", " 203.0.113.7 ")]);
        let trusted = [ip("10.0.0.1")];
        assert_eq!(client_address(Some(ip("10.0.0.1")), &h, &trusted), "203.0.113.7");
    }

    #[test]
    fn forwarded_chain_skips_trusted_hops() {
        let h = headers(&[("X-Forwarded-For", "1.1.1.1, 203.0.113.7, 10.0.0.2")]);
        let trusted = [ip("10.0.0.1"), ip("10.0.0.2")];
        assert_eq!(client_address(Some(ip("10.0.0.1")), &h, &trusted), "203.0.113.7");
    }

    #[test]
    fn unparseable_headers_fall_back_to_peer() {
        let h = headers(&[("X-Real-IP", "not-an-ip"), ("X-Forwarded-For", "junk")]);
        let trusted = [ip("10.0.0.1")];
        assert_eq!(client_address(Some(ip("10.0.0.1")), &h, &trusted), "10.0.0.1");
        assert_eq!(client_address(None, &h, &trusted), "unknown");
    }

    #[test]
    fn hashed_key_is_stable_and_opaque() {
        let a = ClientIp("192.0.2.10".to_string()).key();
        assert_eq!(a, hash_ip("192.0.2.10"));
        assert_eq!(a.len(), 64);
        assert!(!a.contains("192"));
    }
}
