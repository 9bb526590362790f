#![allow(dead_code)]
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock answers a query.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// One A record for the question name.
    Answer(Ipv4Addr),
    /// NS record in authority plus its A glue in additional.
    Referral { nameserver: String, glue: Ipv4Addr },
    /// NS record in authority, nothing in additional.
    GluelessReferral { nameserver: String },
    /// Valid answer carrying a different transaction id.
    WrongId,
    /// Header only, with the given response code.
    Rcode(u8),
    /// Header announcing one answer that never follows.
    Garbage,
    /// Never replies.
    Silent,
    /// Answers like `Answer`, but the reply to the first query is held back.
    SlowFirstAnswer { delay_ms: u64, ip: Ipv4Addr },
}

/// Raw-byte UDP DNS server for transport and end-to-end tests.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<Mutex<Vec<Vec<u8>>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(
        ip: Ipv4Addr,
        port: u16,
        behavior: MockBehavior,
    ) -> Result<Self, std::io::Error> {
        Self::start_zone(ip, port, Vec::new(), behavior).await
    }

    /// Answer per question name, falling back to `default` for other names.
    pub async fn start_zone(
        ip: Ipv4Addr,
        port: u16,
        zone: Vec<(&str, MockBehavior)>,
        default: MockBehavior,
    ) -> Result<Self, std::io::Error> {
        let socket = Arc::new(UdpSocket::bind(SocketAddr::from((ip, port))).await?);
        let local_addr = socket.local_addr()?;
        let zone: HashMap<String, MockBehavior> = zone
            .into_iter()
            .map(|(name, behavior)| (name.to_string(), behavior))
            .collect();

        let queries = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&queries);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let query = buf[..len].to_vec();
                            let seen = {
                                let mut recorded = recorded.lock().unwrap();
                                recorded.push(query.clone());
                                recorded.len()
                            };

                            let behavior = question_name(&query)
                                .and_then(|name| zone.get(&name).cloned())
                                .unwrap_or_else(|| default.clone());

                            let Some(response) = Self::build_response(&query, &behavior) else {
                                continue;
                            };

                            match behavior {
                                MockBehavior::SlowFirstAnswer { delay_ms, .. } if seen == 1 => {
                                    let socket = Arc::clone(&socket);
                                    tokio::spawn(async move {
                                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                                        let _ = socket.send_to(&response, peer).await;
                                    });
                                }
                                _ => {
                                    let _ = socket.send_to(&response, peer).await;
                                }
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr: local_addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn queries(&self) -> Vec<Vec<u8>> {
        self.queries.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    fn build_response(query: &[u8], behavior: &MockBehavior) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }

        let mut response = Vec::with_capacity(512);
        let (rcode, an, ns, ar) = match behavior {
            MockBehavior::Silent => return None,
            MockBehavior::Answer(_)
            | MockBehavior::SlowFirstAnswer { .. }
            | MockBehavior::WrongId
            | MockBehavior::Garbage => (0, 1, 0, 0),
            MockBehavior::Referral { .. } => (0, 0, 1, 1),
            MockBehavior::GluelessReferral { .. } => (0, 0, 1, 0),
            MockBehavior::Rcode(code) => (*code, 0, 0, 0),
        };

        if matches!(behavior, MockBehavior::WrongId) {
            response.extend_from_slice(&[query[0] ^ 0xFF, query[1] ^ 0xFF]);
        } else {
            response.extend_from_slice(&query[0..2]);
        }

        // QR set, RD/RA clear
        response.push(0x80);
        response.push(rcode & 0x0F);

        response.extend_from_slice(&query[4..6]);
        response.extend_from_slice(&[0x00, an]);
        response.extend_from_slice(&[0x00, ns]);
        response.extend_from_slice(&[0x00, ar]);

        response.extend_from_slice(&query[12..]);

        match behavior {
            MockBehavior::Answer(ip) | MockBehavior::SlowFirstAnswer { ip, .. } => {
                push_a_record(&mut response, &[0xc0, 0x0c], *ip);
            }
            MockBehavior::WrongId => {
                push_a_record(&mut response, &[0xc0, 0x0c], Ipv4Addr::new(10, 9, 9, 9));
            }
            MockBehavior::Referral { nameserver, glue } => {
                push_ns_record(&mut response, nameserver);
                push_a_record(&mut response, &encode_name(nameserver), *glue);
            }
            MockBehavior::GluelessReferral { nameserver } => {
                push_ns_record(&mut response, nameserver);
            }
            _ => {}
        }

        Some(response)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        bytes.push(label.len() as u8);
        bytes.extend_from_slice(label.as_bytes());
    }
    bytes.push(0);
    bytes
}

fn push_a_record(response: &mut Vec<u8>, owner: &[u8], ip: Ipv4Addr) {
    response.extend_from_slice(owner);
    response.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x3c]);
    response.extend_from_slice(&[0x00, 0x04]);
    response.extend_from_slice(&ip.octets());
}

fn push_ns_record(response: &mut Vec<u8>, nameserver: &str) {
    let rdata = encode_name(nameserver);
    // Owner is the question name
    response.extend_from_slice(&[0xc0, 0x0c]);
    response.extend_from_slice(&[0x00, 0x02, 0x00, 0x01]);
    response.extend_from_slice(&[0x00, 0x02, 0xa3, 0x00]);
    response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    response.extend_from_slice(&rdata);
}

/// Question name of a raw query, without the trailing dot.
pub fn question_name(query: &[u8]) -> Option<String> {
    let mut labels = Vec::new();
    let mut pos = 12;

    loop {
        let len = *query.get(pos)? as usize;
        if len == 0 {
            break;
        }
        let label = query.get(pos + 1..pos + 1 + len)?;
        labels.push(String::from_utf8_lossy(label).into_owned());
        pos += 1 + len;
    }

    Some(labels.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_for(name: &str) -> Vec<u8> {
        let mut query = vec![0xab, 0xcd, 0x00, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0];
        query.extend_from_slice(&encode_name(name));
        query.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
        query
    }

    #[test]
    fn test_question_name() {
        assert_eq!(
            question_name(&query_for("example.com")),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_referral_counts() {
        let response = MockDnsServer::build_response(
            &query_for("example.com"),
            &MockBehavior::Referral {
                nameserver: "a.iana-servers.net".to_string(),
                glue: Ipv4Addr::new(127, 0, 0, 2),
            },
        )
        .unwrap();

        assert_eq!(response[0..2], [0xab, 0xcd]);
        assert_eq!(response[2], 0x80);
        assert_eq!(&response[6..12], &[0, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_silent_sends_nothing() {
        assert!(MockDnsServer::build_response(&query_for("a.b"), &MockBehavior::Silent).is_none());
    }
}
