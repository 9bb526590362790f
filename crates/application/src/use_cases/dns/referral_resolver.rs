//! Iterative referral walk from a root server to an authoritative answer.
//!
//! Each server either answers or refers us closer to the zone that can. A
//! referral names the next server either by address (glue) or by host name
//! only, in which case that host name is resolved first, from the root, as a
//! nested walk. Nested walks are frames on an explicit stack rather than
//! recursive calls, so the depth bound is checked in one place.

use crate::ports::MessageTransport;
use rootwalk_domain::{DnsQuery, DnsRecord, DomainError, RecordType};
use smallvec::{smallvec, SmallVec};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Referral hops allowed before a walk is abandoned.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Where a walk stands: which name it is after and which server it asks next.
#[derive(Debug, Clone)]
struct ResolutionState {
    domain: Arc<str>,
    record_type: RecordType,
    server: IpAddr,
    depth: usize,
}

impl ResolutionState {
    fn new(domain: Arc<str>, record_type: RecordType, server: IpAddr, depth: usize) -> Self {
        Self {
            domain,
            record_type,
            server,
            depth,
        }
    }

    fn advance(&mut self, next_hop: IpAddr) {
        self.server = next_hop;
        self.depth += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NextHop {
    Address(IpAddr),
    Nameserver(Arc<str>),
}

#[derive(Debug)]
enum Step {
    Answer(Vec<DnsRecord>),
    Referral(NextHop),
    Failure(DomainError),
}

pub struct ReferralResolver {
    transport: Arc<dyn MessageTransport>,
    root_server: IpAddr,
    max_depth: usize,
}

impl ReferralResolver {
    pub fn new(transport: Arc<dyn MessageTransport>, root_server: IpAddr) -> Self {
        Self {
            transport,
            root_server,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn root_server(&self) -> IpAddr {
        self.root_server
    }

    /// Resolve `domain` starting at the configured root server.
    pub async fn resolve(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, DomainError> {
        self.resolve_from(domain, record_type, self.root_server).await
    }

    /// Resolve `domain` starting at `server`.
    ///
    /// Returns the first non-empty answer section met along the referral
    /// chain. Any failed exchange, a chain deeper than the configured bound,
    /// or a reply without a usable referral fails the whole walk.
    #[instrument(skip(self), fields(root = %self.root_server))]
    pub async fn resolve_from(
        &self,
        domain: &str,
        record_type: RecordType,
        server: IpAddr,
    ) -> Result<Vec<DnsRecord>, DomainError> {
        let mut frames: SmallVec<[ResolutionState; 4]> =
            smallvec![ResolutionState::new(Arc::from(domain), record_type, server, 0)];

        while let Some(state) = frames.last().cloned() {
            match self.step(&state).await {
                Step::Answer(records) => {
                    frames.pop();
                    let Some(parent) = frames.last_mut() else {
                        debug!(
                            domain = %state.domain,
                            answers = records.len(),
                            depth = state.depth,
                            "Authoritative answer received"
                        );
                        return Ok(records);
                    };

                    let next_hop = Self::nameserver_address(&state.domain, &records)?;
                    debug!(
                        nameserver = %state.domain,
                        address = %next_hop,
                        "Nameserver alias resolved"
                    );
                    parent.advance(next_hop);
                }
                Step::Referral(NextHop::Address(next_hop)) => {
                    debug!(
                        domain = %state.domain,
                        from = %state.server,
                        to = %next_hop,
                        depth = state.depth,
                        "Following referral"
                    );
                    if let Some(current) = frames.last_mut() {
                        current.advance(next_hop);
                    }
                }
                Step::Referral(NextHop::Nameserver(name)) => {
                    debug!(
                        domain = %state.domain,
                        nameserver = %name,
                        depth = state.depth,
                        "Referral without glue, resolving nameserver from root"
                    );
                    frames.push(ResolutionState::new(
                        name,
                        RecordType::A,
                        self.root_server,
                        state.depth + 1,
                    ));
                }
                Step::Failure(err) => {
                    warn!(
                        domain = %state.domain,
                        server = %state.server,
                        depth = state.depth,
                        error = %err,
                        "Resolution step failed"
                    );
                    return Err(err);
                }
            }
        }

        Err(DomainError::Unresolvable(domain.to_string()))
    }

    async fn step(&self, state: &ResolutionState) -> Step {
        if state.depth > self.max_depth {
            return Step::Failure(DomainError::MaxDepthExceeded {
                domain: state.domain.to_string(),
                max_depth: self.max_depth,
            });
        }

        let query = DnsQuery::new(Arc::clone(&state.domain), state.record_type);
        let reply = match self.transport.send(state.server, &query).await {
            Ok(reply) => reply,
            Err(err) => return Step::Failure(err),
        };

        if !reply.answers.is_empty() {
            return Step::Answer(reply.answers);
        }

        if !reply.is_referral() {
            debug!(server = %state.server, domain = %state.domain, "Empty reply, nothing to follow");
            return Step::Failure(DomainError::NoReferral {
                domain: state.domain.to_string(),
                server: state.server,
            });
        }

        // Glue in the additional section saves a nameserver lookup.
        let next_hop = self
            .select_referral(&reply.additionals, state.server)
            .or_else(|| self.select_referral(&reply.authorities, state.server));

        match next_hop {
            Some(next_hop) => Step::Referral(next_hop),
            None => Step::Failure(DomainError::NoReferral {
                domain: state.domain.to_string(),
                server: state.server,
            }),
        }
    }

    /// First record in section order that names a server other than `current`.
    fn select_referral(&self, section: &[DnsRecord], current: IpAddr) -> Option<NextHop> {
        section.iter().find_map(|record| {
            if let Some(address) = record.address() {
                if address == current {
                    debug!(server = %current, "Skipping self-referral");
                    return None;
                }
                if !self.transport.accepts(address) {
                    debug!(%address, "Skipping unreachable glue");
                    return None;
                }
                return Some(NextHop::Address(address));
            }

            if record.is_nameserver() {
                return record
                    .target_name()
                    .map(|name| NextHop::Nameserver(Arc::from(name)));
            }

            None
        })
    }

    fn nameserver_address(nameserver: &str, records: &[DnsRecord]) -> Result<IpAddr, DomainError> {
        records
            .first()
            .and_then(DnsRecord::address)
            .ok_or_else(|| {
                DomainError::Unresolvable(format!(
                    "nameserver {} did not resolve to an address",
                    nameserver
                ))
            })
    }
}
