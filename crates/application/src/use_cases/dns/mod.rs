mod lookup_domain;
mod referral_resolver;

pub use lookup_domain::{LookupDomainUseCase, LookupOutcome};
pub use referral_resolver::{ReferralResolver, DEFAULT_MAX_DEPTH};
