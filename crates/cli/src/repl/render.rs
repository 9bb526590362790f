use rootwalk_application::use_cases::LookupOutcome;
use rootwalk_domain::{DnsRecord, RecordData, RecordType};

/// Text printed for a successful lookup.
pub fn render_outcome(outcome: &LookupOutcome) -> String {
    let mut lines = Vec::new();

    if outcome.cache_hit {
        lines.push("Answer retrieved from cache:".to_string());
        lines.push(outcome.domain.to_string());
        lines.extend(outcome.addresses.iter().map(|ip| ip.to_string()));
    } else {
        lines.push("Query resolved:".to_string());
        lines.push(format!("{}:", outcome.domain));
        lines.extend(outcome.records.iter().map(render_record));
    }

    lines.join("\n")
}

fn render_record(record: &DnsRecord) -> String {
    match (&record.data, record.record_type) {
        (RecordData::Address(ip), _) if ip.is_ipv4() => format!("IP4 Address:\t{}", ip),
        (RecordData::Address(ip), _) => format!("IP6 Address:\t{}", ip),
        (_, RecordType::CNAME) => match record.target_name() {
            Some(alias) => format!("Alias: {}", alias),
            None => record.data.to_string(),
        },
        (data, _) => data.to_string(),
    }
}

pub fn render_failure(domain: &str) -> String {
    format!("DNS: {} not resolvable", domain.trim())
}
