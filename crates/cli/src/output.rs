use ferrous_dig_application::use_cases::BulkQueryOutcome;
use ferrous_dig_domain::{DnsQuery, Message, ResourceRecord};
use ferrous_dig_infrastructure::dns::{CacheStats, QueryEvent};
use std::fmt::Write;
use std::time::Duration;

const CLASS_IN: u16 = 1;

pub fn format_query_banner(query: &DnsQuery) -> String {
    format!(
        "Querying {} ({} record) using DNS server {}:{}",
        query.domain, query.record_type, query.server, query.port
    )
}

pub fn format_record(record: &ResourceRecord) -> String {
    let class = if record.class == CLASS_IN {
        "IN".to_string()
    } else {
        format!("CLASS{}", record.class)
    };

    format!(
        "{:<20} {:<6} {} {:<6} {}",
        record.name,
        record.ttl,
        class,
        record.type_name(),
        record.data
    )
}

fn query_label(message: &Message) -> String {
    if let Some(query) = &message.query {
        return format!("{} ({})", query.name, query.record_type);
    }
    match message.questions.first() {
        Some(question) => format!("{} ({})", question.name, question.type_name()),
        None => "<no question>".to_string(),
    }
}

fn header_flags(message: &Message) -> String {
    let header = &message.header;
    [
        (header.qr, "qr"),
        (header.aa, "aa"),
        (header.tc, "tc"),
        (header.rd, "rd"),
        (header.ra, "ra"),
    ]
    .iter()
    .filter(|(set, _)| *set)
    .map(|(_, name)| *name)
    .collect::<Vec<_>>()
    .join(" ")
}

fn push_section(out: &mut String, title: &str, records: &[ResourceRecord]) {
    if records.is_empty() {
        return;
    }
    out.push('\n');
    let _ = writeln!(out, "  {} Section:", title);
    for record in records {
        let _ = writeln!(out, "    {}", format_record(record));
    }
}

/// Human-readable rendering of one response. `verbose` adds the header line.
pub fn format_response(message: &Message, elapsed: Duration, verbose: bool) -> String {
    let mut out = String::from("DNS Response:\n");
    let _ = writeln!(out, "  Query: {}", query_label(message));
    let _ = writeln!(out, "  Status: {}", message.status);
    let _ = writeln!(out, "  Response Time: {}ms", elapsed.as_millis());

    if verbose {
        let header = &message.header;
        let _ = writeln!(
            out,
            "  Header: id {:#06x}, opcode {}, flags: {}; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            header.id,
            header.opcode,
            header_flags(message),
            header.qdcount,
            header.ancount,
            header.nscount,
            header.arcount
        );
    }

    push_section(&mut out, "Answer", &message.answers);
    push_section(&mut out, "Authority", &message.authority);
    push_section(&mut out, "Additional", &message.additional);

    out
}

/// `remaining` is the TTL left on the key after the query, `None` if it is not cached.
pub fn format_cache_status(cache_hit: bool, remaining: Option<u64>) -> String {
    match (cache_hit, remaining) {
        (true, Some(secs)) => format!("  Cache: HIT (expires in {} seconds)", secs),
        (true, None) => "  Cache: HIT".to_string(),
        (false, Some(secs)) => format!("  Cache: MISS (cached for {} seconds)", secs),
        (false, None) => "  Cache: MISS (not cached)".to_string(),
    }
}

pub fn format_bulk_outcome(outcome: &BulkQueryOutcome) -> String {
    let elapsed = outcome.elapsed.as_millis();
    match &outcome.result {
        Ok(resolution) => {
            let answers = resolution
                .message
                .answers
                .iter()
                .map(|record| record.data.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let source = if resolution.cache_hit { " (cached)" } else { "" };
            format!(
                "{:<30} {:<9} {:>5}ms{} {}",
                outcome.domain,
                resolution.message.status.to_string(),
                elapsed,
                source,
                answers
            )
        }
        Err(e) => format!("{:<30} {:<9} {:>5}ms {}", outcome.domain, "FAILED", elapsed, e),
    }
}

pub fn format_cache_stats(stats: &CacheStats) -> String {
    let mut out = String::from("Cache Statistics:\n");
    let _ = writeln!(out, "  Total Entries: {} / {}", stats.entries, stats.max_size);
    let _ = writeln!(out, "  Cache Hits: {}", stats.hits);
    let _ = writeln!(out, "  Cache Misses: {}", stats.misses);
    let _ = writeln!(out, "  Hit Ratio: {:.2}%", stats.hit_ratio * 100.0);
    let _ = writeln!(out, "  Evictions: {}", stats.evictions);
    let _ = writeln!(out, "  Cleanups: {}", stats.cleanups);
    let _ = writeln!(
        out,
        "  Memory Usage: {:.2} KB",
        stats.approx_memory_bytes as f64 / 1024.0
    );
    out
}

/// Per-query timings plus the mean over network round trips.
pub fn format_timing_summary(events: &[QueryEvent]) -> String {
    let mut out = String::from("Response Times:\n");

    for event in events {
        let source = if event.cache_hit { "cache" } else { "network" };
        let status = if event.is_success() { "ok" } else { "failed" };
        let _ = writeln!(
            out,
            "  {:<30} {:>10.3}ms  {:<7} {}",
            event.domain(),
            event.response_time_ms(),
            source,
            status
        );
    }

    let network: Vec<f64> = events
        .iter()
        .filter(|event| !event.cache_hit && event.is_success())
        .map(QueryEvent::response_time_ms)
        .collect();
    if !network.is_empty() {
        let mean = network.iter().sum::<f64>() / network.len() as f64;
        let _ = writeln!(out, "  Mean network time: {:.3}ms", mean);
    }

    out
}
