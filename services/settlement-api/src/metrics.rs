use lazy_static::lazy_static;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

lazy_static! {
    pub static ref SETTLEMENTS_TOTAL: IntCounter = IntCounter::new(
        "settlements_total",
        "Total settlement requests completed"
    ).expect("metric can be created");

    pub static ref VALIDATION_FAILURES_TOTAL: IntCounter = IntCounter::new(
        "settlement_validation_failures_total",
        "Total settlement requests rejected at validation"
    ).expect("metric can be created");

    pub static ref TRANSACTIONS_EMITTED_TOTAL: IntCounter = IntCounter::new(
        "settlement_transactions_emitted_total",
        "Total transactions produced by the settlement engine"
    ).expect("metric can be created");

    pub static ref UNBALANCED_TOTAL: IntCounter = IntCounter::new(
        "settlement_unbalanced_total",
        "Total settlements whose balances did not net to zero"
    ).expect("metric can be created");

    pub static ref SETTLEMENT_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new("settlement_duration_seconds", "Settlement computation time in seconds")
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0])
    ).expect("metric can be created");

    pub static ref GROUP_SIZE: Histogram = Histogram::with_opts(
        HistogramOpts::new("settlement_group_size", "Members per settlement request")
            .buckets(vec![2.0, 5.0, 10.0, 50.0, 100.0, 1000.0, 10000.0, 100000.0])
    ).expect("metric can be created");
}

/// Register all metrics with the given registry
pub fn register_metrics(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(SETTLEMENTS_TOTAL.clone()))?;
    registry.register(Box::new(VALIDATION_FAILURES_TOTAL.clone()))?;
    registry.register(Box::new(TRANSACTIONS_EMITTED_TOTAL.clone()))?;
    registry.register(Box::new(UNBALANCED_TOTAL.clone()))?;
    registry.register(Box::new(SETTLEMENT_DURATION.clone()))?;
    registry.register(Box::new(GROUP_SIZE.clone()))?;
    Ok(())
}

/// Render the registry in Prometheus text format
pub fn render(registry: &Registry) -> prometheus::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_render() {
        let registry = Registry::new();
        register_metrics(&registry).unwrap();

        SETTLEMENTS_TOTAL.inc();
        let text = render(&registry).unwrap();
        assert!(text.contains("settlements_total"));
        assert!(text.contains("settlement_duration_seconds"));
    }
}
