use super::models::{AttributeMap, AttributeValue, TelemetryPoint};

/// Reshapes the upstream attribute list into a map keyed by attribute name.
///
/// Records are applied in order, so for duplicate keys the last one wins.
pub fn attributes_to_map(records: Vec<TelemetryPoint>) -> AttributeMap {
    let mut map = AttributeMap::new();
    for record in records {
        map.insert(
            record.key,
            AttributeValue {
                value: record.value,
                ts: record.last_update_ts,
            },
        );
    }
    map
}
