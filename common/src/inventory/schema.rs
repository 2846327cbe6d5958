/// Name of the column that always carries the queried address.
pub const IP_FIELD: &str = "ip";

/// Canonical, ordered inventory columns. Drives both JSON extraction and the
/// CSV header.
pub const FIELD_SCHEMA: [&str; 20] = [
    IP_FIELD,
    "manufacturer",
    "model",
    "serial_number",
    "processor",
    "operating_system",
    "total_memory",
    "free_memory",
    "mac_address",
    "hostname",
    "current_user",
    "location",
    "used_memory",
    "total_storage",
    "free_storage",
    "used_storage",
    "chassis_type",
    "drives",
    "execution_time",
    "status",
];

/// One host's inventory, stored positionally against [`FIELD_SCHEMA`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    values: Vec<String>,
}

impl InventoryRecord {
    /// A record for `address` with every other field empty.
    pub fn new(address: impl Into<String>) -> Self {
        let mut values: Vec<String> = vec![String::new(); FIELD_SCHEMA.len()];
        values[0] = address.into();
        Self { values }
    }

    pub fn address(&self) -> &str {
        &self.values[0]
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        field_index(field).map(|idx| self.values[idx].as_str())
    }

    /// Sets a schema field. Unknown fields and `ip` are left untouched and
    /// reported back as `false`.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        match field_index(field) {
            Some(idx) if idx > 0 => {
                self.values[idx] = value.into();
                true
            }
            _ => false,
        }
    }

    /// Values in schema order, `ip` first.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        FIELD_SCHEMA
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }
}

fn field_index(field: &str) -> Option<usize> {
    FIELD_SCHEMA.iter().position(|name| *name == field)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_starts_with_ip_and_has_no_duplicates() {
        assert_eq!(FIELD_SCHEMA[0], "ip");
        let mut sorted = FIELD_SCHEMA.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), FIELD_SCHEMA.len());
    }

    #[test]
    fn new_record_is_empty_except_ip() {
        let record = InventoryRecord::new("10.0.0.1");
        assert_eq!(record.address(), "10.0.0.1");
        assert_eq!(record.values().len(), FIELD_SCHEMA.len());
        assert!(record.values()[1..].iter().all(String::is_empty));
    }

    #[test]
    fn set_ignores_ip_and_unknown_fields() {
        let mut record = InventoryRecord::new("10.0.0.1");
        assert!(record.set("hostname", "ws-042"));
        assert!(!record.set("ip", "10.9.9.9"));
        assert!(!record.set("favourite_colour", "blue"));

        assert_eq!(record.get("hostname"), Some("ws-042"));
        assert_eq!(record.address(), "10.0.0.1");
        assert_eq!(record.get("favourite_colour"), None);
    }

    #[test]
    fn iter_follows_schema_order() {
        let mut record = InventoryRecord::new("10.0.0.1");
        record.set("status", "online");
        let fields: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(fields, FIELD_SCHEMA.to_vec());
        assert_eq!(record.iter().last(), Some(("status", "online")));
    }
}
