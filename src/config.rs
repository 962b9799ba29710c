use serde::Serialize;
use std::time::Duration;

/// USB vendor ID of the matrix controller
pub const VENDOR_ID: u16 = 0x2E8A;
/// USB product ID of the matrix controller
pub const PRODUCT_ID: u16 = 0x000A;
pub const BAUD_RATE: u32 = 115200;
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Serial session parameters used during discovery.
#[derive(Debug, Clone, Serialize)]
pub struct SessionConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    pub baud_rate: u32,
    #[serde(with = "millis")]
    pub read_timeout: Duration,
    /// Restrict discovery to this port name instead of enumerating
    pub port: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            vendor_id: VENDOR_ID,
            product_id: PRODUCT_ID,
            baud_rate: BAUD_RATE,
            read_timeout: READ_TIMEOUT,
            port: None,
        }
    }
}

impl SessionConfig {
    pub fn with_port(mut self, port: Option<String>) -> Self {
        self.port = port;
        self
    }

    /// Render the effective settings as a single JSON line for logging
    pub fn to_log_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("<unserializable: {}>", e))
    }
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}
