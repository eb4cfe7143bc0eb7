use chrono::{DateTime, FixedOffset, Local};
use marshal::{Decimal, Record, ToRecord};

/// The example record served by both routes.
#[derive(Debug, Clone)]
pub struct Payload {
    pub id: i64,
    pub timestamp: DateTime<FixedOffset>,
    /// `None` encodes as `null`, and is dropped when zero fields are omitted
    pub value: Option<Decimal>,
    pub message: String,
}

impl Payload {
    /// Payload stamped with the current local time.
    pub fn now(id: i64, value: f64, message: impl Into<String>) -> Self {
        Self {
            id,
            timestamp: Local::now().fixed_offset(),
            value: Decimal::from_f64(value),
            message: message.into(),
        }
    }
}

impl ToRecord for Payload {
    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("timestamp", self.timestamp)
            .with_optional("value", self.value.clone())
            .with("message", self.message.as_str())
    }
}
