use serde::{Deserialize, Serialize};

use stockledger_core::ProductId;

/// Envelope for an event, containing journal position + stream metadata.
///
/// This is the unit appended to the ledger journal.
///
/// Notes:
/// - `sequence_number` is 1-based and strictly increasing across the whole journal.
/// - `stream_id` names the product whose state the payload changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    sequence_number: u64,

    stream_id: ProductId,
    stream_type: String,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        sequence_number: u64,
        stream_id: ProductId,
        stream_type: impl Into<String>,
        payload: E,
    ) -> Self {
        Self {
            sequence_number,
            stream_id,
            stream_type: stream_type.into(),
            payload,
        }
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn stream_id(&self) -> &ProductId {
        &self.stream_id
    }

    pub fn stream_type(&self) -> &str {
        &self.stream_type
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_survives_json() {
        let envelope = EventEnvelope::new(7, ProductId::from("SKU-1"), "product_stock", 42_i64);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["sequence_number"], 7);
        assert_eq!(json["stream_id"], "SKU-1");
        assert_eq!(json["stream_type"], "product_stock");

        let back: EventEnvelope<i64> = serde_json::from_value(json).unwrap();
        assert_eq!(back, envelope);
        assert_eq!(back.into_payload(), 42);
    }
}
