use serde::{Deserialize, Serialize};

/// Wire envelope wrapping every REST response body.
// The explicit bound keeps serde from also demanding `T: Default` for
// the defaulted `data` field; payload types need not be Default.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub status: u16,
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    /// Total records matching the filters, not just the returned page.
    pub records: u64,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 200,
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 201,
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
            pagination: None,
        }
    }

    pub fn paged(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paged_envelope_round_trips() {
        let envelope = ApiEnvelope::ok("results", vec![1, 2, 3]).paged(Pagination {
            page: 2,
            limit: 10,
            records: 23,
        });
        let json = serde_json::to_string(&envelope).unwrap();
        let back: ApiEnvelope<Vec<i32>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, envelope);
        assert_eq!(back.pagination.unwrap().records, 23);
    }

    #[test]
    fn error_envelope_serializes_null_data_without_pagination() {
        let envelope: ApiEnvelope<()> = ApiEnvelope::error(404, "Item 9 not found");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], 404);
        assert!(json["data"].is_null());
        assert!(json.get("pagination").is_none());
    }

    #[test]
    fn payload_type_does_not_need_default() {
        // Decoding must only require Deserialize of the payload.
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Bare {
            token: String,
        }

        let body = r#"{"status":200,"message":"Ok","data":{"token":"abc"}}"#;
        let envelope: ApiEnvelope<Bare> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.unwrap().token, "abc");
    }

    #[test]
    fn missing_data_field_decodes_as_none() {
        let body = r#"{"status":200,"message":"ok"}"#;
        let envelope: ApiEnvelope<Vec<i32>> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data, None);
        assert_eq!(envelope.pagination, None);
    }
}
