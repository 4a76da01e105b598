//! Repository record types.
//!
//! Listing and deletion themselves are methods on
//! [`Session`](crate::Session).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{AtUri, Rkey};

/// A record from the repository.
///
/// The value is kept as raw JSON: deletion only needs the URI, and a like
/// written by an unusual client should not stop the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The AT URI of this record.
    pub uri: AtUri,

    /// The CID (content identifier) of this record.
    pub cid: String,

    /// The record value.
    pub value: Value,
}

impl Record {
    /// The record key, i.e. the final segment of the URI.
    pub fn rkey(&self) -> &Rkey {
        self.uri.rkey()
    }

    /// When the record claims it was created (`createdAt`).
    ///
    /// Returns `None` if the field is missing or not RFC 3339.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.value.get("createdAt")?.as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// For a like, the URI of the liked post.
    pub fn subject_uri(&self) -> Option<&str> {
        self.value.get("subject")?.get("uri")?.as_str()
    }
}

/// Output from listing records in a collection.
#[derive(Debug, Clone, Default)]
pub struct ListRecordsOutput {
    /// The records in this page, in server order.
    pub records: Vec<Record>,

    /// Cursor for the next page, if more records exist.
    pub cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn like(value: Value) -> Record {
        Record {
            uri: AtUri::new("at://did:plc:test123/app.bsky.feed.like/3lbq6ekgf3k2t").unwrap(),
            cid: "bafylike".to_string(),
            value,
        }
    }

    #[test]
    fn reads_like_fields() {
        let record = like(json!({
            "$type": "app.bsky.feed.like",
            "subject": {
                "uri": "at://did:plc:other/app.bsky.feed.post/3kabc",
                "cid": "bafypost"
            },
            "createdAt": "2024-11-20T09:15:00.000Z"
        }));

        assert_eq!(record.rkey().as_str(), "3lbq6ekgf3k2t");
        assert_eq!(
            record.subject_uri(),
            Some("at://did:plc:other/app.bsky.feed.post/3kabc")
        );
        assert_eq!(
            record.created_at(),
            Some(Utc.with_ymd_and_hms(2024, 11, 20, 9, 15, 0).unwrap())
        );
    }

    #[test]
    fn tolerates_missing_fields() {
        let record = like(json!({ "createdAt": "yesterday" }));
        assert_eq!(record.created_at(), None);
        assert_eq!(record.subject_uri(), None);
    }
}
