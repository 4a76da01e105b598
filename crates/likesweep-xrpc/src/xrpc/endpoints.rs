//! XRPC endpoint names and request/response bodies.

use serde::{Deserialize, Serialize};

/// com.atproto.server.createSession
pub const CREATE_SESSION: &str = "com.atproto.server.createSession";

/// com.atproto.server.refreshSession
pub const REFRESH_SESSION: &str = "com.atproto.server.refreshSession";

/// com.atproto.repo.listRecords
pub const LIST_RECORDS: &str = "com.atproto.repo.listRecords";

/// com.atproto.repo.deleteRecord
pub const DELETE_RECORD: &str = "com.atproto.repo.deleteRecord";

/// Request body for createSession.
#[derive(Debug, Serialize)]
pub struct CreateSessionRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

/// Response from createSession.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub did: String,
    pub handle: String,
    pub access_jwt: String,
    pub refresh_jwt: String,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response from refreshSession.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSessionResponse {
    pub access_jwt: String,
    pub refresh_jwt: String,
}

/// Query parameters for listRecords.
#[derive(Debug, Serialize)]
pub struct ListRecordsQuery<'a> {
    pub repo: &'a str,
    pub collection: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<&'a str>,
}

/// Response from listRecords.
#[derive(Debug, Deserialize)]
pub struct ListRecordsResponse {
    pub records: Vec<RecordEntry>,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// A single record entry from listRecords.
#[derive(Debug, Deserialize)]
pub struct RecordEntry {
    pub uri: String,
    pub cid: String,
    pub value: serde_json::Value,
}

/// Request body for deleteRecord.
#[derive(Debug, Serialize)]
pub struct DeleteRecordRequest<'a> {
    pub repo: &'a str,
    pub collection: &'a str,
    pub rkey: &'a str,
}

/// XRPC error response format.
#[derive(Debug, Deserialize)]
pub struct XrpcErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}
