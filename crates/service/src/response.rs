//! Response envelope returned to the invoking host.
//!
//! `{ statusCode, headers?, body }` with `statusCode` as a string and `body`
//! either plain text or the stored record.

use std::collections::BTreeMap;

use models::VisitRecord;
use serde::Serialize;

use crate::handlers::VisitOutcome;

pub const ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";
pub const NOT_FOUND_BODY: &str = "Not found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Text(String),
    Record(VisitRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    pub body: ResponseBody,
}

impl HandlerResponse {
    /// Map an outcome to the envelope. Found records and increments carry the
    /// allow-origin header; deletes and not-found replies carry no headers.
    pub fn from_outcome(outcome: VisitOutcome, allow_origin: &str) -> Self {
        let cors = || Some(BTreeMap::from([(ALLOW_ORIGIN_HEADER.to_string(), allow_origin.to_string())]));
        match outcome {
            VisitOutcome::Found(record) => Self {
                status_code: "200".into(),
                headers: cors(),
                body: ResponseBody::Record(record),
            },
            VisitOutcome::Counted { status, count } => Self {
                status_code: status.to_string(),
                headers: cors(),
                body: ResponseBody::Text(count.to_string()),
            },
            VisitOutcome::Deleted { status, id } => Self {
                status_code: status.to_string(),
                headers: None,
                body: ResponseBody::Text(format!("Record {id} deleted")),
            },
            VisitOutcome::NotFound => Self {
                status_code: "404".into(),
                headers: None,
                body: ResponseBody::Text(NOT_FOUND_BODY.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn found_serializes_record_body_with_cors() {
        let resp = HandlerResponse::from_outcome(VisitOutcome::Found(VisitRecord::new("abc", 2)), "origin");
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "statusCode": "200",
                "headers": {"Access-Control-Allow-Origin": "origin"},
                "body": {"id": "abc", "count": 2}
            })
        );
    }

    #[test]
    fn counted_body_is_text_count() {
        let resp = HandlerResponse::from_outcome(VisitOutcome::Counted { status: 200, count: 7 }, "*");
        assert_eq!(resp.status_code, "200");
        assert_eq!(resp.body, ResponseBody::Text("7".into()));
        assert_eq!(resp.headers.unwrap()[ALLOW_ORIGIN_HEADER], "*");
    }

    #[test]
    fn deleted_and_not_found_omit_headers() {
        let deleted = HandlerResponse::from_outcome(
            VisitOutcome::Deleted { status: 200, id: "abc".into() },
            "origin",
        );
        assert_eq!(
            serde_json::to_value(&deleted).unwrap(),
            json!({"statusCode": "200", "body": "Record abc deleted"})
        );

        let missing = HandlerResponse::from_outcome(VisitOutcome::NotFound, "origin");
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            json!({"statusCode": "404", "body": "Not found"})
        );
    }
}
