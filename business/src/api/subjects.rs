use serde::{Deserialize, Serialize};

use super::{ApiResult, Id, MessageResponse, fetch_list, message, require, send, with_json};
use crate::envelope::EnvelopeShape;
use crate::http::Client;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subject {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// GET `/get-subjects`
pub async fn list_subjects(client: &Client) -> ApiResult<Vec<Subject>> {
    fetch_list(client.get("/get-subjects"), &EnvelopeShape::strict("subjects")).await
}

#[derive(Serialize)]
struct NewSubject<'a> {
    name: &'a str,
}

/// POST `/add-subject`
pub async fn add_subject(client: &Client, name: &str) -> ApiResult<MessageResponse> {
    let name = require("Subject name", name)?;
    let request = with_json(client.post("/add-subject"), &NewSubject { name })?;
    message(&send(request).await?)
}
