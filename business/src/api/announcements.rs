use serde::{Deserialize, Serialize};

use super::{ApiResult, Id, MessageResponse, fetch_list, message, require, send, with_json};
use crate::envelope::EnvelopeShape;
use crate::http::Client;
use crate::session::Session;

/// Poster used when nobody (or nobody with a name) is logged in.
pub const DEFAULT_POSTER: &str = "Admin";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Announcement {
    #[serde(default)]
    pub id: Option<Id>,
    pub message: String,
    #[serde(default)]
    pub posted_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// GET `/get-announcements`, newest first.
pub async fn list_announcements(client: &Client) -> ApiResult<Vec<Announcement>> {
    fetch_list(
        client.get("/get-announcements"),
        &EnvelopeShape::strict("announcements"),
    )
    .await
}

#[derive(Serialize)]
struct NewAnnouncement<'a> {
    message: &'a str,
    posted_by: &'a str,
}

/// The session's stored name, else [`DEFAULT_POSTER`].
pub fn poster_name(session: Option<&Session>) -> &str {
    session
        .and_then(|session| session.name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_POSTER)
}

/// POST `/add-announcement`
pub async fn post_announcement(
    client: &Client,
    text: &str,
    session: Option<&Session>,
) -> ApiResult<MessageResponse> {
    let body = NewAnnouncement {
        message: require("Announcement", text)?,
        posted_by: poster_name(session),
    };
    let request = with_json(client.post("/add-announcement"), &body)?;
    message(&send(request).await?)
}
