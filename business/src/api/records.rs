use log::info;

use super::{ApiResult, MessageResponse, message, require, send};
use crate::entities::EntityKind;
use crate::http::Client;

/// DELETE `/delete-{student|teacher|parent}/{id}`
pub async fn delete_record(
    client: &Client,
    kind: EntityKind,
    id: &str,
) -> ApiResult<MessageResponse> {
    let id = require("Record id", id)?;
    let response = send(client.delete(&kind.delete_path(id))).await?;
    info!("deleted {} {id}", kind.as_str());
    message(&response)
}
