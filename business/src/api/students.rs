use serde::Serialize;

use super::{ApiResult, MessageResponse, message, require, send, with_json};
use crate::http::Client;

/// Fields of the add/edit student form. All are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub grade: String,
}

#[derive(Serialize)]
struct StudentBody<'a> {
    name: &'a str,
    gender: &'a str,
    date_of_birth: &'a str,
    grade: &'a str,
}

impl StudentForm {
    fn body(&self) -> ApiResult<StudentBody<'_>> {
        Ok(StudentBody {
            name: require("Name", &self.name)?,
            gender: require("Gender", &self.gender)?,
            date_of_birth: require("Date of birth", &self.date_of_birth)?,
            grade: require("Grade", &self.grade)?,
        })
    }
}

/// POST `/add-student`
pub async fn add_student(client: &Client, form: &StudentForm) -> ApiResult<MessageResponse> {
    let request = with_json(client.post("/add-student"), &form.body()?)?;
    message(&send(request).await?)
}

/// PUT `/update-student/{id}`
pub async fn update_student(
    client: &Client,
    id: &str,
    form: &StudentForm,
) -> ApiResult<MessageResponse> {
    let id = require("Student id", id)?;
    let body = form.body()?;
    let request = with_json(client.put(&format!("/update-student/{id}")), &body)?;
    message(&send(request).await?)
}
