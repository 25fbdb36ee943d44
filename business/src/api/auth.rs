use log::info;
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResult, Id, MessageResponse, message, require, send, with_json};
use crate::http::Client;
use crate::session::{Role, Session};

/// Grades a teacher can pick at signup.
pub const GRADES: [&str; 9] = [
    "Grade 1", "Grade 2", "Grade 3", "Grade 4", "Grade 5", "Grade 6", "Grade 7", "Grade 8",
    "Grade 9",
];

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    id: Id,
    #[serde(default)]
    name: Option<String>,
    email: String,
    role: String,
}

/// POST `/login`
///
/// Any non-2xx answer is reported as bad credentials; the backend does not
/// tell the cases apart reliably.
pub async fn login(client: &Client, email: &str, password: &str) -> ApiResult<Session> {
    let (email, password) = (email.trim(), password.trim());
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Please fill in all fields.".to_owned()));
    }

    let request = with_json(client.post("/login"), &LoginRequest { email, password })?;
    let response = match send(request).await {
        Ok(response) => response,
        Err(ApiError::Rejected { status, .. }) => {
            info!("login rejected with status {status}");
            return Err(ApiError::InvalidCredentials);
        }
        Err(err) => return Err(err),
    };

    let user: LoginResponse = super::decode(&response)?;
    let role: Role = user.role.parse()?;

    Ok(Session {
        id: user.id.0,
        role,
        email: user.email,
        name: user.name,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupRequest {
    Teacher {
        credentials: Credentials,
        department: String,
        /// Subject ids.
        subjects: Vec<String>,
        grades: Vec<String>,
    },
    Parent {
        credentials: Credentials,
        phone: String,
        admission_no: String,
    },
    Admin {
        credentials: Credentials,
    },
}

impl SignupRequest {
    pub fn role(&self) -> Role {
        match self {
            Self::Teacher { .. } => Role::Teacher,
            Self::Parent { .. } => Role::Parent,
            Self::Admin { .. } => Role::Admin,
        }
    }

    fn credentials(&self) -> &Credentials {
        match self {
            Self::Teacher { credentials, .. }
            | Self::Parent { credentials, .. }
            | Self::Admin { credentials } => credentials,
        }
    }

    fn path(&self) -> &'static str {
        match self {
            Self::Teacher { .. } => "/signup-teacher",
            Self::Parent { .. } => "/parent/signup",
            Self::Admin { .. } => "/add-admin",
        }
    }

    /// Validated JSON body.
    fn body(&self) -> ApiResult<serde_json::Value> {
        let credentials = self.credentials();
        let name = require("Name", &credentials.name)?;
        let email = require("Email", &credentials.email)?;
        let password = require("Password", &credentials.password)?;

        let body = match self {
            Self::Teacher {
                department,
                subjects,
                grades,
                ..
            } => serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
                "department": department.trim(),
                "subjects": subjects,
                "grades": grades,
            }),
            Self::Parent {
                phone,
                admission_no,
                ..
            } => serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
                "phone": require("Phone", phone)?,
                "admission_no": require("Admission number", admission_no)?,
            }),
            Self::Admin { .. } => serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }),
        };
        Ok(body)
    }
}

/// POST `/signup-teacher`, `/parent/signup` or `/add-admin` depending on role.
pub async fn signup(client: &Client, request: &SignupRequest) -> ApiResult<MessageResponse> {
    let body = request.body()?;
    let response = send(with_json(client.post(request.path()), &body)?).await?;
    info!("created {} account", request.role());
    message(&response)
}
