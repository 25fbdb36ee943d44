//! Typed API calls against a mock BrightPath backend.

use brightpath_business::api::announcements::{list_announcements, post_announcement};
use brightpath_business::api::auth::{Credentials, SignupRequest, login, signup};
use brightpath_business::api::parents::{linked_children, performance, summarize};
use brightpath_business::api::records::delete_record;
use brightpath_business::api::results::{class_results, results_summary, view_results};
use brightpath_business::api::students::{StudentForm, add_student, update_student};
use brightpath_business::api::subjects::{add_subject, list_subjects};
use brightpath_business::http::Client;
use brightpath_business::{ApiError, EntityKind, Role, Session};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, path_regex, query_param},
};

async fn setup() -> (MockServer, Client) {
    let mock_server = MockServer::start().await;
    let client = Client::new(mock_server.uri());
    (mock_server, client)
}

fn student_form() -> StudentForm {
    StudentForm {
        name: "Amani Njoroge".to_owned(),
        gender: "Female".to_owned(),
        date_of_birth: "2015-06-01".to_owned(),
        grade: "Grade 3".to_owned(),
    }
}

#[tokio::test]
async fn test_login_success_builds_session() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"email": "admin@school.org", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Principal",
            "email": "admin@school.org",
            "role": "admin"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = login(&client, " admin@school.org ", "pw").await.unwrap();
    assert_eq!(
        session,
        Session {
            id: "1".to_owned(),
            role: Role::Admin,
            email: "admin@school.org".to_owned(),
            name: Some("Principal".to_owned()),
        }
    );
}

#[tokio::test]
async fn test_login_rejection_is_invalid_credentials() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid email or password"})),
        )
        .mount(&mock_server)
        .await;

    let err = login(&client, "who@school.org", "nope").await.unwrap_err();
    assert_eq!(err, ApiError::InvalidCredentials);
    assert_eq!(err.to_string(), "Invalid email or password.");
}

#[tokio::test]
async fn test_login_unknown_role() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "name": "X", "email": "x@school.org", "role": "janitor"
        })))
        .mount(&mock_server)
        .await;

    let err = login(&client, "x@school.org", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Unknown user role.");
}

#[tokio::test]
async fn test_login_blank_fields_never_hit_the_network() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = login(&client, "", "pw").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation("Please fill in all fields.".to_owned())
    );
}

#[tokio::test]
async fn test_parent_signup_posts_admission_number() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/parent/signup"))
        .and(body_json(json!({
            "name": "Grace",
            "email": "grace@home.org",
            "password": "pw",
            "phone": "0712345678",
            "admission_no": "BP-004"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "message": "Parent registered successfully"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = signup(
        &client,
        &SignupRequest::Parent {
            credentials: Credentials {
                name: "Grace".to_owned(),
                email: "grace@home.org".to_owned(),
                password: "pw".to_owned(),
            },
            phone: "0712345678".to_owned(),
            admission_no: "BP-004".to_owned(),
        },
    )
    .await
    .unwrap();
    assert_eq!(response.message.as_deref(), Some("Parent registered successfully"));
}

#[tokio::test]
async fn test_signup_detail_is_surfaced_verbatim() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/signup-teacher"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already exists"})),
        )
        .mount(&mock_server)
        .await;

    let err = signup(
        &client,
        &SignupRequest::Teacher {
            credentials: Credentials {
                name: "Kamau".to_owned(),
                email: "kamau@school.org".to_owned(),
                password: "pw".to_owned(),
            },
            department: "Sciences".to_owned(),
            subjects: vec!["1".to_owned()],
            grades: vec!["Grade 7".to_owned()],
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Email already exists");
}

#[tokio::test]
async fn test_add_and_update_student() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/add-student"))
        .and(body_json(json!({
            "name": "Amani Njoroge",
            "gender": "Female",
            "date_of_birth": "2015-06-01",
            "grade": "Grade 3"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "message": "Student added successfully!"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/update-student/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let added = add_student(&client, &student_form()).await.unwrap();
    assert_eq!(added.message_or("Saved"), "Student added successfully!");

    let updated = update_student(&client, "42", &student_form()).await.unwrap();
    assert_eq!(updated.message_or("Student updated."), "Student updated.");
}

#[tokio::test]
async fn test_incomplete_student_form_is_not_sent() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut form = student_form();
    form.grade.clear();
    let err = add_student(&client, &form).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_delete_uses_singular_paths() {
    let (mock_server, client) = setup().await;

    for (kind, endpoint) in [
        (EntityKind::Student, "/delete-student/7"),
        (EntityKind::Teacher, "/delete-teacher/7"),
        (EntityKind::Parent, "/delete-parent/7"),
    ] {
        Mock::given(method("DELETE"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&mock_server)
            .await;

        delete_record(&client, kind, "7").await.unwrap();
    }
}

#[tokio::test]
async fn test_subjects_list_and_add() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/get-subjects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "subjects": [{"id": 1, "name": "Mathematics"}, {"id": 2, "name": "English", "description": null}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/add-subject"))
        .and(body_json(json!({"name": "Kiswahili"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let subjects = list_subjects(&client).await.unwrap();
    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[0].id.0, "1");
    assert_eq!(subjects[1].name, "English");

    add_subject(&client, " Kiswahili ").await.unwrap();
}

#[tokio::test]
async fn test_announcements_default_poster() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/add-announcement"))
        .and(body_json(json!({"message": "Closing early on Friday", "posted_by": "Admin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "message": "Announcement posted successfully!"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/get-announcements"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "announcements": [{"id": 1, "message": "Closing early on Friday", "posted_by": "Admin", "created_at": "2025-05-02T08:00:00"}]
        })))
        .mount(&mock_server)
        .await;

    post_announcement(&client, "Closing early on Friday", None)
        .await
        .unwrap();
    let announcements = list_announcements(&client).await.unwrap();
    assert_eq!(announcements[0].posted_by.as_deref(), Some("Admin"));
}

#[tokio::test]
async fn test_parent_dashboard_children_and_performance() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/parents/9/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parent_id": 9,
            "students": [{"id": 4, "reg_no": "BP-004", "name": "Amani", "grade": "Grade 3"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/students/4/performance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "performance": [
                {"subject": "Mathematics", "marks": 84, "term": "Term 1", "exam_type": "End Term"},
                {"subject": "English", "marks": 58.5, "term": "Term 1", "exam_type": "End Term"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let children = linked_children(&client, "9").await.unwrap();
    assert_eq!(children.len(), 1);
    let child_id = children[0].id.clone().unwrap();

    let report = performance(&client, &child_id.0).await.unwrap();
    let grades: Vec<char> = report
        .performance
        .iter()
        .map(|record| record.letter_grade())
        .collect();
    assert_eq!(grades, vec!['A', 'D']);
}

#[tokio::test]
async fn test_no_linked_children_surfaces_detail() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/parents/3/students"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "No students linked to this parent."
        })))
        .mount(&mock_server)
        .await;

    let err = linked_children(&client, "3").await.unwrap_err();
    assert_eq!(err.to_string(), "No students linked to this parent.");
}

#[tokio::test]
async fn test_results_summary_sends_term() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/results-summary"))
        .and(query_param("term", "Term 2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "summary": [
                {"class": "Grade 1", "total_subjects": 5, "uploaded": 5, "pending": 0, "status": "✅ Complete"},
                {"class": "Grade 2", "total_subjects": 5, "uploaded": 2, "pending": 3, "status": "⏳ In Progress"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let summary = results_summary(&client, "Term 2").await.unwrap();
    assert_eq!(summary[0].grade, "Grade 1");
    assert!(summary[0].is_complete());
    assert!(!summary[1].is_complete());
}

#[tokio::test]
async fn test_class_results_keeps_missing_average() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/admin/class-results/Grade(%20| )4$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "class": "Grade 4",
            "subjects": [
                {"subject": "Mathematics", "teacher": "Mr. Otieno", "uploaded": 12, "pending": 0, "average_marks": 71.5},
                {"subject": "Kiswahili", "teacher": null, "uploaded": 0, "pending": 0, "average_marks": null}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let subjects = class_results(&client, " Grade 4 ").await.unwrap();
    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[0].teacher.as_deref(), Some("Mr. Otieno"));
    assert_eq!(subjects[0].average_marks, Some(71.5));
    assert_eq!(subjects[1].teacher, None);
    assert_eq!(subjects[1].average_marks, None);
}

#[tokio::test]
async fn test_class_results_requires_grade() {
    let client = Client::new("http://127.0.0.1:9");
    let err = class_results(&client, "  ").await.unwrap_err();
    assert_eq!(err, ApiError::Validation("Grade is required.".to_owned()));
}

#[tokio::test]
async fn test_view_results_lists_feed() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/view-results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "results": [{
                "student_reg": "BP-014",
                "student_name": "Amani Njoroge",
                "grade": "Grade 3",
                "subject": "English",
                "teacher": "Ms. Wanjiru",
                "marks": 78,
                "term": "Term 1",
                "exam_type": "Midterm"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let feed = view_results(&client, None).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].student_reg.to_string(), "BP-014");
    assert_eq!(feed[0].marks, 78.0);
    assert_eq!(feed[0].exam_type, "Midterm");
}

#[tokio::test]
async fn test_view_results_filters_by_term() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/view-results"))
        .and(query_param("term", "Term 2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "results": [],
            "message": "No results found."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let feed = view_results(&client, Some("Term 2")).await.unwrap();
    assert!(feed.is_empty());
}

#[tokio::test]
async fn test_summarize_posts_text() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/summarize"))
        .and(body_json(json!({"text": "Photosynthesis turns light into sugar."})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"summary": "Plants make food from light."})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let summary = summarize(&client, "Photosynthesis turns light into sugar.")
        .await
        .unwrap();
    assert_eq!(summary.as_deref(), Some("Plants make food from light."));
}

#[tokio::test]
async fn test_summarize_blank_summary_is_none() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summary": ""})))
        .mount(&mock_server)
        .await;

    assert_eq!(summarize(&client, "Some text").await.unwrap(), None);
    let err = summarize(&client, " ").await.unwrap_err();
    assert_eq!(err, ApiError::Validation("Text is required.".to_owned()));
}
