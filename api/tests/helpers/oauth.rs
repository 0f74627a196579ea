use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCESS_TOKEN: &str = "cmu-access-token";

/// Token endpoint answering with `status`; a 200 carries `ACCESS_TOKEN`.
/// `expected` is the exact number of calls the test allows.
pub async fn mount_token(server: &MockServer, status: u16, expected: u64) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "Bearer",
            "expires_in": 3600
        }))
    } else {
        ResponseTemplate::new(status).set_body_json(json!({"error": "invalid_grant"}))
    };

    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token.aspx"))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

pub async fn mount_profile(server: &MockServer, status: u16, profile: Value, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/misapi/basicinfo"))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_json(profile))
        .expect(expected)
        .mount(server)
        .await;
}

pub fn student_profile(email: &str, account_type: &str) -> Value {
    json!({
        "cmuitaccount_name": email.split('@').next().unwrap_or_default(),
        "cmuitaccount": email,
        "student_id": "650610001",
        "prename_id": "MR",
        "prename_TH": "นาย",
        "prename_EN": "Mr.",
        "firstname_TH": "สมชาย",
        "firstname_EN": "SOMCHAI",
        "lastname_TH": "ใจดี",
        "lastname_EN": "JAIDEE",
        "organization_code": "06",
        "organization_name_TH": "คณะวิศวกรรมศาสตร์",
        "organization_name_EN": "Faculty of Engineering",
        "itaccounttype_id": account_type,
        "itaccounttype_TH": "",
        "itaccounttype_EN": ""
    })
}
