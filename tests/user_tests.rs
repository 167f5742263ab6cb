use cognito_rust::attributes::{CognitoAttributeName, UserAttribute, UserStructure};
use cognito_rust::auth::UserAuthToken;
use cognito_rust::config::CognitoConfig;
use cognito_rust::user::{Credentials, UserAssembler, UserService};
use cognito_rust::{Cognito, Error};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Default, Clone, PartialEq)]
struct Profile {
    email: Option<String>,
    first_name: Option<String>,
    age: Option<u32>,
}

fn structure() -> UserStructure<Profile> {
    UserStructure::builder()
        .attribute(
            "email",
            UserAttribute::new(CognitoAttributeName::Email),
            |p: &Profile| &p.email,
            |p: &mut Profile| &mut p.email,
        )
        .attribute(
            "firstName",
            UserAttribute::new(CognitoAttributeName::GivenName),
            |p: &Profile| &p.first_name,
            |p: &mut Profile| &mut p.first_name,
        )
        .attribute(
            "age",
            UserAttribute::new(CognitoAttributeName::custom("age")).with_default(18),
            |p: &Profile| &p.age,
            |p: &mut Profile| &mut p.age,
        )
        .build()
        .unwrap()
}

fn cognito(server: &MockServer) -> Cognito {
    let config = CognitoConfig::new("eu-west-1", "eu-west-1_test", "test-client")
        .with_endpoint(&server.uri());
    Cognito::new(config).unwrap()
}

fn token() -> UserAuthToken {
    UserAuthToken {
        access_token: "test_access_token".to_string(),
        id_token: "test_id_token".to_string(),
    }
}

#[tokio::test]
async fn test_sign_up_sends_only_defined_attributes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("x-amz-target", "AWSCognitoIdentityProviderService.SignUp"))
        .and(body_json(json!({
            "ClientId": "test-client",
            "Username": "ada",
            "Password": "password123",
            "UserAttributes": [
                { "Name": "email", "Value": "a@b.com" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "UserConfirmed": false,
            "UserSub": "1234"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let users = cognito(&mock_server).users(UserAssembler::new(structure()));
    users
        .sign_up(
            &Credentials::new("ada", "password123"),
            Profile {
                email: Some("a@b.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_sign_up_applies_fit_hook() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "UserAttributes": [
                { "Name": "email", "Value": "a@b.com" },
                { "Name": "custom:age", "Value": "18" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let assembler = UserAssembler::new(structure()).with_fit_sign_up_info(|mut p: Profile| {
        p.age.get_or_insert(18);
        p
    });
    let users = cognito(&mock_server).users(assembler);
    users
        .sign_up(
            &Credentials::new("ada", "password123"),
            Profile {
                email: Some("a@b.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_sign_up_existing_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "UsernameExistsException",
            "message": "User already exists"
        })))
        .mount(&mock_server)
        .await;

    let users = cognito(&mock_server).users(UserAssembler::new(structure()));
    let result = users
        .sign_up(&Credentials::new("ada", "password123"), Profile::default())
        .await;

    assert!(matches!(result, Err(Error::UserAlreadyExists(_))));
}

#[tokio::test]
async fn test_get_user_info_decodes_attributes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("x-amz-target", "AWSCognitoIdentityProviderService.GetUser"))
        .and(body_json(json!({ "AccessToken": "test_access_token" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Username": "ada",
            "UserAttributes": [
                { "Name": "sub", "Value": "1234" },
                { "Name": "email", "Value": "a@b.com" },
                { "Name": "given_name", "Value": "" },
                { "Name": "custom:age", "Value": "not-a-number" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let users = cognito(&mock_server).users(UserAssembler::new(structure()));
    let info = users.get_user_info(&token()).await.unwrap();

    assert_eq!(info.id, "ada");
    assert_eq!(
        info.attributes,
        Profile {
            email: Some("a@b.com".to_string()),
            first_name: None,
            age: Some(18),
        }
    );
}

#[tokio::test]
async fn test_update_confirm_and_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header(
            "x-amz-target",
            "AWSCognitoIdentityProviderService.UpdateUserAttributes",
        ))
        .and(body_json(json!({
            "AccessToken": "test_access_token",
            "UserAttributes": [
                { "Name": "given_name", "Value": "Ada" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(header("x-amz-target", "AWSCognitoIdentityProviderService.ConfirmSignUp"))
        .and(body_json(json!({
            "ClientId": "test-client",
            "Username": "ada",
            "ConfirmationCode": "123456"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(header("x-amz-target", "AWSCognitoIdentityProviderService.DeleteUser"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let users = cognito(&mock_server).users(UserAssembler::new(structure()));
    users
        .update_user_info(
            &token(),
            Profile {
                first_name: Some("Ada".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    users.confirm_sign_up("ada", "123456").await.unwrap();
    users.delete_user(&token()).await.unwrap();
}

#[tokio::test]
async fn test_confirm_with_wrong_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "CodeMismatchException",
            "message": "Invalid verification code provided, please try again."
        })))
        .mount(&mock_server)
        .await;

    let users = cognito(&mock_server).users(UserAssembler::new(structure()));
    let result = users.confirm_sign_up("ada", "000000").await;

    assert!(matches!(result, Err(Error::InvalidOrExpiredCode(_))));
}
