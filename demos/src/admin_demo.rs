use cognito_rust::admin::{
    AdminCreateUserCredentials, AdminUserService, CreateUserParams, MessageAction,
    PostSignupMessageConfig, SearchUserFilter, SearchUsersParameters, SearchableAttribute,
};
use cognito_rust::attributes::{CognitoAttributeName, UserAttribute, UserStructure};
use cognito_rust::config::CognitoConfig;
use cognito_rust::user::UserAssembler;
use cognito_rust::Cognito;
use dotenv::dotenv;
use serde::Serialize;

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    locale: Option<String>,
}

fn profile_structure() -> Result<UserStructure<Profile>, Box<dyn std::error::Error>> {
    let structure = UserStructure::builder()
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
            "lastName",
            UserAttribute::new(CognitoAttributeName::FamilyName),
            |p: &Profile| &p.last_name,
            |p: &mut Profile| &mut p.last_name,
        )
        .attribute(
            "locale",
            UserAttribute::new(CognitoAttributeName::Locale).with_default("en".to_string()),
            |p: &Profile| &p.locale,
            |p: &mut Profile| &mut p.locale,
        )
        .build()?;
    Ok(structure)
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // .envファイルから環境変数を読み込む
    dotenv().ok();

    // 管理 API は署名付きリクエストが必要 (AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY)
    let config = CognitoConfig::from_env()?;
    let cognito = Cognito::new(config)?;
    let assembler = UserAssembler::new(profile_structure()?).with_fit_sign_up_info(|mut p| {
        p.email = p.email.map(|e| e.to_lowercase());
        p
    });
    let admin = cognito.admin(assembler);

    println!("1. ユーザーを作成");
    let username = format!("demo-{}", uuid::Uuid::new_v4());
    let email = format!("{}@example.com", username);
    let params = CreateUserParams::new(
        AdminCreateUserCredentials::new(&username).with_password("Demo-Passw0rd!"),
        Profile {
            email: Some(email.clone()),
            first_name: Some("Demo".to_string()),
            ..Default::default()
        },
    )
    .with_post_signup_message(PostSignupMessageConfig {
        action: Some(MessageAction::Suppress),
        delivery_mediums: None,
    })
    .with_force_email_verification(true);
    let user = admin.create_user(params).await?;
    println!("{}", serde_json::to_string_pretty(&user)?);

    println!("\n2. メールアドレスで検索");
    let found = admin.get_user_by_email(&email).await?;
    println!("  見つかったユーザー: {}", found.id());

    println!("\n3. 前方一致で検索");
    let params = SearchUsersParameters::default()
        .with_filter(SearchUserFilter::starts_with(SearchableAttribute::Email, "demo-"))
        .with_groups();
    for user in admin.search_users(&params).await? {
        println!("  {} {:?} {:?}", user.id(), user.attributes().email, user.groups);
    }

    println!("\n4. 無効化して削除");
    admin.disable_user(&username).await?;
    admin.delete_user(&username).await?;
    println!("  完了");

    Ok(())
}
