use cognito_rust::auth::{
    username_from_token, AuthChallengeCompletion, AuthChallengeName, AuthService, LoginResult,
};
use cognito_rust::config::CognitoConfig;
use cognito_rust::user::Credentials;
use cognito_rust::Cognito;
use dotenv::dotenv;
use std::env;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // .envファイルから環境変数を読み込む
    dotenv().ok();

    let config = CognitoConfig::from_env()?;
    let username = env::var("DEMO_USERNAME").expect("DEMO_USERNAME must be set");
    let password = env::var("DEMO_PASSWORD").expect("DEMO_PASSWORD must be set");

    let cognito = Cognito::new(config)?;
    let auth = cognito.auth();

    println!("1. ログイン: {}", username);
    let token = match auth.login(&Credentials::new(&username, &password)).await? {
        LoginResult::Token(token) => token,
        LoginResult::Challenge { auth_challenge } => {
            println!("  チャレンジ: {}", auth_challenge.name);
            if auth_challenge.name != AuthChallengeName::NewPasswordRequired {
                return Err("unsupported challenge in demo".into());
            }
            let new_password =
                env::var("DEMO_NEW_PASSWORD").expect("DEMO_NEW_PASSWORD must be set");
            let completion = AuthChallengeCompletion::new_password(&username, &new_password);
            auth.complete_auth_challenge(&completion, &auth_challenge.options)
                .await?
                .into_token()
                .ok_or("login still pending after new password")?
        }
    };
    println!("  ユーザー名 (IDトークン): {}", username_from_token(&token.id_token)?);

    println!("\n2. トークンのリフレッシュ");
    let refreshed = auth.refresh(&token.refresh_auth_token()).await?;
    println!("  新しいアクセストークン: {} 文字", refreshed.access_token.len());

    println!("\n3. ログアウト");
    auth.logout(&refreshed).await?;
    println!("  完了");

    Ok(())
}
