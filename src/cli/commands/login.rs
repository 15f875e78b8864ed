//! `bmv login` - authenticate against the backend

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use miette::{IntoDiagnostic, Result};

use crate::api::{auth, ApiClient};
use crate::cli::GlobalOpts;
use crate::core::{Config, Session};
use crate::schema::{FormKind, FormValidator};

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

pub fn run(
    args: LoginArgs,
    config: &Config,
    session: &mut Session,
    global: &GlobalOpts,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    let email = match args.email {
        Some(email) => email,
        None => Input::with_theme(&theme)
            .with_prompt("Email")
            .interact_text()
            .into_diagnostic()?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::with_theme(&theme)
            .with_prompt("Password")
            .interact()
            .into_diagnostic()?,
    };

    // Validate locally before any network round trip
    let validator = FormValidator::new()?;
    let issues = validator.validate(
        FormKind::Login,
        &serde_json::json!({ "email": email, "password": password }),
    );
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("{} {}", style("✗").red(), issue.message);
        }
        miette::bail!("login aborted; fix the credentials and try again");
    }

    let client = ApiClient::new(config)?;
    let (token, user) = auth::login(&client, &email, &password)?;
    let username = user.username.clone();
    session.login(token, user).into_diagnostic()?;

    if !global.quiet {
        let role = session
            .claims()
            .and_then(|claims| claims.role_name())
            .or_else(|| {
                session
                    .user()
                    .and_then(|user| user.role.as_ref().map(|r| r.to_lowercase()))
            });
        match role {
            Some(role) => println!(
                "{} Logged in as {} ({})",
                style("✓").green(),
                style(&username).bold(),
                role
            ),
            None => println!("{} Logged in as {}", style("✓").green(), style(&username).bold()),
        }
    }
    Ok(())
}
