//! `bmv register` - the interactive registration wizard
//!
//! A thin prompt layer over [`RegistrationWizard`]: every gate, transition
//! and error lives in the state machine; this module only renders steps and
//! feeds answers in.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use miette::{IntoDiagnostic, Result};

use crate::api::auth::BackendRegistrar;
use crate::api::roles::fetch_roles;
use crate::api::ApiClient;
use crate::cli::GlobalOpts;
use crate::core::{Config, Session};
use crate::wizard::{
    Field, RegisterReceipt, RegistrationWizard, Role, Step, SubscriptionPlan, WizardError,
};

/// Category options offered to vendors and freelancers
const CATEGORIES: &[&str] = &["catering", "photography", "decoration"];

/// Service options offered to vendors and freelancers
const SERVICES: &[&str] = &["food-service", "venue-decoration", "photo-shoot"];

#[derive(clap::Args, Debug)]
pub struct RegisterArgs {}

pub fn run(
    _args: RegisterArgs,
    config: &Config,
    session: &mut Session,
    global: &GlobalOpts,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    let client = ApiClient::new(config)?;

    // A failed catalog fetch is not fatal: the wizard runs and submission
    // stays blocked until a retry succeeds.
    let catalog = match fetch_roles(&client) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            if !global.quiet {
                eprintln!("{} role catalog unavailable: {}", style("!").yellow(), e);
            }
            None
        }
    };

    let mut wizard = RegistrationWizard::new(session.store_mut())?;
    if let Some(catalog) = catalog {
        wizard.load_catalog(catalog);
    }

    let receipt = loop {
        banner(&wizard);
        match wizard.step() {
            Step::SelectRole => select_role(&mut wizard, &theme)?,
            Step::EnterDetails => enter_details(&mut wizard, &theme)?,
            Step::Review => review(&mut wizard, &theme)?,
            Step::ChoosePlan => {
                if let Some(receipt) = choose_plan(&mut wizard, &client, &theme)? {
                    break receipt;
                }
            }
            Step::Submitted => miette::bail!("the wizard has already submitted"),
        }
    };

    drop(wizard);
    session
        .login(receipt.token.clone(), receipt.user.clone())
        .into_diagnostic()?;

    println!();
    println!("{} Registration successful!", style("✓").green());
    if !global.quiet {
        println!("  Logged in as {}", style(&receipt.user.username).bold());
        if let Some(ref role) = receipt.user.role {
            println!("  Dashboard: /dashboard/{}-dashboard", role.to_lowercase());
        }
    }
    Ok(())
}

fn banner(wizard: &RegistrationWizard<'_>) {
    println!();
    match wizard.step() {
        Step::SelectRole => {
            println!("{} {}", style("◆").cyan(), style("Sign Up").bold());
        }
        step => {
            let role = wizard.role().map(|r| r.label()).unwrap_or("");
            println!(
                "{} {} — step {} of 4: {}",
                style("◆").cyan(),
                style(role).bold(),
                step.number(),
                step.title()
            );
        }
    }
    println!("{}", style("─".repeat(50)).dim());
}

fn select_role(wizard: &mut RegistrationWizard<'_>, theme: &ColorfulTheme) -> Result<()> {
    let items: Vec<String> = Role::all()
        .iter()
        .map(|role| format!("{} — {}", role.label(), style(role.description()).dim()))
        .collect();
    // A role remembered from a previous session preselects its entry
    let default_idx = wizard
        .role()
        .and_then(|current| Role::all().iter().position(|role| *role == current))
        .unwrap_or(0);

    let selection = Select::with_theme(theme)
        .with_prompt("Who are you signing up as?")
        .items(&items)
        .default(default_idx)
        .interact()
        .into_diagnostic()?;

    wizard.select_role(Role::all()[selection])?;
    Ok(())
}

fn enter_details(wizard: &mut RegistrationWizard<'_>, theme: &ColorfulTheme) -> Result<()> {
    let role = match wizard.role() {
        Some(role) => role,
        None => return Ok(()), // unreachable: step 2 requires a role
    };

    for &field in Field::for_role(role) {
        let current = wizard.field(field).unwrap_or("").to_string();
        let value = prompt_field(field, &current, theme)?;
        wizard.set_field(field, &value)?;
    }

    match wizard.next() {
        Ok(()) => Ok(()),
        Err(WizardError::Validation { issues }) => {
            println!();
            for issue in &issues {
                println!("{} {}", style("✗").red(), issue.message);
            }
            println!();
            let choice = Select::with_theme(theme)
                .with_prompt("What next?")
                .items(&["Fix the details", "Back to role selection"])
                .default(0)
                .interact()
                .into_diagnostic()?;
            if choice == 1 {
                wizard.prev()?;
            }
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

fn prompt_field(field: Field, current: &str, theme: &ColorfulTheme) -> Result<String> {
    match field {
        Field::Password => {
            // Re-entry keeps the previous password when left empty
            let entered = Password::with_theme(theme)
                .with_prompt(field.label())
                .allow_empty_password(!current.is_empty())
                .interact()
                .into_diagnostic()?;
            if entered.is_empty() && !current.is_empty() {
                Ok(current.to_string())
            } else {
                Ok(entered)
            }
        }
        Field::Category => prompt_choice(field, CATEGORIES, current, theme),
        Field::Service => prompt_choice(field, SERVICES, current, theme),
        _ => {
            let mut input = Input::with_theme(theme)
                .with_prompt(field.label())
                .allow_empty(true);
            if !current.is_empty() {
                input = input.default(current.to_string());
            }
            input.interact_text().into_diagnostic()
        }
    }
}

fn prompt_choice(
    field: Field,
    options: &[&str],
    current: &str,
    theme: &ColorfulTheme,
) -> Result<String> {
    let default_idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let selection = Select::with_theme(theme)
        .with_prompt(field.label())
        .items(options)
        .default(default_idx)
        .interact()
        .into_diagnostic()?;
    Ok(options[selection].to_string())
}

fn review(wizard: &mut RegistrationWizard<'_>, theme: &ColorfulTheme) -> Result<()> {
    if let Some(role) = wizard.role() {
        println!("  {} {}", style("Role:").bold(), role.label());
        for &field in Field::for_role(role) {
            if field == Field::Password {
                continue;
            }
            println!(
                "  {} {}",
                style(format!("{}:", field.label())).bold(),
                wizard.field(field).unwrap_or("")
            );
        }
    }
    println!();

    let choice = Select::with_theme(theme)
        .with_prompt("Everything correct?")
        .items(&["Next", "Back"])
        .default(0)
        .interact()
        .into_diagnostic()?;
    if choice == 0 {
        wizard.next()?;
    } else {
        wizard.prev()?;
    }
    Ok(())
}

fn choose_plan(
    wizard: &mut RegistrationWizard<'_>,
    client: &ApiClient,
    theme: &ColorfulTheme,
) -> Result<Option<RegisterReceipt>> {
    let items: Vec<String> = SubscriptionPlan::all()
        .iter()
        .map(|plan| {
            format!(
                "{} ({}) — {}",
                plan.label(),
                plan.price(),
                style(plan.features().join(", ")).dim()
            )
        })
        .collect();
    let default_idx = wizard
        .plan()
        .and_then(|current| SubscriptionPlan::all().iter().position(|p| *p == current))
        .unwrap_or(0);

    let selection = Select::with_theme(theme)
        .with_prompt("Choose your plan")
        .items(&items)
        .default(default_idx)
        .interact()
        .into_diagnostic()?;
    wizard.choose_plan(SubscriptionPlan::all()[selection])?;

    let action = Select::with_theme(theme)
        .with_prompt("Ready to submit?")
        .items(&["Submit", "Back"])
        .default(0)
        .interact()
        .into_diagnostic()?;
    if action == 1 {
        wizard.prev()?;
        return Ok(None);
    }

    // The catalog may have been unreachable earlier; retry before submitting
    // so a recovered backend unblocks role resolution.
    if wizard.role_id().is_none() {
        if let Ok(catalog) = fetch_roles(client) {
            wizard.load_catalog(catalog);
        }
    }

    let mut registrar = BackendRegistrar::new(client);
    match wizard.submit(&mut registrar) {
        Ok(receipt) => Ok(Some(receipt)),
        Err(err @ (WizardError::RoleUnresolved | WizardError::SubmissionFailed { .. })) => {
            // Recoverable: stay on the plan step with everything intact
            println!("{} {}", style("✗").red(), err);
            Ok(None)
        }
        Err(other) => Err(other.into()),
    }
}
