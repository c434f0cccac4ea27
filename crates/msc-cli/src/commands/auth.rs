use super::AppContext;
use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use msc_core::user::RegisterForm;
use std::io::{BufRead, IsTerminal, Write};
use std::time::Duration;

const LOGOUT_GRACE: Duration = Duration::from_secs(5);

/// What a key press does to a hidden input line.
#[derive(Debug, PartialEq, Eq)]
enum SecretInput {
    Continue,
    Done,
    Cancelled,
}

fn apply_key(secret: &mut String, key: KeyEvent) -> SecretInput {
    if key.kind == KeyEventKind::Release {
        return SecretInput::Continue;
    }
    match key.code {
        KeyCode::Enter => SecretInput::Done,
        KeyCode::Esc => SecretInput::Cancelled,
        KeyCode::Char('c') | KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            SecretInput::Cancelled
        }
        KeyCode::Backspace => {
            secret.pop();
            SecretInput::Continue
        }
        KeyCode::Char(c) => {
            secret.push(c);
            SecretInput::Continue
        }
        _ => SecretInput::Continue,
    }
}

fn read_hidden() -> Result<String> {
    let mut secret = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            match apply_key(&mut secret, key) {
                SecretInput::Continue => {}
                SecretInput::Done => return Ok(secret),
                SecretInput::Cancelled => bail!("Cancelled"),
            }
        }
    }
}

/// Reads a line without echo when stdin is a terminal.
fn read_secret(prompt: &str) -> Result<String> {
    eprint!("{}", prompt);
    std::io::stderr().flush()?;

    if !std::io::stdin().is_terminal() {
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }

    terminal::enable_raw_mode().context("Failed to disable terminal echo")?;
    let secret = read_hidden();
    terminal::disable_raw_mode()?;
    eprintln!();
    secret
}

pub async fn login(ctx: &AppContext, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_secret("Password: ")?,
    };

    let outcome = ctx.session.login(email, &password).await;
    if !outcome.success {
        bail!(outcome.message.unwrap_or_default());
    }

    if let Some(user) = ctx.session.identity() {
        println!("Logged in as {} <{}>", user.full_name, user.email);
    }
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    if let Some(notification) = ctx.session.logout() {
        // Give the backend a moment before the runtime shuts down.
        if tokio::time::timeout(LOGOUT_GRACE, notification).await.is_err() {
            tracing::debug!("[cli] Backend logout still pending at exit");
        }
    }
    println!("Logged out");
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    ctx.session.restore().await;
    match ctx.session.snapshot().confirmed_identity() {
        Some(user) => println!("{} <{}> (id {})", user.full_name, user.email, user.id),
        None => println!("Not logged in"),
    }
    Ok(())
}

pub async fn refresh(ctx: &AppContext) -> Result<()> {
    ctx.session.restore().await;
    if !ctx.session.is_authenticated() {
        bail!("Not logged in");
    }
    ctx.session.refresh_user().await;
    if let Some(user) = ctx.session.identity() {
        println!("{} <{}>", user.full_name, user.email);
    }
    Ok(())
}

pub async fn register(ctx: &AppContext, name: String, email: String, phone: String) -> Result<()> {
    let password = read_secret("Password: ")?;
    let confirm_password = read_secret("Confirm password: ")?;

    let outcome = ctx
        .session
        .register(RegisterForm {
            full_name: name,
            email,
            phone,
            password,
            confirm_password,
        })
        .await;

    if !outcome.success {
        bail!(outcome.message.unwrap_or_default());
    }
    if let Some(message) = outcome.message {
        println!("{}", message);
    }
    if let Some(account) = outcome.account {
        println!("Account created for {}. Log in with `msc login {}`.", account.email, account.email);
    }
    Ok(())
}
