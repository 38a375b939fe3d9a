use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
    path::PathBuf,
    rc::Rc,
};

use anyhow::{Result, bail};
use clap::Args;
use rpassword::prompt_password;
use shared::{
    auth::{SessionHub, SessionObserver},
    config::ClientConfig,
    login::{LoginController, LoginState, Navigator, Screen},
};
use tracing::{debug, info};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Configuration file (yaml or json)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Email address; prompted for when omitted
    #[arg(long, short)]
    pub email: Option<String>,

    /// Read the password from the next line of stdin instead of the terminal
    #[arg(long)]
    pub password_stdin: bool,

    /// Skip signing in and browse the directory as a guest
    #[arg(long, conflicts_with_all = ["email", "password_stdin"])]
    pub guest: bool,
}

/// Records where the login flow sent the user.
#[derive(Debug, Default)]
struct TerminalNavigator {
    visited: RefCell<Vec<Screen>>,
}

impl TerminalNavigator {
    fn current(&self) -> Option<Screen> {
        self.visited.borrow().last().copied()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, screen: Screen) {
        debug!(%screen, "navigate");
        self.visited.borrow_mut().push(screen);
    }

    fn reset_to(&self, screen: Screen) {
        debug!(%screen, "reset");
        let mut visited = self.visited.borrow_mut();
        visited.clear();
        visited.push(screen);
    }
}

pub async fn login(args: LoginArgs) -> Result<()> {
    if args.guest {
        crate::init_tracing(&ClientConfig::with_defaults().log_level);
        let navigator = TerminalNavigator::default();
        navigator.navigate(Screen::Directory);
        print_destination(&navigator);
        println!("Browsing as guest.");
        return Ok(());
    }

    let config = ClientConfig::load_config(args.config.as_deref())?;
    crate::init_tracing(&config.log_level);

    let client = config.auth_client()?;
    let navigator = Rc::new(TerminalNavigator::default());
    let sessions = Rc::new(SessionHub::new());
    sessions.subscribe(Rc::new(SessionObserver::new(Rc::clone(&navigator))));

    let controller = LoginController::new(client, Rc::clone(&navigator), Rc::clone(&sessions));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let email = match args.email {
        Some(email) => email,
        None => prompt(&mut input, "Email: ")?,
    };
    let password = if args.password_stdin {
        read_line(&mut input)?
    } else {
        prompt_password("Password: ")?
    };
    drop(input);

    controller.set_email(email);
    controller.set_password(password);

    match controller.submit().await {
        LoginState::Navigated => {
            let email = sessions
                .current_session()
                .and_then(|session| session.email().map(ToString::to_string))
                .unwrap_or_else(|| "unknown user".to_string());
            info!(%email, "signed in");
            println!("Signed in as {email}.");
            print_destination(&navigator);
            Ok(())
        }
        LoginState::IdleWithError(message) => bail!(message),
        state => bail!("sign-in did not complete ({state:?})"),
    }
}

fn print_destination(navigator: &TerminalNavigator) {
    if let Some(screen) = navigator.current() {
        println!("Now on: {screen}");
    }
}

fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().ok();
    read_line(input)
}

/// Reads one line, dropping only the line terminator.
fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_line_keeps_inner_whitespace() {
        let mut input = io::Cursor::new("  user@example.com \r\nsecret\n");
        assert_eq!(read_line(&mut input).unwrap(), "  user@example.com ");
        assert_eq!(read_line(&mut input).unwrap(), "secret");
        assert_eq!(read_line(&mut input).unwrap(), "");
    }

    #[test]
    fn test_terminal_navigator_reset_replaces_history() {
        let navigator = TerminalNavigator::default();
        navigator.navigate(Screen::SignUp);
        navigator.navigate(Screen::Login);
        navigator.reset_to(Screen::Directory);
        assert_eq!(*navigator.visited.borrow(), vec![Screen::Directory]);
        assert_eq!(navigator.current(), Some(Screen::Directory));
    }
}
