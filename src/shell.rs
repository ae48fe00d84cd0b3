//! Interactive Terminal Shell
//!
//! Drives a [`ViewController`] from a line-oriented terminal: render the
//! current screen, read a menu key, collect form fields on submit, dispatch.
//!
//! The [`Terminal`] doubles as the controller's [`Notifier`], so alerts and
//! confirmations share the same input and output streams as the menus.

use std::io::{self, BufRead, Write};

use crate::backend::Backend;
use crate::controller::{DeskError, Notifier, View, ViewController};
use crate::screens::{
    self, choices, Action, ClientForm, FieldKind, Form, FormValues, LoginForm, RegisterForm,
    ReservationForm, REGISTERING, SIGNING_IN,
};
use crate::session::TokenStore;

/// Line-based input and output
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    /// Show `label` and read one line. `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Notifier for Terminal<R, W> {
    fn alert(&mut self, message: &str) {
        if let Err(e) = self.print(&format!("\n>> {}\n\n", message)) {
            tracing::warn!(error = %e, "Failed to show alert");
        }
    }

    fn confirm(&mut self, question: &str) -> bool {
        match self.prompt(&format!("{} [y/N] ", question)) {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

/// The interactive desk
pub struct Shell<B, S, R, W> {
    controller: ViewController<B, S, Terminal<R, W>>,
}

impl<B, S, R, W> Shell<B, S, R, W>
where
    B: Backend,
    S: TokenStore,
    R: BufRead,
    W: Write,
{
    pub fn new(backend: B, store: S, terminal: Terminal<R, W>) -> Self {
        Self {
            controller: ViewController::new(backend, store, terminal),
        }
    }

    pub fn controller(&self) -> &ViewController<B, S, Terminal<R, W>> {
        &self.controller
    }

    fn terminal(&mut self) -> &mut Terminal<R, W> {
        self.controller.notifier_mut()
    }

    /// Run until the worker quits or input ends
    pub async fn run(&mut self) -> io::Result<()> {
        if self.controller.restore_session().await {
            tracing::debug!("Resumed stored session");
        }

        loop {
            let screen = screens::render(self.controller.state());
            self.terminal().print(&format!("\n{}", screen.to_text()))?;

            let Some(key) = self.terminal().prompt("> ")? else {
                break;
            };
            if key.trim().is_empty() {
                continue;
            }

            match screen.action_for(&key).cloned() {
                Some(Action::Quit) => break,
                Some(action) => self.dispatch(action).await?,
                None => self
                    .terminal()
                    .alert(&format!("Unknown option '{}'", key.trim())),
            }
        }

        tracing::debug!("Desk closed");
        Ok(())
    }

    async fn dispatch(&mut self, action: Action) -> io::Result<()> {
        tracing::debug!(action = ?action, view = %self.controller.view(), "Dispatching");

        match action {
            Action::SignIn => {
                if let Some(credentials) = self.collect::<LoginForm>()? {
                    self.terminal().print(&format!("{}\n", SIGNING_IN))?;
                    settle(
                        self.controller
                            .login(&credentials.email, &credentials.password)
                            .await,
                    );
                }
            }
            Action::SubmitRegistration => {
                if let Some(registration) = self.collect::<RegisterForm>()? {
                    self.terminal().print(&format!("{}\n", REGISTERING))?;
                    settle(self.controller.register(&registration).await);
                }
            }
            Action::SubmitClient => {
                if let Some(client) = self.collect::<ClientForm>()? {
                    settle(self.controller.create_client(&client).await);
                }
            }
            Action::SubmitReservation => {
                if let Some(reservation) = self.collect::<ReservationForm>()? {
                    settle(self.controller.create_reservation(&reservation).await);
                }
            }
            Action::CancelReservation(id) => {
                settle(self.controller.cancel_reservation(&id).await);
            }
            Action::Refresh => {
                let report = self.controller.refresh_dashboard().await;
                tracing::debug!(updated = report.updated(), "Manual refresh");
            }
            Action::ShowLogin => {
                self.controller.navigate(View::Login);
            }
            Action::ShowRegister => {
                self.controller.navigate(View::Register);
            }
            Action::ShowDashboard => {
                self.controller.navigate(View::Dashboard);
            }
            Action::ShowClients => {
                self.controller.navigate(View::Clients);
            }
            Action::ShowReservations => {
                self.controller.navigate(View::Reservations);
            }
            Action::Logout => self.controller.logout(),
            Action::Quit => {}
        }
        Ok(())
    }

    /// Prompt for every field of `F` and parse the answers.
    ///
    /// Returns `None` when input ends, a selector has nothing to offer, or
    /// the answers fail the form checks (the reason is shown as an alert).
    fn collect<F: Form>(&mut self) -> io::Result<Option<F::Output>> {
        let mut values = FormValues::new();

        for field in F::FIELDS {
            let options = choices(field.kind, self.controller.snapshot());
            let is_select = matches!(field.kind, FieldKind::ClientSelect | FieldKind::RoomSelect);

            if is_select {
                if options.is_empty() {
                    self.terminal()
                        .alert(&format!("No {} available to choose from", field.label.to_lowercase()));
                    return Ok(None);
                }
                let mut listing = format!("{}:\n", field.label);
                for (i, choice) in options.iter().enumerate() {
                    listing.push_str(&format!("  {}. {}\n", i + 1, choice.label));
                }
                self.terminal().print(&listing)?;
            }

            let label = match field.kind {
                FieldKind::Date => format!("{} (YYYY-MM-DD): ", field.label),
                FieldKind::ClientSelect | FieldKind::RoomSelect => {
                    format!("{} [1-{}]: ", field.label, options.len())
                }
                _ => format!("{}: ", field.label),
            };
            let Some(answer) = self.terminal().prompt(&label)? else {
                return Ok(None);
            };

            // Selectors accept a list position or the raw id
            let value = answer
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| options.get(i))
                .filter(|_| is_select)
                .map(|choice| choice.value.clone())
                .unwrap_or(answer);
            values.set(field.name, value);
        }

        match F::parse(&values, self.controller.snapshot()) {
            Ok(output) => Ok(Some(output)),
            Err(e) => {
                tracing::debug!(error = %e, "Form rejected");
                self.terminal().alert(&e.to_string());
                Ok(None)
            }
        }
    }
}

/// Controller failures were already shown to the worker
fn settle<T>(result: Result<T, DeskError>) {
    if let Err(e) = result {
        tracing::debug!(error = %e, "Action did not complete");
    }
}
