//! Sign-in screen

use crate::backend::Credentials;
use crate::controller::{DeskState, Snapshot};

use super::{quit, Action, FieldKind, Form, FormError, FormField, FormValues, MenuItem, Screen};

/// Shown while the login request is in flight
pub const SIGNING_IN: &str = "Signing in...";

const EMAIL: FormField = FormField::new("email", "Email", FieldKind::Email);
const PASSWORD: FormField = FormField::new("password", "Password", FieldKind::Secret);

pub struct LoginForm;

impl Form for LoginForm {
    type Output = Credentials;

    const FIELDS: &'static [FormField] = &[EMAIL, PASSWORD];

    fn parse(values: &FormValues, _snapshot: &Snapshot) -> Result<Credentials, FormError> {
        Ok(Credentials {
            email: values.email(&EMAIL)?,
            password: values.required(&PASSWORD)?,
        })
    }
}

pub(super) fn render(_state: &DeskState) -> Screen {
    Screen {
        title: "Hotel Desk - Worker sign in".to_string(),
        body: "Sign in with your worker account to manage reservations.".to_string(),
        menu: vec![
            MenuItem::new("s", "Sign in", Action::SignIn),
            MenuItem::new("r", "Create a worker account", Action::ShowRegister),
            quit(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_credentials() {
        let mut values = FormValues::new();
        values.set("email", "ana@sol.test").set("password", " secret ");

        let credentials = LoginForm::parse(&values, &Snapshot::default()).unwrap();
        assert_eq!(credentials.email, "ana@sol.test");
        assert_eq!(credentials.password, " secret ");
    }

    #[test]
    fn test_missing_password() {
        let mut values = FormValues::new();
        values.set("email", "ana@sol.test");

        assert_eq!(
            LoginForm::parse(&values, &Snapshot::default()).unwrap_err(),
            FormError::Missing("Password")
        );
    }

    #[test]
    fn test_menu() {
        let screen = render(&DeskState::default());
        assert_eq!(screen.action_for("s"), Some(&Action::SignIn));
        assert_eq!(screen.action_for("r"), Some(&Action::ShowRegister));
        assert_eq!(screen.menu[0].label, "Sign in");
    }
}
