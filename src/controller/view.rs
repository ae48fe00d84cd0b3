//! Screen selection

use std::fmt;

/// The five mutually exclusive screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    Dashboard,
    Clients,
    Reservations,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Login,
        View::Register,
        View::Dashboard,
        View::Clients,
        View::Reservations,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            View::Login => "login",
            View::Register => "register",
            View::Dashboard => "dashboard",
            View::Clients => "clients",
            View::Reservations => "reservations",
        }
    }

    /// Parse a view tag. Unknown tags land on the login screen.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "login" => View::Login,
            "register" => View::Register,
            "dashboard" => View::Dashboard,
            "clients" => View::Clients,
            "reservations" => View::Reservations,
            other => {
                tracing::warn!(tag = %other, "Unknown view tag, falling back to login");
                View::Login
            }
        }
    }

    /// Screens that only make sense for a signed-in worker
    pub fn requires_session(&self) -> bool {
        matches!(self, View::Dashboard | View::Clients | View::Reservations)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_tag(view.tag()), view);
        }
    }

    #[test]
    fn test_unknown_tag_falls_back_to_login() {
        assert_eq!(View::from_tag("settings"), View::Login);
        assert_eq!(View::from_tag(""), View::Login);
        assert_eq!(View::from_tag(" Dashboard "), View::Dashboard);
    }

    #[test]
    fn test_initial_view() {
        assert_eq!(View::default(), View::Login);
        assert!(!View::Register.requires_session());
        assert!(View::Clients.requires_session());
    }
}
