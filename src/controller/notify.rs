//! User-facing alerts and confirmations

/// How the controller talks back to the worker
pub trait Notifier {
    /// Show a message that needs no answer
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, question: &str) -> bool;
}
