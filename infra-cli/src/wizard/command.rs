use super::logic::export::ExportRequest;
use super::types::Notification;

/// Side effect requested by [`super::WizardApp::update`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    None,
    /// Show a banner
    Notify(Notification),
    /// Serialize and save the schedules
    Export(ExportRequest),
}

impl Command {
    #[cfg(test)]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
