//! Runtime around the wizard reducer
//!
//! Owns the session state, feeds messages to [`WizardApp::update`] and
//! carries out the returned commands. Export failures are logged and
//! otherwise silent; the session goes on unchanged.

use std::path::PathBuf;

use chrono::Local;
use colored::*;

use crate::cli::render;
use crate::reference::ReferenceData;
use crate::wizard::logic::save_export;
use crate::wizard::{Command, Msg, Notification, State, WizardApp, WizardView};

/// Result of executing the command of one message
#[derive(Debug)]
pub enum Outcome {
    Nothing,
    Notified(Notification),
    Exported(PathBuf),
    /// Export aborted; the error went to the log only
    ExportFailed,
}

impl Outcome {
    pub fn print(&self) {
        match self {
            // Export failures were already logged
            Self::Nothing | Self::ExportFailed => {}
            Self::Notified(n) => println!("{}", render::notification(*n)),
            Self::Exported(path) => println!(
                "{} {}",
                "Archivo exportado:".green().bold(),
                path.display().to_string().cyan()
            ),
        }
    }
}

pub struct Session<'a> {
    state: State,
    data: &'a ReferenceData,
    export_dir: PathBuf,
}

impl<'a> Session<'a> {
    pub fn new(data: &'a ReferenceData, rooms: u8, export_dir: PathBuf) -> Self {
        Self {
            state: WizardApp::init(rooms),
            data,
            export_dir,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn data(&self) -> &'a ReferenceData {
        self.data
    }

    pub fn view(&self) -> WizardView {
        WizardView::build(&self.state, self.data)
    }

    /// Apply one message and execute its command
    pub fn dispatch(&mut self, msg: Msg) -> Outcome {
        let command = WizardApp::update(&mut self.state, self.data, msg);
        self.execute(command)
    }

    fn execute(&self, command: Command) -> Outcome {
        match command {
            Command::None => Outcome::Nothing,
            Command::Notify(notification) => Outcome::Notified(notification),
            Command::Export(request) => {
                match save_export(&request, &self.export_dir, Local::now()) {
                    Ok(path) => Outcome::Exported(path),
                    Err(err) => {
                        log::error!("Export failed: {:#}", err);
                        Outcome::ExportFailed
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Day, RoomId, Service, Shift};
    use crate::wizard::CountAnswer;

    fn scripted() -> Vec<Msg> {
        vec![
            Msg::RegionSelected {
                region: Some("Aguascalientes".to_string()),
            },
            Msg::FacilitySelected {
                facility: Some("01ABC123".to_string()),
            },
            Msg::CountAnswered {
                answer: CountAnswer::Matches,
            },
            Msg::ConfirmRoomCount,
            Msg::RoomServicesChanged {
                room: RoomId::FIRST,
                services: vec![Service::MedicinaGeneral],
            },
            Msg::SaveServices,
            Msg::DaySelected {
                day: Some(Day::Lunes),
            },
            Msg::ShiftSelected {
                shift: Some(Shift::Matutino),
            },
            Msg::ServiceSelected {
                service: Some(Service::MedicinaGeneral),
            },
            Msg::AssignService,
        ]
    }

    #[test]
    fn test_notifications_are_surfaced() {
        let data = ReferenceData::fixture("test");
        let dir = tempfile::TempDir::new().unwrap();
        let mut session = Session::new(&data, 2, dir.path().to_path_buf());

        let outcomes: Vec<Outcome> = scripted()
            .into_iter()
            .take(4)
            .map(|msg| session.dispatch(msg))
            .collect();
        assert!(matches!(
            outcomes[3],
            Outcome::Notified(Notification::RoomCountSaved)
        ));
    }

    #[test]
    fn test_export_writes_file() {
        let data = ReferenceData::fixture("test");
        let dir = tempfile::TempDir::new().unwrap();
        let mut session = Session::new(&data, 2, dir.path().to_path_buf());
        for msg in scripted() {
            session.dispatch(msg);
        }

        match session.dispatch(Msg::Export) {
            Outcome::Exported(path) => {
                assert!(path.starts_with(dir.path()));
                assert!(path.exists());
            }
            other => panic!("expected export, got {:?}", other),
        }
    }

    #[test]
    fn test_export_failure_keeps_session() {
        let data = ReferenceData::fixture("test");
        let dir = tempfile::TempDir::new().unwrap();
        // A regular file where the export directory should be
        let blocker = dir.path().join("ocupado");
        std::fs::write(&blocker, b"x").unwrap();

        let mut session = Session::new(&data, 2, blocker);
        for msg in scripted() {
            session.dispatch(msg);
        }
        let before = session.state().clone();

        assert!(matches!(
            session.dispatch(Msg::Export),
            Outcome::ExportFailed
        ));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_empty_export_does_nothing() {
        let data = ReferenceData::fixture("test");
        let dir = tempfile::TempDir::new().unwrap();
        let mut session = Session::new(&data, 2, dir.path().to_path_buf());
        for msg in scripted().into_iter().take(6) {
            session.dispatch(msg);
        }

        assert!(matches!(session.dispatch(Msg::Export), Outcome::Nothing));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
