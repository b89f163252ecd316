//! Interactive wizard driven by dialoguer prompts

use anyhow::{Result, bail};
use colored::*;
use dialoguer::{Input, MultiSelect, Select};
use is_terminal::IsTerminal;

use super::session::{Outcome, Session};
use crate::catalog::{Day, Service, Shift};
use crate::cli::render;
use crate::wizard::view::ServiceSelector;
use crate::wizard::{CountAnswer, Msg, WizardStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Assign,
    ChangeRoom,
    SaveAll,
    Export,
    Restart,
    Quit,
}

const MENU: [(MenuChoice, &str); 6] = [
    (MenuChoice::Assign, "Asignar servicio a un horario"),
    (MenuChoice::ChangeRoom, "Cambiar de consultorio"),
    (MenuChoice::SaveAll, "Guardar toda la información"),
    (MenuChoice::Export, "Exportar horarios a Excel"),
    (MenuChoice::Restart, "Registrar otra unidad"),
    (MenuChoice::Quit, "Salir"),
];

pub fn handle_wizard(session: &mut Session<'_>) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        bail!("The wizard needs an interactive terminal. Use `infra-cli replay <script.json>` instead.");
    }

    println!("{}\n", "Registro de infraestructura hospitalaria".bold());

    loop {
        select_facility(session)?;
        confirm_room_count(session)?;
        select_services(session)?;

        match schedule_menu(session)? {
            MenuChoice::Restart => {
                session.dispatch(Msg::Reset);
                println!();
            }
            _ => return Ok(()),
        }
    }
}

fn select_facility(session: &mut Session<'_>) -> Result<()> {
    println!("{}", render::step_header(WizardStep::FacilitySelect));

    if session.data().is_empty() {
        bail!("No facilities available in the reference data");
    }
    let regions = session.data().regions();
    if regions.is_empty() {
        bail!("No regions available in the reference data");
    }

    loop {
        let idx = Select::new()
            .with_prompt("Entidad")
            .items(regions)
            .default(0)
            .interact()?;
        session.dispatch(Msg::RegionSelected {
            region: Some(regions[idx].clone()),
        });

        let options = session.view().facility.options;
        if options.is_empty() {
            println!("{}", "No hay unidades registradas en esta entidad".yellow());
            continue;
        }

        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        let idx = Select::new()
            .with_prompt("Unidad (CLUES)")
            .items(&labels)
            .default(0)
            .interact()?;
        session.dispatch(Msg::FacilitySelected {
            facility: Some(options[idx].id.clone()),
        });

        if let Some(summary) = session.view().facility_summary {
            println!("\n{}", render::facility_panel(&summary));
        }
        return Ok(());
    }
}

fn confirm_room_count(session: &mut Session<'_>) -> Result<()> {
    println!("{}", render::step_header(WizardStep::RoomCount));
    print!("{}", render::room_count_panel(&session.view().room_count));

    while !session.state().room_count.saved {
        let idx = Select::new()
            .with_prompt("¿El número de consultorios coincide con la realidad?")
            .items(&[CountAnswer::Matches.label(), CountAnswer::Mismatch.label()])
            .default(0)
            .interact()?;
        let answer = if idx == 0 {
            CountAnswer::Matches
        } else {
            CountAnswer::Mismatch
        };
        session.dispatch(Msg::CountAnswered { answer });

        if session.view().room_count.override_visible {
            let value: u32 = Input::new()
                .with_prompt("Número real de consultorios")
                .interact_text()?;
            session.dispatch(Msg::OverrideEntered { value: Some(value) });
        }

        show(session, Msg::ConfirmRoomCount);
    }
    println!();
    Ok(())
}

fn select_services(session: &mut Session<'_>) -> Result<()> {
    println!("{}", render::step_header(WizardStep::Services));

    let labels: Vec<&str> = Service::ALL.iter().map(Service::label).collect();
    let rooms: Vec<_> = session.state().room_ids().collect();

    for room in rooms {
        let defaults: Vec<bool> = match session.state().room(room) {
            Some(state) => Service::ALL.iter().map(|s| state.services.contains(s)).collect(),
            None => continue,
        };

        let picked = MultiSelect::new()
            .with_prompt(format!("Servicios disponibles en {}", room.label()))
            .items(&labels)
            .defaults(&defaults)
            .interact()?;
        session.dispatch(Msg::RoomServicesChanged {
            room,
            services: picked.into_iter().map(|i| Service::ALL[i]).collect(),
        });
    }

    show(session, Msg::SaveServices);
    println!();
    Ok(())
}

/// Schedule section; returns the choice that left the menu
fn schedule_menu(session: &mut Session<'_>) -> Result<MenuChoice> {
    println!("{}", render::step_header(WizardStep::Schedule));
    let labels: Vec<&str> = MENU.iter().map(|(_, label)| *label).collect();

    loop {
        if let Some(schedule) = session.view().schedule {
            println!("\n{}", render::schedule_panel(&schedule));
        }

        let idx = Select::new()
            .with_prompt("¿Qué desea hacer?")
            .items(&labels)
            .default(0)
            .interact()?;

        match MENU[idx].0 {
            MenuChoice::Assign => assign_slot(session)?,
            MenuChoice::ChangeRoom => change_room(session)?,
            MenuChoice::SaveAll => {
                show(session, Msg::SaveAll);
            }
            MenuChoice::Export => {
                if let Outcome::Nothing = show(session, Msg::Export) {
                    println!("{}", "No hay horarios asignados para exportar".yellow());
                }
            }
            choice @ (MenuChoice::Restart | MenuChoice::Quit) => return Ok(choice),
        }
    }
}

fn assign_slot(session: &mut Session<'_>) -> Result<()> {
    let days: Vec<&str> = Day::ALL.iter().map(Day::label).collect();
    let idx = Select::new().with_prompt("Día").items(&days).default(0).interact()?;
    session.dispatch(Msg::DaySelected {
        day: Some(Day::ALL[idx]),
    });

    let shifts: Vec<&str> = Shift::ALL.iter().map(Shift::label).collect();
    let idx = Select::new().with_prompt("Turno").items(&shifts).default(0).interact()?;
    session.dispatch(Msg::ShiftSelected {
        shift: Some(Shift::ALL[idx]),
    });

    let Some(schedule) = session.view().schedule else {
        return Ok(());
    };
    let services = match schedule.service_selector {
        ServiceSelector::Options(services) => services,
        ServiceSelector::NoServices => {
            println!("{}", ServiceSelector::EMPTY_MESSAGE.yellow());
            return Ok(());
        }
        ServiceSelector::Hidden => return Ok(()),
    };

    let items: Vec<&str> = services.iter().map(Service::label).collect();
    let idx = Select::new().with_prompt("Servicio").items(&items).default(0).interact()?;
    session.dispatch(Msg::ServiceSelected {
        service: Some(services[idx]),
    });
    session.dispatch(Msg::AssignService);
    Ok(())
}

fn change_room(session: &mut Session<'_>) -> Result<()> {
    let rooms: Vec<_> = session.state().room_ids().collect();
    let labels: Vec<String> = rooms.iter().map(|r| r.label()).collect();
    let current = rooms
        .iter()
        .position(|r| *r == session.state().schedule.active_room)
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt("Consultorio")
        .items(&labels)
        .default(current)
        .interact()?;
    session.dispatch(Msg::ScheduleRoomSelected { room: rooms[idx] });
    Ok(())
}

/// Dispatch, print the outcome and clear the banner it raised
fn show(session: &mut Session<'_>, msg: Msg) -> Outcome {
    let outcome = session.dispatch(msg);
    outcome.print();
    if let Outcome::Notified(_) = outcome {
        session.dispatch(Msg::DismissNotification);
    }
    outcome
}
