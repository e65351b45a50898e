//! # Menu Module
//!
//! The interactive control panel.
//!
//! One command is read, fully handled, then the menu is shown again.
//! Option 6 asks a follow-up question and waits for its answer before the
//! loop resumes. Option 0 or end of input leaves the loop.

use crate::cli::{CliError, MAIN_STREET_CAMERAS, MAIN_STREET_LAMPS, MAIN_STREET_SOLAR_PANELS};
use smartcity_core::{
    AccessGuard, EnergyHandle, EnergySystem, LightingSystem, RegistryCell, RegistryHandle, Role,
    SmartStreetBuilder, StreetDescriptor, SubsystemKind, TransportSystem,
};
use std::io::{BufRead, Write};
use std::rc::Rc;

const RULE_WIDTH: usize = 56;

/// Whether the loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Panel state: the registry, the energy grid behind its guard, and the
/// prebuilt main street.
#[derive(Debug)]
pub struct ControlPanel {
    registry: RegistryHandle,
    energy: EnergyHandle,
    main_street: StreetDescriptor,
}

impl ControlPanel {
    /// Wire the three city subsystems into the registry held by `cell`.
    ///
    /// Energy is registered behind an `AccessGuard` for `role`.
    pub fn new(cell: &RegistryCell, role: Role) -> Self {
        let registry = cell.get_instance();
        let energy = EnergySystem::shared();

        {
            let mut registry = registry.borrow_mut();
            registry.register(SubsystemKind::Lighting.as_str(), LightingSystem::new());
            registry.register(SubsystemKind::Transport.as_str(), TransportSystem::new());
            registry.register(
                SubsystemKind::Energy.as_str(),
                AccessGuard::wrap(Rc::clone(&energy), role.clone()),
            );
        }
        tracing::debug!(%role, "control panel ready");

        let main_street = SmartStreetBuilder::new()
            .add_lamps(MAIN_STREET_LAMPS)
            .add_cameras(MAIN_STREET_CAMERAS)
            .add_solar_panels(MAIN_STREET_SOLAR_PANELS)
            .build();

        Self {
            registry,
            energy,
            main_street,
        }
    }

    pub fn registry(&self) -> &RegistryHandle {
        &self.registry
    }

    /// Read commands from `input` until exit.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<(), CliError> {
        writeln!(out, "SmartCity system started!")?;

        loop {
            show_menu(out)?;
            let Some(choice) = read_line(&mut input)? else {
                tracing::debug!("input closed, leaving menu");
                writeln!(out)?;
                return Ok(());
            };
            if self.handle_choice(choice.trim(), &mut input, out)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Handle one menu selection.
    pub fn handle_choice<R: BufRead, W: Write>(
        &mut self,
        choice: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, CliError> {
        match choice {
            "1" => {
                if let Some(notice) = self.registry.borrow_mut().turn_on_all_lights() {
                    writeln!(out, "{notice}")?;
                }
            }
            "2" => {
                if let Some(notice) = self.registry.borrow_mut().emergency_stop_traffic() {
                    writeln!(out, "{notice}")?;
                }
            }
            "3" => {
                writeln!(out, "\n{}", self.registry.borrow().energy_report())?;
            }
            "4" => {
                self.registry.borrow_mut().register(
                    SubsystemKind::Energy.as_str(),
                    AccessGuard::wrap(Rc::clone(&self.energy), Role::admin()),
                );
                tracing::info!("energy subsystem re-wrapped for admin");
                writeln!(
                    out,
                    "\n→ ADMIN mode enabled! You can now change the energy mode with option 6."
                )?;
            }
            "5" => {
                writeln!(out, "\nMain street status:")?;
                writeln!(out, "{}", self.main_street.info())?;
            }
            "6" => {
                write!(out, "New mode (eco / normal / max): ")?;
                out.flush()?;
                let mode = read_line(input)?.unwrap_or_default();
                self.change_mode(&mode.trim().to_lowercase(), out)?;
            }
            "0" => {
                writeln!(out, "\nSmartCity system shut down. Goodbye!")?;
                return Ok(Flow::Exit);
            }
            _ => {
                writeln!(out, "\nInvalid choice. Please choose between 0 and 6.")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn change_mode<W: Write>(&mut self, mode: &str, out: &mut W) -> Result<(), CliError> {
        match self.registry.borrow_mut().set_energy_mode(mode) {
            Some(Ok(mode)) => writeln!(out, "→ Energy mode changed to \"{mode}\"")?,
            Some(Err(rejected)) => writeln!(out, "{rejected}")?,
            None => {}
        }
        Ok(())
    }
}

fn show_menu<W: Write>(out: &mut W) -> Result<(), CliError> {
    let heavy = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{heavy}")?;
    writeln!(out, "              SMART CITY CONTROL PANEL")?;
    writeln!(out, "{heavy}")?;
    writeln!(out, "  1  →  Turn on all lights")?;
    writeln!(out, "  2  →  Emergency traffic stop")?;
    writeln!(out, "  3  →  View energy report")?;
    writeln!(out, "  4  →  Switch to admin mode")?;
    writeln!(out, "  5  →  Main street info")?;
    writeln!(out, "  6  →  Change energy mode (eco / normal / max)")?;
    writeln!(out, "  0  →  Exit")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    write!(out, "Your choice (0-6): ")?;
    out.flush()?;
    Ok(())
}

/// Next line from `input`, or `None` at end of input.
///
/// Bytes that are not UTF-8 are replaced, so a garbled line is treated as
/// an unrecognized choice instead of ending the panel.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, CliError> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn choose(panel: &mut ControlPanel, choice: &str, follow_up: &str) -> (Flow, String) {
        let mut input = Cursor::new(follow_up.as_bytes().to_vec());
        let mut out = Vec::new();
        let flow = panel
            .handle_choice(choice, &mut input, &mut out)
            .unwrap_or(Flow::Exit);
        (flow, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn new_panel_registers_all_subsystems() {
        let cell = RegistryCell::new();
        let panel = ControlPanel::new(&cell, Role::guest());

        let names: Vec<String> = panel
            .registry()
            .borrow()
            .names()
            .map(str::to_string)
            .collect();
        assert_eq!(names, vec!["energy", "lighting", "transport"]);
        assert!(Rc::ptr_eq(panel.registry(), &cell.get_instance()));
    }

    #[test]
    fn admin_switch_preserves_grid_state() {
        let cell = RegistryCell::new();
        let mut panel = ControlPanel::new(&cell, Role::admin());

        choose(&mut panel, "6", "max\n");
        let (_, out) = choose(&mut panel, "4", "");
        assert!(out.contains("ADMIN mode enabled"));

        let (_, report) = choose(&mut panel, "3", "");
        assert!(report.contains("450"));
    }

    #[test]
    fn zero_exits() {
        let cell = RegistryCell::new();
        let mut panel = ControlPanel::new(&cell, Role::guest());
        let (flow, out) = choose(&mut panel, "0", "");
        assert_eq!(flow, Flow::Exit);
        assert!(out.contains("Goodbye"));
    }

    #[test]
    fn missing_mode_answer_is_rejected() {
        let cell = RegistryCell::new();
        let mut panel = ControlPanel::new(&cell, Role::admin());
        let (flow, out) = choose(&mut panel, "6", "");
        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("mode does not exist"));
    }
}
