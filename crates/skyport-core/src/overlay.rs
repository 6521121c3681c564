//! Station overlay state machine.
//!
//! Each station is in exactly one [`StationPhase`]. At most one station is
//! `Active` at a time; while one is, flight controls are disabled.
//!
//! ```text
//!   Armed --(proximity enter)--> Active --(close)--> Dismissed
//!     ^                            |                    |
//!     +------(proximity None)------+                    |
//!     +---------------(proximity exit)------------------+
//! ```
//!
//! Explicit selection activates any station regardless of proximity and
//! re-arms every dismissed station.

use serde::{Deserialize, Serialize};

use crate::station::{self, CycleDirection, Station, StationId, UnknownStation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationPhase {
    /// Will open when the ship flies into range.
    Armed,
    /// Overlay is showing this station.
    Active,
    /// Closed by the pilot; stays closed until the ship leaves its range.
    Dismissed,
}

/// Emitted when the active station changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionChange {
    pub previous: Option<StationId>,
    pub current: Option<StationId>,
}

#[derive(Debug, Clone)]
pub struct OverlayController {
    stations: Vec<Station>,
    phases: Vec<StationPhase>,
    active: Option<usize>,
    destination: Option<StationId>,
}

impl OverlayController {
    pub fn new(stations: Vec<Station>) -> Self {
        let phases = vec![StationPhase::Armed; stations.len()];
        Self {
            stations,
            phases,
            active: None,
            destination: None,
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn active(&self) -> Option<&StationId> {
        self.active.map(|i| &self.stations[i].id)
    }

    pub fn destination(&self) -> Option<&StationId> {
        self.destination.as_ref()
    }

    pub fn phase(&self, id: &StationId) -> Option<StationPhase> {
        self.index_of(id).map(|i| self.phases[i])
    }

    /// Ids currently dismissed, in station order.
    pub fn dismissed(&self) -> impl Iterator<Item = &StationId> {
        self.stations
            .iter()
            .zip(&self.phases)
            .filter(|(_, phase)| **phase == StationPhase::Dismissed)
            .map(|(station, _)| &station.id)
    }

    /// Flight controls are enabled iff no station is active.
    pub fn controls_enabled(&self) -> bool {
        self.active.is_none()
    }

    /// Feeds one proximity reading.
    pub fn on_proximity(&mut self, nearby: Option<&StationId>) -> Option<SectionChange> {
        let nearby = nearby.and_then(|id| self.index_of(id));

        for (i, phase) in self.phases.iter_mut().enumerate() {
            if *phase == StationPhase::Dismissed && Some(i) != nearby {
                *phase = StationPhase::Armed;
            }
        }

        match nearby {
            None => self.set_active(None),
            Some(i) => {
                if self.active.is_some() || self.phases[i] != StationPhase::Armed {
                    return None;
                }
                self.set_active(Some(i))
            }
        }
    }

    /// Closes the active overlay, marking its station dismissed.
    pub fn close(&mut self) -> Option<SectionChange> {
        let index = self.active?;
        let previous = self.stations[index].id.clone();
        self.phases[index] = StationPhase::Dismissed;
        self.active = None;
        Some(SectionChange {
            previous: Some(previous),
            current: None,
        })
    }

    /// Opens `id` explicitly and makes it the destination.
    pub fn select(&mut self, id: &StationId) -> Result<Option<SectionChange>, UnknownStation> {
        let index = self
            .index_of(id)
            .ok_or_else(|| UnknownStation(id.clone()))?;

        for phase in &mut self.phases {
            if *phase == StationPhase::Dismissed {
                *phase = StationPhase::Armed;
            }
        }
        self.destination = Some(id.clone());
        Ok(self.set_active(Some(index)))
    }

    /// Moves the open overlay to the neighbouring station.
    ///
    /// Does nothing when no overlay is open.
    pub fn cycle(&mut self, direction: CycleDirection) -> Option<SectionChange> {
        let current = self.active()?.clone();
        let next = station::cycle(&self.stations, &current, direction)?.clone();
        self.select(&next).ok().flatten()
    }

    /// Sets or clears the HUD destination without opening anything.
    pub fn set_destination(&mut self, id: Option<&StationId>) -> Result<(), UnknownStation> {
        match id {
            None => self.destination = None,
            Some(id) => {
                if self.index_of(id).is_none() {
                    return Err(UnknownStation(id.clone()));
                }
                self.destination = Some(id.clone());
            }
        }
        Ok(())
    }

    fn index_of(&self, id: &StationId) -> Option<usize> {
        self.stations.iter().position(|s| &s.id == id)
    }

    fn set_active(&mut self, index: Option<usize>) -> Option<SectionChange> {
        if self.active == index {
            return None;
        }
        let previous = self.active.map(|i| {
            self.phases[i] = StationPhase::Armed;
            self.stations[i].id.clone()
        });
        if let Some(i) = index {
            self.phases[i] = StationPhase::Active;
        }
        self.active = index;
        Some(SectionChange {
            previous,
            current: index.map(|i| self.stations[i].id.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    fn controller() -> OverlayController {
        OverlayController::new(vec![
            Station::new("about", Vec3::new(0.0, 2.0, 0.0)),
            Station::new("projects", Vec3::new(70.0, 2.0, 55.0)),
            Station::new("contact", Vec3::new(65.0, 2.0, -65.0)),
        ])
    }

    fn id(s: &str) -> StationId {
        StationId::from(s)
    }

    #[test]
    fn test_proximity_opens_armed_station() {
        let mut overlay = controller();
        let change = overlay.on_proximity(Some(&id("about")));
        assert_eq!(
            change,
            Some(SectionChange {
                previous: None,
                current: Some(id("about")),
            })
        );
        assert!(!overlay.controls_enabled());
        assert_eq!(overlay.phase(&id("about")), Some(StationPhase::Active));

        // Same reading again is not a change.
        assert_eq!(overlay.on_proximity(Some(&id("about"))), None);
    }

    #[test]
    fn test_dismissed_stays_closed_while_inside() {
        let mut overlay = controller();
        overlay.on_proximity(Some(&id("about")));
        let change = overlay.close();
        assert_eq!(change.and_then(|c| c.previous), Some(id("about")));
        assert!(overlay.controls_enabled());

        for _ in 0..10 {
            assert_eq!(overlay.on_proximity(Some(&id("about"))), None);
            assert_eq!(overlay.phase(&id("about")), Some(StationPhase::Dismissed));
            assert_eq!(overlay.active(), None);
        }
    }

    #[test]
    fn test_dismissed_rearmed_after_leaving() {
        let mut overlay = controller();
        overlay.on_proximity(Some(&id("about")));
        overlay.close();

        assert_eq!(overlay.on_proximity(None), None);
        assert_eq!(overlay.phase(&id("about")), Some(StationPhase::Armed));

        let change = overlay.on_proximity(Some(&id("about")));
        assert_eq!(change.and_then(|c| c.current), Some(id("about")));
    }

    #[test]
    fn test_moving_to_another_station_rearms_dismissed() {
        let mut overlay = controller();
        overlay.on_proximity(Some(&id("about")));
        overlay.close();

        let change = overlay.on_proximity(Some(&id("projects")));
        assert_eq!(change.and_then(|c| c.current), Some(id("projects")));
        assert_eq!(overlay.phase(&id("about")), Some(StationPhase::Armed));
    }

    #[test]
    fn test_select_overrides_dismissal_and_sets_destination() {
        let mut overlay = controller();
        overlay.on_proximity(Some(&id("about")));
        overlay.close();

        let change = overlay.select(&id("contact")).unwrap();
        assert_eq!(
            change,
            Some(SectionChange {
                previous: None,
                current: Some(id("contact")),
            })
        );
        assert_eq!(overlay.destination(), Some(&id("contact")));
        assert_eq!(overlay.dismissed().count(), 0);

        assert_eq!(overlay.select(&id("contact")).unwrap(), None);
        assert!(overlay.select(&id("nowhere")).is_err());
    }

    #[test]
    fn test_cycle_wraps_and_requires_open_overlay() {
        let mut overlay = controller();
        assert_eq!(overlay.cycle(CycleDirection::Next), None);

        overlay.select(&id("contact")).unwrap();
        let change = overlay.cycle(CycleDirection::Next).unwrap();
        assert_eq!(change.previous, Some(id("contact")));
        assert_eq!(change.current, Some(id("about")));
        assert_eq!(overlay.phase(&id("contact")), Some(StationPhase::Armed));

        let change = overlay.cycle(CycleDirection::Previous).unwrap();
        assert_eq!(change.current, Some(id("contact")));
    }

    #[test]
    fn test_at_most_one_active() {
        let mut overlay = controller();
        overlay.select(&id("about")).unwrap();
        overlay.select(&id("projects")).unwrap();
        overlay.on_proximity(Some(&id("contact")));

        let active = ["about", "projects", "contact"]
            .iter()
            .filter(|s| overlay.phase(&id(s)) == Some(StationPhase::Active))
            .count();
        assert_eq!(active, 1);
        assert_eq!(overlay.active(), Some(&id("projects")));
    }

    #[test]
    fn test_destination_validation() {
        let mut overlay = controller();
        overlay.set_destination(Some(&id("projects"))).unwrap();
        assert_eq!(overlay.destination(), Some(&id("projects")));
        assert!(overlay.set_destination(Some(&id("mars"))).is_err());
        assert_eq!(overlay.destination(), Some(&id("projects")));
        overlay.set_destination(None).unwrap();
        assert_eq!(overlay.destination(), None);
    }
}
