// src/roles.rs - Operational personas shown on the login screen and header
use serde::{Deserialize, Serialize};

/// Cosmetic only: selects the header label and logo, grants nothing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    #[default]
    TrafficControl,
    PoliceSecurity,
    CityAdministration,
    TransitPlanning,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::TrafficControl,
        Role::PoliceSecurity,
        Role::CityAdministration,
        Role::TransitPlanning,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Role::TrafficControl => "Traffic control centre",
            Role::PoliceSecurity => "Police / security",
            Role::CityAdministration => "City administration / public order office",
            Role::TransitPlanning => "Public transport planning",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::TrafficControl => "Control centre",
            Role::PoliceSecurity => "Police",
            Role::CityAdministration => "City administration",
            Role::TransitPlanning => "Transit planning",
        }
    }

    pub fn logo_path(&self) -> &'static str {
        match self {
            Role::TrafficControl => "assets/Verkehrsbetriebe.png",
            Role::PoliceSecurity => "assets/Polizei.png",
            Role::CityAdministration => "assets/Stadtverwaltung.png",
            Role::TransitPlanning => "assets/Stadtplaner.png",
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|r| r == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|r| r == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_cycle_wraps() {
        assert_eq!(Role::TransitPlanning.next(), Role::TrafficControl);
        assert_eq!(Role::TrafficControl.previous(), Role::TransitPlanning);
        let mut role = Role::TrafficControl;
        for _ in 0..Role::ALL.len() {
            role = role.next();
        }
        assert_eq!(role, Role::TrafficControl);
    }

    #[test]
    fn test_each_role_has_distinct_logo() {
        let mut logos: Vec<_> = Role::ALL.iter().map(|r| r.logo_path()).collect();
        logos.sort();
        logos.dedup();
        assert_eq!(logos.len(), 4);
    }
}
