//! Closed domain vocabularies
//!
//! Each enum maps a symbolic name (what clients submit) to the display
//! value stored in the database. Unknown names are rejected at the API
//! boundary with a validation error, never deep in business logic.

use serde::{Deserialize, Serialize};

/// User role, stored in the database under its symbolic name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Curator,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::User, UserRole::Curator, UserRole::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Curator => "CURATOR",
            Self::Admin => "ADMIN",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "USER" => Some(Self::User),
            "CURATOR" => Some(Self::Curator),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn is_curator_or_admin(&self) -> bool {
        matches!(self, Self::Curator | Self::Admin)
    }
}

/// Real-estate classification for a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealEstateType {
    Office,
    Building,
    BuiltInPremises,
    IndustrialRealEstate,
    WarehousePremises,
    CommercialRealEstate,
    Hotels,
    OtherRealEstate,
}

impl RealEstateType {
    pub const ALL: [RealEstateType; 8] = [
        RealEstateType::Office,
        RealEstateType::Building,
        RealEstateType::BuiltInPremises,
        RealEstateType::IndustrialRealEstate,
        RealEstateType::WarehousePremises,
        RealEstateType::CommercialRealEstate,
        RealEstateType::Hotels,
        RealEstateType::OtherRealEstate,
    ];

    /// Symbolic name submitted by clients
    pub fn name(&self) -> &'static str {
        match self {
            Self::Office => "OFFICE",
            Self::Building => "BUILDING",
            Self::BuiltInPremises => "BUILT_IN_PREMISES",
            Self::IndustrialRealEstate => "INDUSTRIAL_REAL_ESTATE",
            Self::WarehousePremises => "WAREHOUSE_PREMISES",
            Self::CommercialRealEstate => "COMMERCIAL_REAL_ESTATE",
            Self::Hotels => "HOTELS",
            Self::OtherRealEstate => "OTHER_REAL_ESTATE",
        }
    }

    /// Display value as stored in the database
    pub fn display(&self) -> &'static str {
        match self {
            Self::Office => "офис",
            Self::Building => "здание",
            Self::BuiltInPremises => "встроенные помещения",
            Self::IndustrialRealEstate => "производственная недвижимость",
            Self::WarehousePremises => "складские помещения",
            Self::CommercialRealEstate => "торговая недвижимость",
            Self::Hotels => "отели",
            Self::OtherRealEstate => "иная недвижимость",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.name() == name)
    }
}

/// Regional classifier, shared by the `rc_mk` and `rc_zm` card fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionalCenter {
    Center,
    South,
    Ural,
    Siberia,
}

impl RegionalCenter {
    pub const ALL: [RegionalCenter; 4] = [
        RegionalCenter::Center,
        RegionalCenter::South,
        RegionalCenter::Ural,
        RegionalCenter::Siberia,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Center => "CENTER",
            Self::South => "SOUTH",
            Self::Ural => "URAL",
            Self::Siberia => "SIBERIA",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Self::Center => "Центр",
            Self::South => "Юг",
            Self::Ural => "Урал",
            Self::Siberia => "Сибирь",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::from_name(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::from_name("SUPERUSER"), None);
        assert_eq!(UserRole::from_name("admin"), None);
    }

    #[test]
    fn test_role_gates() {
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Curator.is_admin());
        assert!(UserRole::Curator.is_curator_or_admin());
        assert!(UserRole::Admin.is_curator_or_admin());
        assert!(!UserRole::User.is_curator_or_admin());
    }

    #[test]
    fn test_real_estate_translation() {
        assert_eq!(
            RealEstateType::from_name("OFFICE").map(|t| t.display()),
            Some("офис")
        );
        assert_eq!(
            RealEstateType::from_name("WAREHOUSE_PREMISES").map(|t| t.display()),
            Some("складские помещения")
        );
        assert_eq!(RealEstateType::from_name("CASTLE"), None);
        // every variant has a distinct name and display value
        for v in RealEstateType::ALL {
            assert_eq!(RealEstateType::from_name(v.name()), Some(v));
        }
    }

    #[test]
    fn test_regional_center_translation() {
        assert_eq!(
            RegionalCenter::from_name("SIBERIA").map(|v| v.display()),
            Some("Сибирь")
        );
        assert_eq!(RegionalCenter::from_name("Сибирь"), None);
        for v in RegionalCenter::ALL {
            assert_eq!(RegionalCenter::from_name(v.name()), Some(v));
        }
    }
}
