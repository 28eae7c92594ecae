//! Read-only listings of the closed domain vocabularies

use axum::Json;
use serde::Serialize;

use crate::domain::{RealEstateType, RegionalCenter, UserRole};

/// One {symbolic-name: display-value} pair
#[derive(Serialize)]
pub struct EnumEntry {
    pub name: &'static str,
    pub value: &'static str,
}

/// GET /api/enums/real-estate-types
pub async fn real_estate_types() -> Json<Vec<EnumEntry>> {
    Json(
        RealEstateType::ALL
            .iter()
            .map(|v| EnumEntry {
                name: v.name(),
                value: v.display(),
            })
            .collect(),
    )
}

/// GET /api/enums/regional-centers
pub async fn regional_centers() -> Json<Vec<EnumEntry>> {
    Json(
        RegionalCenter::ALL
            .iter()
            .map(|v| EnumEntry {
                name: v.name(),
                value: v.display(),
            })
            .collect(),
    )
}

/// GET /api/enums/roles
pub async fn roles() -> Json<Vec<EnumEntry>> {
    Json(
        UserRole::ALL
            .iter()
            .map(|v| EnumEntry {
                name: v.as_str(),
                value: v.as_str(),
            })
            .collect(),
    )
}
