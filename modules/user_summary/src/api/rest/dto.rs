use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::contract::model::{DepartmentSummary, SummaryResult, UserRecord};

/// REST DTO for one department's aggregated statistics.
///
/// Field names follow the wire format of the summary endpoint, so the map
/// keys inside `hair` and `addressUser` are emitted in first-encounter order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummaryDto {
    pub male: u64,
    pub female: u64,
    pub age_range: String,
    pub hair: IndexMap<String, u64>,
    pub address_user: IndexMap<String, String>,
}

/// REST DTO for the whole summary response: department → statistics.
pub type SummaryResponseDto = IndexMap<String, DepartmentSummaryDto>;

/// REST DTO for a single enriched user record
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub age: u32,
    pub hair_color: String,
    pub postal_code: String,
    pub department: Option<String>,
}

/// REST DTO for the user list response
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UserListDto {
    pub users: Vec<UserDto>,
    pub total: usize,
}

// Conversion implementations between contract models and REST DTOs

impl From<DepartmentSummary> for DepartmentSummaryDto {
    fn from(summary: DepartmentSummary) -> Self {
        Self {
            male: summary.male,
            female: summary.female,
            age_range: summary.age_range,
            hair: summary.hair,
            address_user: summary.address_user,
        }
    }
}

pub fn summary_response(summary: SummaryResult) -> SummaryResponseDto {
    summary
        .into_iter()
        .map(|(department, dept_summary)| (department, dept_summary.into()))
        .collect()
}

impl From<UserRecord> for UserDto {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            gender: user.gender,
            age: user.age,
            hair_color: user.hair_color,
            postal_code: user.postal_code,
            department: user.department,
        }
    }
}
