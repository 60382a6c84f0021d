use indexmap::IndexMap;

/// Pure user model produced by a user source (no serde/schemars).
///
/// The upstream API carries many more fields; only the ones the summary
/// engine reads survive the mapping into this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    /// Free-form upstream value. Only the exact strings "male" and "female"
    /// are counted; anything else lands in neither bucket.
    pub gender: String,
    pub age: u32,
    /// Empty when the upstream record has no usable hair color.
    pub hair_color: String,
    pub postal_code: String,
    /// None or empty is normalized to the "Unknown" group key.
    pub department: Option<String>,
}

impl UserRecord {
    /// Space-joined display/lookup key, e.g. "Terry Medhurst".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Aggregated statistics for one department.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepartmentSummary {
    pub male: u64,
    pub female: u64,
    /// "<min>-<max>" over the ages of this department's users.
    pub age_range: String,
    /// Hair color → count, keys in first-encounter order. Empty colors are skipped.
    pub hair: IndexMap<String, u64>,
    /// "<first> <last>" → postal code. On a full-name collision the later
    /// record silently overwrites the earlier one.
    pub address_user: IndexMap<String, String>,
}

/// Department key → summary, keys in first-encounter order.
pub type SummaryResult = IndexMap<String, DepartmentSummary>;
