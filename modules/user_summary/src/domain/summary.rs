//! Single-pass aggregation of user records into per-department summaries.

use indexmap::IndexMap;

use crate::contract::model::{DepartmentSummary, SummaryResult, UserRecord};

/// Group key for users without a usable department.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// Aggregate users into a per-department summary.
///
/// Pure function over the input: no I/O, no shared state, never fails.
/// Department keys appear in first-encounter order. Missing or empty
/// departments group under [`UNKNOWN_DEPARTMENT`]. Genders other than the
/// exact strings "male"/"female" increment neither counter, and empty hair
/// colors are left out of the histogram.
pub fn generate_user_summary(users: &[UserRecord]) -> SummaryResult {
    let mut summary = SummaryResult::new();
    let mut ages: IndexMap<String, Vec<u32>> = IndexMap::new();

    for user in users {
        let department = normalize_department(user.department.as_deref());

        let entry = summary.entry(department.clone()).or_default();

        match user.gender.as_str() {
            "male" => entry.male += 1,
            "female" => entry.female += 1,
            _ => {}
        }

        if !user.hair_color.is_empty() {
            *entry.hair.entry(user.hair_color.clone()).or_insert(0) += 1;
        }

        // Last writer wins on a full-name collision.
        entry
            .address_user
            .insert(user.full_name(), user.postal_code.clone());

        ages.entry(department).or_default().push(user.age);
    }

    for (department, dept_ages) in &ages {
        if let Some(entry) = summary.get_mut(department) {
            entry.age_range = age_range(dept_ages);
        }
    }

    summary
}

/// Format the span of `ages` as "<min>-<max>"; empty input yields "".
///
/// A department that only holds users of one age produces "<age>-<age>".
pub fn age_range(ages: &[u32]) -> String {
    match (ages.iter().min(), ages.iter().max()) {
        (Some(min), Some(max)) => format!("{min}-{max}"),
        _ => String::new(),
    }
}

fn normalize_department(department: Option<&str>) -> String {
    match department {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => UNKNOWN_DEPARTMENT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(
        id: u64,
        first: &str,
        last: &str,
        gender: &str,
        age: u32,
        hair: &str,
        postal: &str,
        department: Option<&str>,
    ) -> UserRecord {
        UserRecord {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            gender: gender.to_string(),
            age,
            hair_color: hair.to_string(),
            postal_code: postal.to_string(),
            department: department.map(str::to_string),
        }
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        let summary = generate_user_summary(&[]);
        assert!(summary.is_empty());
    }

    #[test]
    fn engineering_scenario() {
        let users = vec![
            user(1, "A", "B", "male", 30, "black", "1", Some("Eng")),
            user(2, "C", "D", "female", 40, "black", "2", Some("Eng")),
        ];

        let summary = generate_user_summary(&users);
        assert_eq!(summary.len(), 1);

        let eng = &summary["Eng"];
        assert_eq!(eng.male, 1);
        assert_eq!(eng.female, 1);
        assert_eq!(eng.age_range, "30-40");
        assert_eq!(eng.hair["black"], 2);
        assert_eq!(eng.address_user["A B"], "1");
        assert_eq!(eng.address_user["C D"], "2");
    }

    #[test]
    fn missing_or_empty_department_groups_under_unknown() {
        let users = vec![
            user(1, "A", "B", "male", 30, "black", "1", None),
            user(2, "C", "D", "female", 40, "brown", "2", Some("")),
        ];

        let summary = generate_user_summary(&users);
        assert_eq!(summary.len(), 1);

        let unknown = &summary[UNKNOWN_DEPARTMENT];
        assert_eq!(unknown.male, 1);
        assert_eq!(unknown.female, 1);
    }

    #[test]
    fn unrecognized_gender_counts_in_neither_bucket() {
        let users = vec![
            user(1, "A", "B", "male", 30, "", "1", Some("Eng")),
            user(2, "C", "D", "other", 40, "", "2", Some("Eng")),
            user(3, "E", "F", "Male", 50, "", "3", Some("Eng")),
        ];

        let summary = generate_user_summary(&users);
        let eng = &summary["Eng"];
        assert_eq!(eng.male, 1);
        assert_eq!(eng.female, 0);
        // gender counts never exceed the user count
        assert!(eng.male + eng.female <= 3);
    }

    #[test]
    fn age_range_spans_min_and_max() {
        let users = vec![
            user(1, "A", "B", "male", 30, "", "1", Some("Eng")),
            user(2, "C", "D", "female", 45, "", "2", Some("Eng")),
            user(3, "E", "F", "male", 22, "", "3", Some("Eng")),
        ];

        let summary = generate_user_summary(&users);
        assert_eq!(summary["Eng"].age_range, "22-45");
    }

    #[test]
    fn age_range_helper_edge_cases() {
        assert_eq!(age_range(&[]), "");
        assert_eq!(age_range(&[33]), "33-33");
        assert_eq!(age_range(&[40, 40, 40]), "40-40");
        assert_eq!(age_range(&[45, 22, 30]), "22-45");
    }

    #[test]
    fn age_ranges_are_computed_per_department() {
        let users = vec![
            user(1, "A", "B", "male", 20, "", "1", Some("Eng")),
            user(2, "C", "D", "female", 60, "", "2", Some("Sales")),
            user(3, "E", "F", "male", 25, "", "3", Some("Eng")),
        ];

        let summary = generate_user_summary(&users);
        assert_eq!(summary["Eng"].age_range, "20-25");
        assert_eq!(summary["Sales"].age_range, "60-60");
    }

    #[test]
    fn empty_hair_color_is_skipped() {
        let users = vec![
            user(1, "A", "B", "male", 30, "", "1", Some("Eng")),
            user(2, "C", "D", "female", 40, "blond", "2", Some("Eng")),
            user(3, "E", "F", "male", 50, "blond", "3", Some("Eng")),
        ];

        let summary = generate_user_summary(&users);
        let hair = &summary["Eng"].hair;
        assert_eq!(hair.len(), 1);
        assert_eq!(hair["blond"], 2);
    }

    #[test]
    fn full_name_collision_keeps_the_later_postal_code() {
        let users = vec![
            user(1, "A", "B", "male", 30, "black", "11111", Some("Eng")),
            user(2, "A", "B", "male", 35, "brown", "22222", Some("Eng")),
        ];

        let summary = generate_user_summary(&users);
        let address_user = &summary["Eng"].address_user;
        assert_eq!(address_user.len(), 1);
        assert_eq!(address_user["A B"], "22222");
    }

    #[test]
    fn department_keys_keep_first_encounter_order() {
        let users = vec![
            user(1, "A", "B", "male", 30, "", "1", Some("Support")),
            user(2, "C", "D", "female", 40, "", "2", Some("Accounting")),
            user(3, "E", "F", "male", 50, "", "3", Some("Support")),
            user(4, "G", "H", "female", 60, "", "4", None),
        ];

        let summary = generate_user_summary(&users);
        let keys: Vec<&str> = summary.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Support", "Accounting", UNKNOWN_DEPARTMENT]);
    }
}
