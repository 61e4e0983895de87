use crate::domain::entities::record::ComponentRecord;
use crate::domain::entities::rows::{CategoryGroup, GridRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryBucket {
    pub key: &'static str,
    pub label: &'static str,
    pub filter_value: &'static str,
    pub color: &'static str,
}

impl CategoryBucket {
    pub fn matches(&self, value: &str) -> bool {
        value == self.filter_value || value.contains(self.filter_value)
    }

    fn header(&self) -> GridRow {
        GridRow::Group(CategoryGroup {
            key: self.key.to_string(),
            label: self.label.to_string(),
            color: self.color.to_string(),
        })
    }
}

pub const SECTION_FIELD: &str = "type";

pub const PANEL_SECTIONS: [CategoryBucket; 4] = [
    CategoryBucket {
        key: "main",
        label: "Main Panel",
        filter_value: "Main",
        color: "#dbeafe",
    },
    CategoryBucket {
        key: "sub",
        label: "Sub Panels",
        filter_value: "Sub",
        color: "#dcfce7",
    },
    CategoryBucket {
        key: "distribution",
        label: "Distribution",
        filter_value: "Distribution",
        color: "#fef9c3",
    },
    CategoryBucket {
        key: "lighting",
        label: "Lighting",
        filter_value: "Lighting",
        color: "#fae8ff",
    },
];

pub const OTHER_BUCKET: CategoryBucket = CategoryBucket {
    key: "other",
    label: "Other",
    filter_value: "",
    color: "#f3f4f6",
};

/// Partitions `records` by `field` into `buckets`, each bucket preceded by its
/// header row. A record joins the first bucket it matches; records matching
/// none follow under an "Other" header. Empty buckets keep their header.
pub fn group_by_category(
    records: &[ComponentRecord],
    buckets: &[CategoryBucket],
    field: &str,
) -> Vec<GridRow> {
    let mut members: Vec<Vec<&ComponentRecord>> = vec![Vec::new(); buckets.len()];
    let mut unmatched = Vec::new();

    for record in records {
        let value = record.display(field);
        match buckets.iter().position(|bucket| bucket.matches(&value)) {
            Some(idx) => members[idx].push(record),
            None => unmatched.push(record),
        }
    }

    let mut rows = Vec::with_capacity(records.len() + buckets.len() + 1);
    for (bucket, bucket_members) in buckets.iter().zip(members) {
        rows.push(bucket.header());
        rows.extend(bucket_members.into_iter().cloned().map(GridRow::Record));
    }
    if !unmatched.is_empty() {
        rows.push(OTHER_BUCKET.header());
        rows.extend(unmatched.into_iter().cloned().map(GridRow::Record));
    }
    rows
}

pub fn section_header_index(rows: &[GridRow], key: &str) -> Option<usize> {
    rows.iter()
        .position(|row| row.as_group().is_some_and(|group| group.key == key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(id: &str, kind: &str) -> ComponentRecord {
        ComponentRecord::new().with("id", id).with("type", kind)
    }

    fn layout(rows: &[GridRow]) -> Vec<String> {
        rows.iter()
            .map(|row| match row {
                GridRow::Group(group) => format!("#{}", group.key),
                GridRow::Record(record) => record.display("id"),
            })
            .collect()
    }

    #[test]
    fn buckets_follow_declaration_order_with_headers_first() {
        let records = vec![
            component("L1", "Lighting"),
            component("M1", "Main"),
            component("S1", "Sub"),
            component("M2", "Main"),
        ];

        let rows = group_by_category(&records, &PANEL_SECTIONS, SECTION_FIELD);

        assert_eq!(
            layout(&rows),
            vec!["#main", "M1", "M2", "#sub", "S1", "#distribution", "#lighting", "L1"]
        );
    }

    #[test]
    fn substring_match_uses_first_matching_bucket() {
        let records = vec![component("X1", "Sub Distribution"), component("Z1", "Spare")];

        let rows = group_by_category(&records, &PANEL_SECTIONS, SECTION_FIELD);

        assert_eq!(
            layout(&rows),
            vec!["#main", "#sub", "X1", "#distribution", "#lighting", "#other", "Z1"]
        );
    }

    #[test]
    fn empty_buckets_do_not_borrow_unrelated_rows() {
        let rows = group_by_category(&[component("M1", "Main")], &PANEL_SECTIONS, SECTION_FIELD);

        let record_count = rows.iter().filter(|row| row.as_record().is_some()).count();
        assert_eq!(record_count, 1);
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn section_header_index_finds_group_rows() {
        let rows = group_by_category(
            &[component("M1", "Main"), component("S1", "Sub")],
            &PANEL_SECTIONS,
            SECTION_FIELD,
        );

        assert_eq!(section_header_index(&rows, "main"), Some(0));
        assert_eq!(section_header_index(&rows, "sub"), Some(2));
        assert_eq!(section_header_index(&rows, "missing"), None);
    }
}
