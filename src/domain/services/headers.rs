use std::collections::HashSet;

use crate::domain::errors::IngestError;

/// Column names every component upload must carry. Matching is exact and
/// case-sensitive; order and extra columns do not matter.
pub const REQUIRED_HEADERS: [&str; 22] = [
    "Item ID",
    "Item_Name",
    "Part_Number",
    "Supplier",
    "Category",
    "Subcategory",
    "Qty",
    "Unit_Cost",
    "Total Cost",
    "Currency",
    "Labour_Minutes",
    "Total_Labour_Time",
    "Installation_Type",
    "Rated_Current_AMP",
    "Number of Poles",
    "IP_Rating",
    "Breaking_Capacity _Ka",
    "Mounting Type",
    "Watt_Loss",
    "Stock_Status",
    "Lead_Time_Days",
    "Remarks",
];

/// Required names absent from `parsed`, in the order they are declared.
pub fn missing_headers<'r, S: AsRef<str>>(required: &[&'r str], parsed: &[S]) -> Vec<&'r str> {
    let present: HashSet<&str> = parsed.iter().map(|header| header.as_ref()).collect();
    required
        .iter()
        .copied()
        .filter(|name| !present.contains(name))
        .collect()
}

pub fn validate_headers<S: AsRef<str>>(required: &[&str], parsed: &[S]) -> Result<(), IngestError> {
    let missing = missing_headers(required, parsed);
    if missing.is_empty() {
        return Ok(());
    }
    Err(IngestError::HeaderValidation {
        missing: missing.into_iter().map(str::to_string).collect(),
    })
}
