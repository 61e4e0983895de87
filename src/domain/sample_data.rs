use crate::domain::entities::columns::ColumnDescriptor;
use crate::domain::entities::record::ComponentRecord;

#[allow(clippy::too_many_arguments)]
fn panel_item(
    id: &str,
    description: &str,
    kind: &str,
    rating: i64,
    poles: i64,
    status: &str,
    install_date: &str,
    quantity: i64,
    price: f64,
    labor_charge: f64,
) -> ComponentRecord {
    ComponentRecord::new()
        .with("id", id)
        .with("description", description)
        .with("type", kind)
        .with("rating", rating)
        .with("poles", poles)
        .with("status", status)
        .with("installDate", install_date)
        .with("quantity", quantity)
        .with("price", price)
        .with("laborCharge", labor_charge)
}

pub fn panelboard_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::text("id", "ID").pinned(),
        ColumnDescriptor::text("description", "Description"),
        ColumnDescriptor::text("type", "Type"),
        ColumnDescriptor::number("rating", "Rating (A)"),
        ColumnDescriptor::number("poles", "Poles"),
        ColumnDescriptor::text("status", "Status"),
        ColumnDescriptor::date("installDate", "Installation Date"),
        ColumnDescriptor::number("quantity", "Qty").editable(),
        ColumnDescriptor::number("price", "Unit Price"),
        ColumnDescriptor::number("laborCharge", "Labor"),
    ]
}

pub fn panelboard_components() -> Vec<ComponentRecord> {
    vec![
        panel_item(
            "MP-001",
            "Main Incomer ACB 1600A",
            "Main",
            1600,
            4,
            "Active",
            "2024-01-15",
            1,
            4850.0,
            320.0,
        ),
        panel_item(
            "MP-002",
            "Main Busbar Chamber 2000A",
            "Main",
            2000,
            4,
            "Active",
            "2024-01-15",
            1,
            2100.0,
            450.0,
        ),
        panel_item(
            "MP-003",
            "Surge Protection Device Type 1+2",
            "Main",
            100,
            4,
            "Maintenance",
            "2024-02-02",
            1,
            640.0,
            85.0,
        ),
        panel_item(
            "SP-001",
            "Sub Panel MCCB 250A",
            "Sub",
            250,
            3,
            "Active",
            "2024-02-10",
            2,
            780.0,
            95.0,
        ),
        panel_item(
            "SP-002",
            "Sub Panel MCCB 160A",
            "Sub",
            160,
            3,
            "Active",
            "2024-02-10",
            2,
            520.0,
            95.0,
        ),
        panel_item(
            "SP-003",
            "Sub Panel Isolator 125A",
            "Sub",
            125,
            3,
            "Inactive",
            "2023-11-20",
            1,
            210.0,
            40.0,
        ),
        panel_item(
            "DB-001",
            "Distribution MCB 32A C-Curve",
            "Distribution",
            32,
            3,
            "Active",
            "2024-03-01",
            6,
            38.5,
            12.0,
        ),
        panel_item(
            "DB-002",
            "Distribution RCBO 20A 30mA",
            "Distribution",
            20,
            2,
            "Active",
            "2024-03-01",
            8,
            64.0,
            12.0,
        ),
        panel_item(
            "DB-003",
            "Distribution MCB 16A B-Curve",
            "Distribution",
            16,
            1,
            "Maintenance",
            "2024-03-04",
            12,
            9.8,
            8.0,
        ),
        panel_item(
            "LT-001",
            "Lighting Contactor 25A 4NO",
            "Lighting",
            25,
            4,
            "Active",
            "2024-03-12",
            2,
            88.0,
            22.0,
        ),
        panel_item(
            "LT-002",
            "Lighting Time Switch Astronomical",
            "Lighting",
            16,
            1,
            "Active",
            "2024-03-12",
            1,
            145.0,
            30.0,
        ),
        panel_item(
            "LT-003",
            "Lighting MCB 10A B-Curve",
            "Lighting",
            10,
            1,
            "Inactive",
            "2023-12-05",
            10,
            8.9,
            8.0,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn starter_part(
    product_code: &str,
    description: &str,
    model_number: &str,
    manufacturer: &str,
    function: &str,
    category: &str,
    price: f64,
    labor_charge: f64,
) -> ComponentRecord {
    ComponentRecord::new()
        .with("productCode", product_code)
        .with("description", description)
        .with("modelNumber", model_number)
        .with("manufacturer", manufacturer)
        .with("function", function)
        .with("category", category)
        .with("quantity", 1_i64)
        .with("price", price)
        .with("laborCharge", labor_charge)
}

pub fn star_delta_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::text("description", "Description"),
        ColumnDescriptor::text("productCode", "Code"),
        ColumnDescriptor::text("modelNumber", "Model"),
        ColumnDescriptor::text("manufacturer", "Manufacturer"),
        ColumnDescriptor::text("function", "Function"),
        ColumnDescriptor::text("category", "Category"),
        ColumnDescriptor::number("quantity", "Qty").editable(),
    ]
}

pub fn star_delta_main() -> ComponentRecord {
    ComponentRecord::new()
        .with("productCode", "SDMS22KWSC")
        .with("description", "Star-Delta Motor Starter 22kW - With Sub components")
        .with("modelNumber", "SDMS-22KW-SC")
        .with("manufacturer", "Schneider Electric")
        .with("group", "Main")
        .with("type", "Motor Starter")
        .with("quantity", 1_i64)
}

pub fn star_delta_subparts() -> Vec<ComponentRecord> {
    const SE: &str = "Schneider Electric";
    vec![
        starter_part(
            "SD001-01",
            "Main Contactor 50A AC3",
            "LC1D50A",
            SE,
            "Motor Control",
            "Contactor",
            182.0,
            15.0,
        ),
        starter_part(
            "SD001-02",
            "Star Contactor 32A AC3",
            "LC1D32A",
            SE,
            "Motor Control",
            "Contactor",
            118.0,
            15.0,
        ),
        starter_part(
            "SD001-03",
            "Delta Contactor 50A AC3",
            "LC1D50A",
            SE,
            "Motor Control",
            "Contactor",
            182.0,
            15.0,
        ),
        starter_part(
            "SD001-04",
            "Timer Relay 0-30s",
            "RE22R1AMR",
            SE,
            "Control",
            "Timer",
            74.0,
            8.0,
        ),
        starter_part(
            "SD001-05",
            "Thermal Overload Relay 30-50A",
            "LRD350",
            SE,
            "Protection",
            "Overload",
            96.0,
            8.0,
        ),
        starter_part(
            "SD001-06",
            "Control Circuit MCB 6A 1P",
            "A9F74106",
            SE,
            "Breaker",
            "MCB",
            12.5,
            4.0,
        ),
        starter_part(
            "SD001-07",
            "Power Circuit MCB 63A 3P",
            "A9F75363",
            SE,
            "Breaker",
            "MCB",
            58.0,
            6.0,
        ),
        starter_part(
            "SD001-08",
            "Start Button (Green)",
            "XB4BA31",
            SE,
            "Control",
            "Button",
            18.0,
            3.0,
        ),
        starter_part(
            "SD001-09",
            "Stop Button (Red)",
            "XB4BA42",
            SE,
            "Control",
            "Button",
            18.0,
            3.0,
        ),
        starter_part(
            "SD001-10",
            "Control Relay 24VDC 4CO",
            "RXM4AB2BD",
            SE,
            "Control",
            "Relay",
            21.0,
            3.0,
        ),
        starter_part(
            "SD001-11",
            "Control Transformer 415/24V 100VA",
            "ABL6TS10U",
            SE,
            "Power",
            "Transformer",
            64.0,
            10.0,
        ),
        starter_part(
            "SD001-12",
            "Auxiliary Contact Block",
            "LADN22",
            SE,
            "Control",
            "Auxiliary",
            14.0,
            2.0,
        ),
        starter_part(
            "SD001-13",
            "Terminal Block Set",
            "AB1VV435U",
            SE,
            "Panel",
            "Terminal",
            26.0,
            12.0,
        ),
        starter_part(
            "SD001-14",
            "Control Wiring Kit 1.5mm²",
            "CW-KIT-1.5",
            "Generic",
            "Panel",
            "Wiring",
            15.0,
            25.0,
        ),
        starter_part(
            "SD001-15",
            "Power Wiring Kit 10mm²",
            "PW-KIT-10",
            "Generic",
            "Panel",
            "Wiring",
            32.0,
            40.0,
        ),
    ]
}
