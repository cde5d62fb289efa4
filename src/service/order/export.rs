//! Spreadsheet export of the orders on screen.

use chrono::FixedOffset;
use rust_xlsxwriter::{Format, Workbook};

use crate::{error::ExportError, model::order::OrderDto};

pub const EXPORT_FILE_NAME: &str = "orders.xlsx";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXPORT_COLUMNS: [&str; 7] = [
    "Order Number",
    "Customer",
    "Date",
    "Time",
    "Total",
    "Coupon",
    "Status",
];

const SHEET_NAME: &str = "Orders";

/// One spreadsheet row, already formatted for the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub order_number: i64,
    pub customer: String,
    /// Day and short month, e.g. `07-Jun`.
    pub date: String,
    /// 12-hour clock, e.g. `02:05 PM`.
    pub time: String,
    pub total: String,
    pub coupon: String,
    pub status: String,
}

impl ExportRow {
    pub fn from_order(order: &OrderDto, offset: FixedOffset) -> Self {
        let created = order.created_at.with_timezone(&offset);

        Self {
            order_number: order.id,
            customer: order.customer_name.clone(),
            date: created.format("%d-%b").to_string(),
            time: created.format("%I:%M %p").to_string(),
            total: format!("AED{}", order.total),
            coupon: order.coupon_code().unwrap_or("-").to_string(),
            status: order.status.label(),
        }
    }
}

/// Rows for `orders`, in the order they are shown.
pub fn export_rows(orders: &[OrderDto], offset: FixedOffset) -> Vec<ExportRow> {
    orders
        .iter()
        .map(|order| ExportRow::from_order(order, offset))
        .collect()
}

/// Builds an `.xlsx` workbook with a header row and one row per entry.
pub fn orders_workbook(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (col, title) in EXPORT_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let line = index as u32 + 1;
        sheet.write_number(line, 0, row.order_number as f64)?;
        sheet.write_string(line, 1, row.customer.as_str())?;
        sheet.write_string(line, 2, row.date.as_str())?;
        sheet.write_string(line, 3, row.time.as_str())?;
        sheet.write_string(line, 4, row.total.as_str())?;
        sheet.write_string(line, 5, row.coupon.as_str())?;
        sheet.write_string(line, 6, row.status.as_str())?;
    }
    sheet.autofit();

    Ok(workbook.save_to_buffer()?)
}
