//! DSCSA CSV export
//!
//! One header row followed by one row per scanned item. Transaction-level
//! metadata is repeated on every row.

use std::path::Path;

use gs1scan_core::DecodedRecord;
use log::info;

use crate::partners::{Partner, PartnerRole};
use crate::products::Product;
use crate::{Error, Result};

/// Column headers of the DSCSA import format
pub const DSCSA_HEADERS: [&str; 24] = [
    "Transaction Date",
    "Shipment Date",
    "PO Number",
    "Del Document Number",
    "Direct Purchase",
    "NDC",
    "GTIN",
    "Serial Number",
    "Lot",
    "Lot Expiry Date",
    "Product Description",
    "Proprietary Name",
    "Dosage Form",
    "Strength",
    "Container Size",
    "Manufacturer Name",
    "Sold By Name",
    "Sold By GLN",
    "Sold To Name",
    "Sold To GLN",
    "Ship From Name",
    "Ship From GLN",
    "Ship To Name",
    "Ship To GLN",
];

/// `Direct Purchase` value used when none is given
pub const DEFAULT_DIRECT_PURCHASE: &str = "yes";

/// Transaction-level fields shared by every row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransactionMetadata {
    pub transaction_date: Option<String>,
    pub shipment_date: Option<String>,
    pub po_number: Option<String>,
    pub del_document_number: Option<String>,
    pub direct_purchase: Option<String>,
    pub sold_by_name: Option<String>,
    pub sold_by_gln: Option<String>,
    pub sold_to_name: Option<String>,
    pub sold_to_gln: Option<String>,
    pub ship_from_name: Option<String>,
    pub ship_from_gln: Option<String>,
    pub ship_to_name: Option<String>,
    pub ship_to_gln: Option<String>,
}

impl TransactionMetadata {
    /// Fill the name and GLN columns for the partner's role
    pub fn with_partner(mut self, partner: &Partner) -> Self {
        let name = Some(partner.name.clone());
        let gln = Some(partner.gln.clone());
        match partner.role {
            PartnerRole::SoldBy => (self.sold_by_name, self.sold_by_gln) = (name, gln),
            PartnerRole::SoldTo => (self.sold_to_name, self.sold_to_gln) = (name, gln),
            PartnerRole::ShipFrom => (self.ship_from_name, self.ship_from_gln) = (name, gln),
            PartnerRole::ShipTo => (self.ship_to_name, self.ship_to_gln) = (name, gln),
        }
        self
    }
}

/// A decoded scan plus the product details looked up for its GTIN
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedItem {
    pub record: DecodedRecord,
    pub product: Option<Product>,
}

impl ScannedItem {
    /// Item with no product details
    pub fn new(record: DecodedRecord) -> Self {
        Self {
            record,
            product: None,
        }
    }

    /// Attach product details
    pub fn with_product(mut self, product: Product) -> Self {
        self.product = Some(product);
        self
    }

    fn product_field(&self, field: impl Fn(&Product) -> &Option<String>) -> &str {
        self.product
            .as_ref()
            .and_then(|p| field(p).as_deref())
            .unwrap_or_default()
    }
}

/// Cells of one data row, in [`DSCSA_HEADERS`] order
fn dscsa_row<'a>(item: &'a ScannedItem, metadata: &'a TransactionMetadata) -> [&'a str; 24] {
    let meta = |value: &'a Option<String>| value.as_deref().unwrap_or_default();
    let record = &item.record;

    [
        meta(&metadata.transaction_date),
        meta(&metadata.shipment_date),
        meta(&metadata.po_number),
        meta(&metadata.del_document_number),
        metadata
            .direct_purchase
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_DIRECT_PURCHASE),
        item.product_field(|p| &p.ndc),
        meta(&record.gtin),
        meta(&record.serial),
        meta(&record.lot),
        meta(&record.expiration),
        item.product_field(|p| &p.product_description),
        item.product_field(|p| &p.proprietary_name),
        item.product_field(|p| &p.dosage_form),
        item.product_field(|p| &p.strength),
        item.product_field(|p| &p.container_size),
        item.product_field(|p| &p.manufacturer),
        meta(&metadata.sold_by_name),
        meta(&metadata.sold_by_gln),
        meta(&metadata.sold_to_name),
        meta(&metadata.sold_to_gln),
        meta(&metadata.ship_from_name),
        meta(&metadata.ship_from_gln),
        meta(&metadata.ship_to_name),
        meta(&metadata.ship_to_gln),
    ]
}

/// Render scanned items as DSCSA CSV text
///
/// Rows are separated by `\n` with no trailing newline. Cells containing a
/// comma, quote or newline are quoted with inner quotes doubled.
pub fn generate_dscsa_csv(items: &[ScannedItem], metadata: &TransactionMetadata) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(DSCSA_HEADERS)?;
    for item in items {
        writer.write_record(dscsa_row(item, metadata))?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    let mut content = String::from_utf8(bytes).map_err(|e| Error::InvalidInput(e.to_string()))?;
    if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}

/// File name for a PO's export: `/` and `\` become `-`, whitespace runs become `_`
pub fn generate_filename(po_number: Option<&str>) -> String {
    let po_number = po_number.filter(|po| !po.is_empty()).unwrap_or("NO_PO");

    let mut clean = String::with_capacity(po_number.len());
    let mut in_whitespace = false;
    for c in po_number.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                clean.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        clean.push(if c == '/' || c == '\\' { '-' } else { c });
    }

    format!("{clean}_dscsa.csv")
}

/// Write CSV content to `path`
pub fn write_csv<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    std::fs::write(path.as_ref(), content)?;
    info!("Wrote DSCSA export to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ScannedItem {
        ScannedItem::new(DecodedRecord {
            gtin: Some("00312345678906".into()),
            lot: Some("LOT42".into()),
            serial: Some("SN99".into()),
            expiration: Some("12/31/2025".into()),
        })
    }

    #[test]
    fn test_header_only() {
        let csv = generate_dscsa_csv(&[], &TransactionMetadata::default()).unwrap();
        assert_eq!(csv, DSCSA_HEADERS.join(","));
    }

    #[test]
    fn test_row_layout_and_defaults() {
        let metadata = TransactionMetadata {
            po_number: Some("PO-1".into()),
            ..TransactionMetadata::default()
        };
        let product = Product::new("00312345678906")
            .with_ndc("0312-3456-78")
            .with_manufacturer("Contoso Labs");

        let csv = generate_dscsa_csv(&[item().with_product(product)], &metadata).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 2);

        let cells: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(cells.len(), 24);
        assert_eq!(cells[2], "PO-1");
        assert_eq!(cells[4], "yes");
        assert_eq!(cells[5], "0312-3456-78");
        assert_eq!(cells[6], "00312345678906");
        assert_eq!(cells[7], "SN99");
        assert_eq!(cells[8], "LOT42");
        assert_eq!(cells[9], "12/31/2025");
        assert_eq!(cells[15], "Contoso Labs");
        assert_eq!(cells[23], "");
    }

    #[test]
    fn test_escaping() {
        let metadata = TransactionMetadata {
            sold_by_name: Some("Acme, Inc.".into()),
            sold_to_name: Some("The \"Best\" Clinic".into()),
            ship_to_name: Some("Dock\nB".into()),
            direct_purchase: Some("no".into()),
            ..TransactionMetadata::default()
        };

        let csv = generate_dscsa_csv(&[ScannedItem::default()], &metadata).unwrap();
        assert!(csv.contains(",no,"));
        assert!(csv.contains(",\"Acme, Inc.\","));
        assert!(csv.contains(",\"The \"\"Best\"\" Clinic\","));
        assert!(csv.contains(",\"Dock\nB\","));
    }

    #[test]
    fn test_with_partner() {
        let metadata = TransactionMetadata::default()
            .with_partner(&Partner::new(PartnerRole::ShipFrom, "Main Depot", "0614141000012"))
            .with_partner(&Partner::new(PartnerRole::SoldTo, "Clinic", "0614141000029"));

        assert_eq!(metadata.ship_from_name.as_deref(), Some("Main Depot"));
        assert_eq!(metadata.ship_from_gln.as_deref(), Some("0614141000012"));
        assert_eq!(metadata.sold_to_gln.as_deref(), Some("0614141000029"));
        assert_eq!(metadata.sold_by_name, None);
    }

    #[test]
    fn test_generate_filename() {
        assert_eq!(generate_filename(Some("PO 123/45")), "PO_123-45_dscsa.csv");
        assert_eq!(generate_filename(Some("A\\B  \t C")), "A-B_C_dscsa.csv");
        assert_eq!(generate_filename(Some("")), "NO_PO_dscsa.csv");
        assert_eq!(generate_filename(None), "NO_PO_dscsa.csv");
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(generate_filename(Some("PO-7")));
        let content = generate_dscsa_csv(&[item()], &TransactionMetadata::default()).unwrap();

        write_csv(&path, &content).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }
}
