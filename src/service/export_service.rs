use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::model::client::Client;
use crate::model::quotation::Quotation;
use crate::repository::client_repo::{ClientRepository, MongoClientRepository};
use crate::repository::quotation_repo::{MongoQuotationRepository, QuotationRepository};
use crate::util::error::ServiceError;

#[async_trait]
pub trait ExportService: Send + Sync {
    /// Renders every stored quotation as CSV, newest first.
    async fn quotations_csv(&self) -> Result<String, ServiceError>;
}

pub struct ExportServiceImpl {
    pub quotation_repo: Arc<MongoQuotationRepository>,
    pub client_repo: Arc<MongoClientRepository>,
}

impl ExportServiceImpl {
    pub fn new(
        quotation_repo: Arc<MongoQuotationRepository>,
        client_repo: Arc<MongoClientRepository>,
    ) -> Self {
        Self {
            quotation_repo,
            client_repo,
        }
    }
}

/// Pure CSV formatting over already-fetched rows. Client names are resolved
/// through the given id -> client map; unknown references render empty.
pub fn render_quotations_csv(
    quotations: &[Quotation],
    clients: &HashMap<bson::oid::ObjectId, Client>,
) -> Result<String, ServiceError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record([
            "number",
            "client",
            "status",
            "subtotal",
            "tax_rate",
            "tax_amount",
            "discount",
            "total",
            "valid_until",
            "created_at",
        ])
        .map_err(|e| ServiceError::InternalError(format!("CSV write error: {}", e)))?;

    for q in quotations {
        let client_name = clients
            .get(&q.client_id)
            .map(|c| c.name.as_str())
            .unwrap_or_default();
        writer
            .write_record([
                q.number.as_str(),
                client_name,
                q.status.as_str(),
                &q.subtotal.to_string(),
                &q.tax_rate.to_string(),
                &q.tax_amount.to_string(),
                &q.discount.to_string(),
                &q.total.to_string(),
                q.valid_until.as_deref().unwrap_or_default(),
                q.created_at.as_deref().unwrap_or_default(),
            ])
            .map_err(|e| ServiceError::InternalError(format!("CSV write error: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ServiceError::InternalError(format!("CSV flush error: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| ServiceError::InternalError(format!("CSV is not valid UTF-8: {}", e)))
}

#[async_trait]
impl ExportService for ExportServiceImpl {
    #[instrument(skip(self))]
    async fn quotations_csv(&self) -> Result<String, ServiceError> {
        let quotations = self.quotation_repo.list_all().await?;

        // One pass over the clients beats one lookup per quotation row.
        let mut clients = HashMap::new();
        for quotation in &quotations {
            if let std::collections::hash_map::Entry::Vacant(entry) = clients.entry(quotation.client_id) {
                match self.client_repo.get_by_id(quotation.client_id).await {
                    Ok(client) => {
                        entry.insert(client);
                    }
                    Err(_) => {
                        // Deleted client; the row exports with an empty name.
                    }
                }
            }
        }

        let csv = render_quotations_csv(&quotations, &clients)?;
        info!(rows = quotations.len(), "Rendered quotations CSV");
        Ok(csv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::quotation::{QuotationItem, QuotationStatus};
    use bson::oid::ObjectId;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_quotation(client_id: ObjectId) -> Quotation {
        Quotation {
            id: Some(ObjectId::new()),
            number: "MF29082026-01".to_string(),
            client_id,
            items: vec![QuotationItem {
                description: "consulting".to_string(),
                quantity: 1,
                unit_price: dec("5000"),
                line_total: dec("5000"),
            }],
            status: QuotationStatus::Sent,
            subtotal: dec("5000"),
            tax_rate: dec("18"),
            tax_amount: dec("900.00"),
            discount: Decimal::ZERO,
            total: dec("5900.00"),
            valid_until: None,
            notes: None,
            created_at: Some("2026-08-29T10:00:00Z".to_string()),
            updated_at: None,
        }
    }

    fn sample_client(id: ObjectId, name: &str) -> Client {
        Client {
            id: Some(id),
            name: name.to_string(),
            email: None,
            phone: None,
            address: None,
            company: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_csv_header_and_row() {
        let client_id = ObjectId::new();
        let mut clients = HashMap::new();
        clients.insert(client_id, sample_client(client_id, "Acme Ltd"));
        let csv = render_quotations_csv(&[sample_quotation(client_id)], &clients).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "number,client,status,subtotal,tax_rate,tax_amount,discount,total,valid_until,created_at"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("MF29082026-01,Acme Ltd,sent,5000,18,900.00,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        let client_id = ObjectId::new();
        let mut clients = HashMap::new();
        clients.insert(client_id, sample_client(client_id, "Acme, Ltd"));
        let csv = render_quotations_csv(&[sample_quotation(client_id)], &clients).unwrap();
        assert!(csv.contains("\"Acme, Ltd\""));
    }

    #[test]
    fn test_csv_unknown_client_renders_empty() {
        let csv = render_quotations_csv(&[sample_quotation(ObjectId::new())], &HashMap::new()).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("MF29082026-01,,sent,"));
    }

    #[test]
    fn test_csv_empty_export_is_header_only() {
        let csv = render_quotations_csv(&[], &HashMap::new()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
