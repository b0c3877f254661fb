use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument};

use crate::dto::client_dto::{CreateClientRequest, UpdateClientRequest};
use crate::dto::Paginated;
use crate::model::client::Client;
use crate::repository::client_repo::{ClientRepository, MongoClientRepository};
use crate::util::error::ServiceError;

#[async_trait]
pub trait ClientService: Send + Sync {
    async fn create_client(&self, req: CreateClientRequest) -> Result<Client, ServiceError>;
    async fn get_client(&self, id: ObjectId) -> Result<Client, ServiceError>;
    async fn update_client(&self, id: ObjectId, req: UpdateClientRequest) -> Result<Client, ServiceError>;
    async fn delete_client(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn list_clients(
        &self,
        page: u32,
        page_size: u32,
        q: Option<String>,
    ) -> Result<Paginated<Client>, ServiceError>;
}

pub struct ClientServiceImpl {
    pub client_repo: MongoClientRepository,
}

#[async_trait]
impl ClientService for ClientServiceImpl {
    #[instrument(skip(self, req), fields(name = %req.name))]
    async fn create_client(&self, req: CreateClientRequest) -> Result<Client, ServiceError> {
        info!("Creating client");
        let client = Client {
            id: None,
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            company: req.company,
            created_at: None,
            updated_at: None,
        };
        self.client_repo.create(client).await.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_client(&self, id: ObjectId) -> Result<Client, ServiceError> {
        self.client_repo.get_by_id(id).await.map_err(ServiceError::from)
    }

    #[instrument(skip(self, req), fields(id = %id))]
    async fn update_client(&self, id: ObjectId, req: UpdateClientRequest) -> Result<Client, ServiceError> {
        info!("Updating client");
        // Full replace; timestamps are managed by the repository.
        let existing = self.client_repo.get_by_id(id).await?;
        let client = Client {
            id: Some(id),
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            company: req.company,
            created_at: existing.created_at,
            updated_at: existing.updated_at,
        };
        let res = self.client_repo.update(id, client).await;
        match &res {
            Ok(_) => info!("Client updated successfully"),
            Err(e) => error!("Failed to update client: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_client(&self, id: ObjectId) -> Result<(), ServiceError> {
        info!("Deleting client");
        self.client_repo.delete(id).await.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(page, page_size))]
    async fn list_clients(
        &self,
        page: u32,
        page_size: u32,
        q: Option<String>,
    ) -> Result<Paginated<Client>, ServiceError> {
        let q = q.as_deref();
        let items = self.client_repo.list(page, page_size, q).await?;
        let total = self.client_repo.count(q).await?;
        Ok(Paginated {
            items,
            total,
            page,
            page_size,
        })
    }
}
