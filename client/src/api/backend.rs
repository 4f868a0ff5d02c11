use super::gateway::ApiGateway;
use crate::common::errors::ApiResult;
use crate::model::{
    AvailabilityResponse, Barber, BookingConfirmation, BookingRequest, CustomerDetails,
    CustomerPublic, CustomerUpdate, LoginRequest, LoginResponse, RegisterRequest, Service,
    TimeSlot,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

/// Typed operations of the booking backend.
///
/// The booking wizard, auth service and client area only ever talk to this
/// trait, so tests can substitute scripted implementations.
#[async_trait]
pub trait BarberShopBackend: Send + Sync {
    async fn list_services(&self, cancel: &CancellationToken) -> ApiResult<Vec<Service>>;

    async fn list_barbers(&self, cancel: &CancellationToken) -> ApiResult<Vec<Barber>>;

    /// Free slots for `barber_id` on `date`.
    async fn availability(
        &self,
        barber_id: &str,
        date: NaiveDate,
        cancel: &CancellationToken,
    ) -> ApiResult<Vec<TimeSlot>>;

    async fn create_booking(
        &self,
        request: &BookingRequest,
        cancel: &CancellationToken,
    ) -> ApiResult<BookingConfirmation>;

    async fn get_customer(&self, id: &str, cancel: &CancellationToken)
    -> ApiResult<CustomerPublic>;

    async fn get_customer_details(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<CustomerDetails>;

    async fn update_customer(
        &self,
        id: &str,
        update: &CustomerUpdate,
        cancel: &CancellationToken,
    ) -> ApiResult<CustomerPublic>;

    async fn login(
        &self,
        request: &LoginRequest,
        cancel: &CancellationToken,
    ) -> ApiResult<LoginResponse>;

    async fn register(
        &self,
        request: &RegisterRequest,
        cancel: &CancellationToken,
    ) -> ApiResult<LoginResponse>;
}

/// [`BarberShopBackend`] over the REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    gateway: ApiGateway,
}

impl HttpBackend {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    fn customer_path(id: &str) -> String {
        format!("/clientes/{}", urlencoding::encode(id))
    }
}

#[async_trait]
impl BarberShopBackend for HttpBackend {
    async fn list_services(&self, cancel: &CancellationToken) -> ApiResult<Vec<Service>> {
        self.gateway.get("/servicos", cancel).await
    }

    async fn list_barbers(&self, cancel: &CancellationToken) -> ApiResult<Vec<Barber>> {
        self.gateway.get("/barbeiros", cancel).await
    }

    async fn availability(
        &self,
        barber_id: &str,
        date: NaiveDate,
        cancel: &CancellationToken,
    ) -> ApiResult<Vec<TimeSlot>> {
        let path = format!(
            "/disponibilidade?barbeiroId={}&data={}",
            urlencoding::encode(barber_id),
            date.format("%Y-%m-%d")
        );
        let response: AvailabilityResponse = self.gateway.get(&path, cancel).await?;
        Ok(response.into_slots())
    }

    async fn create_booking(
        &self,
        request: &BookingRequest,
        cancel: &CancellationToken,
    ) -> ApiResult<BookingConfirmation> {
        self.gateway.post("/agendamentos", request, cancel).await
    }

    async fn get_customer(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<CustomerPublic> {
        self.gateway.get(&Self::customer_path(id), cancel).await
    }

    async fn get_customer_details(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<CustomerDetails> {
        let path = format!("{}?view=details", Self::customer_path(id));
        self.gateway.get(&path, cancel).await
    }

    async fn update_customer(
        &self,
        id: &str,
        update: &CustomerUpdate,
        cancel: &CancellationToken,
    ) -> ApiResult<CustomerPublic> {
        self.gateway
            .put(&Self::customer_path(id), update, cancel)
            .await
    }

    async fn login(
        &self,
        request: &LoginRequest,
        cancel: &CancellationToken,
    ) -> ApiResult<LoginResponse> {
        self.gateway.post("/auth/login", request, cancel).await
    }

    async fn register(
        &self,
        request: &RegisterRequest,
        cancel: &CancellationToken,
    ) -> ApiResult<LoginResponse> {
        self.gateway.post("/auth/register", request, cancel).await
    }
}
