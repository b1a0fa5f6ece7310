//! # Stripe REST Client
//!
//! Customers, payment methods, payment intents and refunds over the Stripe
//! REST API.

use crate::config::StripeConfig;
use async_trait::async_trait;
use portone_core::{
    CreatePaymentIntent, Customer, List, PaymentError, PaymentIntent, PaymentMethod,
    PaymentProvider, PaymentResult, Refund,
};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Page size used when walking the payment intent list
const LIST_PAGE_SIZE: u32 = 100;

/// Stripe API client
pub struct StripeClient {
    config: StripeConfig,
    client: Client,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// `{api_base_url}/v1/{segments}`, each segment percent-encoded on its own.
    ///
    /// Ids come straight from request paths, so a segment can never add,
    /// climb out of, or query another resource.
    fn endpoint(&self, segments: &[&str]) -> PaymentResult<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(PaymentError::InvalidRequest(format!(
                "Invalid identifier: {:?}",
                bad
            )));
        }

        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            PaymentError::Configuration(format!("Invalid Stripe API base URL: {}", e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                PaymentError::Configuration(format!(
                    "Stripe API base URL cannot have a path: {}",
                    self.config.api_base_url
                ))
            })?
            .pop_if_empty()
            .push("v1")
            .extend(segments);

        Ok(url)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        form_params: &[(String, String)],
    ) -> PaymentResult<T> {
        let request = self.client.post(self.endpoint(segments)?).form(form_params);
        self.send(request).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(String, String)],
    ) -> PaymentResult<T> {
        let request = self.client.get(self.endpoint(segments)?).query(query);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> PaymentResult<T> {
        let response = request
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);
            return Err(provider_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    #[instrument(skip(self, email))]
    async fn create_customer(&self, email: &str) -> PaymentResult<Customer> {
        let form_params = vec![("email".to_string(), email.to_string())];
        let customer: Customer = self.post(&["customers"], &form_params).await?;

        info!("Created Stripe customer: id={}", customer.id);
        Ok(customer)
    }

    #[instrument(skip(self, token))]
    async fn create_card_payment_method(&self, token: &str) -> PaymentResult<PaymentMethod> {
        let form_params = vec![
            ("type".to_string(), "card".to_string()),
            ("card[token]".to_string(), token.to_string()),
        ];
        let method: PaymentMethod = self.post(&["payment_methods"], &form_params).await?;

        debug!("Created Stripe payment method: id={}", method.id);
        Ok(method)
    }

    #[instrument(skip(self))]
    async fn attach_payment_method(
        &self,
        payment_method_id: &str,
        customer_id: &str,
    ) -> PaymentResult<PaymentMethod> {
        let form_params = vec![("customer".to_string(), customer_id.to_string())];
        self.post(
            &["payment_methods", payment_method_id, "attach"],
            &form_params,
        )
        .await
    }

    #[instrument(skip(self, params), fields(customer = %params.customer, amount = params.price.amount))]
    async fn create_payment_intent(
        &self,
        params: &CreatePaymentIntent,
    ) -> PaymentResult<PaymentIntent> {
        let intent: PaymentIntent = self
            .post(&["payment_intents"], &intent_form(params))
            .await?;

        info!(
            "Created Stripe payment intent: id={}, status={}",
            intent.id, intent.status
        );
        Ok(intent)
    }

    #[instrument(skip(self))]
    async fn confirm_payment_intent(
        &self,
        intent_id: &str,
        return_url: &str,
    ) -> PaymentResult<PaymentIntent> {
        let form_params = vec![("return_url".to_string(), return_url.to_string())];
        self.post(&["payment_intents", intent_id, "confirm"], &form_params)
            .await
    }

    #[instrument(skip(self))]
    async fn capture_payment_intent(&self, intent_id: &str) -> PaymentResult<PaymentIntent> {
        self.post(&["payment_intents", intent_id, "capture"], &[])
            .await
    }

    #[instrument(skip(self))]
    async fn retrieve_payment_intent(&self, intent_id: &str) -> PaymentResult<PaymentIntent> {
        self.get(&["payment_intents", intent_id], &[]).await
    }

    #[instrument(skip(self))]
    async fn create_refund(&self, payment_intent_id: &str) -> PaymentResult<Refund> {
        let form_params = vec![(
            "payment_intent".to_string(),
            payment_intent_id.to_string(),
        )];
        let refund: Refund = self.post(&["refunds"], &form_params).await?;

        info!("Created Stripe refund: id={}", refund.id);
        Ok(refund)
    }

    #[instrument(skip(self))]
    async fn list_payment_intents(&self) -> PaymentResult<Vec<PaymentIntent>> {
        let mut intents = Vec::new();
        let mut starting_after: Option<String> = None;

        loop {
            let mut query = vec![("limit".to_string(), LIST_PAGE_SIZE.to_string())];
            if let Some(ref cursor) = starting_after {
                query.push(("starting_after".to_string(), cursor.clone()));
            }

            let page: List<PaymentIntent> = self.get(&["payment_intents"], &query).await?;
            debug!("Fetched {} payment intents (has_more={})", page.data.len(), page.has_more);

            let has_more = page.has_more;
            starting_after = page.data.last().map(|intent| intent.id.clone());
            intents.extend(page.data);

            if !has_more || starting_after.is_none() {
                break;
            }
        }

        Ok(intents)
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

/// Build form data for `POST /v1/payment_intents`
fn intent_form(params: &CreatePaymentIntent) -> Vec<(String, String)> {
    let mut form_params = vec![
        ("amount".to_string(), params.price.amount.to_string()),
        ("currency".to_string(), params.price.currency.as_str().to_string()),
        ("customer".to_string(), params.customer.clone()),
        ("payment_method".to_string(), params.payment_method.clone()),
        (
            "confirmation_method".to_string(),
            params.confirmation_method.as_str().to_string(),
        ),
        ("use_stripe_sdk".to_string(), params.use_stripe_sdk.to_string()),
        ("confirm".to_string(), params.confirm.to_string()),
    ];

    if let Some(ref description) = params.description {
        form_params.push(("description".to_string(), description.clone()));
    }

    form_params
}

/// Map a non-2xx Stripe response onto a provider error carrying its status
fn provider_error(status: u16, body: &str) -> PaymentError {
    let message = match serde_json::from_str::<StripeErrorResponse>(body) {
        Ok(StripeErrorResponse {
            error:
                StripeError {
                    message: Some(message),
                    ..
                },
        }) => message,
        Ok(StripeErrorResponse { error }) => {
            let kind = error.code.or(error.error_type).unwrap_or_default();
            format!("HTTP {}: {}", status, kind)
        }
        Err(_) => format!("HTTP {}: {}", status, body),
    };

    PaymentError::Provider {
        status: Some(status),
        message,
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
}
