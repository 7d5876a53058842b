//! Registration API adapter. Implements RegistrationGateway: encodes the
//! business profile as a multipart payload and POSTs it with a bearer token.
//!
//! Wire rules: list fields are JSON-stringified (empty list ⇒ `"[]"`),
//! booleans coerce to `"true"`/`"false"`, the image is a binary part appended
//! only when attached.

use crate::domain::{BusinessProfile, DomainError};
use crate::ports::RegistrationGateway;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, warn};

const GENERIC_SUBMIT_FAILURE: &str = "Vendor registration failed";

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct RegistrationApi {
    client: Client,
    api_base: String,
}

impl RegistrationApi {
    pub fn new(client: Client, api_base: String) -> Self {
        Self { client, api_base }
    }
}

/// Text fields of the multipart payload, in wire order. The binary image is
/// not included here; list fields come pre-JSON-encoded.
pub(crate) fn profile_fields(p: &BusinessProfile) -> Vec<(&'static str, String)> {
    let json_list = |list: &[String]| serde_json::to_string(list).unwrap_or_else(|_| "[]".into());
    vec![
        ("name", p.name.clone()),
        ("mobile", p.mobile.clone()),
        ("status", p.status.clone()),
        ("rating", p.rating.clone()),
        ("chargeType", p.charge_type.clone()),
        ("fixedCharge", p.fixed_charge.clone()),
        ("dynamicCharge", p.dynamic_charge.clone()),
        ("storeCharge", p.store_charge.clone()),
        ("deliveryRadius", p.delivery_radius.clone()),
        ("minimumOrder", p.minimum_order.clone()),
        ("commissionRate", p.commission_rate.clone()),
        ("bankName", p.bank_name.clone()),
        ("bankCode", p.bank_code.clone()),
        ("recipientName", p.recipient_name.clone()),
        ("accountNumber", p.account_number.clone()),
        ("paypalId", p.paypal_id.clone()),
        ("upiId", p.upi_id.clone()),
        ("addressSearch", p.address_search.clone()),
        ("fullAddress", p.full_address.clone()),
        ("pincode", p.pincode.clone()),
        ("landmark", p.landmark.clone()),
        ("latitude", p.latitude.clone()),
        ("longitude", p.longitude.clone()),
        ("city", p.city.clone()),
        ("state", p.state.clone()),
        ("mapMode", p.map_mode.clone()),
        ("email", p.email.clone()),
        ("password", p.password.clone()),
        ("categories", json_list(&p.categories)),
        ("tags", json_list(&p.tags)),
        ("pureVeg", p.pure_veg.to_string()),
        ("popular", p.popular.to_string()),
    ]
}

fn build_form(profile: &BusinessProfile) -> Form {
    let mut form = Form::new();
    if let Some(image) = &profile.image {
        form = form.part(
            "restaurantImage",
            Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
        );
    }
    for (name, value) in profile_fields(profile) {
        form = form.text(name, value);
    }
    form
}

#[async_trait::async_trait]
impl RegistrationGateway for RegistrationApi {
    async fn register(&self, profile: &BusinessProfile, token: &str) -> Result<(), DomainError> {
        let url = format!("{}/api/vendor/register", self.api_base);
        debug!(
            %url,
            has_image = profile.image.is_some(),
            fields = profile_fields(profile).len(),
            "submitting vendor registration"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .multipart(build_form(profile))
            .send()
            .await
            .map_err(|e| DomainError::Registration(format!("Submission request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| GENERIC_SUBMIT_FAILURE.to_string());
            warn!(%status, "registration rejected");
            return Err(DomainError::Registration(message));
        }

        Ok(())
    }
}
