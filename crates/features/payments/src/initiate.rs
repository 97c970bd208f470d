use crate::Payments;
use crate::error::PaymentError;
use crate::gateway::GatewayOutcome;
use crate::models::{InitiatePaymentRequest, InitiatePaymentResponse};
use crate::normalize::{mask_account, normalize_phone};
use gc_domain::constants::REGISTRATION_TABLE;
use gc_domain::network::MobileNetwork;
use gc_kernel::reference::payment_reference;
use gc_kernel::security::resource::ResourceGuard;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

const MISSING_FIELDS: &str = "Missing required fields: accountNumber, amount, network";

/// A request that passed validation.
struct Validated {
    account_number: String,
    amount: Decimal,
    network: MobileNetwork,
}

fn validate(req: &InitiatePaymentRequest) -> Result<Validated, PaymentError> {
    let missing = || PaymentError::Validation { message: MISSING_FIELDS.into(), context: None };

    let account_number =
        req.account_number.as_deref().and_then(normalize_phone).ok_or_else(missing)?;
    let amount = req.amount.ok_or_else(missing)?;
    let network = req
        .network
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(missing)?;

    if amount <= Decimal::ZERO {
        return Err(PaymentError::Validation {
            message: "amount must be greater than zero".into(),
            context: None,
        });
    }
    let network = network.parse::<MobileNetwork>().map_err(|e| PaymentError::Validation {
        message: format!("Unsupported network: {}", e.0).into(),
        context: None,
    })?;

    Ok(Validated { account_number, amount, network })
}

impl Payments {
    /// Mints a reference, optionally attaches it to a pending registration, then asks the
    /// gateway to prompt the payer.
    ///
    /// Gateway rejections are not errors: they come back as `success: false`.
    ///
    /// # Errors
    /// [`PaymentError::Validation`] for incomplete requests, and registration errors when
    /// `registrationId` is unknown or no longer `pending`. The gateway is not called in
    /// either case.
    #[instrument(skip_all, fields(network = ?req.network))]
    pub async fn initiate(
        &self,
        req: InitiatePaymentRequest,
    ) -> Result<InitiatePaymentResponse, PaymentError> {
        let Validated { account_number, amount, network } = validate(&req)?;
        let reference = payment_reference();

        info!(
            account = %mask_account(&account_number),
            %amount,
            %network,
            %reference,
            "Processing payment"
        );

        if let Some(id) = req.registration_id.as_deref() {
            let key = ResourceGuard::key(id, REGISTRATION_TABLE)?;
            self.registrations.record_reference(&key, &reference).await?;
        }

        let request =
            self.gateway.request(account_number, amount, req.narration.as_deref(), network);
        Ok(match self.gateway.initiate(&request).await {
            GatewayOutcome::Accepted { message, transaction_id } => {
                info!(%reference, transaction_id = ?transaction_id, "Payment prompt accepted");
                InitiatePaymentResponse::accepted(message, transaction_id, reference)
            },
            GatewayOutcome::Rejected { error } => {
                warn!(%reference, %error, "Payment prompt rejected");
                InitiatePaymentResponse::failure(error, Some(reference))
            },
        })
    }
}
