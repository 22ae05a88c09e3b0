//! Sub-commands, one per client operation.

use anyhow::Context;
use clap::Subcommand;
use omise_sdk::config::PollingConfig;
use omise_sdk::objects::{CardDetails, CreateSourcePayload, PaymentInformation, SourceType};
use omise_sdk::{Client, PollOutcome};
use serde::Serialize;
use std::time::Duration;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the account capability
    Capability,

    /// Fetch a token by id
    Token { id: String },

    /// Tokenize a card on the vault
    CreateToken {
        #[arg(long)]
        name: String,
        #[arg(long)]
        number: String,
        #[arg(long)]
        expiration_month: u8,
        #[arg(long)]
        expiration_year: u16,
        #[arg(long)]
        security_code: String,
    },

    /// Create a payment source
    CreateSource {
        /// Amount in minor currency units
        #[arg(long)]
        amount: i64,
        #[arg(long)]
        currency: String,
        /// Source type, e.g. `promptpay` or `installment_bay`
        #[arg(long = "type")]
        source_type: String,
        /// Type specific fields as a JSON object, e.g. '{"bank":"cimb"}'
        #[arg(long)]
        details: Option<String>,
        /// Fetch the capability first and warn if it does not list this source
        #[arg(long, default_value = "false")]
        check: bool,
    },

    /// Poll a token until its charge status is final
    Observe {
        token_id: String,
        #[arg(long)]
        max_attempts: Option<u32>,
        #[arg(long)]
        interval_secs: Option<u64>,
    },

    /// List the installment terms allowed for a source type
    InstallmentTerms {
        source_type: String,
        /// Refresh the capability first instead of using the built-in table
        #[arg(long, default_value = "false")]
        refresh: bool,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build the type-specific part of a source from the command line.
fn payment_information(
    source_type: &str,
    details: Option<&str>,
) -> anyhow::Result<PaymentInformation> {
    let mut fields = match details {
        Some(json) => serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(json)
            .context("--details must be a JSON object")?,
        None => serde_json::Map::new(),
    };
    fields.insert(
        "type".to_string(),
        serde_json::Value::String(source_type.to_string()),
    );
    let information = PaymentInformation::from_fields(fields)?;
    let source_type = information.source_type();
    if source_type.requires_additional_details()
        && matches!(information, PaymentInformation::Other(_))
    {
        tracing::warn!(%source_type, "Source type needs details that were missing or invalid");
    }
    Ok(information)
}

pub async fn run(client: &Client, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Capability => print_json(&client.capability().await?),
        Command::Token { id } => print_json(&client.token(&id).await?),
        Command::CreateToken {
            name,
            number,
            expiration_month,
            expiration_year,
            security_code,
        } => {
            let card = CardDetails::new(
                name,
                number,
                expiration_month,
                expiration_year,
                security_code,
            );
            tracing::info!(card = ?card, "Creating token");
            print_json(&client.create_token(card).await?)
        }
        Command::CreateSource {
            amount,
            currency,
            source_type,
            details,
            check,
        } => {
            let payload = CreateSourcePayload::new(
                amount,
                currency,
                payment_information(&source_type, details.as_deref())?,
            );
            if check && !client.capability().await?.supports(&payload) {
                tracing::warn!(
                    source_type = %payload.details().source_type(),
                    currency = payload.currency(),
                    "The account capability does not advertise this source"
                );
            }
            print_json(&client.create_source(&payload).await?)
        }
        Command::Observe {
            token_id,
            max_attempts,
            interval_secs,
        } => {
            let defaults = client.config().polling;
            let polling = PollingConfig::new(
                max_attempts.unwrap_or(defaults.max_attempts()),
                interval_secs.map(Duration::from_secs).unwrap_or(defaults.interval),
            );
            let poller = client.charge_status_poller(token_id, polling);

            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, stopping charge status polling");
                    Ok(())
                }

                outcome = poller.run() => {
                    let exhausted = matches!(outcome, PollOutcome::Exhausted(_));
                    let status = outcome.into_result()?;
                    if exhausted {
                        tracing::warn!(?status, "Charge status is not final yet");
                    }
                    print_json(&status)
                }
            }
        }
        Command::InstallmentTerms {
            source_type,
            refresh,
        } => {
            let source_type = SourceType::from_wire(&source_type);
            if !source_type.is_installment() {
                anyhow::bail!("{source_type} is not an installment source type");
            }
            if refresh {
                client.capability().await?;
            }
            print_json(&client.installment_terms(&source_type))
        }
    }
}
