//! Tool handlers.
//!
//! Each tool parses its arguments, calls the service, and renders the
//! outcome as JSON text.

use serde::Deserialize;
use serde_json::{Value, json};

use wise_types::{
    AppError, Currency, PaymentsApi, ProfileType, RecipientId, SendMoneyRequest,
};

use super::protocol::{CallToolResult, JsonRpcError, ToolSchema};
use crate::WiseService;

pub const LIST_RECIPIENTS: &str = "list_recipients";
pub const FIND_RECIPIENT: &str = "find_recipient";
pub const SEND_MONEY: &str = "send_money";

/// Settings applied when a tool call leaves them out.
#[derive(Debug, Clone)]
pub struct ToolDefaults {
    pub profile_type: ProfileType,
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self {
            profile_type: ProfileType::Personal,
        }
    }
}

/// State shared by all tool invocations.
pub struct ToolState<A: PaymentsApi> {
    pub service: WiseService<A>,
    pub defaults: ToolDefaults,
}

/// Why a tool call could not produce a result.
#[derive(Debug)]
pub enum ToolError {
    /// Protocol-level problem, reported as a JSON-RPC error
    Protocol(JsonRpcError),
    /// The operation itself failed, reported as an `isError` tool result
    App(AppError),
}

impl From<AppError> for ToolError {
    fn from(err: AppError) -> Self {
        ToolError::App(err)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Schemas
// ─────────────────────────────────────────────────────────────────────────────

fn string_prop(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Schemas of every tool this server exposes.
pub fn tool_schemas() -> Vec<ToolSchema> {
    let profile_type = json!({
        "type": "string",
        "enum": ["personal", "business"],
        "description": "The type of profile to use (personal or business)"
    });

    vec![
        ToolSchema {
            name: LIST_RECIPIENTS.to_string(),
            description: "Returns all recipients of the current user's profile of the given type. \
                If the user has several profiles of that type, the first one is used."
                .to_string(),
            input_schema: object_schema(
                json!({
                    "profile_type": profile_type,
                    "currency": string_prop("Optional. Only return recipients in this currency (e.g. 'EUR', 'USD')"),
                }),
                &[],
            ),
        },
        ToolSchema {
            name: FIND_RECIPIENT.to_string(),
            description: "Finds the recipient whose name is most similar to the given name and \
                returns it together with a similarity score between 0 and 1."
                .to_string(),
            input_schema: object_schema(
                json!({
                    "name": string_prop("Name of the recipient to look for"),
                    "profile_type": profile_type,
                    "currency": string_prop("Optional. Only consider recipients in this currency"),
                }),
                &["name"],
            ),
        },
        ToolSchema {
            name: SEND_MONEY.to_string(),
            description: "Sends money to a recipient: creates a quote, creates a transfer, and \
                funds it from the balance. Reports completed, step_up_required (with a one-time \
                token to approve), or failed (with an error code)."
                .to_string(),
            input_schema: object_schema(
                json!({
                    "profile_type": profile_type,
                    "recipient_name": string_prop("Name of the recipient (informational)"),
                    "source_currency": string_prop("Source currency code (e.g. 'USD')"),
                    "source_amount": { "type": "number", "description": "Amount in the source currency to send" },
                    "target_currency": string_prop("Target currency code (e.g. 'EUR')"),
                    "recipient_id": string_prop("The ID of the recipient to send money to"),
                    "payment_reference": string_prop("Optional. Reference message for the transfer (defaults to 'money')"),
                    "source_of_funds": string_prop("Optional. Source of the funds (e.g. 'salary', 'savings')"),
                }),
                &["source_currency", "source_amount", "target_currency", "recipient_id"],
            ),
        },
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Arguments
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ListRecipientsArgs {
    #[serde(default)]
    profile_type: Option<String>,
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FindRecipientArgs {
    name: String,
    #[serde(default)]
    profile_type: Option<String>,
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendMoneyArgs {
    #[serde(default)]
    profile_type: Option<String>,
    #[serde(default)]
    recipient_name: Option<String>,
    source_currency: String,
    source_amount: f64,
    target_currency: String,
    recipient_id: RecipientId,
    #[serde(default)]
    payment_reference: Option<String>,
    #[serde(default)]
    source_of_funds: Option<String>,
}

fn parse_args<T: serde::de::DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| {
        ToolError::Protocol(JsonRpcError::invalid_params(format!(
            "Invalid arguments for {}: {}",
            tool, e
        )))
    })
}

fn profile_type_or(
    requested: Option<&str>,
    defaults: &ToolDefaults,
) -> Result<ProfileType, AppError> {
    match requested {
        Some(t) => Ok(t.parse()?),
        None => Ok(defaults.profile_type),
    }
}

fn render<T: serde::Serialize>(value: &T) -> Result<CallToolResult, ToolError> {
    serde_json::to_string_pretty(value)
        .map(CallToolResult::text)
        .map_err(|e| ToolError::Protocol(JsonRpcError::internal_error(e.to_string())))
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Runs the named tool.
///
/// Operation failures come back as `isError` results so the caller sees
/// the message; only unknown tools and malformed arguments are protocol
/// errors.
pub async fn call_tool<A: PaymentsApi>(
    state: &ToolState<A>,
    name: &str,
    args: Value,
) -> Result<CallToolResult, JsonRpcError> {
    let outcome = match name {
        LIST_RECIPIENTS => list_recipients(state, args).await,
        FIND_RECIPIENT => find_recipient(state, args).await,
        SEND_MONEY => send_money(state, args).await,
        other => Err(ToolError::Protocol(JsonRpcError::invalid_params(format!(
            "Unknown tool: {}",
            other
        )))),
    };

    match outcome {
        Ok(result) => Ok(result),
        Err(ToolError::App(err)) => {
            tracing::warn!(tool = name, error = %err, "Tool call failed");
            Ok(CallToolResult::error(err.to_string()))
        }
        Err(ToolError::Protocol(err)) => Err(err),
    }
}

#[tracing::instrument(skip(state, args))]
async fn list_recipients<A: PaymentsApi>(
    state: &ToolState<A>,
    args: Value,
) -> Result<CallToolResult, ToolError> {
    let args: ListRecipientsArgs = parse_args(LIST_RECIPIENTS, args)?;
    let profile_type = profile_type_or(args.profile_type.as_deref(), &state.defaults)?;
    let currency = args.currency.as_deref().map(Currency::new);

    let recipients = state
        .service
        .list_recipients(profile_type, currency)
        .await?;
    render(&recipients)
}

#[tracing::instrument(skip(state, args))]
async fn find_recipient<A: PaymentsApi>(
    state: &ToolState<A>,
    args: Value,
) -> Result<CallToolResult, ToolError> {
    let args: FindRecipientArgs = parse_args(FIND_RECIPIENT, args)?;
    let profile_type = profile_type_or(args.profile_type.as_deref(), &state.defaults)?;
    let currency = args.currency.as_deref().map(Currency::new);

    let found = state
        .service
        .find_recipient(profile_type, &args.name, currency)
        .await?;
    render(&found)
}

#[tracing::instrument(skip(state, args))]
async fn send_money<A: PaymentsApi>(
    state: &ToolState<A>,
    args: Value,
) -> Result<CallToolResult, ToolError> {
    let args: SendMoneyArgs = parse_args(SEND_MONEY, args)?;
    let profile_type = profile_type_or(args.profile_type.as_deref(), &state.defaults)?;
    tracing::info!(
        recipient_id = %args.recipient_id,
        recipient_name = args.recipient_name.as_deref().unwrap_or(""),
        "send_money requested"
    );

    let profile = state.service.resolve_profile(profile_type).await?;
    let result = state
        .service
        .send_money(SendMoneyRequest {
            profile_id: profile.id,
            source_currency: Currency::new(&args.source_currency),
            target_currency: Currency::new(&args.target_currency),
            source_amount: args.source_amount,
            recipient_id: args.recipient_id,
            reference: args.payment_reference,
            source_of_funds: args.source_of_funds,
            funding_method: None,
        })
        .await?;
    render(&result)
}
