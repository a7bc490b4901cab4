//! HTTP revenue adjustment via a chat-completion endpoint.
//!
//! The adjuster asks a language-model service to refine per-venue revenue
//! estimates from fan density and geographic clustering. It is strictly
//! best-effort: a missing key, transport error, non-success status, or a
//! response that is not the expected JSON all degrade to "no adjustment" —
//! the caller always gets a usable revenue map back.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::algorithms::VenueMap;
use crate::config::AdjusterSettings;
use crate::models::VenueId;

use super::revenue::RevenueAdjuster;

const SYSTEM_PROMPT: &str = "You are a tour optimization assistant. \
    Adjust venue revenue estimates based on fan density and geographic clustering. \
    Return JSON only.";

/// Revenue adjuster backed by an OpenAI-compatible chat-completion API.
pub struct ChatCompletionAdjuster {
    client: reqwest::Client,
    settings: AdjusterSettings,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Expected shape of the model's JSON answer.
#[derive(Debug, Deserialize)]
struct AdjustmentResponse {
    venue_adjustments: Vec<VenueAdjustment>,
}

/// One multiplier, advisory range 0.5 to 1.5 (not enforced).
#[derive(Debug, Deserialize)]
struct VenueAdjustment {
    venue_id: VenueId,
    #[serde(default = "default_multiplier")]
    revenue_multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

#[derive(Serialize)]
struct VenuePayload {
    venue_id: VenueId,
    city: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    base_revenue: f64,
}

impl ChatCompletionAdjuster {
    pub fn new(settings: AdjusterSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self { client, settings })
    }

    async fn request_adjustments(
        &self,
        revenue_by_venue: &HashMap<VenueId, Decimal>,
        venues: &VenueMap,
    ) -> anyhow::Result<Vec<VenueAdjustment>> {
        let api_key = std::env::var(&self.settings.api_key_env)?;

        let mut payload: Vec<VenuePayload> = revenue_by_venue
            .iter()
            .filter_map(|(venue_id, revenue)| {
                let venue = venues.get(venue_id)?;
                Some(VenuePayload {
                    venue_id: *venue_id,
                    city: venue.city.clone(),
                    latitude: venue.latitude,
                    longitude: venue.longitude,
                    base_revenue: revenue.to_f64().unwrap_or(0.0),
                })
            })
            .collect();
        payload.sort_by_key(|entry| entry.venue_id);

        let user_prompt = format!(
            "Given the venues list, return a JSON object with a \"venue_adjustments\" array. \
             Each item should include venue_id and revenue_multiplier (0.5 to 1.5).\nVenues: {}",
            serde_json::to_string(&payload)?
        );

        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.settings.temperature,
        };

        let response: ChatResponse = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| anyhow::anyhow!("chat response carried no content"))?;

        Ok(parse_adjustments(&content)?)
    }
}

#[async_trait]
impl RevenueAdjuster for ChatCompletionAdjuster {
    async fn adjust(
        &self,
        revenue_by_venue: HashMap<VenueId, Decimal>,
        venues: &VenueMap,
    ) -> HashMap<VenueId, Decimal> {
        match self.request_adjustments(&revenue_by_venue, venues).await {
            Ok(adjustments) => apply_adjustments(revenue_by_venue, &adjustments),
            Err(e) => {
                warn!("revenue adjustment unavailable, using base estimates: {e}");
                revenue_by_venue
            }
        }
    }
}

fn parse_adjustments(content: &str) -> serde_json::Result<Vec<VenueAdjustment>> {
    serde_json::from_str::<AdjustmentResponse>(content).map(|r| r.venue_adjustments)
}

/// Multiplies each venue's revenue by its matched multiplier; venues without
/// one keep their base estimate.
fn apply_adjustments(
    revenue_by_venue: HashMap<VenueId, Decimal>,
    adjustments: &[VenueAdjustment],
) -> HashMap<VenueId, Decimal> {
    let multipliers: HashMap<VenueId, f64> = adjustments
        .iter()
        .map(|a| (a.venue_id, a.revenue_multiplier))
        .collect();

    revenue_by_venue
        .into_iter()
        .map(|(venue_id, revenue)| {
            let factor = multipliers
                .get(&venue_id)
                .and_then(|&m| Decimal::from_f64_retain(m))
                .unwrap_or(Decimal::ONE);
            (venue_id, revenue * factor)
        })
        .collect()
}
