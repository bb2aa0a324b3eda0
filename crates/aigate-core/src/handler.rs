use aigate_protocol::aiml::chat_completions::{ChatCompletionsRequest, ChatCompletionsResponse};
use aigate_protocol::client::chat::{ChatMessage, ChatRequest};
use aigate_protocol::client::conversations::{
    AppendMessageAck, AppendMessageRequest, Conversation, ConversationDetail, ConversationList,
    CreateConversationRequest, CreateConversationResponse, DeleteConversationAck,
};
use aigate_protocol::client::health::{HealthResponse, HealthServices, ServiceStatus};
use aigate_protocol::client::images::{ImageEnvelope, ImageRequest};
use aigate_protocol::client::search::{SearchRequest, SearchResponse, SearchSource};
use aigate_protocol::client::auth::AuthRequest;
use aigate_protocol::serper;
use aigate_provider_core::{CallContext, ProviderRequest, ProviderResponse, StreamBody};
use aigate_storage::StoredMessage;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::{HeaderValue, CACHE_CONTROL, CONNECTION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;

use crate::core::AppState;
use crate::error::{map_provider_error, GatewayError, Service};
use crate::middleware::client_addr;
use crate::models::{resolve_chat_model, resolve_image_model, ImageFamily};
use crate::sanitize::sanitize;

pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let Json(req) = payload.map_err(reject)?;
    let provider = state.provider("aiml")?;
    if !provider.configured() {
        return Err(GatewayError::MissingApiKey {
            service: Service::Chat,
            env_key: "AIML_API_KEY",
        });
    }

    let messages = req
        .messages
        .into_iter()
        .map(|message| ChatMessage {
            role: message.role,
            content: sanitize(&message.content),
        })
        .collect();
    let body = ChatCompletionsRequest {
        model: resolve_chat_model(&req.model).to_string(),
        messages,
        stream: req.stream,
        temperature: 0.7,
        max_tokens: 4000,
    };

    let request = if req.stream {
        ProviderRequest::ChatCompletionsStream(body)
    } else {
        ProviderRequest::ChatCompletions(body)
    };
    match provider.call(request, call_context(&headers)).await {
        Ok(ProviderResponse::Json { body, .. }) => {
            let completion: ChatCompletionsResponse =
                serde_json::from_slice(&body).map_err(|err| {
                    warn!(error = %err, "unexpected chat completion shape");
                    GatewayError::Upstream {
                        service: Service::Chat,
                        status: None,
                    }
                })?;
            Ok(Json(completion).into_response())
        }
        Ok(ProviderResponse::Stream { body, .. }) => Ok(stream_response(body)),
        Err(err) => Err(map_provider_error(Service::Chat, err)),
    }
}

pub async fn images(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let Json(req) = payload.map_err(reject)?;
    let Some((family, model_id)) = resolve_image_model(&req.model) else {
        return Err(GatewayError::InvalidInput("Invalid model".to_string()));
    };
    let provider = state.provider(family.provider_name())?;
    if !provider.configured() {
        return Err(GatewayError::MissingApiKey {
            service: Service::Image,
            env_key: match family {
                ImageFamily::Aiml => "AIML_API_KEY",
                ImageFamily::Luma => "LUMA_API_KEY",
            },
        });
    }

    let request = ProviderRequest::ImageGeneration {
        model: model_id.to_string(),
        prompt: sanitize(&req.prompt),
        aspect_ratio: req.aspect_ratio,
    };
    match provider.call(request, call_context(&headers)).await {
        Ok(ProviderResponse::Json { body, .. }) => {
            let envelope: ImageEnvelope = serde_json::from_slice(&body).map_err(|err| {
                warn!(error = %err, "unexpected image generation shape");
                GatewayError::Upstream {
                    service: Service::Image,
                    status: None,
                }
            })?;
            Ok(Json(envelope).into_response())
        }
        Ok(ProviderResponse::Stream { .. }) => Err(GatewayError::Internal),
        Err(err) => Err(map_provider_error(Service::Image, err)),
    }
}

pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let Json(req) = payload.map_err(reject)?;
    let synthesis = state.provider("aiml")?;
    if !synthesis.configured() {
        return Err(GatewayError::MissingApiKey {
            service: Service::Search,
            env_key: "AIML_API_KEY",
        });
    }

    let query = sanitize(&req.query);
    let ctx = call_context(&headers);
    let hits = fetch_search_results(&state, &query, ctx.clone()).await;
    let sources: Vec<SearchSource> = hits
        .iter()
        .take(3)
        .map(|hit| SearchSource {
            title: hit.title.clone(),
            url: hit.link.clone(),
            description: hit.snippet.clone(),
        })
        .collect();

    let request = ProviderRequest::ChatCompletions(synthesis_request(&query, &hits));
    match synthesis.call(request, ctx).await {
        Ok(ProviderResponse::Json { body, .. }) => {
            let completion: ChatCompletionsResponse =
                serde_json::from_slice(&body).map_err(|err| {
                    warn!(error = %err, "unexpected synthesis shape");
                    GatewayError::Upstream {
                        service: Service::Search,
                        status: None,
                    }
                })?;
            let content = completion.first_content().unwrap_or_default();
            if content.is_empty() {
                return Err(GatewayError::NoResults);
            }
            Ok(Json(SearchResponse {
                synthesized_response: content.to_string(),
                related_questions: related_questions(&query),
                query,
                sources,
            })
            .into_response())
        }
        Ok(ProviderResponse::Stream { .. }) => Err(GatewayError::Internal),
        Err(err) => Err(map_provider_error(Service::Search, err)),
    }
}

pub async fn voice() -> Response {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({
            "error": "Not implemented",
            "message": "Voice synthesis is not available yet."
        })),
    )
        .into_response()
}

pub async fn auth(
    State(state): State<AppState>,
    Path(action): Path<String>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let Json(req) = payload.map_err(reject)?;
    let email = sanitize(req.email.as_deref().unwrap_or_default());
    match action.as_str() {
        "register" => {
            let full_name = req.full_name.as_deref().map(sanitize);
            Ok(Json(state.auth.register(email, full_name).await).into_response())
        }
        "login" => Ok(Json(state.auth.login(email).await).into_response()),
        "reset-password" => Ok(Json(state.auth.reset_password(email).await).into_response()),
        _ => Err(GatewayError::NotFound),
    }
}

pub async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<ConversationList>, GatewayError> {
    let records = state
        .conversations
        .list()
        .await
        .map_err(|_| GatewayError::Internal)?;
    Ok(Json(ConversationList {
        conversations: records
            .into_iter()
            .map(|record| Conversation {
                id: record.id,
                title: record.title,
            })
            .collect(),
    }))
}

pub async fn create_conversation(
    State(state): State<AppState>,
    payload: Option<Json<CreateConversationRequest>>,
) -> Result<Json<CreateConversationResponse>, GatewayError> {
    let title = payload.and_then(|Json(req)| req.title);
    let id = state
        .conversations
        .create(title)
        .await
        .map_err(|_| GatewayError::Internal)?;
    Ok(Json(CreateConversationResponse { conversation_id: id }))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationDetail>, GatewayError> {
    let record = state
        .conversations
        .get(&id)
        .await
        .map_err(|_| GatewayError::Internal)?;
    // Unknown ids echo an empty conversation, matching the stub contract.
    let detail = match record {
        Some(record) => ConversationDetail {
            conversation: Conversation {
                id: record.id,
                title: record.title,
            },
            messages: record
                .messages
                .into_iter()
                .map(|message| ChatMessage {
                    role: message.role,
                    content: message.content,
                })
                .collect(),
        },
        None => ConversationDetail {
            conversation: Conversation { id, title: None },
            messages: Vec::new(),
        },
    };
    Ok(Json(detail))
}

pub async fn append_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AppendMessageRequest>, JsonRejection>,
) -> Result<Json<AppendMessageAck>, GatewayError> {
    let Json(req) = payload.map_err(reject)?;
    state
        .conversations
        .append(
            &id,
            StoredMessage {
                role: req.message.role,
                content: sanitize(&req.message.content),
            },
        )
        .await
        .map_err(|_| GatewayError::Internal)?;
    Ok(Json(AppendMessageAck { ok: true }))
}

pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteConversationAck>, GatewayError> {
    let deleted = state
        .conversations
        .delete(&id)
        .await
        .map_err(|_| GatewayError::Internal)?;
    Ok(Json(DeleteConversationAck { deleted }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let configured =
        |name: &str| (state.lookup)(name).map(|p| p.configured()).unwrap_or(false);
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default(),
        services: HealthServices {
            api: ServiceStatus::Operational,
            aiml: ServiceStatus::from_configured(configured("aiml")),
            luma: ServiceStatus::from_configured(configured("luma")),
            serper: ServiceStatus::from_configured(configured("serper")),
        },
    })
}

pub async fn not_found() -> GatewayError {
    GatewayError::NotFound
}

fn reject(rejection: JsonRejection) -> GatewayError {
    GatewayError::InvalidInput(rejection.body_text())
}

fn call_context(headers: &HeaderMap) -> CallContext {
    CallContext {
        request_id: headers
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string()),
        client_addr: Some(client_addr(headers)),
    }
}

fn stream_response(body: StreamBody) -> Response {
    let mut response = Response::new(Body::from_stream(body.stream));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(body.content_type));
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
        .headers_mut()
        .insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    response
}

/// Best-effort snippet fetch; any failure degrades to an empty result set
/// and the synthesis step proceeds without citations.
async fn fetch_search_results(
    state: &AppState,
    query: &str,
    ctx: CallContext,
) -> Vec<serper::search::OrganicResult> {
    let Some(provider) = (state.lookup)("serper") else {
        return Vec::new();
    };
    if !provider.configured() {
        return Vec::new();
    }
    let request = ProviderRequest::WebSearch {
        query: query.to_string(),
        num: 5,
    };
    match provider.call(request, ctx).await {
        Ok(ProviderResponse::Json { body, .. }) => {
            match serde_json::from_slice::<serper::search::SearchResponse>(&body) {
                Ok(results) => results.organic.into_iter().take(5).collect(),
                Err(err) => {
                    warn!(error = %err, "undecodable search results, continuing without");
                    Vec::new()
                }
            }
        }
        Ok(ProviderResponse::Stream { .. }) => Vec::new(),
        Err(err) => {
            warn!(error = %err, "web search failed, continuing without results");
            Vec::new()
        }
    }
}

const SEARCH_SYSTEM_PROMPT: &str = r#"You are an advanced AI search assistant that provides comprehensive, well-researched answers by searching the web and synthesizing information from multiple sources. Your goal is to deliver accurate, up-to-date, and thoroughly cited responses.

RESPONSE STRUCTURE:
- **Direct Answer**: Start with a clear, concise answer to the user's question
- **Detailed Explanation**: Provide comprehensive context and background with inline citations [1], [2], etc.
- **Recent Developments**: Highlight any recent changes or updates when relevant
- **Additional Context**: Add relevant background information that enhances understanding

CITATION REQUIREMENTS:
- Cite factual claims with numbered references [1], [2], etc. when sources are available
- Use inline citations throughout the text, not just at the end
- When provided with search results, reference them appropriately
- Distinguish between different types of sources and their credibility

QUALITY STANDARDS:
- Verify information across multiple sources when available
- Use clear, accessible language while maintaining precision
- Structure information logically with smooth transitions
- Present multiple perspectives on controversial topics
- Acknowledge uncertainty when information is limited

Your goal is to be the most reliable, comprehensive, and transparent search assistant possible. Always prioritize accuracy and proper attribution."#;

fn synthesis_request(
    query: &str,
    hits: &[serper::search::OrganicResult],
) -> ChatCompletionsRequest {
    let mut context = format!("Search and provide comprehensive information about: {query}");
    if !hits.is_empty() {
        context.push_str("\n\nHere are the latest search results to help inform your response:\n\n");
        for (index, hit) in hits.iter().enumerate() {
            context.push_str(&format!(
                "{}. **{}**\n   {}\n   Source: {}\n\n",
                index + 1,
                hit.title,
                hit.snippet,
                hit.link
            ));
        }
    }
    ChatCompletionsRequest {
        model: crate::models::SYNTHESIS_MODEL.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: SEARCH_SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: context,
            },
        ],
        stream: false,
        temperature: 0.7,
        max_tokens: 2000,
    }
}

fn related_questions(query: &str) -> Vec<String> {
    vec![
        format!("What are the latest developments in {query}?"),
        format!("How does {query} work?"),
        format!("What are the benefits of {query}?"),
        format!("What are the current trends regarding {query}?"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesis_interpolates_snippets_into_user_turn() {
        let hits = vec![serper::search::OrganicResult {
            title: "Rust".to_string(),
            snippet: "A systems language".to_string(),
            link: "https://rust-lang.org".to_string(),
        }];
        let request = synthesis_request("rust", &hits);
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        let user_turn = &request.messages[1].content;
        assert!(user_turn.contains("1. **Rust**"));
        assert!(user_turn.contains("Source: https://rust-lang.org"));
    }

    #[test]
    fn synthesis_without_hits_skips_results_block() {
        let request = synthesis_request("rust", &[]);
        assert!(!request.messages[1].content.contains("search results"));
    }

    #[test]
    fn related_questions_derive_from_query() {
        let questions = related_questions("rust");
        assert_eq!(questions.len(), 4);
        assert!(questions.iter().all(|q| q.contains("rust")));
    }
}
