use crate::api::{ChatMessage, ChatRequest, ChatResponse};
use crate::core::error::{ChatError, ChatResult};
use crate::core::message::Message;
use crate::core::params::GenerationParams;
use crate::utils::url::api_url;
use tracing::debug;

/// Outbound message list: the system prompt (when not blank) followed by the
/// transcript in order, each reduced to role and content.
pub fn build_api_messages(params: &GenerationParams, transcript: &[Message]) -> Vec<ChatMessage> {
    let system = params.system_message();
    system
        .iter()
        .chain(transcript.iter())
        .map(ChatMessage::from)
        .collect()
}

/// Pull the assistant reply out of a completion response.
pub fn extract_reply(response: ChatResponse) -> ChatResult<Message> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(Message::assistant)
        .ok_or(ChatError::EmptyResponse)
}

pub async fn complete(
    client: &reqwest::Client,
    base_url: &str,
    model: &str,
    transcript: &[Message],
    params: &GenerationParams,
) -> ChatResult<Message> {
    let request = ChatRequest {
        model: model.to_string(),
        messages: build_api_messages(params, transcript),
        temperature: params.temperature(),
        max_tokens: params.max_tokens(),
    };

    let chat_url = api_url(base_url, "chat/completions");
    debug!(
        url = %chat_url,
        model,
        messages = request.messages.len(),
        "sending completion request"
    );

    let response = client
        .post(chat_url)
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await
        .map_err(|err| ChatError::Connection(err.to_string()))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        debug!(status, "completion request rejected");
        return Err(ChatError::Http { status, body });
    }

    let body = response.text().await?;
    let parsed: ChatResponse = serde_json::from_str(&body).map_err(|err| {
        debug!(error = %err, "completion body did not decode");
        ChatError::EmptyResponse
    })?;
    extract_reply(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{closed_port_url, CannedResponse, TestServer};
    use serde_json::json;

    fn transcript() -> Vec<Message> {
        vec![
            Message::user("What is a slice?"),
            Message::assistant("A view into a contiguous sequence."),
            Message::user("And a Vec?"),
        ]
    }

    #[test]
    fn api_messages_prepend_trimmed_system_prompt() {
        let params = GenerationParams::new(0.7, 1000, "  Be concise.  ");
        let messages = build_api_messages(&params, &transcript());
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "Be concise.");
        assert_eq!(messages[3].role, "user");
        assert_eq!(messages[3].content, "And a Vec?");
    }

    #[test]
    fn api_messages_skip_blank_system_prompt() {
        let params = GenerationParams::new(0.7, 1000, "   ");
        let messages = build_api_messages(&params, &transcript());
        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "assistant", "user"]);
    }

    #[tokio::test]
    async fn complete_posts_parameters_and_reads_first_choice() {
        let server = TestServer::start(vec![CannedResponse::ok_json(json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "A growable buffer."}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }))])
        .await;

        let params = GenerationParams::new(1.2, 256, "Be concise.");
        let client = reqwest::Client::new();
        let reply = complete(&client, &server.base_url, "llama-chat", &transcript(), &params)
            .await
            .unwrap();
        assert_eq!(reply, Message::assistant("A growable buffer."));

        let captured = server.finish().await;
        assert!(captured[0]
            .request_line
            .starts_with("POST /v1/chat/completions "));
        let body = captured[0].json();
        assert_eq!(body["model"], "llama-chat");
        assert_eq!(body["max_tokens"], 256);
        assert!((body["temperature"].as_f64().unwrap() - 1.2).abs() < 1e-6);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], json!({"role": "system", "content": "Be concise."}));
        assert_eq!(messages[3], json!({"role": "user", "content": "And a Vec?"}));
    }

    #[tokio::test]
    async fn complete_surfaces_http_status_and_body() {
        let server = TestServer::start(vec![CannedResponse::status(
            500,
            "Internal Server Error",
            "server overloaded",
        )])
        .await;

        let client = reqwest::Client::new();
        let err = complete(
            &client,
            &server.base_url,
            "m",
            &transcript(),
            &GenerationParams::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            ChatError::Http { status: 500, ref body } if body == "server overloaded"
        ));
        server.finish().await;
    }

    #[tokio::test]
    async fn complete_treats_zero_choices_as_empty() {
        let server = TestServer::start(vec![CannedResponse::ok_json(json!({"choices": []}))]).await;

        let client = reqwest::Client::new();
        let err = complete(
            &client,
            &server.base_url,
            "m",
            &transcript(),
            &GenerationParams::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ChatError::EmptyResponse));
        server.finish().await;
    }

    #[tokio::test]
    async fn complete_treats_malformed_body_as_empty() {
        let server = TestServer::start(vec![CannedResponse::status(200, "OK", "<html>")]).await;

        let client = reqwest::Client::new();
        let err = complete(
            &client,
            &server.base_url,
            "m",
            &transcript(),
            &GenerationParams::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ChatError::EmptyResponse));
        server.finish().await;
    }

    #[tokio::test]
    async fn complete_reports_unreachable_server() {
        let client = reqwest::Client::new();
        let err = complete(
            &client,
            &closed_port_url().await,
            "m",
            &transcript(),
            &GenerationParams::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ChatError::Connection(_)));
    }

    #[test]
    fn choice_without_content_is_empty() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(matches!(extract_reply(response), Err(ChatError::EmptyResponse)));
    }
}
