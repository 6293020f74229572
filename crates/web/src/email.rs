use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailOutcome {
    pub success: bool,
    pub simulated: bool,
}

impl EmailOutcome {
    fn sent() -> Self {
        Self {
            success: true,
            simulated: false,
        }
    }

    fn simulated() -> Self {
        Self {
            success: true,
            simulated: true,
        }
    }

    fn failed() -> Self {
        Self {
            success: false,
            simulated: false,
        }
    }
}

/// Outbound email. Delivery problems are reported in the outcome, never raised.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> EmailOutcome;
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Sends through the Resend HTTP API; without an API key every message is
/// logged instead of sent.
pub struct ResendEmailSender {
    client: Client,
    api_key: Option<String>,
    from: String,
}

impl ResendEmailSender {
    pub fn new(api_key: Option<String>, from: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, message: EmailMessage) -> EmailOutcome {
        let Some(api_key) = &self.api_key else {
            tracing::info!(
                to = %message.to,
                subject = %message.subject,
                "No email API key configured, simulating email"
            );
            return EmailOutcome::simulated();
        };

        let body = ResendRequest {
            from: &self.from,
            to: [message.to.as_str()],
            subject: &message.subject,
            html: &message.html,
        };

        match self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                tracing::info!(to = %message.to, "Email sent");
                EmailOutcome::sent()
            }
            Ok(response) => {
                let status = response.status();
                let detail = response.text().await.unwrap_or_default();
                tracing::error!(to = %message.to, %status, %detail, "Email API rejected message");
                EmailOutcome::failed()
            }
            Err(e) => {
                tracing::error!(to = %message.to, error = %e, "Failed to reach email API");
                EmailOutcome::failed()
            }
        }
    }
}

pub fn judge_invitation(
    to: &str,
    judge_name: Option<&str>,
    category_name: &str,
    invite_link: &str,
) -> EmailMessage {
    let greeting = judge_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("there");
    let greeting = escape_html(greeting);
    let category_label = escape_html(category_name);
    let link = escape_html(invite_link);

    let html = format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #1f2937; line-height: 1.6;">
    <h2>You're invited to judge</h2>
    <p>Hi {greeting},</p>
    <p>You have been invited to judge the <strong>{category_label}</strong> category.</p>
    <p>Use the link below to review the submissions and enter your scores. No account or password is needed.</p>
    <p>
      <a href="{link}" style="display: inline-block; padding: 12px 24px; background: #2563eb; color: #ffffff; text-decoration: none; border-radius: 6px;">Start judging</a>
    </p>
    <p style="font-size: 13px; color: #6b7280;">Or paste this link into your browser: {link}</p>
  </body>
</html>"#
    );

    EmailMessage {
        to: to.to_string(),
        subject: format!("You're invited to judge {category_name}"),
        html,
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulates_without_api_key() {
        let sender = ResendEmailSender::new(None, "Awards <onboarding@resend.dev>".to_string());
        let outcome = sender
            .send(judge_invitation(
                "judge@example.com",
                None,
                "Best AI Innovation",
                "http://localhost:3000/judge/abc",
            ))
            .await;

        assert_eq!(outcome, EmailOutcome::simulated());
    }

    #[test]
    fn test_invitation_template() {
        let message = judge_invitation(
            "grace@example.com",
            Some("Grace"),
            "Best AI Innovation",
            "http://localhost:3000/judge/abc",
        );

        assert_eq!(message.to, "grace@example.com");
        assert!(message.subject.contains("Best AI Innovation"));
        assert!(message.html.contains("Hi Grace,"));
        assert!(message.html.contains("<strong>Best AI Innovation</strong>"));
        assert!(message.html.contains(r#"href="http://localhost:3000/judge/abc""#));
    }

    #[test]
    fn test_invitation_greets_unnamed_judge() {
        let message = judge_invitation("x@example.com", Some("  "), "Cat", "link");
        assert!(message.html.contains("Hi there,"));
    }

    #[test]
    fn test_invitation_escapes_names() {
        let message = judge_invitation(
            "ada@example.com",
            Some("Ada <b>&</b>"),
            "R&D <Tools>",
            "http://localhost:3000/judge/abc",
        );

        assert!(message.html.contains("Hi Ada &lt;b&gt;&amp;&lt;/b&gt;,"));
        assert!(message.html.contains("<strong>R&amp;D &lt;Tools&gt;</strong>"));
        assert!(!message.html.contains("<Tools>"));
        assert_eq!(message.subject, "You're invited to judge R&D <Tools>");
    }
}
