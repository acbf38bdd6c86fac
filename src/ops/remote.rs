//! Requests and reply post-processing for operations backed by the
//! completion service.

use crate::llm::LlmRequest;

pub const EMAIL_SENDER_INSTRUCTION: &str = "Extract the sender's email address.";
pub const CREDIT_CARD_INSTRUCTION: &str = "Extract the credit card number from this image.";
pub const SIMILAR_COMMENTS_INSTRUCTION: &str = "Find the most similar pair of comments.";

/// Media type sent with the card image.
pub const CARD_MEDIA_TYPE: &str = "image/png";

pub fn email_sender_request(email: &str) -> LlmRequest {
    LlmRequest::text(EMAIL_SENDER_INSTRUCTION, email)
}

pub fn credit_card_request(image: Vec<u8>) -> LlmRequest {
    LlmRequest::image(CREDIT_CARD_INSTRUCTION, CARD_MEDIA_TYPE, image)
}

/// Comments are sent one per line, without their original terminators.
pub fn similar_comments_request(comments: &str) -> LlmRequest {
    let joined = comments.lines().collect::<Vec<_>>().join("\n");
    LlmRequest::text(SIMILAR_COMMENTS_INSTRUCTION, joined)
}

pub fn email_sender_output(reply: &str) -> String {
    reply.trim().to_string()
}

/// Card digits with every whitespace character removed.
pub fn credit_card_output(reply: &str) -> String {
    reply.chars().filter(|c| !c.is_whitespace()).collect()
}

/// The reply split into lines and rejoined with `\n`.
pub fn similar_comments_output(reply: &str) -> String {
    reply.lines().collect::<Vec<_>>().join("\n")
}
