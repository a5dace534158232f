use crate::domain::ConversionRequest;

/// Build the single user prompt sent to the completion service.
///
/// The label and the message are embedded verbatim; the label is not checked
/// against the known set.
pub fn conversion_prompt(request: &ConversionRequest) -> String {
    let mbti_type = request.mbti_type();
    format!(
        "あなたはMBTIの専門家です。以下のメッセージを、相手のMBTIタイプである「{mbti_type}」の人が受け入れやすいように、\
その性格特性（例: {mbti_type}の人は論理的、感情的、内向的、外向的など）を考慮して、より丁寧で効果的な表現に変換してください。\
必要に応じて絵文字を使用してください（必ずしもつける必要はありません）。変換後のメッセージのみを出力してください。\n\n\
元のメッセージ:\n\"{message}\"",
        message = request.message(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str, mbti_type: &str) -> ConversionRequest {
        ConversionRequest::new(Some(message), Some(mbti_type)).unwrap()
    }

    #[test]
    fn test_prompt_embeds_label_and_message() {
        let prompt = conversion_prompt(&request("明日の会議は延期します", "INFP"));
        assert!(prompt.contains("「INFP」"));
        assert!(prompt.contains("INFPの人は"));
        assert!(prompt.ends_with("元のメッセージ:\n\"明日の会議は延期します\""));
    }

    #[test]
    fn test_prompt_asks_for_rewrite_only() {
        let prompt = conversion_prompt(&request("hi", "ENTJ"));
        assert!(prompt.contains("絵文字"));
        assert!(prompt.contains("変換後のメッセージのみを出力してください"));
    }

    #[test]
    fn test_prompt_passes_unknown_label_through() {
        let prompt = conversion_prompt(&request("hi", "cat person"));
        assert!(prompt.contains("「cat person」"));
    }

    #[test]
    fn test_prompt_keeps_message_verbatim() {
        let message = "  line one\nline \"two\"  ";
        let prompt = conversion_prompt(&request(message, "ISTP"));
        assert!(prompt.contains(message));
    }
}
