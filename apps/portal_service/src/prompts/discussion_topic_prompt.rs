use huquq_llm::{GenerationRequest, OutputContract};
use serde_json::json;

pub struct DiscussionTopicPrompt;

impl DiscussionTopicPrompt {
    pub const OPERATION: &'static str = "discussion_topic";

    pub fn get_contract() -> OutputContract {
        OutputContract::new(
            Self::OPERATION,
            json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "عنوان موضوع النقاش باللغة العربية.",
                        "minLength": 1,
                        "pattern": "\\S"
                    },
                    "content": {
                        "type": "string",
                        "description": "مقدمة قصيرة لموضوع النقاش، تطرح السؤال الرئيسي أو الإشكالية للنقاش.",
                        "minLength": 1,
                        "pattern": "\\S"
                    }
                },
                "required": ["title", "content"]
            }),
        )
    }

    pub fn get_prompt() -> String {
        "اقترح موضوع نقاش جديد ومثير للجدل لطلاب كلية الحقوق في الجزائر. \
يجب أن يكون متعلقًا بالقانون الجزائري الحديث أو التحديات القانونية المعاصرة."
            .to_string()
    }

    pub fn get_request() -> GenerationRequest {
        GenerationRequest::new(Self::OPERATION, Self::get_prompt()).with_contract(Self::get_contract())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_requires_title_and_content() {
        let contract = DiscussionTopicPrompt::get_contract();
        assert_eq!(contract.schema()["required"], json!(["title", "content"]));
        assert!(contract
            .validate(r#"{"title": "العنوان", "content": "الإشكالية"}"#)
            .is_ok());
        assert!(contract.validate(r#"{"content": "الإشكالية"}"#).is_err());
    }

    #[test]
    fn request_is_structured_and_mentions_algerian_law() {
        let request = DiscussionTopicPrompt::get_request();
        assert!(request.contract().is_some());
        assert!(request.prompt().contains("القانون الجزائري"));
        assert!(request.prompt().contains("الجزائر"));
    }
}
