use huquq_llm::GenerationRequest;

pub struct ResearchGuidancePrompt;

impl ResearchGuidancePrompt {
    pub const OPERATION: &'static str = "research_guidance";

    pub fn get_prompt(topic: &str) -> String {
        format!(
            r#"بصفتك أستاذًا في القانون، قدم إرشادات مفصلة لطالب حقوق حول كيفية بدء بحث علمي حول الموضوع التالي: "{}".
يجب أن تتضمن الإرشادات ما يلي:
1.  نقاط رئيسية للبحث.
2.  منهجية مقترحة (تحليلية، مقارنة، إلخ).
3.  مصادر ومراجع أساسية يمكن الاعتماد عليها (بدون ذكر روابط، فقط أنواع المصادر مثل: الدستور الجزائري، قانون العقوبات، مقالات أكاديمية، إلخ).
4.  نصيحة لتجنب السرقات العلمية.

قدم الإجابة باللغة العربية وبتنسيق Markdown."#,
            topic
        )
    }

    pub fn get_request(topic: &str) -> GenerationRequest {
        GenerationRequest::new(Self::OPERATION, Self::get_prompt(topic))
    }
}
