use huquq_llm::GenerationRequest;

pub struct IntegrityAnalysisPrompt;

impl IntegrityAnalysisPrompt {
    pub const OPERATION: &'static str = "integrity_analysis";

    pub fn get_prompt(text: &str) -> String {
        format!(
            r#"قم بتحليل النص التالي من منظور أكاديمي لمساعدة طالب حقوق على تحسين كتابته وضمان الأمانة العلمية. لا تصدر حكمًا حول ما إذا كان النص مسروقًا أم لا، بل قدم ملاحظات بناءة.
التحليل يجب أن يركز على:
1.  **وضوح الأسلوب**: هل الأفكار معروضة بوضوح ومنطقية؟
2.  **أصالة التعبير**: هل هناك جمل أو عبارات شائعة جدًا يمكن إعادة صياغتها بأسلوب شخصي أكثر؟
3.  **اقتراحات للتحسين**: قدم أمثلة على كيفية إعادة صياغة بعض الجمل لتقوية الحجة أو جعلها أكثر أكاديمية.
4.  **تذكير بالإسناد**: نبه الطالب بلطف إلى ضرورة إسناد أي أفكار أو معلومات ليست من بنات أفكاره إلى مصادرها الأصلية.

النص المراد تحليله:
---
{}
---

قدم التحليل باللغة العربية وبتنسيق Markdown."#,
            text
        )
    }

    pub fn get_request(text: &str) -> GenerationRequest {
        GenerationRequest::new(Self::OPERATION, Self::get_prompt(text))
    }
}
