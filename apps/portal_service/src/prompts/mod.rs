pub mod discussion_topic_prompt;
pub mod integrity_analysis_prompt;
pub mod research_guidance_prompt;
