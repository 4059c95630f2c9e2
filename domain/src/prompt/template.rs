//! Prompt templates for the draft / critique / synthesis flow

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt for the primary provider's first answer
    pub fn draft(question: &str) -> String {
        format!(
            "Given the user question: '{}', provide a detailed answer.",
            question
        )
    }

    /// Prompt asking the secondary provider to enhance the draft
    pub fn critique(question: &str, draft: &str) -> String {
        format!(
            r#"User Question: {question}
Initial Response: {draft}

Analyze the above response and enhance it by:
1. Adding any missing important information
2. Correcting any inaccuracies
3. Making it more comprehensive if needed

Provide a single, unified response that incorporates both the original insights and your enhancements.
Do not mention this analysis or that the response was enhanced."#
        )
    }

    /// Prompt asking the primary provider to merge draft and critique
    pub fn synthesis(question: &str, draft: &str, critique: &str) -> String {
        format!(
            r#"Based on:
1. Original user question: {question}
2. Initial analysis: {draft}
3. Enhanced analysis: {critique}

Create a single, coherent response that combines the best insights from both analyses.
The response should be clear, concise, and directly address the user's question.
Do not mention that this is a combined response or reference either AI model."#
        )
    }
}
