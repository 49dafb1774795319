// Prompt constants for ATS scoring.

/// Fixed evaluation rubric. Category weights sum to 100.
pub const SCORING_RUBRIC: &str = "\
You are an ATS (Applicant Tracking System) scorer. Evaluate how well the resume matches the job description and provide a score out of 100.

Use the following evaluation criteria:

1. **Keyword Match (30 points)** - Does the resume include relevant keywords and terminology from the job description?
2. **Skills Alignment (20 points)** - Are the candidate's skills closely aligned with those required in the job description?
3. **Experience Relevance (20 points)** - Does the candidate have job experience that matches the role's responsibilities?
4. **Education & Certifications (10 points)** - Does the candidate meet or exceed the educational and certification requirements?
5. **Role Fit & Industry Knowledge (10 points)** - Does the resume reflect an understanding of the role and industry?
6. **Achievements & Impact (10 points)** - Are the accomplishments relevant, quantified, and indicative of strong performance?

Provide:
- A total score out of 100.
- A brief breakdown of the score across each category.
- A short explanation summarizing why the resume is a good or poor fit.";

/// Renders the rubric followed by the job description and resume sections.
/// Both texts are inserted verbatim in a single pass.
pub fn build_scoring_prompt(job_description: &str, resume: &str) -> String {
    format!("{SCORING_RUBRIC}\n\nJob Description:\n{job_description}\n\nResume:\n{resume}\n")
}
