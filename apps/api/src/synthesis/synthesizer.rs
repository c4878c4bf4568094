//! Resume synthesis: pluggable, trait-based producer of the customized resume.
//!
//! Default: `TemplateSynthesizer` (fixed layout, deterministic, no I/O).
//! `AppState` holds an `Arc<dyn ResumeSynthesizer>`; a smarter backend can be
//! swapped in at startup without touching the workflow state machine.

use crate::models::job::JobRecord;

pub const OUTPUT_FILENAME: &str = "customized_resume.txt";
pub const OUTPUT_MIME: &str = "text/plain; charset=utf-8";

/// Implementations must be pure: identical inputs give identical output.
pub trait ResumeSynthesizer: Send + Sync {
    fn synthesize(&self, resume_text: &str, job: &JobRecord) -> String;
}

/// Fills the job title, company and requirement list into a fixed resume layout,
/// followed by the original resume text.
pub struct TemplateSynthesizer;

impl ResumeSynthesizer for TemplateSynthesizer {
    fn synthesize(&self, resume_text: &str, job: &JobRecord) -> String {
        format!(
            "CUSTOMIZED RESUME\n\
             \n\
             TARGET ROLE\n\
             {title} at {company} ({location})\n\
             \n\
             PROFESSIONAL SUMMARY\n\
             Experienced professional with skills matching {title} requirements.\n\
             \n\
             HIGHLIGHTED SKILLS\n\
             {skills}\n\
             \n\
             KEYWORDS\n\
             {keywords}\n\
             \n\
             ORIGINAL RESUME\n\
             {resume}\n",
            title = job.title,
            company = job.company,
            location = job.location,
            skills = job.requirements.join(", "),
            keywords = job.keywords.join(", "),
            resume = resume_text.trim(),
        )
    }
}
