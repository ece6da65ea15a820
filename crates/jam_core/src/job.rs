use crate::Job;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobDirection {
    Exporting,
    Importing,
}

impl JobDirection {
    pub fn label(self) -> &'static str {
        match self {
            JobDirection::Exporting => "Exporting",
            JobDirection::Importing => "Importing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgressView {
    pub direction: JobDirection,
    pub message: String,
    pub label: String,
}

/// Progress line for the job touching `current`, if any.
pub fn job_progress(job: Option<&Job>, current: &str) -> Option<JobProgressView> {
    let job = job?;
    let direction = if job.source_collection_id == current {
        JobDirection::Exporting
    } else {
        JobDirection::Importing
    };
    let label = if job.message.is_empty() {
        direction.label().to_string()
    } else {
        format!("{} {}", direction.label(), job.message)
    };
    Some(JobProgressView {
        direction,
        message: job.message.clone(),
        label,
    })
}
