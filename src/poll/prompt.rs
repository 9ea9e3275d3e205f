use super::types::PollRequest;

const TASK: &str = "Task: Generate 1 faith-based multiple choice poll question with 4 options, \
clearly numbered, reflecting ethical and belief-oriented choices. \
Dont use markdown language for question. \
Provide options in a JSON format like: [\"Option 1\",\"Option 2\",\"Option 3\",\"Option 4\"].";

/// Builds the message sent to the generation collaborator.
/// The JSON-array and no-markdown instructions are always present; the parser
/// still tolerates replies that ignore them.
pub fn compose(request: &PollRequest) -> String {
    format!(
        "News: {}\nDetails: {}\nSelected Religion: {}\n\n{}\n",
        request.headline, request.details, request.category, TASK
    )
}
