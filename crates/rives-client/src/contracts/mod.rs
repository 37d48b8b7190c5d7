mod bindings;
mod config;
mod submitter;

pub use bindings::{InputAddedFilter, InputBox};
pub use config::SubmitterConfig;
pub use submitter::{
    parse_payload_hex, submission_message, GameplaySubmitter, SubmissionReceipt,
    INVALID_PAYLOAD_MESSAGE, SUBMITTED_MESSAGE,
};
