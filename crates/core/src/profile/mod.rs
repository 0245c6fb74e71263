mod email;
mod operations;
mod requests;
mod types;

pub use email::{decode_email_segment, encode_email_segment, DOT_SENTINEL};
pub use operations::profile_result_evicted_by_replacement;
pub use requests::{CorrectionProfileResultPatch, FilterPatch, UserPatch};
pub use types::{
    CorrectionProfileResult, Filter, NewCorrectionProfileResult, NewFilter, NewUser, User,
};
