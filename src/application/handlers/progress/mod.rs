//! Progress engine - topic state and the denormalized plan roll-up.
//!
//! All operations here touch a single plan aggregate through the
//! convergent-retry save. Completion toggles are open to the creator and
//! enrolled users; structural topic edits are creator-only.

mod add_topic;
mod remove_topic;
mod set_topic_completion;
mod update_topic;

pub use add_topic::{AddTopicCommand, AddTopicHandler};
pub use remove_topic::{RemoveTopicCommand, RemoveTopicHandler};
pub use set_topic_completion::{SetTopicCompletionCommand, SetTopicCompletionHandler};
pub use update_topic::{UpdateTopicCommand, UpdateTopicHandler};
