//! Entity contract modules
//!
//! One module per entity, each declaring four contracts: the stored record,
//! the create input, the update input (identifier required, everything else
//! optional), and the search input (an alias of
//! [`SearchInput`](crate::search::SearchInput) over the entity's sort-key
//! enum).

mod challenge;
mod eco_activity;
mod feedback;
mod notification;
mod resource;
mod user;
mod user_challenge;
mod user_goal;

pub use challenge::{
    Challenge, ChallengeSortKey, CreateChallengeInput, SearchChallengeInput, UpdateChallengeInput,
};
pub use eco_activity::{
    CreateEcoActivityInput, EcoActivity, EcoActivitySortKey, SearchEcoActivityInput,
    UpdateEcoActivityInput,
};
pub use feedback::{
    CreateFeedbackAndSupportInput, FeedbackAndSupport, FeedbackSortKey,
    SearchFeedbackAndSupportInput, UpdateFeedbackAndSupportInput,
};
pub use notification::{
    CreateNotificationInput, Notification, NotificationSortKey, SearchNotificationInput,
    UpdateNotificationInput,
};
pub use resource::{
    CreateResourceInput, Resource, ResourceSortKey, SearchResourceInput, UpdateResourceInput,
};
pub use user::{CreateUserInput, SearchUserInput, UpdateUserInput, User, UserSortKey};
pub use user_challenge::{
    CreateUserChallengeInput, SearchUserChallengeInput, UpdateUserChallengeInput, UserChallenge,
    UserChallengeSortKey,
};
pub use user_goal::{
    CreateUserGoalInput, SearchUserGoalInput, UpdateUserGoalInput, UserGoal, UserGoalSortKey,
};
