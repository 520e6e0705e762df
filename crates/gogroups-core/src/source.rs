use std::fmt::Display;
use std::future::Future;

use crate::payload::GroupsPayload;

/// Where the group list comes from.
///
/// One call is one request; implementations must not retry. The error's
/// display text is what ends up in the user-visible error log, so it should
/// be the failure payload itself rather than a wrapped description.
pub trait DataSource {
    type Error: Display;

    fn fetch_groups(&self) -> impl Future<Output = Result<GroupsPayload, Self::Error>> + Send;
}
