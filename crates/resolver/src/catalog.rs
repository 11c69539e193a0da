//! Flattening version groups into one ordered sequence

use papermc_errors::Error;
use papermc_types::{ReleaseVersion, VersionGroups};
use std::collections::BTreeSet;

/// Merge every group's identifiers into one list, oldest first
///
/// Group keys and the order inside each group are ignored. Identifiers that
/// appear in more than one group are listed once.
///
/// # Errors
///
/// Returns `EmptyInput` if the groups hold no identifiers at all.
pub fn flatten(groups: &VersionGroups) -> Result<Vec<String>, Error> {
    flatten_ids(groups.values().flatten())
}

/// Order an arbitrary collection of identifiers, oldest first
///
/// # Errors
///
/// Returns `EmptyInput` if `ids` is empty.
pub fn flatten_ids<I>(ids: I) -> Result<Vec<String>, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let ordered: BTreeSet<ReleaseVersion> = ids
        .into_iter()
        .map(|id| ReleaseVersion::parse(id.as_ref()))
        .collect();

    if ordered.is_empty() {
        return Err(Error::EmptyInput);
    }

    Ok(ordered.into_iter().map(String::from).collect())
}
